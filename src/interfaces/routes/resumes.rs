use actix_web::web;
use crate::handlers::{export, resumes};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/resumes")
            .service(
                web::resource("")
                    .route(web::post().to(resumes::create_resume))
                    .route(web::get().to(resumes::list_resumes))
            )
            .service(
                web::resource("/{resume_id}")
                    .route(web::get().to(resumes::get_resume))
                    .route(web::patch().to(resumes::update_resume))
                    .route(web::delete().to(resumes::delete_resume))
            )
            .service(
                web::resource("/{resume_id}/bundle")
                    .route(web::get().to(export::resume_bundle))
            )
            .service(
                web::resource("/{resume_id}/export")
                    .route(web::get().to(export::export_resume))
            )
    );
}

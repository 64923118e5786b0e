use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod json_error;
mod resumes;
mod sections;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(resumes::config_routes)
            .configure(sections::config_routes)
    );

    cfg.configure(json_error::config_routes);
}

use actix_web::{web, Scope};

use crate::{
    entities::{
        achievement::AchievementFields, certification::CertificationFields, education::EducationFields,
        experience::ExperienceFields, project::ProjectFields, section::SectionFields, skill::SkillFields,
    },
    handlers::sections,
    AppSectionHandler, AppState,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(section_scope::<EducationFields>("/education"))
        .service(section_scope::<ExperienceFields>("/experience"))
        .service(section_scope::<ProjectFields>("/projects"))
        .service(section_scope::<SkillFields>("/skills"))
        .service(section_scope::<CertificationFields>("/certifications"))
        .service(section_scope::<AchievementFields>("/achievements"));
}

fn section_scope<F>(path: &str) -> Scope
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    web::scope(path)
        .service(
            web::resource("")
                .route(web::post().to(sections::create_section::<F>))
                .route(web::get().to(sections::list_sections::<F>))
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(sections::get_section::<F>))
                .route(web::put().to(sections::update_section::<F>))
                .route(web::delete().to(sections::delete_section::<F>))
        )
}

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;
pub mod shared_repos;

pub use domain::{entities, formatters, use_cases};
pub use infrastructure::{auth, db, pdf};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use entities::{
    achievement::AchievementFields, certification::CertificationFields, education::EducationFields,
    experience::ExperienceFields, project::ProjectFields, skill::SkillFields,
};
use pdf::renderer::{DocumentRenderer, RenderOptions};
use shared_repos::{SharedRepositories, SharedResumeRepo};
use use_cases::{export::ExportHandler, resumes::ResumeHandler, sections::SectionHandler};

pub type AppResumeHandler = ResumeHandler<SharedResumeRepo>;
pub type AppExportHandler = ExportHandler<SharedResumeRepo>;
pub type AppSectionHandler<F> = SectionHandler<F, SharedResumeRepo>;

pub struct AppState {
    pub resume_handler: AppResumeHandler,
    pub export_handler: AppExportHandler,
    pub education_handler: AppSectionHandler<EducationFields>,
    pub experience_handler: AppSectionHandler<ExperienceFields>,
    pub project_handler: AppSectionHandler<ProjectFields>,
    pub skill_handler: AppSectionHandler<SkillFields>,
    pub certification_handler: AppSectionHandler<CertificationFields>,
    pub achievement_handler: AppSectionHandler<AchievementFields>,
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, repos: SharedRepositories) -> Self {
        let resume_repo = repos.resume_repo;
        let renderer = DocumentRenderer::new(RenderOptions { paper: config.pdf_paper });

        AppState {
            resume_handler: ResumeHandler::new(resume_repo.clone()),
            export_handler: ExportHandler::new(resume_repo.clone(), renderer),
            education_handler: SectionHandler::new(repos.education_repo, resume_repo.clone()),
            experience_handler: SectionHandler::new(repos.experience_repo, resume_repo.clone()),
            project_handler: SectionHandler::new(repos.project_repo, resume_repo.clone()),
            skill_handler: SectionHandler::new(repos.skill_repo, resume_repo.clone()),
            certification_handler: SectionHandler::new(repos.certification_repo, resume_repo.clone()),
            achievement_handler: SectionHandler::new(repos.achievement_repo, resume_repo),
            jwt_service: JwtService::new(config),
        }
    }
}

macro_rules! section_handler_ref {
    ($fields:ty, $field:ident) => {
        impl AsRef<AppSectionHandler<$fields>> for AppState {
            fn as_ref(&self) -> &AppSectionHandler<$fields> {
                &self.$field
            }
        }
    };
}

section_handler_ref!(EducationFields, education_handler);
section_handler_ref!(ExperienceFields, experience_handler);
section_handler_ref!(ProjectFields, project_handler);
section_handler_ref!(SkillFields, skill_handler);
section_handler_ref!(CertificationFields, certification_handler);
section_handler_ref!(AchievementFields, achievement_handler);

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    entities::{
        achievement::AchievementFields, certification::CertificationFields, education::EducationFields,
        experience::ExperienceFields, project::ProjectFields, skill::SkillFields,
    },
    repositories::{
        memory::InMemoryStore,
        resume::ResumeRepository,
        section::SectionRepository,
        sqlx_repo::{SqlxResumeRepo, SqlxSectionRepo},
    },
};

pub type SharedResumeRepo = Arc<dyn ResumeRepository>;
pub type SharedSectionRepo<F> = Arc<dyn SectionRepository<F>>;

/// One handle per table, backed either by PostgreSQL or by the in-process store.
#[derive(Clone)]
pub struct SharedRepositories {
    pub resume_repo: SharedResumeRepo,
    pub education_repo: SharedSectionRepo<EducationFields>,
    pub experience_repo: SharedSectionRepo<ExperienceFields>,
    pub project_repo: SharedSectionRepo<ProjectFields>,
    pub skill_repo: SharedSectionRepo<SkillFields>,
    pub certification_repo: SharedSectionRepo<CertificationFields>,
    pub achievement_repo: SharedSectionRepo<AchievementFields>,
}

impl SharedRepositories {
    pub fn postgres(pool: PgPool) -> Self {
        SharedRepositories {
            resume_repo: Arc::new(SqlxResumeRepo::new(pool.clone())),
            education_repo: Arc::new(SqlxSectionRepo::new(pool.clone())),
            experience_repo: Arc::new(SqlxSectionRepo::new(pool.clone())),
            project_repo: Arc::new(SqlxSectionRepo::new(pool.clone())),
            skill_repo: Arc::new(SqlxSectionRepo::new(pool.clone())),
            certification_repo: Arc::new(SqlxSectionRepo::new(pool.clone())),
            achievement_repo: Arc::new(SqlxSectionRepo::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();

        SharedRepositories {
            resume_repo: Arc::new(store.clone()),
            education_repo: Arc::new(store.clone()),
            experience_repo: Arc::new(store.clone()),
            project_repo: Arc::new(store.clone()),
            skill_repo: Arc::new(store.clone()),
            certification_repo: Arc::new(store.clone()),
            achievement_repo: Arc::new(store),
        }
    }
}

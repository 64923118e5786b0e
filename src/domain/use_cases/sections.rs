use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::section::{NewSection, Section, SectionFields},
    errors::AppError,
    repositories::{resume::ResumeRepository, section::SectionRepository},
    use_cases::ownership::OwnershipGuard,
};

/// CRUD for one section type. Every path resolves the parent resume through the
/// guard before the section table is touched.
pub struct SectionHandler<F, R>
where
    F: SectionFields,
    R: ResumeRepository,
{
    pub section_repo: Arc<dyn SectionRepository<F>>,
    guard: OwnershipGuard<R>,
}

impl<F, R> SectionHandler<F, R>
where
    F: SectionFields,
    R: ResumeRepository,
{
    pub fn new(section_repo: Arc<dyn SectionRepository<F>>, resume_repo: R) -> Self {
        SectionHandler {
            section_repo,
            guard: OwnershipGuard::new(resume_repo),
        }
    }

    fn prepare(mut fields: F) -> Result<F, AppError> {
        fields.normalize();
        fields.validate()?;
        Ok(fields)
    }

    pub async fn create(&self, requester: &Uuid, data: NewSection<F>) -> Result<Section<F>, AppError> {
        let fields = Self::prepare(data.fields)?;
        self.guard.authorize(requester, data.resume_id).await?;

        let section = self.section_repo.create(data.resume_id, &fields).await?;
        tracing::info!(kind = F::KIND.label(), id = section.id, resume_id = section.resume_id, "section created");
        Ok(section)
    }

    /// One resume's sections, or all of the requester's when no resume is given.
    pub async fn list(&self, requester: &Uuid, resume_id: Option<i64>) -> Result<Vec<Section<F>>, AppError> {
        match resume_id {
            Some(resume_id) => {
                self.guard.authorize(requester, resume_id).await?;
                self.section_repo.list_by_resume(resume_id).await
            }
            None => self.section_repo.list_for_owner(requester).await,
        }
    }

    pub async fn get(&self, requester: &Uuid, id: i64) -> Result<Section<F>, AppError> {
        let section = self.section_repo.get(id).await?;
        self.guard.authorize_child(requester, section).await
    }

    /// Full replacement of the section's fields; the parent resume cannot change.
    pub async fn update(&self, requester: &Uuid, id: i64, fields: F) -> Result<Section<F>, AppError> {
        let fields = Self::prepare(fields)?;
        self.get(requester, id).await?;

        self.section_repo.update(id, &fields).await
    }

    pub async fn delete(&self, requester: &Uuid, id: i64) -> Result<(), AppError> {
        self.get(requester, id).await?;
        self.section_repo.delete(id).await
    }
}

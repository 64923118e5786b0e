use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::resume::{NewResume, Resume, ResumeCreatedResponse, UpdateResumeRequest},
    errors::AppError,
    repositories::resume::ResumeRepository,
    use_cases::ownership::OwnershipGuard,
};

pub struct ResumeHandler<R>
where
    R: ResumeRepository + Clone,
{
    pub resume_repo: R,
    guard: OwnershipGuard<R>,
}

impl<R> ResumeHandler<R>
where
    R: ResumeRepository + Clone,
{
    pub fn new(resume_repo: R) -> Self {
        let guard = OwnershipGuard::new(resume_repo.clone());
        ResumeHandler { resume_repo, guard }
    }

    /// Creates a resume owned by the requester
    pub async fn create_resume(
        &self,
        requester: &Uuid,
        data: NewResume,
    ) -> Result<ResumeCreatedResponse, AppError> {
        data.validate()?;

        let insert = data.prepare_for_insert(*requester);
        let resume = self.resume_repo.create_resume(&insert).await?;

        Ok(ResumeCreatedResponse {
            id: resume.id,
            uuid: resume.uuid,
            message: "Resume created successfully".to_string(),
        })
    }

    pub async fn list_resumes(&self, requester: &Uuid) -> Result<Vec<Resume>, AppError> {
        self.resume_repo.list_resumes(requester).await
    }

    pub async fn get_resume(&self, requester: &Uuid, id: i64) -> Result<Resume, AppError> {
        self.guard.authorize(requester, id).await
    }

    /// Applies a partial update; absent fields are left untouched, `null` clears them
    pub async fn update_resume(
        &self,
        requester: &Uuid,
        id: i64,
        patch: &UpdateResumeRequest,
    ) -> Result<Resume, AppError> {
        patch.validate()?;

        let mut resume = self.guard.authorize(requester, id).await?;
        resume.apply_patch(patch);

        self.resume_repo.update_resume(&resume).await
    }

    /// Deletes the resume together with every section attached to it
    pub async fn delete_resume(&self, requester: &Uuid, id: i64) -> Result<(), AppError> {
        self.guard.authorize(requester, id).await?;
        self.resume_repo.delete_resume(id).await
    }
}

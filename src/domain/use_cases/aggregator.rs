use uuid::Uuid;

use crate::{
    entities::bundle::ResumeBundle,
    errors::AppError,
    repositories::resume::ResumeRepository,
    use_cases::ownership::OwnershipGuard,
};

/// Loads a resume and its six collections as one ordered, read-consistent bundle.
pub struct ResumeAggregator<R>
where
    R: ResumeRepository + Clone,
{
    resume_repo: R,
    guard: OwnershipGuard<R>,
}

impl<R> ResumeAggregator<R>
where
    R: ResumeRepository + Clone,
{
    pub fn new(resume_repo: R) -> Self {
        let guard = OwnershipGuard::new(resume_repo.clone());
        ResumeAggregator { resume_repo, guard }
    }

    pub async fn assemble(&self, resume_id: i64, requester: &Uuid) -> Result<ResumeBundle, AppError> {
        self.guard.authorize(requester, resume_id).await?;

        // The resume may be deleted between the ownership check and the snapshot.
        self.resume_repo
            .load_bundle(resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))
    }
}

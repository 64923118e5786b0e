use uuid::Uuid;

use crate::{
    entities::{
        resume::Resume,
        section::{Section, SectionFields},
    },
    errors::AppError,
    repositories::resume::ResumeRepository,
};

/// Single place where access to a resume, or to anything hanging off one, is decided.
///
/// A resume that does not exist and a resume owned by someone else produce the same
/// `NotFound`, so callers cannot probe for other users' records.
#[derive(Clone)]
pub struct OwnershipGuard<R> {
    resume_repo: R,
}

impl<R: ResumeRepository> OwnershipGuard<R> {
    pub fn new(resume_repo: R) -> Self {
        OwnershipGuard { resume_repo }
    }

    pub async fn authorize(&self, requester: &Uuid, resume_id: i64) -> Result<Resume, AppError> {
        match self.resume_repo.get_resume(resume_id).await? {
            Some(resume) if resume.owner_id == *requester => Ok(resume),
            Some(_) => {
                tracing::debug!(resume_id, %requester, "requester does not own resume");
                Err(resume_not_found())
            }
            None => Err(resume_not_found()),
        }
    }

    /// Same rule for a section, applied through its parent resume.
    pub async fn authorize_child<F: SectionFields>(
        &self,
        requester: &Uuid,
        child: Option<Section<F>>,
    ) -> Result<Section<F>, AppError> {
        let not_found = || AppError::NotFound(format!("{} not found", F::KIND.label()));
        let child = child.ok_or_else(not_found)?;

        match self.authorize(requester, child.resume_id).await {
            Ok(_) => Ok(child),
            Err(AppError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(e),
        }
    }
}

fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found".into())
}

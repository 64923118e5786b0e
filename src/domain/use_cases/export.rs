use actix_web::web;
use uuid::Uuid;

use crate::{
    entities::bundle::ResumeBundle,
    errors::AppError,
    pdf::renderer::{export_filename, export_filename_utf8, DocumentRenderer},
    repositories::resume::ResumeRepository,
    use_cases::aggregator::ResumeAggregator,
};

#[derive(Debug)]
pub struct ResumeExport {
    pub filename: String,
    /// Set only when the title has letters the ASCII `filename` had to drop.
    pub utf8_filename: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct ExportHandler<R>
where
    R: ResumeRepository + Clone,
{
    pub aggregator: ResumeAggregator<R>,
    renderer: DocumentRenderer,
}

impl<R> ExportHandler<R>
where
    R: ResumeRepository + Clone,
{
    pub fn new(resume_repo: R, renderer: DocumentRenderer) -> Self {
        ExportHandler {
            aggregator: ResumeAggregator::new(resume_repo),
            renderer,
        }
    }

    pub async fn bundle(&self, resume_id: i64, requester: &Uuid) -> Result<ResumeBundle, AppError> {
        self.aggregator.assemble(resume_id, requester).await
    }

    /// Authorizes, aggregates, then renders on the blocking pool.
    pub async fn export(&self, resume_id: i64, requester: &Uuid) -> Result<ResumeExport, AppError> {
        let bundle = self.aggregator.assemble(resume_id, requester).await?;
        let filename = export_filename(&bundle.resume);
        let utf8_filename = Some(export_filename_utf8(&bundle.resume)).filter(|name| *name != filename);
        let renderer = self.renderer;

        let bytes = web::block(move || renderer.render(&bundle))
            .await
            .map_err(|e| AppError::InternalError(format!("Render task failed: {}", e)))?
            .inspect_err(|e| tracing::error!(resume_id, error = %e, "resume render failed"))?;

        tracing::info!(resume_id, size = bytes.len(), "resume exported");
        Ok(ResumeExport { filename, utf8_filename, bytes })
    }
}

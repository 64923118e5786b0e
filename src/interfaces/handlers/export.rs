use actix_web::{
    http::header::{Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue},
    web, HttpResponse, Responder,
};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::Requester, AppState};

/// The resume with every section, ordered the way the document prints them.
#[instrument(skip(state))]
pub async fn resume_bundle(
    requester: Requester,
    state: web::Data<AppState>,
    resume_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let bundle = state.export_handler
        .bundle(resume_id.into_inner(), requester.id())
        .await?;
    Ok(HttpResponse::Ok().json(bundle))
}

#[instrument(skip(state))]
pub async fn export_resume(
    requester: Requester,
    state: web::Data<AppState>,
    resume_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let export = state.export_handler
        .export(resume_id.into_inner(), requester.id())
        .await?;

    let mut parameters = vec![DispositionParam::Filename(export.filename)];
    if let Some(name) = export.utf8_filename {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".into()),
            language_tag: None,
            value: name.into_bytes(),
        }));
    }

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters,
        })
        .body(export.bytes))
}

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::resume::{NewResume, UpdateResumeRequest},
    errors::AppError,
    use_cases::extractors::Requester,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn create_resume(
    requester: Requester,
    state: web::Data<AppState>,
    data: web::Json<NewResume>,
) -> Result<impl Responder, AppError> {
    let created = state.resume_handler
        .create_resume(requester.id(), data.into_inner())
        .await?;

    tracing::info!(resume_id = created.id, "resume created");
    Ok(HttpResponse::Created().json(created))
}

#[instrument(skip(state))]
pub async fn list_resumes(
    requester: Requester,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let resumes = state.resume_handler.list_resumes(requester.id()).await?;
    Ok(HttpResponse::Ok().json(resumes))
}

#[instrument(skip(state))]
pub async fn get_resume(
    requester: Requester,
    state: web::Data<AppState>,
    resume_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let resume = state.resume_handler
        .get_resume(requester.id(), resume_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(resume))
}

#[instrument(skip(state, patch))]
pub async fn update_resume(
    requester: Requester,
    state: web::Data<AppState>,
    resume_id: web::Path<i64>,
    patch: web::Json<UpdateResumeRequest>,
) -> Result<impl Responder, AppError> {
    let resume = state.resume_handler
        .update_resume(requester.id(), resume_id.into_inner(), &patch)
        .await?;
    Ok(HttpResponse::Ok().json(resume))
}

#[instrument(skip(state))]
pub async fn delete_resume(
    requester: Requester,
    state: web::Data<AppState>,
    resume_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let resume_id = resume_id.into_inner();
    state.resume_handler.delete_resume(requester.id(), resume_id).await?;

    tracing::info!(resume_id, "resume deleted");
    Ok(HttpResponse::NoContent().finish())
}

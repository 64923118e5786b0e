use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::section::{NewSection, SectionFields, SectionListQuery},
    errors::AppError,
    use_cases::extractors::Requester,
    AppSectionHandler, AppState,
};

// One set of handlers serves all six section collections; the fields type picks
// the handler out of the shared state.

#[instrument(skip(state, data), fields(kind = F::KIND.label()))]
pub async fn create_section<F>(
    requester: Requester,
    state: web::Data<AppState>,
    data: web::Json<NewSection<F>>,
) -> Result<impl Responder, AppError>
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    let handler: &AppSectionHandler<F> = state.get_ref().as_ref();
    let section = handler.create(requester.id(), data.into_inner()).await?;
    Ok(HttpResponse::Created().json(section))
}

#[instrument(skip(state), fields(kind = F::KIND.label()))]
pub async fn list_sections<F>(
    requester: Requester,
    state: web::Data<AppState>,
    query: web::Query<SectionListQuery>,
) -> Result<impl Responder, AppError>
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    let handler: &AppSectionHandler<F> = state.get_ref().as_ref();
    let sections = handler.list(requester.id(), query.resume).await?;
    Ok(HttpResponse::Ok().json(sections))
}

#[instrument(skip(state), fields(kind = F::KIND.label()))]
pub async fn get_section<F>(
    requester: Requester,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError>
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    let handler: &AppSectionHandler<F> = state.get_ref().as_ref();
    let section = handler.get(requester.id(), id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(section))
}

/// Full replacement of the entry's fields; the owning resume never changes.
#[instrument(skip(state, data), fields(kind = F::KIND.label()))]
pub async fn update_section<F>(
    requester: Requester,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    data: web::Json<F>,
) -> Result<impl Responder, AppError>
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    let handler: &AppSectionHandler<F> = state.get_ref().as_ref();
    let section = handler.update(requester.id(), id.into_inner(), data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(section))
}

#[instrument(skip(state), fields(kind = F::KIND.label()))]
pub async fn delete_section<F>(
    requester: Requester,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError>
where
    F: SectionFields,
    AppState: AsRef<AppSectionHandler<F>>,
{
    let handler: &AppSectionHandler<F> = state.get_ref().as_ref();
    handler.delete(requester.id(), id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

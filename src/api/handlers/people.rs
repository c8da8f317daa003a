use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::Json,
};
use std::sync::Arc;

use super::read_json;
use crate::api::errors::{ApiError, ErrorBody};
use crate::application::dto::{CreatePersonRequest, PersonResponse, UpdatePersonRequest};
use crate::application::use_cases::{
    CreatePersonUseCase, DeletePersonUseCase, ListAllPeopleUseCase, ListPersonByIdUseCase,
    UpdatePersonUseCase,
};

/// POST /api/people
#[utoipa::path(
    post,
    path = "/api/people",
    tag = "people",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse,
            headers(("Location" = String, description = "URL of the new person"))),
        (status = 400, description = "Invalid person", body = ErrorBody)
    )
)]
pub async fn create_person_handler(
    State(use_case): State<Arc<CreatePersonUseCase>>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<PersonResponse>), ApiError> {
    let request = read_json(payload)?;
    let person = use_case.execute(request).await?;

    let location = format!("/api/people/{}", person.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(person)))
}

/// GET /api/people
#[utoipa::path(
    get,
    path = "/api/people",
    tag = "people",
    responses((status = 200, description = "All people", body = [PersonResponse]))
)]
pub async fn list_people_handler(
    State(use_case): State<Arc<ListAllPeopleUseCase>>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// GET /api/people/{id}
#[utoipa::path(
    get,
    path = "/api/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person", body = PersonResponse),
        (status = 404, description = "No such person", body = ErrorBody)
    )
)]
pub async fn get_person_handler(
    State(use_case): State<Arc<ListPersonByIdUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<PersonResponse>, ApiError> {
    Ok(Json(use_case.execute(&id).await?))
}

/// PUT /api/people/{id}
#[utoipa::path(
    put,
    path = "/api/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "Person id")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Updated person", body = PersonResponse),
        (status = 404, description = "No such person", body = ErrorBody)
    )
)]
pub async fn update_person_handler(
    State(use_case): State<Arc<UpdatePersonUseCase>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> Result<Json<PersonResponse>, ApiError> {
    let request = read_json(payload)?;
    Ok(Json(use_case.execute(&id, request).await?))
}

/// DELETE /api/people/{id}
#[utoipa::path(
    delete,
    path = "/api/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such person", body = ErrorBody)
    )
)]
pub async fn delete_person_handler(
    State(use_case): State<Arc<DeletePersonUseCase>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

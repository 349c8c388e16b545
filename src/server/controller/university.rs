use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, user::UniversityDto},
    server::{error::Error, model::app::AppState, service::university::UniversityService},
};

pub static UNIVERSITY_TAG: &str = "university";

/// List universities ordered by name
#[utoipa::path(
    get,
    path = "/api/universities/",
    tag = UNIVERSITY_TAG,
    responses(
        (status = 200, description = "Universities", body = Vec<UniversityDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_universities(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let universities = UniversityService::new(&state.db).get_universities().await?;

    Ok((StatusCode::OK, Json(universities)))
}

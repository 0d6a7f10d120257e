//! Folder read and delete handlers.

use axum::Json;
use axum::extract::{Path, State};

use foldergate_entity::dashboard::DashboardRef;
use foldergate_service::folder::{DeletedFolder, FolderView};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FolderView>>, ApiError> {
    let folder = state
        .folder_service
        .get_folder(&auth, DashboardRef::Id(id))
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/slug/{slug}
pub async fn get_folder_by_slug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<FolderView>>, ApiError> {
    let folder = state
        .folder_service
        .get_folder(&auth, DashboardRef::Slug(slug))
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedFolder>>, ApiError> {
    let deleted = state
        .folder_service
        .delete_folder(&auth, DashboardRef::Id(id))
        .await?;
    Ok(Json(ApiResponse::ok(deleted)))
}

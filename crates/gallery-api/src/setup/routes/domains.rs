//! Photo route group.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn photo_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/photos", API_PREFIX),
            get(handlers::photo_get::list_photos).post(handlers::photo_upload::upload_photos),
        )
        .route(
            &format!("{}/photos/{{id}}", API_PREFIX),
            get(handlers::photo_get::get_photo).delete(handlers::photo_delete::delete_photo),
        )
        .route(
            &format!("{}/photos/{{id}}/file", API_PREFIX),
            get(handlers::photo_download::download_photo),
        )
}

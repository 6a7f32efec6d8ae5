//! OpenAPI documentation.
//! Handler annotations use the literal `/api/v0` prefix; it is rewritten to
//! `crate::constants::API_VERSION` when the document is served.

use utoipa::OpenApi;

use crate::constants::API_VERSION;
use crate::error;
use crate::handlers;
use gallery_core::models;

/// Prefix used in handler path annotations (utoipa requires compile-time literals).
const OPENAPI_PATH_PLACEHOLDER: &str = "/api/v0";

fn transform_openapi_paths(spec: &mut utoipa::openapi::OpenApi, version: &str) {
    let replacement = format!("/api/{}", version);
    if OPENAPI_PATH_PLACEHOLDER == replacement {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        let new_key = key.replacen(OPENAPI_PATH_PLACEHOLDER, &replacement, 1);
        spec.paths.paths.insert(new_key, item);
    }
}

/// Returns the OpenAPI document for the current API version.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    transform_openapi_paths(&mut spec, API_VERSION);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gallery API",
        version = "0.1.0",
        description = "Photo gallery API (v0): upload, browse, download and delete photos. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::photo_upload::upload_photos,
        handlers::photo_get::list_photos,
        handlers::photo_get::get_photo,
        handlers::photo_download::download_photo,
        handlers::photo_delete::delete_photo,
    ),
    components(
        schemas(
            models::PhotoResponse,
            models::UploadResult,
            models::UploadBatchResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "photos", description = "Photo upload, listing, delivery and deletion"),
    )
)]
pub struct ApiDoc;

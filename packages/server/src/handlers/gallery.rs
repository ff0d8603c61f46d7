use axum::body::Body;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::models::image::{BlobPayload, UploadOutcome, UploadRequest};
use crate::state::AppState;
use crate::utils::filename::content_disposition_value;
use crate::views;

const GALLERY_PATH: &str = "/";
const UPLOAD_PATH: &str = "/upload";

#[utoipa::path(
    get,
    path = "/",
    tag = "Gallery",
    operation_id = "listGallery",
    summary = "Gallery page",
    description = "Ensures both containers exist and renders every stored original as a \
        thumbnail linking to the full image. No pagination.",
    responses(
        (status = 200, description = "Gallery HTML", body = String, content_type = "text/html"),
        (status = 500, description = "Storage backend error", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gallery(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let images = state.gallery.list_images().await?;
    Ok(Html(views::gallery_page(&images)))
}

#[utoipa::path(
    get,
    path = "/upload",
    tag = "Gallery",
    operation_id = "uploadForm",
    summary = "Upload form",
    responses(
        (status = 200, description = "Upload form HTML", body = String, content_type = "text/html"),
    ),
)]
pub async fn upload_form() -> Html<String> {
    Html(views::upload_page())
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Gallery",
    operation_id = "submitUpload",
    summary = "Upload an image",
    description = "Accepts a single `file` multipart field with a png, jpg, jpeg or gif \
        filename. The original is stored as `{uuid}-{sanitized filename}` and a JPEG \
        thumbnail as `thumb_{name}`. Invalid submissions redirect back to the form.",
    request_body(content_type = "multipart/form-data", description = "Image file in the `file` field"),
    responses(
        (status = 302, description = "Stored; redirect to `/`, or rejected; redirect to `/upload`"),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Thumbnail generation or storage failed", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn submit_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!("Upload rejected: {rejection}");
            return Ok(redirect(UPLOAD_PATH));
        }
    };

    let request = match read_upload(multipart).await {
        Ok(request) => request,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Ok(e.into_response()),
        Err(e) => {
            debug!("Upload rejected: {e}");
            return Ok(redirect(UPLOAD_PATH));
        }
    };

    match state.gallery.upload(request).await? {
        UploadOutcome::Stored(_) => Ok(redirect(GALLERY_PATH)),
        UploadOutcome::Rejected(_) => Ok(redirect(UPLOAD_PATH)),
    }
}

#[utoipa::path(
    get,
    path = "/image/{name}",
    tag = "Gallery",
    operation_id = "getImage",
    summary = "Stream an original image",
    description = "Content type is derived from the extension: `jpg` is `image/jpeg`, \
        any other `ext` is `image/{ext}`.",
    params(("name" = String, Path, description = "Stored image name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "No such image", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage backend error", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let payload = state.gallery.fetch_original(&name).await?;
    blob_response(payload)
}

#[utoipa::path(
    get,
    path = "/thumbnail/{name}",
    tag = "Gallery",
    operation_id = "getThumbnail",
    summary = "Stream the thumbnail of an image",
    description = "Takes the original image name; the thumbnail is always `image/jpeg`.",
    params(("name" = String, Path, description = "Stored image name (not the thumbnail name)")),
    responses(
        (status = 200, description = "JPEG thumbnail bytes"),
        (status = 404, description = "No such thumbnail", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage backend error", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let payload = state.gallery.fetch_thumbnail(&name).await?;
    blob_response(payload)
}

/// Collect the first `file` part that carries a filename.
///
/// Parts without a filename are plain form fields, not uploads.
async fn read_upload(mut multipart: Multipart) -> Result<UploadRequest, MultipartError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") || request.filename.is_some() {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        request.content = field.bytes().await?;
        request.filename = Some(filename);
    }

    Ok(request)
}

fn redirect(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn blob_response(payload: BlobPayload) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, payload.content_type)
        .header(header::CONTENT_LENGTH, payload.content.len())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&payload.download_name),
        )
        .body(Body::from(payload.content))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

use crate::handlers::error::{bad_request, handle_storage_error};
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Result as ActixResult};
use common::DownloadQuery;
use tokio_util::io::ReaderStream;
use tracing::info;

/// Stream a stored file back to the client
pub async fn download(
    query: web::Query<DownloadQuery>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let requested = query
        .into_inner()
        .file
        .filter(|name| !name.is_empty())
        .ok_or_else(|| bad_request("File parameter is required"))?;

    info!(file = ?requested, "GET /download - Request received");

    // Traversal and symlink escapes are rejected inside open_file
    let stored = state
        .storage
        .open_file(&requested)
        .await
        .map_err(handle_storage_error)?;

    let filename = stored
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| requested.clone());

    info!(
        path = ?stored.path,
        bytes = stored.len,
        "GET /download - Streaming file"
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::octet_stream())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .no_chunking(stored.len)
        .streaming(ReaderStream::new(stored.file)))
}

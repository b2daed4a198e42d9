use crate::constants::{FILE_TOO_LARGE, UPLOAD_DRAIN_FACTOR};
use crate::handlers::error::{handle_error, handle_storage_error};
use crate::state::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Result as ActixResult};
use common::constants::UPLOAD_FIELD_NAME;
use common::file_utils;
use futures::TryStreamExt;
use std::path::PathBuf;
use storage::Storage;
use tracing::{info, warn};

/// What became of the `file` part
enum Received {
    Stored {
        name: String,
        path: PathBuf,
        bytes: u64,
    },
    TooLarge {
        filename: String,
        received: u64,
        /// Whether the whole part was read
        drained: bool,
    },
}

/// Bytes of an oversized part the server is willing to read and discard
pub fn drain_limit(max_file_size: u64) -> u64 {
    max_file_size.saturating_mul(UPLOAD_DRAIN_FACTOR)
}

/// Handle file upload (multipart/form-data, single `file` part)
pub async fn upload(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let max_file_size = state.settings.max_file_size;

    match receive_file(&mut payload, &*state.storage, max_file_size).await? {
        Received::Stored { name, path, bytes } => {
            info!(path = ?path, bytes, "POST /upload - File uploaded");
            Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(format!("File uploaded successfully: {}", name)))
        }
        Received::TooLarge {
            filename,
            received,
            drained,
        } => {
            warn!(
                filename = ?filename,
                received,
                max_file_size,
                drained,
                "POST /upload - Rejected oversized file"
            );
            let mut response = HttpResponse::BadRequest();
            if !drained {
                // The rest of the body is still on the wire
                response.force_close();
            }
            Ok(response
                .content_type("text/plain; charset=utf-8")
                .body(FILE_TOO_LARGE))
        }
    }
}

/// Stream the first `file` part into storage.
///
/// Every other part is drained and discarded. An oversized `file` part never
/// reaches its final name.
async fn receive_file(
    payload: &mut Multipart,
    storage: &dyn Storage,
    max_file_size: u64,
) -> ActixResult<Received> {
    let mut received = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| handle_error("Error retrieving file", e))?
    {
        if received.is_some() || field.name() != Some(UPLOAD_FIELD_NAME) {
            drain(&mut field).await?;
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned)
            .ok_or_else(|| handle_error("Error retrieving file", "part has no filename"))?;

        // Use structured logging with Debug formatter (?), which escapes control characters
        info!(filename = ?filename, "POST /upload - Request received");

        let outcome = stream_field(&mut field, storage, filename, max_file_size).await?;
        if let Received::TooLarge { drained: false, .. } = outcome {
            return Ok(outcome);
        }
        received = Some(outcome);
    }

    received.ok_or_else(|| handle_error("Error retrieving file", "no file part in request"))
}

async fn stream_field(
    field: &mut Field,
    storage: &dyn Storage,
    filename: String,
    max_file_size: u64,
) -> ActixResult<Received> {
    let name = file_utils::base_name(&filename).to_string();
    let mut upload = Some(
        storage
            .begin_upload(&name)
            .await
            .map_err(handle_storage_error)?,
    );
    let drain_limit = drain_limit(max_file_size);
    let mut received: u64 = 0;

    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| handle_error("Error retrieving file", e))?
    {
        received += chunk.len() as u64;
        if received > max_file_size {
            // Dropping the pending upload removes its temporary file
            upload = None;
            if received > drain_limit {
                return Ok(Received::TooLarge {
                    filename,
                    received,
                    drained: false,
                });
            }
            continue;
        }
        if let Some(upload) = upload.as_mut() {
            upload
                .write_chunk(&chunk)
                .await
                .map_err(handle_storage_error)?;
        }
    }

    match upload {
        Some(upload) => {
            let path = upload.commit().await.map_err(handle_storage_error)?;
            Ok(Received::Stored {
                name,
                path,
                bytes: received,
            })
        }
        None => Ok(Received::TooLarge {
            filename,
            received,
            drained: true,
        }),
    }
}

async fn drain(field: &mut Field) -> ActixResult<()> {
    while field
        .try_next()
        .await
        .map_err(|e| handle_error("Error retrieving file", e))?
        .is_some()
    {}
    Ok(())
}

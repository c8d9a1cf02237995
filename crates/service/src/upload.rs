use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Body;

use crate::errors::ClientError;

/// Form field the server reads the image from.
pub const IMAGE_FIELD: &str = "image";

const CHUNK_SIZE: usize = 64 * 1024;

/// Upload progress callback: `(bytes_sent, total_bytes)`.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Percentage for a progress report; nothing to send counts as done.
pub fn percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((100 * loaded.min(total) + total / 2) / total) as u8
}

/// Read `path` and wrap it as the multipart `image` field.
///
/// The body is streamed in chunks; `progress` fires as each chunk is handed to
/// the connection.
pub async fn image_form(path: &Path, progress: Option<ProgressFn>) -> Result<Form, ClientError> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(image_form_from_bytes(file_name, data, progress))
}

pub fn image_form_from_bytes(file_name: String, data: Vec<u8>, progress: Option<ProgressFn>) -> Form {
    let total = data.len() as u64;
    if total == 0 {
        // an empty body yields no chunks
        if let Some(report) = &progress {
            report(0, 0);
        }
    }
    let chunks: Vec<Vec<u8>> = data.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(report) = &progress {
            report(sent, total);
        }
        Ok::<_, std::io::Error>(chunk)
    }));
    let part = Part::stream_with_length(Body::wrap_stream(stream), total).file_name(file_name);
    Form::new().part(IMAGE_FIELD, part)
}

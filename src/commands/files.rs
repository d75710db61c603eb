use std::path::Path;

use super::AppContext;
use crate::ffmpeg::Prober;
use crate::types::*;

// Copy a video into the upload directory and probe it. `filename` overrides
// the name reported back, e.g. the client-side name of a staged upload.
pub async fn upload_video<P, E>(
    ctx: &AppContext<P, E>,
    source: &Path,
    filename: Option<&str>,
) -> Result<VideoUploadResponse, ErrorEnvelope>
where
    P: Prober,
{
    let (stored, info) = ctx.store.import(source, &ctx.prober).await?;

    let filename = match filename.filter(|name| !name.trim().is_empty()) {
        Some(name) => name.to_string(),
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| stored.file_name()),
    };

    Ok(VideoUploadResponse {
        video_url: stored.url(),
        video_id: stored.video_id,
        filename,
        duration: info.duration,
        width: info.width,
        height: info.height,
    })
}

// Remove a video and its thumbnails
pub async fn delete_video<P, E>(
    ctx: &AppContext<P, E>,
    video_id: &str,
) -> Result<DeleteResponse, ErrorEnvelope> {
    let deleted: Vec<String> = ctx
        .store
        .delete(video_id)
        .await?
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    Ok(DeleteResponse {
        count: deleted.len(),
        deleted,
    })
}

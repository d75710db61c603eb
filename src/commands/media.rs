use std::path::Path;

use log::info;
use tokio::process::Command;

use super::{ensure, AppContext};
use crate::cancel::CancellationToken;
use crate::ffmpeg::{FrameExtractor, Prober};
use crate::grid::dimension;
use crate::thumbnails::ThumbnailJob;
use crate::types::*;

// Check if FFmpeg is available
pub async fn check_ffmpeg<P, E>(ctx: &AppContext<P, E>) -> Result<bool, ErrorEnvelope> {
    let output = Command::new(&ctx.settings.ffmpeg)
        .arg("-version")
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => Ok(true),
        _ => Err(ErrorEnvelope::new(
            "FFMPEG_NOT_FOUND",
            "FFmpeg is not installed or not found in PATH",
            "Install FFmpeg or point GRIDSEEK_FFMPEG at the binary",
        )),
    }
}

// Probe a media file anywhere on disk
pub async fn probe_media<P, E>(ctx: &AppContext<P, E>, path: &Path) -> Result<VideoInfo, ErrorEnvelope>
where
    P: Prober,
{
    Ok(ctx.prober.probe(path).await?)
}

// Info for an uploaded video
pub async fn video_info<P, E>(
    ctx: &AppContext<P, E>,
    video_id: &str,
) -> Result<VideoInfoResponse, ErrorEnvelope>
where
    P: Prober,
{
    let stored = ctx.store.locate(video_id).await?;
    let info = ctx.prober.probe(&stored.path).await?;

    Ok(VideoInfoResponse {
        video_id: stored.video_id.clone(),
        video_url: stored.url(),
        filename: stored.file_name(),
        info,
    })
}

/// Build the thumbnail grid for an uploaded video.
///
/// Cells whose extraction fails are left out of `thumbnails`; the call only
/// fails for bad input, an unknown video or a failed probe.
pub async fn generate_video_thumbnails<P, E>(
    ctx: &AppContext<P, E>,
    request: ThumbnailGenerateRequest,
    cancel: &CancellationToken,
) -> Result<ThumbnailGenerateResponse, ErrorEnvelope>
where
    P: Prober,
    E: FrameExtractor + 'static,
{
    ensure(
        (1..=10).contains(&request.columns),
        "columns must be between 1 and 10",
    )?;
    ensure(request.seconds_per_cell > 0.0, "seconds_per_cell must be positive")?;
    ensure(
        (80..=320).contains(&request.thumb_width),
        "thumb_width must be between 80 and 320",
    )?;
    ensure(
        (45..=180).contains(&request.thumb_height),
        "thumb_height must be between 45 and 180",
    )?;

    let stored = ctx.store.locate(&request.video_id).await?;
    let info = ctx.prober.probe(&stored.path).await?;

    ctx.store.ensure_dirs().await?;

    let job = ThumbnailJob {
        source: stored.path.clone(),
        output_dir: ctx.store.thumbnail_dir().to_path_buf(),
        video_id: stored.video_id.clone(),
        video_duration: info.duration,
        columns: request.columns,
        seconds_per_cell: request.seconds_per_cell,
        width: request.thumb_width,
        height: request.thumb_height,
    };
    let report = ctx.orchestrator.generate(&job, cancel).await?;
    let dims = dimension(info.duration, request.columns, request.seconds_per_cell)?;

    if !report.failed.is_empty() {
        info!(
            "{}: cells without thumbnails: {:?}",
            stored.video_id,
            report.failed.iter().map(|f| f.index).collect::<Vec<_>>()
        );
    }

    let thumbnails: Vec<ThumbnailEntry> = report
        .cells
        .iter()
        .map(|cell| ThumbnailEntry {
            index: cell.index,
            row: cell.row,
            col: cell.col,
            timestamp: cell.timestamp,
            url: cell.url(),
        })
        .collect();

    Ok(ThumbnailGenerateResponse {
        video_id: stored.video_id,
        rows: dims.rows,
        columns: dims.columns,
        // Cells actually produced, not the nominal grid size.
        total_cells: thumbnails.len(),
        seconds_per_cell: request.seconds_per_cell,
        duration: info.duration,
        thumbnails,
    })
}

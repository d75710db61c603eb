//! Thumbnail grid generation.
//!
//! [`CellPlan`] walks the grid lazily and yields one [`CellJob`] per cell
//! whose midpoint still falls inside the video. [`ThumbnailOrchestrator`]
//! feeds those jobs to a [`FrameExtractor`] through a bounded pool. A cell
//! whose extraction fails or times out is dropped and the rest of the grid
//! carries on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::task::{self, JoinError, JoinSet};

use crate::cancel::CancellationToken;
use crate::error::{GridError, GridResult};
use crate::ffmpeg::{ExtractRequest, FrameExtractor};
use crate::grid::{dimension, GridDimensions};

pub const THUMBNAIL_URL_PREFIX: &str = "/thumbnails/";

/// `{video_id}_{index:04}.jpg`. Deterministic so a re-run overwrites.
pub fn thumbnail_file_name(video_id: &str, index: u64) -> String {
    format!("{}_{:04}.jpg", video_id, index)
}

pub fn thumbnail_url(video_id: &str, index: u64) -> String {
    format!("{}{}", THUMBNAIL_URL_PREFIX, thumbnail_file_name(video_id, index))
}

/// Everything needed to build one video's thumbnail grid.
#[derive(Debug, Clone)]
pub struct ThumbnailJob {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub video_id: String,
    pub video_duration: f64,
    pub columns: u32,
    pub seconds_per_cell: f64,
    /// Pixel box each thumbnail is scaled and padded into.
    pub width: u32,
    pub height: u32,
}

/// A planned extraction for one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellJob {
    pub index: u64,
    pub row: u64,
    pub col: u32,
    /// Midpoint of the cell, in seconds.
    pub timestamp: f64,
    pub output: PathBuf,
}

/// A successfully extracted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailCell {
    pub index: u64,
    pub row: u64,
    pub col: u32,
    pub timestamp: f64,
    pub location: PathBuf,
}

impl ThumbnailCell {
    pub fn url(&self) -> String {
        let name = self
            .location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}{}", THUMBNAIL_URL_PREFIX, name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    pub index: u64,
    pub timestamp: f64,
    pub reason: String,
}

/// Outcome of a thumbnail job. `cells` is ordered by index.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub dimensions: GridDimensions,
    pub cells: Vec<ThumbnailCell>,
    pub failed: Vec<CellFailure>,
    pub cancelled: bool,
}

/// Lazy, single-pass sequence of cell jobs for a grid.
///
/// Stops at the first cell whose midpoint is at or past the end of the
/// video, so the tail of the nominal grid beyond the content is never
/// attempted.
#[derive(Debug)]
pub struct CellPlan {
    next_index: u64,
    dimensions: GridDimensions,
    seconds_per_cell: f64,
    video_duration: f64,
    video_id: String,
    output_dir: PathBuf,
    exhausted: bool,
}

impl CellPlan {
    pub fn new(job: &ThumbnailJob) -> GridResult<Self> {
        if !(job.video_duration > 0.0) {
            return Err(GridError::invalid(format!(
                "Invalid video duration: {}",
                job.video_duration
            )));
        }
        let dims = dimension(job.video_duration, job.columns, job.seconds_per_cell)?;

        Ok(Self {
            next_index: 0,
            dimensions: dims,
            seconds_per_cell: job.seconds_per_cell,
            video_duration: job.video_duration,
            video_id: job.video_id.clone(),
            output_dir: job.output_dir.clone(),
            exhausted: false,
        })
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn total_cells(&self) -> u64 {
        self.dimensions.total_cells
    }
}

impl Iterator for CellPlan {
    type Item = CellJob;

    fn next(&mut self) -> Option<CellJob> {
        if self.exhausted || self.next_index >= self.dimensions.total_cells {
            return None;
        }

        let index = self.next_index;
        let timestamp = (index as f64 + 0.5) * self.seconds_per_cell;
        if timestamp >= self.video_duration {
            self.exhausted = true;
            return None;
        }
        self.next_index += 1;

        let columns = u64::from(self.dimensions.columns);
        Some(CellJob {
            index,
            row: index / columns,
            col: (index % columns) as u32,
            timestamp,
            output: self
                .output_dir
                .join(thumbnail_file_name(&self.video_id, index)),
        })
    }
}

/// Drives a [`FrameExtractor`] over every cell of a grid.
pub struct ThumbnailOrchestrator<E> {
    extractor: Arc<E>,
    workers: usize,
}

impl<E> ThumbnailOrchestrator<E>
where
    E: FrameExtractor + 'static,
{
    /// `workers` is clamped to at least 1.
    pub fn new(extractor: E, workers: usize) -> Self {
        Self {
            extractor: Arc::new(extractor),
            workers: workers.max(1),
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Extract every cell of `job`'s grid.
    ///
    /// Only invalid job parameters fail the call. Extraction failures end up
    /// in [`GenerationReport::failed`]; cancellation stops new extractions
    /// and returns whatever completed.
    pub async fn generate(
        &self,
        job: &ThumbnailJob,
        cancel: &CancellationToken,
    ) -> GridResult<GenerationReport> {
        let plan = CellPlan::new(job)?;

        info!(
            "generating up to {} thumbnails for {} ({} workers)",
            plan.total_cells(),
            job.video_id,
            self.workers
        );

        let mut report = GenerationReport {
            dimensions: plan.dimensions(),
            cells: Vec::new(),
            failed: Vec::new(),
            cancelled: false,
        };
        let mut in_flight = JoinSet::new();
        // Cells by task, so a task that dies still reports its cell.
        let mut pending: HashMap<task::Id, CellJob> = HashMap::new();

        for cell in plan {
            while in_flight.len() >= self.workers {
                if let Some(joined) = in_flight.join_next_with_id().await {
                    collect(joined, &mut pending, &mut report);
                }
            }
            if cancel.is_cancelled() {
                info!("thumbnail job for {} cancelled before cell {}", job.video_id, cell.index);
                report.cancelled = true;
                break;
            }

            let extractor = Arc::clone(&self.extractor);
            let request = ExtractRequest {
                source: job.source.clone(),
                timestamp: cell.timestamp,
                output: cell.output.clone(),
                width: job.width,
                height: job.height,
            };
            let handle =
                in_flight.spawn(async move { extract_cell(extractor.as_ref(), &request).await });
            pending.insert(handle.id(), cell);
        }

        while let Some(joined) = in_flight.join_next_with_id().await {
            collect(joined, &mut pending, &mut report);
        }

        // Completion order is arbitrary with more than one worker.
        report.cells.sort_by_key(|c| c.index);
        report.failed.sort_by_key(|f| f.index);

        info!(
            "{}: {} thumbnails written, {} failed",
            job.video_id,
            report.cells.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

async fn extract_cell<E: FrameExtractor>(extractor: &E, request: &ExtractRequest) -> GridResult<()> {
    extractor.extract(request).await?;
    if !artifact_exists(&request.output).await {
        return Err(GridError::collaborator(
            "ffmpeg",
            format!("no image written to {}", request.output.display()),
        ));
    }
    Ok(())
}

async fn artifact_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

fn collect(
    joined: Result<(task::Id, GridResult<()>), JoinError>,
    pending: &mut HashMap<task::Id, CellJob>,
    report: &mut GenerationReport,
) {
    let (id, result) = match joined {
        Ok((id, result)) => (id, result),
        Err(e) => {
            let reason = if e.is_panic() {
                "extraction task panicked".to_string()
            } else {
                format!("extraction task did not finish: {}", e)
            };
            (e.id(), Err(GridError::collaborator("ffmpeg", reason)))
        }
    };
    let Some(cell) = pending.remove(&id) else {
        warn!("finished extraction task {} has no cell", id);
        return;
    };

    match result {
        Ok(()) => {
            debug!("cell {} extracted at {:.3}s", cell.index, cell.timestamp);
            report.cells.push(ThumbnailCell {
                index: cell.index,
                row: cell.row,
                col: cell.col,
                timestamp: cell.timestamp,
                location: cell.output,
            });
        }
        Err(e) => {
            warn!("skipping cell {} at {:.3}s: {}", cell.index, cell.timestamp, e);
            report.failed.push(CellFailure {
                index: cell.index,
                timestamp: cell.timestamp,
                reason: e.to_string(),
            });
        }
    }
}

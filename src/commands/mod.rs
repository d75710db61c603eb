pub mod files;
pub mod grid;
pub mod media;

// Re-export all commands so front ends can call them directly
pub use files::*;
pub use grid::*;
pub use media::*;

use crate::config::Settings;
use crate::error::GridError;
use crate::ffmpeg::{FfmpegExtractor, FfprobeProber, FrameExtractor, Prober};
use crate::store::VideoStore;
use crate::thumbnails::ThumbnailOrchestrator;
use crate::types::{ErrorEnvelope, HealthResponse};

pub const SERVICE_NAME: &str = "gridseek";

/// Shared state handed to the video commands.
pub struct AppContext<P = FfprobeProber, E = FfmpegExtractor> {
    pub settings: Settings,
    pub store: VideoStore,
    pub prober: P,
    pub orchestrator: ThumbnailOrchestrator<E>,
}

impl AppContext {
    /// Context running the real `ffprobe`/`ffmpeg` binaries from `settings`.
    pub fn from_settings(settings: Settings) -> Self {
        let prober = settings.prober();
        let extractor = settings.extractor();
        Self::with_collaborators(settings, prober, extractor)
    }
}

impl<P, E> AppContext<P, E>
where
    P: Prober,
    E: FrameExtractor + 'static,
{
    pub fn with_collaborators(settings: Settings, prober: P, extractor: E) -> Self {
        Self {
            store: settings.store(),
            orchestrator: ThumbnailOrchestrator::new(extractor, settings.workers),
            prober,
            settings,
        }
    }
}

/// Check a condition on request input, failing with `INVALID_INPUT`.
pub(crate) fn ensure(condition: bool, message: &str) -> Result<(), ErrorEnvelope> {
    if condition {
        Ok(())
    } else {
        Err(GridError::invalid(message).into())
    }
}

pub fn health() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    }
}

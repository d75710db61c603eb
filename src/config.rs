use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ffmpeg::{get_ffmpeg_path, get_ffprobe_path, FfmpegExtractor, FfprobeProber};
use crate::store::VideoStore;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_WORKERS: usize = 4;

/// Runtime settings: where artifacts live, which binaries to run and how
/// long to wait for them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub upload_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub probe_timeout: Duration,
    /// Limit for a single frame extraction.
    pub extract_timeout: Duration,
    /// Concurrent extractions per thumbnail job. 1 means strictly sequential.
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_data_dir(".")
    }
}

impl Settings {
    /// Settings with `uploads/` and `thumbnails/` under `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            upload_dir: data_dir.join("uploads"),
            thumbnail_dir: data_dir.join("thumbnails"),
            ffmpeg: get_ffmpeg_path(),
            ffprobe: get_ffprobe_path(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn prober(&self) -> FfprobeProber {
        FfprobeProber::new(&self.ffprobe, self.probe_timeout)
    }

    pub fn extractor(&self) -> FfmpegExtractor {
        FfmpegExtractor::new(&self.ffmpeg, self.extract_timeout)
    }

    pub fn store(&self) -> VideoStore {
        VideoStore::new(&self.upload_dir, &self.thumbnail_dir)
    }
}

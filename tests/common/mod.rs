//! Fake collaborators so the orchestration can be tested without ffmpeg.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use gridseek::ffmpeg::{ExtractRequest, FrameExtractor, Prober};
use gridseek::types::VideoInfo;
use gridseek::{CancellationToken, GridError, GridResult};

/// Cell index encoded in a `{id}_{index}.jpg` output path.
pub fn index_of(output: &Path) -> u64 {
    let stem = output.file_stem().unwrap().to_string_lossy().into_owned();
    stem.rsplit('_').next().unwrap().parse().unwrap()
}

#[derive(Default)]
pub struct FakeExtractor {
    /// Cells whose extraction exits with an error.
    pub fail: HashSet<u64>,
    /// Cells whose extraction times out.
    pub time_out: HashSet<u64>,
    /// Cells that "succeed" without writing an image.
    pub no_output: HashSet<u64>,
    /// Cells whose extraction panics.
    pub panic_on: HashSet<u64>,
    /// Per-cell artificial latency.
    pub delay: HashMap<u64, Duration>,
    /// Cancel this token once the given cell has been extracted.
    pub cancel_after: Option<(u64, CancellationToken)>,
    pub calls: Mutex<Vec<(u64, f64)>>,
}

impl FakeExtractor {
    pub fn failing(indices: &[u64]) -> Self {
        Self {
            fail: indices.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn called_indices(&self) -> Vec<u64> {
        let mut calls: Vec<u64> = self.calls.lock().unwrap().iter().map(|c| c.0).collect();
        calls.sort_unstable();
        calls
    }
}

impl FrameExtractor for FakeExtractor {
    async fn extract(&self, request: &ExtractRequest) -> GridResult<()> {
        let index = index_of(&request.output);
        self.calls.lock().unwrap().push((index, request.timestamp));

        if let Some(delay) = self.delay.get(&index) {
            tokio::time::sleep(*delay).await;
        }
        if self.panic_on.contains(&index) {
            panic!("decoder crashed on cell {}", index);
        }
        if self.time_out.contains(&index) {
            return Err(GridError::Timeout {
                tool: "ffmpeg",
                seconds: 10.0,
            });
        }
        if self.fail.contains(&index) {
            return Err(GridError::CollaboratorFailure {
                tool: "ffmpeg",
                message: format!("could not decode frame for cell {}", index),
            });
        }
        if !self.no_output.contains(&index) {
            tokio::fs::write(&request.output, b"\xFF\xD8\xFF").await?;
        }
        if let Some((after, token)) = &self.cancel_after {
            if *after == index {
                token.cancel();
            }
        }
        Ok(())
    }
}

/// Reports the same metadata for every existing file.
pub struct FakeProber {
    pub info: VideoInfo,
    pub fail: bool,
}

impl FakeProber {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            info: VideoInfo {
                duration,
                width: 1280,
                height: 720,
                fps: Some(30.0),
                size_bytes: None,
            },
            fail: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            ..Self::with_duration(0.0)
        }
    }
}

impl Prober for FakeProber {
    async fn probe(&self, path: &Path) -> GridResult<VideoInfo> {
        if !path.exists() {
            return Err(GridError::NotFound(path.display().to_string()));
        }
        if self.fail {
            return Err(GridError::CollaboratorFailure {
                tool: "ffprobe",
                message: "No video stream found".to_string(),
            });
        }
        Ok(self.info.clone())
    }
}

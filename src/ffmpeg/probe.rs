use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use tokio::process::Command;

use super::parsers::parse_probe_output;
use super::run_tool;
use crate::error::{GridError, GridResult};
use crate::types::VideoInfo;

/// Reads duration and frame size from a video file.
pub trait Prober: Send + Sync {
    fn probe(&self, path: &Path) -> impl Future<Output = GridResult<VideoInfo>> + Send;
}

/// [`Prober`] backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    pub ffprobe: PathBuf,
    pub timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            timeout,
        }
    }
}

impl Prober for FfprobeProber {
    async fn probe(&self, path: &Path) -> GridResult<VideoInfo> {
        if !tokio::fs::try_exists(path).await? {
            return Err(GridError::NotFound(format!(
                "Video file not found: {}",
                path.display()
            )));
        }

        let mut command = Command::new(&self.ffprobe);
        command
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path);

        let output = run_tool(command, "ffprobe", self.timeout).await?;
        let info = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;

        debug!(
            "probed {}: {:.3}s {}x{}",
            path.display(),
            info.duration,
            info.width,
            info.height
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let prober = FfprobeProber::new("ffprobe", Duration::from_secs(1));
        let err = prober
            .probe(Path::new("/definitely/not/here.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, GridError::NotFound(_)));
    }
}

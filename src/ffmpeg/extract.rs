use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use super::run_tool;
use crate::error::GridResult;

/// One still frame to pull out of a video.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractRequest {
    pub source: PathBuf,
    /// Seek position in seconds.
    pub timestamp: f64,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ExtractRequest {
    /// Scale into the `width`x`height` box keeping aspect ratio, then pad
    /// the remainder so every thumbnail has the same pixel size.
    pub fn video_filter(&self) -> String {
        format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
            w = self.width,
            h = self.height
        )
    }
}

/// Writes a single frame of a video to an image file.
///
/// Implementations must overwrite an existing file at the output path.
pub trait FrameExtractor: Send + Sync {
    fn extract(&self, request: &ExtractRequest) -> impl Future<Output = GridResult<()>> + Send;
}

/// [`FrameExtractor`] backed by the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    pub ffmpeg: PathBuf,
    pub timeout: Duration,
}

impl FfmpegExtractor {
    pub fn new(ffmpeg: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            timeout,
        }
    }

    fn command(&self, request: &ExtractRequest) -> Command {
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-v", "error", "-y", "-ss"])
            .arg(request.timestamp.to_string())
            .arg("-i")
            .arg(&request.source)
            .args(["-vframes", "1", "-vf"])
            .arg(request.video_filter())
            .args(["-q:v", "3"])
            .arg(&request.output);
        command
    }
}

impl FrameExtractor for FfmpegExtractor {
    async fn extract(&self, request: &ExtractRequest) -> GridResult<()> {
        run_tool(self.command(request), "ffmpeg", self.timeout).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ExtractRequest {
        ExtractRequest {
            source: PathBuf::from("/videos/a1b2c3d4.mp4"),
            timestamp: 22.5,
            output: PathBuf::from("/thumbs/a1b2c3d4_0001.jpg"),
            width: 160,
            height: 90,
        }
    }

    #[test]
    fn filter_scales_then_pads_to_the_box() {
        assert_eq!(
            request().video_filter(),
            "scale=160:90:force_original_aspect_ratio=decrease,pad=160:90:(ow-iw)/2:(oh-ih)/2"
        );
    }

    #[test]
    fn command_seeks_before_input_and_writes_one_frame() {
        let extractor = FfmpegExtractor::new("ffmpeg", Duration::from_secs(10));
        let command = extractor.command(&request());
        let args: Vec<String> = command
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let seek = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(seek < input);
        assert_eq!(args[seek + 1], "22.5");
        assert!(args.contains(&"-y".to_string()));
        assert_eq!(args.last().unwrap(), "/thumbs/a1b2c3d4_0001.jpg");
    }
}

use serde::Deserialize;

use crate::error::{GridError, GridResult};
use crate::types::VideoInfo;

// FFprobe JSON output structures
#[derive(Debug, Deserialize)]
pub struct FFprobeOutput {
    #[serde(default)]
    pub streams: Vec<FFprobeStream>,
    pub format: FFprobeFormat,
}

#[derive(Debug, Deserialize)]
pub struct FFprobeStream {
    #[serde(default)]
    pub codec_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FFprobeFormat {
    pub duration: Option<NumberOrString>,
    pub size: Option<NumberOrString>,
}

/// ffprobe prints most numbers as strings, but not every build does.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parse frame rate string like "30/1" or "30000/1001"
pub fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    let (num, den) = rate_str.split_once('/')?;

    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;

    if den == 0.0 {
        return None;
    }

    Some(num / den)
}

/// Turn raw `ffprobe -print_format json` output into [`VideoInfo`].
pub fn parse_probe_output(stdout: &str) -> GridResult<VideoInfo> {
    let probe_data: FFprobeOutput = serde_json::from_str(stdout).map_err(|e| {
        GridError::collaborator("ffprobe", format!("Failed to parse ffprobe output: {}", e))
    })?;

    let video_stream = probe_data
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| GridError::collaborator("ffprobe", "No video stream found"))?;

    let duration = probe_data
        .format
        .duration
        .as_ref()
        .and_then(NumberOrString::as_f64)
        .filter(|d| d.is_finite())
        .ok_or_else(|| GridError::collaborator("ffprobe", "Could not determine video duration"))?;

    let width = video_stream
        .width
        .ok_or_else(|| GridError::collaborator("ffprobe", "Could not determine video width"))?;

    let height = video_stream
        .height
        .ok_or_else(|| GridError::collaborator("ffprobe", "Could not determine video height"))?;

    let fps = video_stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate);

    let size_bytes = probe_data
        .format
        .size
        .as_ref()
        .and_then(NumberOrString::as_f64)
        .map(|s| s as u64);

    Ok(VideoInfo {
        duration,
        width,
        height,
        fps,
        size_bytes,
    })
}

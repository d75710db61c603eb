use serde::{Deserialize, Serialize};

use crate::error::GridError;

// Error envelope for consistent error handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: &str, hint: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            hint: hint.to_string(),
        }
    }

    /// HTTP-style status a service front end would answer with.
    pub fn status(&self) -> u16 {
        match self.code.as_str() {
            "INVALID_INPUT" => 400,
            "NOT_FOUND" => 404,
            "TIMEOUT" => 504,
            _ => 500,
        }
    }
}

impl From<GridError> for ErrorEnvelope {
    fn from(err: GridError) -> Self {
        let message = err.to_string();
        match &err {
            GridError::InvalidInput(_) => ErrorEnvelope::new(
                "INVALID_INPUT",
                &message,
                "Check the request parameters",
            ),
            GridError::NotFound(_) => ErrorEnvelope::new(
                "NOT_FOUND",
                &message,
                "Upload the video first or check the video id",
            ),
            GridError::CollaboratorFailure { tool: "ffprobe", .. } => ErrorEnvelope::new(
                "FFPROBE_FAILED",
                &message,
                "The file may be corrupted or in an unsupported format",
            ),
            GridError::CollaboratorFailure { .. } => ErrorEnvelope::new(
                "FFMPEG_FAILED",
                &message,
                "Make sure FFmpeg is installed and the source file is readable",
            ),
            GridError::Timeout { .. } => ErrorEnvelope::new(
                "TIMEOUT",
                &message,
                "The file may be very large or the system is overloaded",
            ),
            GridError::Io(_) => ErrorEnvelope::new(
                "IO_ERROR",
                &message,
                "Check disk space and directory permissions",
            ),
        }
    }
}

// Probed video properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

// Grid position
#[derive(Debug, Clone, Deserialize)]
pub struct GridPositionRequest {
    pub rel_x: f64,
    pub rel_y: f64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub video_duration: f64,
    #[serde(default)]
    pub seconds_per_cell: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPositionResponse {
    pub timestamp: f64,
    pub formatted_time: String,
    pub grid_x: u32,
    pub grid_y: u32,
    pub grid_index: u64,
    pub cell_start_time: f64,
    pub cell_end_time: f64,
}

// Grid config
fn default_columns() -> u32 {
    5
}

fn default_seconds_per_cell() -> f64 {
    15.0
}

fn default_thumb_width() -> u32 {
    160
}

fn default_thumb_height() -> u32 {
    90
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfigRequest {
    pub video_duration: f64,
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_seconds_per_cell")]
    pub seconds_per_cell: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfigResponse {
    pub rows: u64,
    pub columns: u32,
    pub total_cells: u64,
    pub seconds_per_cell: f64,
    pub video_duration: f64,
}

// Video upload / info / delete
#[derive(Debug, Clone, Serialize)]
pub struct VideoUploadResponse {
    pub video_id: String,
    pub filename: String,
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoInfoResponse {
    pub video_id: String,
    pub video_url: String,
    pub filename: String,
    #[serde(flatten)]
    pub info: VideoInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub deleted: Vec<String>,
    pub count: usize,
}

// Thumbnail generation
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailGenerateRequest {
    pub video_id: String,
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_seconds_per_cell")]
    pub seconds_per_cell: f64,
    #[serde(default = "default_thumb_width")]
    pub thumb_width: u32,
    #[serde(default = "default_thumb_height")]
    pub thumb_height: u32,
}

impl ThumbnailGenerateRequest {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            columns: default_columns(),
            seconds_per_cell: default_seconds_per_cell(),
            thumb_width: default_thumb_width(),
            thumb_height: default_thumb_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailEntry {
    pub index: u64,
    pub row: u64,
    pub col: u32,
    pub timestamp: f64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailGenerateResponse {
    pub video_id: String,
    pub rows: u64,
    pub columns: u32,
    pub total_cells: usize,
    pub seconds_per_cell: f64,
    pub duration: f64,
    pub thumbnails: Vec<ThumbnailEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

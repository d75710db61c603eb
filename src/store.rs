//! On-disk layout for uploaded videos and their thumbnails.
//!
//! Videos live in the upload directory as `{video_id}.{ext}`; thumbnails
//! live in the thumbnail directory as `{video_id}_{index:04}.jpg`.

use std::path::{Path, PathBuf};

use log::{info, warn};
use uuid::Uuid;

use crate::error::{GridError, GridResult};
use crate::ffmpeg::Prober;
use crate::types::VideoInfo;

pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mkv", "avi", "mov"];

const SHELL_METACHARACTERS: [char; 5] = [';', '&', '|', '`', '$'];

/// A video in the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVideo {
    pub video_id: String,
    pub path: PathBuf,
    /// Lowercase, without the dot.
    pub extension: String,
}

impl StoredVideo {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.video_id, self.extension)
    }

    pub fn url(&self) -> String {
        format!("/uploads/{}", self.file_name())
    }
}

/// Reject empty paths and paths containing shell metacharacters, and make
/// the rest absolute.
pub fn validate_path(path: &Path) -> GridResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(GridError::invalid("Path cannot be empty"));
    }
    if path.to_string_lossy().contains(&SHELL_METACHARACTERS[..]) {
        return Err(GridError::invalid(format!(
            "Invalid characters in path: {}",
            path.display()
        )));
    }
    Ok(std::path::absolute(path)?)
}

/// Video ids become file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_video_id(video_id: &str) -> GridResult<()> {
    let valid = !video_id.is_empty()
        && video_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GridError::invalid(format!("Invalid video id: {:?}", video_id)))
    }
}

/// Fresh 8-character hex id.
pub fn new_video_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn supported_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    VIDEO_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Whether `file_name` is one of `video_id`'s thumbnails.
fn is_thumbnail_of(file_name: &str, video_id: &str) -> bool {
    file_name
        .strip_prefix(video_id)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(".jpg"))
        .is_some_and(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
}

#[derive(Debug, Clone)]
pub struct VideoStore {
    upload_dir: PathBuf,
    thumbnail_dir: PathBuf,
}

impl VideoStore {
    pub fn new(upload_dir: impl Into<PathBuf>, thumbnail_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            thumbnail_dir: thumbnail_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn thumbnail_dir(&self) -> &Path {
        &self.thumbnail_dir
    }

    pub async fn ensure_dirs(&self) -> GridResult<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.thumbnail_dir).await?;
        Ok(())
    }

    /// Copy `source` into the store under a new id and probe it.
    ///
    /// The copy is removed again if probing fails.
    pub async fn import<P: Prober>(
        &self,
        source: &Path,
        prober: &P,
    ) -> GridResult<(StoredVideo, VideoInfo)> {
        let source = validate_path(source)?;
        let extension = supported_extension(&source).ok_or_else(|| {
            GridError::invalid(format!(
                "Unsupported file type: {}",
                source
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ))
        })?;
        if !tokio::fs::try_exists(&source).await? {
            return Err(GridError::NotFound(format!(
                "Video file not found: {}",
                source.display()
            )));
        }

        self.ensure_dirs().await?;

        let video_id = new_video_id();
        let stored = StoredVideo {
            path: self.upload_dir.join(format!("{}.{}", video_id, extension)),
            video_id,
            extension,
        };
        tokio::fs::copy(&source, &stored.path).await?;

        match prober.probe(&stored.path).await {
            Ok(info) => {
                info!(
                    "imported {} as {} ({:.3}s)",
                    source.display(),
                    stored.video_id,
                    info.duration
                );
                Ok((stored, info))
            }
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(&stored.path).await {
                    warn!("could not remove rejected upload {}: {}", stored.path.display(), rm);
                }
                Err(e)
            }
        }
    }

    /// Find the uploaded file for `video_id`, whatever its extension.
    pub async fn locate(&self, video_id: &str) -> GridResult<StoredVideo> {
        validate_video_id(video_id)?;

        for ext in VIDEO_EXTENSIONS {
            let candidate = self.upload_dir.join(format!("{}.{}", video_id, ext));
            if tokio::fs::try_exists(&candidate).await? {
                return Ok(StoredVideo {
                    video_id: video_id.to_string(),
                    path: candidate,
                    extension: ext.to_string(),
                });
            }
        }

        Err(GridError::NotFound(format!("Video not found: {}", video_id)))
    }

    /// Remove the video and all its thumbnails. Returns the removed paths;
    /// an unknown id removes nothing.
    pub async fn delete(&self, video_id: &str) -> GridResult<Vec<PathBuf>> {
        validate_video_id(video_id)?;
        let mut deleted = Vec::new();

        for ext in VIDEO_EXTENSIONS {
            let video_file = self.upload_dir.join(format!("{}.{}", video_id, ext));
            if tokio::fs::try_exists(&video_file).await? {
                tokio::fs::remove_file(&video_file).await?;
                deleted.push(video_file);
            }
        }

        if tokio::fs::try_exists(&self.thumbnail_dir).await? {
            let mut entries = tokio::fs::read_dir(&self.thumbnail_dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name();
                if is_thumbnail_of(&name.to_string_lossy(), video_id) {
                    let path = entry.path();
                    tokio::fs::remove_file(&path).await?;
                    deleted.push(path);
                }
            }
        }

        info!("deleted {} files for {}", deleted.len(), video_id);
        Ok(deleted)
    }
}

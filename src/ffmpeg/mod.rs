//! Adapters for the external `ffprobe` and `ffmpeg` binaries.
//!
//! Both tools are run as subprocesses under a wall-clock limit. A child
//! that outlives its limit is killed when its future is dropped.

pub mod extract;
pub mod parsers;
pub mod paths;
pub mod probe;

use std::process::{Output, Stdio};
use std::time::Duration;

use log::debug;
use tokio::process::Command;

use crate::error::{GridError, GridResult};

pub use extract::{ExtractRequest, FfmpegExtractor, FrameExtractor};
pub use paths::{get_ffmpeg_path, get_ffprobe_path};
pub use probe::{FfprobeProber, Prober};

/// Run `command` to completion within `limit`, treating a non-zero exit as
/// a failure of `tool`.
pub(crate) async fn run_tool(
    mut command: Command,
    tool: &'static str,
    limit: Duration,
) -> GridResult<Output> {
    command.stdin(Stdio::null()).kill_on_drop(true);
    debug!("running {:?}", command.as_std());

    let output = match tokio::time::timeout(limit, command.output()).await {
        Ok(result) => result
            .map_err(|e| GridError::collaborator(tool, format!("Failed to run {}: {}", tool, e)))?,
        Err(_) => {
            return Err(GridError::Timeout {
                tool,
                seconds: limit.as_secs_f64(),
            })
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GridError::collaborator(
            tool,
            format!("{} exited with {}: {}", tool, output.status, stderr.trim()),
        ));
    }

    Ok(output)
}

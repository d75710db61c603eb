use std::path::{Path, PathBuf};

pub const FFMPEG_ENV: &str = "GRIDSEEK_FFMPEG";
pub const FFPROBE_ENV: &str = "GRIDSEEK_FFPROBE";

/// Locate a tool: environment override first, then the common install
/// locations, then whatever `PATH` resolves.
fn locate_tool(name: &str, env_var: &str) -> PathBuf {
    if let Some(path) = std::env::var_os(env_var).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let candidates = [
        format!("/opt/homebrew/bin/{}", name), // Apple Silicon
        format!("/usr/local/bin/{}", name),    // Intel Mac, manual installs
        format!("/usr/bin/{}", name),
    ];

    for path in &candidates {
        if Path::new(path).exists() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(name)
}

/// Get FFmpeg binary path
pub fn get_ffmpeg_path() -> PathBuf {
    locate_tool("ffmpeg", FFMPEG_ENV)
}

/// Get FFprobe binary path
pub fn get_ffprobe_path() -> PathBuf {
    locate_tool("ffprobe", FFPROBE_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_falls_back_to_bare_name() {
        let path = locate_tool("gridseek-no-such-tool", "GRIDSEEK_TEST_UNSET_VAR");
        assert_eq!(path, PathBuf::from("gridseek-no-such-tool"));
    }
}

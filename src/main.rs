use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use gridseek::commands::{self, AppContext};
use gridseek::ffmpeg::{get_ffmpeg_path, get_ffprobe_path};
use gridseek::types::{
    ErrorEnvelope, GridConfigRequest, GridPositionRequest, ThumbnailGenerateRequest,
};
use gridseek::{CancellationToken, Settings};

const CLI_AFTER_HELP: &str = "Examples:\n  gridseek position 0.5 0.3 --grid-width 4 --grid-height 10 --duration 100 --seconds-per-cell 2\n  gridseek config --duration 3600 --columns 5 --seconds-per-cell 15\n  gridseek upload clip.mp4\n  gridseek thumbnails a1b2c3d4 --columns 5 --workers 8";

#[derive(Debug, Parser)]
#[command(
    name = "gridseek",
    version,
    about = "Seek a video from its thumbnail grid",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone)]
struct GlobalOptions {
    /// Show debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    /// Directory holding uploaded videos.
    #[arg(long, env = "GRIDSEEK_UPLOAD_DIR", default_value = "uploads", global = true)]
    upload_dir: PathBuf,

    /// Directory thumbnails are written to.
    #[arg(long, env = "GRIDSEEK_THUMBNAIL_DIR", default_value = "thumbnails", global = true)]
    thumbnail_dir: PathBuf,

    /// ffmpeg binary (defaults to a search of common locations, then PATH).
    #[arg(long, env = "GRIDSEEK_FFMPEG", global = true)]
    ffmpeg: Option<PathBuf>,

    /// ffprobe binary (defaults to a search of common locations, then PATH).
    #[arg(long, env = "GRIDSEEK_FFPROBE", global = true)]
    ffprobe: Option<PathBuf>,

    /// Seconds allowed for one ffprobe call.
    #[arg(long, default_value_t = 30.0, global = true)]
    probe_timeout: f64,

    /// Seconds allowed for one frame extraction.
    #[arg(long, default_value_t = 10.0, global = true)]
    extract_timeout: f64,

    /// Concurrent frame extractions (1 = sequential).
    #[arg(long, env = "GRIDSEEK_WORKERS", default_value_t = 4, global = true)]
    workers: usize,
}

impl GlobalOptions {
    fn settings(&self) -> Result<Settings, ErrorEnvelope> {
        Ok(Settings {
            upload_dir: self.upload_dir.clone(),
            thumbnail_dir: self.thumbnail_dir.clone(),
            ffmpeg: self.ffmpeg.clone().unwrap_or_else(get_ffmpeg_path),
            ffprobe: self.ffprobe.clone().unwrap_or_else(get_ffprobe_path),
            probe_timeout: seconds(self.probe_timeout, "probe-timeout")?,
            extract_timeout: seconds(self.extract_timeout, "extract-timeout")?,
            workers: self.workers.max(1),
        })
    }
}

fn seconds(value: f64, flag: &str) -> Result<Duration, ErrorEnvelope> {
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| {
            ErrorEnvelope::new(
                "INVALID_INPUT",
                &format!("--{} must be a positive number of seconds", flag),
                "Pass a value such as 10 or 2.5",
            )
        })
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a click on the grid to a timestamp and cell.
    Position {
        /// Horizontal click position, 0.0 to 1.0.
        rel_x: f64,
        /// Vertical click position, 0.0 to 1.0.
        rel_y: f64,
        #[arg(long)]
        grid_width: u32,
        #[arg(long)]
        grid_height: u32,
        /// Video duration in seconds.
        #[arg(long)]
        duration: f64,
        /// Seconds each cell covers; omit for proportional mapping.
        #[arg(long)]
        seconds_per_cell: Option<f64>,
    },

    /// Compute the grid shape for a video duration.
    Config {
        #[arg(long)]
        duration: f64,
        #[arg(long, default_value_t = 5)]
        columns: u32,
        #[arg(long, default_value_t = 15.0)]
        seconds_per_cell: f64,
    },

    /// Copy a video into the upload directory.
    Upload {
        path: PathBuf,
        /// Name to report for the upload instead of the file's own.
        #[arg(long)]
        filename: Option<String>,
    },

    /// Generate the thumbnail grid for an uploaded video.
    Thumbnails {
        video_id: String,
        #[arg(long, default_value_t = 5)]
        columns: u32,
        #[arg(long, default_value_t = 15.0)]
        seconds_per_cell: f64,
        #[arg(long, default_value_t = 160)]
        thumb_width: u32,
        #[arg(long, default_value_t = 90)]
        thumb_height: u32,
    },

    /// Show probed information for an uploaded video.
    Info { video_id: String },

    /// Probe any video file on disk.
    Probe { path: PathBuf },

    /// Delete an uploaded video and its thumbnails.
    Delete { video_id: String },

    /// Check that ffmpeg can be run.
    Check,

    /// Report service health.
    Health,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ErrorEnvelope> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ErrorEnvelope::new(
            "SERIALIZE_ERROR",
            &format!("Failed to encode response: {}", e),
            "This is a bug in gridseek",
        )
    })?;
    println!("{}", text);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), ErrorEnvelope> {
    let ctx = AppContext::from_settings(cli.global.settings()?);

    match cli.command {
        Commands::Position {
            rel_x,
            rel_y,
            grid_width,
            grid_height,
            duration,
            seconds_per_cell,
        } => print_json(&commands::grid_position(GridPositionRequest {
            rel_x,
            rel_y,
            grid_width,
            grid_height,
            video_duration: duration,
            seconds_per_cell,
        })?),
        Commands::Config {
            duration,
            columns,
            seconds_per_cell,
        } => print_json(&commands::grid_config(GridConfigRequest {
            video_duration: duration,
            columns,
            seconds_per_cell,
        })?),
        Commands::Upload { path, filename } => print_json(
            &commands::upload_video(&ctx, &path, filename.as_deref()).await?,
        ),
        Commands::Thumbnails {
            video_id,
            columns,
            seconds_per_cell,
            thumb_width,
            thumb_height,
        } => {
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupted, finishing in-flight extractions");
                    on_interrupt.cancel();
                }
            });

            let request = ThumbnailGenerateRequest {
                video_id,
                columns,
                seconds_per_cell,
                thumb_width,
                thumb_height,
            };
            let response = commands::generate_video_thumbnails(&ctx, request, &cancel).await?;
            info!(
                "{} of {} cells rendered",
                response.total_cells,
                response.rows * u64::from(response.columns)
            );
            print_json(&response)
        }
        Commands::Info { video_id } => print_json(&commands::video_info(&ctx, &video_id).await?),
        Commands::Probe { path } => print_json(&commands::probe_media(&ctx, &path).await?),
        Commands::Delete { video_id } => {
            print_json(&commands::delete_video(&ctx, &video_id).await?)
        }
        Commands::Check => print_json(&commands::check_ffmpeg(&ctx).await?),
        Commands::Health => print_json(&commands::health()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(envelope) => {
            match serde_json::to_string_pretty(&envelope) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}: {}", envelope.code, envelope.message),
            }
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "jukebox-rs",
    about = "Terminal music player for a small local catalog with remote fallback",
    long_about = None,
    version,
)]
pub struct Args {
    /// Song id to start with instead of the first catalog entry
    pub song: Option<String>,

    /// Path to TOML config file (overrides default search: ./jukebox.toml, ~/.config/jukebox/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding audio/ and images/covers/ [default: assets]
    #[arg(short, long, value_name = "DIR", env = "JUKEBOX_ASSET_DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Secondary directory searched when the asset directory has no copy of a song
    #[arg(long, value_name = "DIR")]
    pub alternate_audio_dir: Option<PathBuf>,

    /// Hold playback until the first key press
    #[arg(long)]
    pub gesture_gate: bool,

    /// Do not load a song on startup
    #[arg(long)]
    pub no_autoplay: bool,

    /// Output volume between 0.0 and 1.0 [default: 0.7]
    #[arg(short, long)]
    pub volume: Option<f32>,

    /// Directory for rolling log files [default: .logs]
    #[arg(long, value_name = "DIR", env = "JUKEBOX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

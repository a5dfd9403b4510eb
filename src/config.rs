use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::DEFAULT_VOLUME;
use crate::playback::{PlaybackConfig, REMOTE_FALLBACK_URLS};

const DEFAULT_ASSET_DIR: &str = "assets";
const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 300;
const DEFAULT_LOCAL_TIMEOUT_SECS: u64 = 3;
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CELL_WIDTH_PX: u32 = 8;

fn default_alternate_audio_dir(asset_dir: &Path) -> PathBuf {
    dirs::audio_dir().unwrap_or_else(|| asset_dir.join("audio-alt"))
}

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub asset_dir: Option<PathBuf>,
    pub alternate_audio_dir: Option<PathBuf>,
    pub remote_urls: Option<Vec<String>>,
    pub gesture_gate: Option<bool>,
    pub autoplay: Option<bool>,
    pub volume: Option<f32>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub local_timeout_secs: Option<u64>,
    pub remote_timeout_secs: Option<u64>,
    pub cell_width_px: Option<u32>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub asset_dir: PathBuf,
    pub alternate_audio_dir: PathBuf,
    pub remote_urls: Vec<String>,
    pub gesture_gate: bool,
    pub autoplay: bool,
    pub start_song: Option<String>,
    pub volume: f32,
    pub retries: u32,
    pub retry_delay: Duration,
    pub local_timeout: Duration,
    pub remote_timeout: Duration,
    /// Pixel width of one terminal cell, used when the terminal does not report pixels
    pub cell_width_px: u32,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        let asset_dir = args
            .asset_dir
            .clone()
            .or(file.asset_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));
        let alternate_audio_dir = args
            .alternate_audio_dir
            .clone()
            .or(file.alternate_audio_dir)
            .unwrap_or_else(|| default_alternate_audio_dir(&asset_dir));

        Config {
            alternate_audio_dir,
            remote_urls: file
                .remote_urls
                .filter(|urls| !urls.is_empty())
                .unwrap_or_else(|| REMOTE_FALLBACK_URLS.iter().map(|url| url.to_string()).collect()),
            gesture_gate: args.gesture_gate || file.gesture_gate.unwrap_or(false),
            autoplay: !args.no_autoplay && file.autoplay.unwrap_or(true),
            start_song: args.song.clone(),
            volume: args.volume.or(file.volume).unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0),
            retries: file.retries.unwrap_or(DEFAULT_RETRIES),
            retry_delay: Duration::from_millis(file.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
            local_timeout: Duration::from_secs(file.local_timeout_secs.unwrap_or(DEFAULT_LOCAL_TIMEOUT_SECS)),
            remote_timeout: Duration::from_secs(file.remote_timeout_secs.unwrap_or(DEFAULT_REMOTE_TIMEOUT_SECS)),
            cell_width_px: file.cell_width_px.filter(|w| *w > 0).unwrap_or(DEFAULT_CELL_WIDTH_PX),
            log_dir: args
                .log_dir
                .clone()
                .or(file.log_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            asset_dir,
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            asset_dir: self.asset_dir.clone(),
            alternate_audio_dir: self.alternate_audio_dir.clone(),
            remote_urls: self.remote_urls.clone(),
            gesture_gate: self.gesture_gate,
            retries: self.retries,
            retry_delay: self.retry_delay,
            local_timeout: self.local_timeout,
            remote_timeout: self.remote_timeout,
        }
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("jukebox.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("jukebox").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// How frame rate is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FpsMode {
    #[default]
    Off,
    /// In the window title.
    Overlay,
    /// Through the logger, once per second.
    Console,
}

/// First-person grid raycaster
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: usize,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: usize,

    /// Frame rate cap, 0 for uncapped
    #[arg(long, default_value_t = 0)]
    pub fps_cap: u32,

    /// Frame rate display
    #[arg(long, value_enum, default_value_t = FpsMode::Off)]
    pub show_fps: FpsMode,

    /// Text map to load instead of the built-in level
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Initial window size as a multiple of the viewport
    #[arg(long, default_value_t = 1)]
    pub scale: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("viewport must be at least 2x1 pixels, got {width}x{height}")]
    Viewport { width: usize, height: usize },
    #[error("window scale must be at least 1")]
    Scale,
}

/// Validated startup configuration, read-only once the loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub fps_cap: u32,
    pub fps_mode: FpsMode,
    pub map: Option<PathBuf>,
    pub scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps_cap: 0,
            fps_mode: FpsMode::Off,
            map: None,
            scale: 1,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.width < 2 || args.height < 1 {
            return Err(ConfigError::Viewport {
                width: args.width,
                height: args.height,
            });
        }
        if args.scale == 0 {
            return Err(ConfigError::Scale);
        }
        Ok(Self {
            width: args.width,
            height: args.height,
            fps_cap: args.fps_cap,
            fps_mode: args.show_fps,
            map: args.map,
            scale: args.scale,
        })
    }
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use raycast_2d::{scene::DEFAULT_BOUNDS, types::Float, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Sequential,
    DataParallel,
    ManualPartition,
    /// Run every strategy in turn and check that they agree
    All,
}

impl StrategyArg {
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Sequential => vec![Strategy::Sequential],
            StrategyArg::DataParallel => vec![Strategy::DataParallel],
            StrategyArg::ManualPartition => vec![Strategy::ManualPartition],
            // one full cycle through the run modes
            StrategyArg::All => std::iter::successors(Some(Strategy::Sequential), |s| Some(s.next()))
                .take(Strategy::ALL.len())
                .collect(),
        }
    }
}

/// Casts a fan of light rays across a 2-D scene of circles and walls
#[derive(Debug, Parser)]
#[command(name = "raycast-2d")]
#[command(about = "2-D ray casting with interchangeable concurrency strategies")]
pub struct Args {
    /// Scene description (JSON). A random scene is generated when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Write the scene that was used to this JSON file
    #[arg(long)]
    pub save_scene: Option<PathBuf>,

    /// Circles in a generated scene
    #[arg(long, default_value_t = 2)]
    pub circles: usize,

    /// Walls in a generated scene
    #[arg(long, default_value_t = 4)]
    pub walls: usize,

    /// Width of a generated scene
    #[arg(long, default_value_t = DEFAULT_BOUNDS[0])]
    pub width: Float,

    /// Height of a generated scene
    #[arg(long, default_value_t = DEFAULT_BOUNDS[1])]
    pub height: Float,

    /// Seed for scene generation; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rays per frame
    #[arg(long, short = 'n', default_value_t = 3600, value_parser = clap::value_parser!(u32).range(1..))]
    pub rays: u32,

    #[arg(long, short = 's', value_enum, default_value_t = StrategyArg::All)]
    pub strategy: StrategyArg,

    /// Worker threads for the parallel strategies
    #[arg(long, short = 'w', default_value_t = 2)]
    pub workers: usize,

    /// Light origin x (defaults to the scene centre)
    #[arg(long)]
    pub origin_x: Option<Float>,

    /// Light origin y (defaults to the scene centre)
    #[arg(long)]
    pub origin_y: Option<Float>,

    /// Frames cast per strategy
    #[arg(long, short = 'f', default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Write the last frame's hit results to this JSON file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, help = "Set the logging level")]
    pub log_level: LogLevel,
}

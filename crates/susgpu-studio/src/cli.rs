use clap::Parser;

/// Largest grid side accepted on the command line; keeps the surface size
/// (16 px per cell) and the index count inside `u32`.
pub const MAX_GRID_SIDE: u32 = 4096;

/// Headless pixel-grid demo on the tracing backend.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "susgpu-studio", version, about)]
pub struct Options {
    /// Number of frames to record and submit
    #[arg(long, default_value_t = 8)]
    pub frames: u32,
    /// Grid width in cells
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_SIDE)))]
    pub width: u32,
    /// Grid height in cells
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_SIDE)))]
    pub height: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self { frames: 8, width: 32, height: 18 }
    }
}

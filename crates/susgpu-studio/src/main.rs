//! Headless pixel-grid demo.
//!
//! Drives the full instance → device → record → submit cycle against the
//! tracing backend and logs what each frame asked of the backend.

mod camera;
mod cli;
mod grid;

use anyhow::{Context, Result};
use clap::Parser;

use susgpu::backend::{Call, TraceBackend};
use susgpu::logging::{LoggingConfig, init_logging};
use susgpu::{
    BufferUsageHint, Color, DeviceDescriptor, Instance, RequestAdapterOptions, SurfaceConfiguration,
};

use cli::Options;
use grid::PixelGrid;

/// Backend work of one frame.
#[derive(Debug, Default, PartialEq, Eq)]
struct FrameSummary {
    calls: usize,
    draws: usize,
    indices: u64,
    uploaded_bytes: usize,
    uniform_uploads: usize,
}

impl FrameSummary {
    fn from_calls(calls: &[Call]) -> Self {
        let mut summary = Self { calls: calls.len(), ..Self::default() };
        for call in calls {
            match call {
                Call::DrawElements { count, .. } => {
                    summary.draws += 1;
                    summary.indices += u64::from(*count);
                }
                Call::BufferSubData { len, .. } => summary.uploaded_bytes += len,
                Call::Uniform { .. } => summary.uniform_uploads += 1,
                _ => {}
            }
        }
        summary
    }
}

/// Surface size for a grid drawn at 16 px per cell.
fn surface_size(width: u32, height: u32) -> Result<SurfaceConfiguration> {
    let scale = |cells: u32| {
        cells.checked_mul(16).with_context(|| format!("a {cells}-cell side does not fit the surface"))
    };
    Ok(SurfaceConfiguration { width: scale(width)?, height: scale(height)? })
}

/// Paints a diagonal stripe that moves one cell per frame.
fn paint(grid: &mut PixelGrid<TraceBackend>, frame: u32) {
    let background = Color::from_u8(24, 24, 32, 255);
    let stripe = Color::from_u8(255, 196, 0, 255);
    let period = grid.width().max(grid.height()).max(2);

    grid.clear(background);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if (x + y + frame) % period == 0 {
                grid.set(x, y, stripe);
            }
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let options = Options::parse();

    let instance = Instance::new();
    let mut surface = instance.create_surface(TraceBackend::new());
    let adapter = instance.request_adapter(&RequestAdapterOptions { compatible_surface: &surface });
    let (device, queue) = adapter.request_device(&DeviceDescriptor {
        label: Some("susgpu-studio".to_owned()),
        buffer_usage_hint: BufferUsageHint::Dynamic,
        ..Default::default()
    });

    surface.configure(&device, &surface_size(options.width, options.height)?);

    let mut grid = PixelGrid::new(&device, options.width, options.height)?;
    log::info!(
        "pixel grid {}x{} ready (pipeline {:?}, camera group {:?})",
        grid.width(),
        grid.height(),
        grid.pipeline().label(),
        grid.camera_group().label()
    );

    let backend = surface.backend();
    backend.clear_calls();

    for frame in 0..options.frames {
        paint(&mut grid, frame);
        grid.draw(&queue)?;

        let summary = FrameSummary::from_calls(&backend.take_calls());
        log::info!(
            "frame {frame}: {} calls, {} draws ({} indices), {} bytes uploaded, {} uniforms, origin {:?}",
            summary.calls,
            summary.draws,
            summary.indices,
            summary.uploaded_bytes,
            summary.uniform_uploads,
            grid.get(0, 0).map(Color::to_array)
        );
    }

    log::info!(
        "done: {} buffers, {} programs still live",
        backend.live_buffers(),
        backend.live_programs()
    );
    Ok(())
}

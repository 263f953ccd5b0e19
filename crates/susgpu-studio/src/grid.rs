//! Pixel grid scene.
//!
//! Every cell is a quad of four vertices built from three vertex buffers:
//! corner positions, per-cell translations and per-vertex colors. Only the
//! color buffer changes after creation.

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use susgpu::{
    AttributeType, Backend, BindGroup, BindGroupDescriptor, BindGroupEntry,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, Buffer, BufferInitDescriptor, BufferUsage,
    Color, CommandBuffer, CommandEncoderDescriptor, Device, Face, FrontFace, IndexFormat, LoadOp,
    PipelineLayoutDescriptor, PrimitiveTopology, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, ShaderModuleDescriptor,
    ShaderSource, UniformType, VertexBufferLayout,
};

use crate::camera;

const VERTEX_SHADER: &str = "
uniform mat4 viewProjection;

attribute vec3 a_position;
attribute vec3 a_translation;
attribute vec4 a_color;

varying lowp vec4 v_color;

void main() {
    gl_Position = viewProjection * vec4(a_position + a_translation, 1);
    v_color = a_color;
}
";

const FRAGMENT_SHADER: &str = "
varying lowp vec4 v_color;

void main() {
    gl_FragColor = v_color;
}
";

/// Quad corners in drawing order; wound counter-clockwise as seen by the camera.
const CORNERS: [[f32; 3]; 4] = [[0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [1.0, 0.0, 0.0]];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Position {
    xyz: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Translation {
    xyz: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct VertexColor {
    rgba: [f32; 4],
}

impl From<Color> for VertexColor {
    fn from(color: Color) -> Self {
        Self { rgba: color.to_array() }
    }
}

/// Index data for `cells` quads, in the narrowest format that can address
/// every vertex.
#[derive(Debug, Clone, PartialEq)]
enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    fn for_cells(cells: usize) -> Result<Self> {
        let vertices = cells
            .checked_mul(4)
            .and_then(|vertices| u32::try_from(vertices).ok())
            .with_context(|| format!("{cells} cells need more vertices than 32-bit indices address"))?;
        let quads = (0..vertices / 4).flat_map(|cell| {
            let base = cell * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        });

        Ok(if vertices <= u32::from(u16::MAX) + 1 {
            Self::U16(quads.map(|i| i as u16).collect())
        } else {
            Self::U32(quads.collect())
        })
    }

    fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }
}

/// A `width` × `height` grid of colored cells and the resources to draw it.
pub struct PixelGrid<B: Backend> {
    width: u32,
    height: u32,
    colors: Vec<VertexColor>,
    dirty: bool,

    color_buffer: Buffer<B>,
    commands: CommandBuffer<B>,

    // referenced by `commands`; kept for inspection
    pipeline: RenderPipeline<B>,
    camera_group: BindGroup<B>,
}

impl<B: Backend> PixelGrid<B> {
    pub fn new(device: &Device<B>, width: u32, height: u32) -> Result<Self> {
        let cells = (width as usize)
            .checked_mul(height as usize)
            .with_context(|| format!("a {width}x{height} grid has too many cells"))?;

        let positions: Vec<Position> = (0..cells)
            .flat_map(|_| CORNERS.map(|xyz| Position { xyz }))
            .collect();
        let translations: Vec<Translation> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .flat_map(|(x, y)| [Translation { xyz: [x as f32, -(y as f32), 0.0] }; 4])
            .collect();
        let colors = vec![VertexColor::from(Color::TRANSPARENT); cells * 4];
        let indices = Indices::for_cells(cells)?;

        let module = device
            .create_shader_module(&ShaderModuleDescriptor {
                label: Some("pixel grid"),
                source: ShaderSource { vertex: VERTEX_SHADER, fragment: FRAGMENT_SHADER },
            })
            .context("failed to build the pixel grid shader")?;

        let view_projection = camera::grid_view_projection(width as f32, height as f32, 0.125, 8.0);
        let camera = device
            .create_buffer_init(&BufferInitDescriptor {
                label: Some("camera"),
                usage: BufferUsage::Uniform,
                contents: bytemuck::cast_slice(&view_projection),
            })
            .context("failed to create the camera uniform")?;

        let position_buffer = device
            .create_buffer_init(&BufferInitDescriptor {
                label: Some("positions"),
                usage: BufferUsage::Vertex,
                contents: bytemuck::cast_slice(&positions),
            })
            .context("failed to create the position buffer")?;
        let translation_buffer = device
            .create_buffer_init(&BufferInitDescriptor {
                label: Some("translations"),
                usage: BufferUsage::Vertex,
                contents: bytemuck::cast_slice(&translations),
            })
            .context("failed to create the translation buffer")?;
        let color_buffer = device
            .create_buffer_init(&BufferInitDescriptor {
                label: Some("colors"),
                usage: BufferUsage::Vertex,
                contents: bytemuck::cast_slice(&colors),
            })
            .context("failed to create the color buffer")?;
        let index_buffer = device
            .create_buffer_init(&BufferInitDescriptor {
                label: Some("indices"),
                usage: BufferUsage::Index(indices.format()),
                contents: indices.bytes(),
            })
            .context("failed to create the index buffer")?;

        let camera_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("camera"),
            entries: &[BindGroupLayoutEntry::new("viewProjection", UniformType::Matrix4)],
        });
        let camera_group = device
            .create_bind_group(&BindGroupDescriptor {
                label: Some("camera"),
                layout: &camera_layout,
                entries: &[BindGroupEntry { resource: camera.as_entire_binding() }],
            })
            .context("failed to create the camera bind group")?;

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("pixel grid"),
            bind_group_layouts: &[camera_layout],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("pixel grid"),
            layout: &pipeline_layout,
            module: &module,
            buffers: &[
                VertexBufferLayout::new([("a_position", AttributeType::Vec3)]),
                VertexBufferLayout::new([("a_translation", AttributeType::Vec3)]),
                VertexBufferLayout::new([("a_color", AttributeType::Vec4)]),
            ],
            topology: PrimitiveTopology::Triangles,
            front_face: FrontFace::Ccw,
            cull_mode: Some(Face::Back),
        });

        let triangles = u32::try_from(cells * 2).context("grid has too many cells to draw")?;
        let mut encoder =
            device.create_command_encoder(&CommandEncoderDescriptor { label: Some("pixel grid") });
        encoder
            .begin_render_pass(&RenderPassDescriptor {
                label: Some("pixel grid"),
                color_attachment: RenderPassColorAttachment { ops: LoadOp::Clear(Color::BLACK) },
            })
            .set_pipeline(&pipeline)
            .set_bind_group(&[camera_group.clone()])
            .set_vertex_buffer(&[position_buffer, translation_buffer, color_buffer.clone()])
            .set_index_buffer(&index_buffer)
            .draw_indexed(triangles);
        let commands = encoder.finish();

        log::debug!(
            "pixel grid {width}x{height}: {cells} cells, {:?} indices, {} recorded operations",
            indices.format(),
            commands.len()
        );

        Ok(Self {
            width,
            height,
            colors,
            dirty: false,
            color_buffer,
            commands,
            pipeline,
            camera_group,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pipeline(&self) -> &RenderPipeline<B> {
        &self.pipeline
    }

    pub fn camera_group(&self) -> &BindGroup<B> {
        &self.camera_group
    }

    /// Paints every cell with `color`.
    pub fn clear(&mut self, color: Color) {
        self.colors.fill(color.into());
        self.dirty = true;
    }

    /// Paints one cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cell = (y * self.width + x) as usize;
        self.colors[cell * 4..cell * 4 + 4].fill(color.into());
        self.dirty = true;
    }

    /// Color of a cell, if it is inside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.colors[(y * self.width + x) as usize * 4].rgba;
        Some(Color::new(r, g, b, a))
    }

    /// Uploads pending color changes, then replays the recorded frame.
    pub fn draw(&mut self, queue: &Queue<B>) -> Result<()> {
        if self.dirty {
            queue
                .write_buffer(&self.color_buffer, bytemuck::cast_slice(&self.colors))
                .context("failed to upload cell colors")?;
            self.dirty = false;
        }

        queue.submit([&self.commands]).context("failed to submit the pixel grid frame")
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use susgpu::backend::{Call, TraceBackend};
    use susgpu::DeviceDescriptor;

    use super::*;

    fn grid(width: u32, height: u32) -> (Rc<TraceBackend>, PixelGrid<TraceBackend>, Queue<TraceBackend>) {
        let backend = Rc::new(TraceBackend::new());
        let device = Device::new(Rc::clone(&backend), &DeviceDescriptor::default());
        let queue = Queue::new(Rc::clone(&backend));
        let grid = PixelGrid::new(&device, width, height).unwrap();
        backend.clear_calls();
        (backend, grid, queue)
    }

    #[test]
    fn quads_share_two_triangles() {
        assert_eq!(
            Indices::for_cells(2).unwrap(),
            Indices::U16(vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7])
        );
    }

    #[test]
    fn large_grids_switch_to_u32_indices() {
        assert_eq!(Indices::for_cells(16_384).unwrap().format(), IndexFormat::Uint16);
        assert_eq!(Indices::for_cells(16_385).unwrap().format(), IndexFormat::Uint32);
    }

    #[test]
    fn grids_past_32_bit_indices_are_rejected() {
        assert!(Indices::for_cells(1 << 30).is_err());
        assert!(Indices::for_cells(usize::MAX).is_err());
    }

    #[test]
    fn set_ignores_out_of_range_cells() {
        let (_, mut grid, _) = grid(3, 2);
        grid.set(1, 1, Color::WHITE);
        grid.set(3, 0, Color::WHITE);

        assert_eq!(grid.get(1, 1), Some(Color::WHITE));
        assert_eq!(grid.get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn draw_uploads_only_when_dirty() {
        let (backend, mut grid, queue) = grid(2, 2);
        fn uploads(calls: &[Call]) -> usize {
            calls.iter().filter(|c| matches!(c, Call::BufferSubData { .. })).count()
        }

        grid.draw(&queue).unwrap();
        assert_eq!(uploads(&backend.take_calls()), 0);

        grid.clear(Color::WHITE);
        grid.draw(&queue).unwrap();
        let calls = backend.take_calls();
        assert_eq!(uploads(&calls), 1);
        assert!(calls.contains(&Call::DrawElements {
            topology: PrimitiveTopology::Triangles,
            count: 24,
            format: IndexFormat::Uint16,
            offset: 0,
        }));
    }

    #[test]
    fn frame_uses_back_face_culling() {
        let (backend, mut grid, queue) = grid(1, 1);
        grid.draw(&queue).unwrap();
        assert!(backend.calls().contains(&Call::CullFace(Some(Face::Back))));
    }
}

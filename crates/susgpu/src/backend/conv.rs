//! Enum → GL constant conversions for [`super::GlBackend`].

use super::{
    BufferTarget, BufferUsageHint, Face, FrontFace, IndexFormat, PrimitiveTopology, ShaderStage,
    TextureFilter, TextureParameter, TextureWrap,
};

pub(super) fn map_shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

pub(super) fn map_buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

pub(super) fn map_usage_hint(usage: BufferUsageHint) -> u32 {
    match usage {
        BufferUsageHint::Stream => glow::STREAM_DRAW,
        BufferUsageHint::Static => glow::STATIC_DRAW,
        BufferUsageHint::Dynamic => glow::DYNAMIC_DRAW,
    }
}

pub(super) fn map_topology(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::Points => glow::POINTS,
        PrimitiveTopology::Lines => glow::LINES,
        PrimitiveTopology::LineLoop => glow::LINE_LOOP,
        PrimitiveTopology::LineStrip => glow::LINE_STRIP,
        PrimitiveTopology::Triangles => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

pub(super) fn map_front_face(winding: FrontFace) -> u32 {
    match winding {
        FrontFace::Cw => glow::CW,
        FrontFace::Ccw => glow::CCW,
    }
}

pub(super) fn map_face(face: Face) -> u32 {
    match face {
        Face::Front => glow::FRONT,
        Face::Back => glow::BACK,
        Face::FrontAndBack => glow::FRONT_AND_BACK,
    }
}

pub(super) fn map_index_format(format: IndexFormat) -> u32 {
    match format {
        IndexFormat::Uint16 => glow::UNSIGNED_SHORT,
        IndexFormat::Uint32 => glow::UNSIGNED_INT,
    }
}

fn map_wrap(wrap: TextureWrap) -> i32 {
    (match wrap {
        TextureWrap::Repeat => glow::REPEAT,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
    }) as i32
}

fn map_filter(filter: TextureFilter) -> i32 {
    (match filter {
        TextureFilter::Nearest => glow::NEAREST,
        TextureFilter::Linear => glow::LINEAR,
    }) as i32
}

/// Returns `(pname, value)` for `glTexParameteri`.
pub(super) fn map_texture_parameter(parameter: TextureParameter) -> (u32, i32) {
    match parameter {
        TextureParameter::WrapS(w) => (glow::TEXTURE_WRAP_S, map_wrap(w)),
        TextureParameter::WrapT(w) => (glow::TEXTURE_WRAP_T, map_wrap(w)),
        TextureParameter::MinFilter(f) => (glow::TEXTURE_MIN_FILTER, map_filter(f)),
        TextureParameter::MagFilter(f) => (glow::TEXTURE_MAG_FILTER, map_filter(f)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_formats_map_to_unsigned_types() {
        assert_eq!(map_index_format(IndexFormat::Uint16), glow::UNSIGNED_SHORT);
        assert_eq!(map_index_format(IndexFormat::Uint32), glow::UNSIGNED_INT);
    }

    #[test]
    fn topology_values_match_gl_draw_modes() {
        assert_eq!(map_topology(PrimitiveTopology::Points), 0);
        assert_eq!(map_topology(PrimitiveTopology::Triangles), 4);
        assert_eq!(map_topology(PrimitiveTopology::TriangleFan), 6);
    }

    #[test]
    fn clamp_nearest_parameters() {
        assert_eq!(
            map_texture_parameter(TextureParameter::WrapS(TextureWrap::ClampToEdge)),
            (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32)
        );
        assert_eq!(
            map_texture_parameter(TextureParameter::MagFilter(TextureFilter::Nearest)),
            (glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32)
        );
    }
}

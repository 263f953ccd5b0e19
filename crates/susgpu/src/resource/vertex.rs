/// Component type of a vertex attribute. All attributes are 32-bit floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl AttributeType {
    #[inline]
    pub const fn components(self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    #[inline]
    pub const fn byte_size(self) -> u32 {
        self.components() * 4
    }
}

/// How often the attributes of a layout advance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum VertexStepMode {
    #[default]
    Vertex,
    /// Advance once per instance (attribute divisor 1).
    Instance,
}

impl VertexStepMode {
    /// Attribute divisor the backend is given for this step mode.
    #[inline]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Vertex => 0,
            Self::Instance => 1,
        }
    }
}

/// A named attribute and its byte offset inside the interleaved vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    name: String,
    ty: AttributeType,
    offset: u32,
}

impl VertexAttribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> AttributeType {
        self.ty
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Interleaved, tightly packed layout of one vertex buffer.
///
/// Stride and offsets are computed once in [`new`](Self::new).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
    components: u32,
    step_mode: VertexStepMode,
}

impl VertexBufferLayout {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        let mut stride = 0;
        let mut components = 0;
        let attributes = attributes
            .into_iter()
            .map(|(name, ty)| {
                let attribute = VertexAttribute { name: name.into(), ty, offset: stride };
                stride += ty.byte_size();
                components += ty.components();
                attribute
            })
            .collect();

        Self { attributes, stride, components, step_mode: VertexStepMode::Vertex }
    }

    pub fn with_step_mode(mut self, step_mode: VertexStepMode) -> Self {
        self.step_mode = step_mode;
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Bytes between consecutive vertices, shared by every attribute.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Total float components per vertex.
    pub fn component_count(&self) -> u32 {
        self.components
    }

    pub fn step_mode(&self) -> VertexStepMode {
        self.step_mode
    }
}

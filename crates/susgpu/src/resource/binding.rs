use std::fmt;
use std::rc::Rc;

use super::Buffer;
use crate::backend::Backend;

/// Shader-side type of a uniform bound through a bind group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float32,
    Vector2,
    Vector3,
    Vector4,
    Matrix2,
    Matrix3,
    Matrix4,
}

impl UniformType {
    /// Number of `f32` components in one element of this type.
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Self::Float32 => 1,
            Self::Vector2 => 2,
            Self::Vector3 => 3,
            Self::Vector4 | Self::Matrix2 => 4,
            Self::Matrix3 => 9,
            Self::Matrix4 => 16,
        }
    }
}

/// One named uniform slot in a [`BindGroupLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindGroupLayoutEntry {
    /// Uniform name as declared in the shader source.
    pub name: String,
    pub ty: UniformType,
}

impl BindGroupLayoutEntry {
    pub fn new(name: impl Into<String>, ty: UniformType) -> Self {
        Self { name: name.into(), ty }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindGroupLayoutDescriptor<'a> {
    pub label: Option<&'a str>,
    pub entries: &'a [BindGroupLayoutEntry],
}

/// Ordered shape of a bind group: which uniforms it feeds, and their types.
#[derive(Clone)]
pub struct BindGroupLayout {
    label: Option<Rc<str>>,
    entries: Rc<[BindGroupLayoutEntry]>,
}

impl BindGroupLayout {
    pub(crate) fn new(descriptor: &BindGroupLayoutDescriptor<'_>) -> Self {
        Self {
            label: descriptor.label.map(Rc::from),
            entries: Rc::from(descriptor.entries),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn entries(&self) -> &[BindGroupLayoutEntry] {
        &self.entries
    }

    /// Same names and types in the same order. Labels are ignored.
    pub fn is_congruent(&self, other: &BindGroupLayout) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries) || self.entries == other.entries
    }
}

impl fmt::Debug for BindGroupLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindGroupLayout")
            .field("label", &self.label)
            .field("entries", &self.entries)
            .finish()
    }
}

/// Resource bound to one bind group entry. Only uniform buffers can be bound.
#[derive(Debug)]
pub enum BindingResource<B: Backend> {
    Buffer(Buffer<B>),
}

impl<B: Backend> Clone for BindingResource<B> {
    fn clone(&self) -> Self {
        match self {
            Self::Buffer(buffer) => Self::Buffer(buffer.clone()),
        }
    }
}

#[derive(Debug)]
pub struct BindGroupEntry<B: Backend> {
    pub resource: BindingResource<B>,
}

impl<B: Backend> Clone for BindGroupEntry<B> {
    fn clone(&self) -> Self {
        Self { resource: self.resource.clone() }
    }
}

#[derive(Debug)]
pub struct BindGroupDescriptor<'a, B: Backend> {
    pub label: Option<&'a str>,
    pub layout: &'a BindGroupLayout,
    /// Position-correlated with `layout.entries()`.
    pub entries: &'a [BindGroupEntry<B>],
}

#[derive(Debug)]
struct BindGroupInner<B: Backend> {
    label: Option<String>,
    layout: BindGroupLayout,
    entries: Vec<BindGroupEntry<B>>,
}

/// A layout paired with the uniform buffers that feed it.
///
/// Entry count and buffer kinds are validated by `Device::create_bind_group`;
/// names are resolved against the current program only at replay.
#[derive(Debug)]
pub struct BindGroup<B: Backend> {
    inner: Rc<BindGroupInner<B>>,
}

impl<B: Backend> Clone for BindGroup<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: Backend> BindGroup<B> {
    pub(crate) fn new(
        label: Option<&str>,
        layout: BindGroupLayout,
        entries: Vec<BindGroupEntry<B>>,
    ) -> Self {
        Self {
            inner: Rc::new(BindGroupInner { label: label.map(str::to_owned), layout, entries }),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn layout(&self) -> &BindGroupLayout {
        &self.inner.layout
    }

    pub fn entries(&self) -> &[BindGroupEntry<B>] {
        &self.inner.entries
    }

    /// Layout entries zipped with the buffers bound to them.
    pub(crate) fn bindings(&self) -> impl Iterator<Item = (&BindGroupLayoutEntry, &Buffer<B>)> {
        self.inner
            .layout
            .entries()
            .iter()
            .zip(self.inner.entries.iter().map(|entry| match &entry.resource {
                BindingResource::Buffer(buffer) => buffer,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(entries: &[BindGroupLayoutEntry]) -> BindGroupLayout {
        BindGroupLayout::new(&BindGroupLayoutDescriptor { label: None, entries })
    }

    #[test]
    fn component_counts() {
        assert_eq!(UniformType::Float32.components(), 1);
        assert_eq!(UniformType::Vector3.components(), 3);
        assert_eq!(UniformType::Matrix2.components(), 4);
        assert_eq!(UniformType::Matrix4.components(), 16);
    }

    #[test]
    fn congruence_ignores_labels_but_not_order() {
        let camera = BindGroupLayoutEntry::new("camera", UniformType::Matrix4);
        let fade = BindGroupLayoutEntry::new("u_fade", UniformType::Float32);

        let a = layout(&[camera.clone(), fade.clone()]);
        let b = BindGroupLayout::new(&BindGroupLayoutDescriptor {
            label: Some("other"),
            entries: &[camera.clone(), fade.clone()],
        });
        let swapped = layout(&[fade, camera]);

        assert!(a.is_congruent(&a.clone()));
        assert!(a.is_congruent(&b));
        assert!(!a.is_congruent(&swapped));
    }

    #[test]
    fn congruence_compares_types() {
        let a = layout(&[BindGroupLayoutEntry::new("camera", UniformType::Matrix4)]);
        let b = layout(&[BindGroupLayoutEntry::new("camera", UniformType::Matrix3)]);
        assert!(!a.is_congruent(&b));
    }
}

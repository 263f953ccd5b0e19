//! Command submission.
//!
//! [`Queue`] replays command buffers against the backend and performs
//! out-of-band buffer writes. Replay resolves attribute and uniform names
//! against whichever program the current pipeline made active.

mod replay;

use std::rc::Rc;

use crate::backend::Backend;
use crate::command::CommandBuffer;
use crate::error::Result;
use crate::resource::Buffer;

use replay::Replay;

#[derive(Debug)]
pub struct Queue<B: Backend> {
    backend: Rc<B>,
}

impl<B: Backend> Queue<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces a buffer's contents from offset 0.
    ///
    /// Vertex and index buffers are uploaded immediately. Uniform buffers keep
    /// the data on the CPU until a bind group using them is replayed; command
    /// buffers already recorded see the new values without re-recording.
    pub fn write_buffer(&self, buffer: &Buffer<B>, data: &[u8]) -> Result<()> {
        log::trace!("writing {} bytes to {} buffer {:?}", data.len(), buffer.kind(), buffer.label());
        buffer.write(data)
    }

    /// Replays every operation of every command buffer, in order.
    ///
    /// One replay state spans the whole submission: a pipeline set by one
    /// command buffer stays current for the next. The first failing operation
    /// aborts the submission; backend state is then whatever that operation
    /// left behind.
    pub fn submit<'a, I>(&self, command_buffers: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a CommandBuffer<B>>,
        B: 'a,
    {
        let mut replay = Replay::new(&*self.backend);
        let mut replayed = 0usize;

        for command_buffer in command_buffers {
            for operation in command_buffer.operations() {
                if let Err(err) = replay.execute(operation) {
                    log::warn!(
                        "submit aborted at operation {replayed} ({}): {err}",
                        operation.kind()
                    );
                    return Err(err);
                }
                replayed += 1;
            }
        }

        log::debug!("submitted {replayed} operations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BufferTarget, Call, TraceBackend};
    use crate::command::{
        CommandEncoderDescriptor, LoadOp, OperationKind, RenderPassColorAttachment,
        RenderPassDescriptor,
    };
    use crate::device::{Device, DeviceDescriptor};
    use crate::error::{BindingError, Error};
    use crate::resource::{
        AttributeType, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
        BindGroupLayoutDescriptor, BindGroupLayoutEntry, BufferDescriptor, BufferInitDescriptor,
        BufferKind, BufferUsage, PipelineLayoutDescriptor, RenderPipeline,
        RenderPipelineDescriptor, ShaderModule, ShaderModuleDescriptor, ShaderSource, UniformType,
        VertexBufferLayout, VertexStepMode,
    };
    use crate::{Color, Face, FrontFace, IndexFormat, PrimitiveTopology};

    const VERTEX: &str = "
        uniform mat4 viewProjection;
        attribute vec3 a_position;
        attribute vec2 a_translation;

        void main() {
            gl_Position = viewProjection * vec4(a_position.xy + a_translation, a_position.z, 1);
        }
    ";
    const FRAGMENT: &str = "void main() { gl_FragColor = vec4(1); }";

    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    struct Scene {
        backend: Rc<TraceBackend>,
        device: Device<TraceBackend>,
        queue: Queue<TraceBackend>,
        module: ShaderModule<TraceBackend>,
        camera_layout: BindGroupLayout,
        camera: Buffer<TraceBackend>,
        vertices: Buffer<TraceBackend>,
        indices: Buffer<TraceBackend>,
    }

    impl Scene {
        fn new() -> Self {
            let backend = Rc::new(TraceBackend::new());
            let device = Device::new(Rc::clone(&backend), &DeviceDescriptor::default());
            let queue = Queue::new(Rc::clone(&backend));

            let module = device
                .create_shader_module(&ShaderModuleDescriptor {
                    label: Some("grid"),
                    source: ShaderSource { vertex: VERTEX, fragment: FRAGMENT },
                })
                .unwrap();
            let camera_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
                label: Some("camera"),
                entries: &[BindGroupLayoutEntry::new("viewProjection", UniformType::Matrix4)],
            });
            let camera = device
                .create_buffer(&BufferDescriptor {
                    label: Some("camera"),
                    size: 64,
                    usage: BufferUsage::Uniform,
                })
                .unwrap();

            let positions: [f32; 12] =
                [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
            let vertices = device
                .create_buffer_init(&BufferInitDescriptor {
                    label: Some("positions"),
                    usage: BufferUsage::Vertex,
                    contents: bytemuck::cast_slice(&positions),
                })
                .unwrap();
            let index_data: [u16; 6] = [0, 1, 2, 2, 3, 0];
            let indices = device
                .create_buffer_init(&BufferInitDescriptor {
                    label: Some("indices"),
                    usage: BufferUsage::Index(IndexFormat::Uint16),
                    contents: bytemuck::cast_slice(&index_data),
                })
                .unwrap();

            backend.clear_calls();
            Self { backend, device, queue, module, camera_layout, camera, vertices, indices }
        }

        fn pipeline(
            &self,
            buffers: &[VertexBufferLayout],
            cull_mode: Option<Face>,
        ) -> RenderPipeline<TraceBackend> {
            let layout = self.device.create_pipeline_layout(&PipelineLayoutDescriptor {
                label: None,
                bind_group_layouts: &[self.camera_layout.clone()],
            });
            self.device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("grid"),
                layout: &layout,
                module: &self.module,
                buffers,
                topology: PrimitiveTopology::Triangles,
                front_face: FrontFace::Ccw,
                cull_mode,
            })
        }

        fn position_pipeline(&self, attribute: &str) -> RenderPipeline<TraceBackend> {
            self.pipeline(&[VertexBufferLayout::new([(attribute, AttributeType::Vec3)])], None)
        }

        fn camera_group(&self) -> BindGroup<TraceBackend> {
            self.device
                .create_bind_group(&BindGroupDescriptor {
                    label: Some("camera"),
                    layout: &self.camera_layout,
                    entries: &[BindGroupEntry { resource: self.camera.as_entire_binding() }],
                })
                .unwrap()
        }

        fn record(
            &self,
            ops: LoadOp<Color>,
            f: impl FnOnce(&mut crate::RenderPass<'_, TraceBackend>),
        ) -> CommandBuffer<TraceBackend> {
            let mut encoder =
                self.device.create_command_encoder(&CommandEncoderDescriptor { label: None });
            {
                let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                    label: None,
                    color_attachment: RenderPassColorAttachment { ops },
                });
                f(&mut pass);
            }
            encoder.finish()
        }
    }

    fn divisors(calls: &[Call]) -> Vec<Call> {
        calls
            .iter()
            .filter(|call| matches!(call, Call::VertexAttribDivisor { .. }))
            .cloned()
            .collect()
    }

    fn uniform_uploads(calls: &[Call]) -> Vec<Vec<f32>> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn end_to_end_trace() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let commands = scene.record(LoadOp::Clear(Color::new(0.0, 0.0, 0.0, 1.0)), |pass| {
            pass.set_pipeline(&pipeline).set_vertex_buffer(&[scene.vertices.clone()]).draw_indexed(2);
        });

        scene.queue.submit([&commands]).unwrap();

        assert_eq!(
            scene.backend.calls(),
            [
                Call::ClearColor(Color::new(0.0, 0.0, 0.0, 1.0)),
                Call::Clear,
                Call::UseProgram(Some(scene.module.raw())),
                Call::FrontFace(FrontFace::Ccw),
                Call::CullFace(None),
                Call::BindBuffer { target: BufferTarget::Vertex, buffer: scene.vertices.raw() },
                Call::EnableVertexAttribArray(0),
                Call::VertexAttribPointer { index: 0, components: 3, stride: 12, offset: 0 },
                Call::VertexAttribDivisor { index: 0, divisor: 0 },
                Call::DrawElements {
                    topology: PrimitiveTopology::Triangles,
                    count: 6,
                    format: IndexFormat::Uint16,
                    offset: 0,
                },
            ]
        );
    }

    #[test]
    fn end_to_end_trace_with_index_buffer() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let commands = scene.record(LoadOp::Clear(Color::new(0.0, 0.0, 0.0, 1.0)), |pass| {
            pass.set_pipeline(&pipeline)
                .set_vertex_buffer(&[scene.vertices.clone()])
                .set_index_buffer(&scene.indices)
                .draw_indexed(2);
        });

        scene.queue.submit([&commands]).unwrap();

        assert_eq!(
            scene.backend.calls(),
            [
                Call::ClearColor(Color::new(0.0, 0.0, 0.0, 1.0)),
                Call::Clear,
                Call::UseProgram(Some(scene.module.raw())),
                Call::FrontFace(FrontFace::Ccw),
                Call::CullFace(None),
                Call::BindBuffer { target: BufferTarget::Vertex, buffer: scene.vertices.raw() },
                Call::EnableVertexAttribArray(0),
                Call::VertexAttribPointer { index: 0, components: 3, stride: 12, offset: 0 },
                Call::VertexAttribDivisor { index: 0, divisor: 0 },
                Call::BindBuffer { target: BufferTarget::Index, buffer: scene.indices.raw() },
                Call::DrawElements {
                    topology: PrimitiveTopology::Triangles,
                    count: 6,
                    format: IndexFormat::Uint16,
                    offset: 0,
                },
            ]
        );
    }

    #[test]
    fn unknown_attribute_fails_replay() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_positionz");
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_vertex_buffer(&[scene.vertices.clone()]);
        });

        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { ref name } if name == "a_positionz"));
        assert_eq!(
            err.to_string(),
            "the current program does not have a(n) 'a_positionz' attribute"
        );
    }

    #[test]
    fn operations_before_set_pipeline_fail_without_backend_calls() {
        let scene = Scene::new();
        let group = scene.camera_group();

        let cases: [(OperationKind, CommandBuffer<TraceBackend>); 4] = [
            (
                OperationKind::SetBindGroup,
                scene.record(LoadOp::Load, |pass| {
                    pass.set_bind_group(&[group.clone()]);
                }),
            ),
            (
                OperationKind::SetVertexBuffer,
                scene.record(LoadOp::Load, |pass| {
                    pass.set_vertex_buffer(&[scene.vertices.clone()]);
                }),
            ),
            (
                OperationKind::SetIndexBuffer,
                scene.record(LoadOp::Load, |pass| {
                    pass.set_index_buffer(&scene.indices);
                }),
            ),
            (
                OperationKind::DrawIndexed,
                scene.record(LoadOp::Load, |pass| {
                    pass.draw_indexed(1);
                }),
            ),
        ];

        for (kind, commands) in &cases {
            let err = scene.queue.submit([commands]).unwrap_err();
            assert!(
                matches!(err, Error::NoPipeline { operation } if operation == *kind),
                "{kind}: {err:?}"
            );
        }
        assert!(scene.backend.calls().is_empty());
    }

    #[test]
    fn uniform_writes_reach_recorded_command_buffers() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let group = scene.camera_group();
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_bind_group(&[group.clone()]);
        });

        scene.queue.submit([&commands]).unwrap();
        assert_eq!(uniform_uploads(&scene.backend.take_calls()), [vec![0.0; 16]]);

        scene.queue.write_buffer(&scene.camera, bytemuck::cast_slice(&IDENTITY)).unwrap();
        assert_eq!(scene.camera.uniform_contents(), Some(IDENTITY.to_vec()));

        scene.queue.submit([&commands]).unwrap();
        assert_eq!(uniform_uploads(&scene.backend.calls()), [IDENTITY.to_vec()]);
    }

    #[test]
    fn resubmission_replays_identically() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let group = scene.camera_group();
        let commands = scene.record(LoadOp::Clear(Color::WHITE), |pass| {
            pass.set_pipeline(&pipeline)
                .set_bind_group(&[group.clone()])
                .set_vertex_buffer(&[scene.vertices.clone()])
                .set_index_buffer(&scene.indices)
                .draw_indexed(1);
        });

        scene.queue.submit([&commands]).unwrap();
        let first = scene.backend.take_calls();
        scene.queue.submit([&commands]).unwrap();

        assert!(!first.is_empty());
        assert_eq!(scene.backend.calls(), first);
    }

    #[test]
    fn replay_state_spans_buffers_but_not_submissions() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let setup = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_index_buffer(&scene.indices);
        });
        let draw = scene.record(LoadOp::Load, |pass| {
            pass.draw_indexed(2);
        });

        scene.queue.submit([&setup, &draw]).unwrap();
        let err = scene.queue.submit([&draw]).unwrap_err();
        assert!(matches!(err, Error::NoPipeline { operation: OperationKind::DrawIndexed }));
    }

    #[test]
    fn set_pipeline_resets_culling() {
        let scene = Scene::new();
        let layouts = [VertexBufferLayout::new([("a_position", AttributeType::Vec3)])];
        let culled = scene.pipeline(&layouts, Some(Face::Back));
        let unculled = scene.pipeline(&layouts, None);
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&culled).set_pipeline(&unculled);
        });

        scene.queue.submit([&commands]).unwrap();
        let culling: Vec<_> = scene
            .backend
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::CullFace(_)))
            .collect();
        assert_eq!(culling, [Call::CullFace(Some(Face::Back)), Call::CullFace(None)]);
    }

    #[test]
    fn bind_group_layout_must_match_pipeline() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let other_layout = scene.device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: None,
            entries: &[BindGroupLayoutEntry::new("viewProjection", UniformType::Matrix3)],
        });
        let mismatched = scene
            .device
            .create_bind_group(&BindGroupDescriptor {
                label: None,
                layout: &other_layout,
                entries: &[BindGroupEntry { resource: scene.camera.as_entire_binding() }],
            })
            .unwrap();

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_bind_group(&[mismatched.clone()]);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(err, Error::Binding(BindingError::LayoutMismatch { group: 0 })));

        let group = scene.camera_group();
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_bind_group(&[group.clone(), group.clone()]);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(err, Error::Binding(BindingError::MissingBindGroupLayout { group: 1 })));
    }

    #[test]
    fn uniform_name_and_size_are_checked() {
        let scene = Scene::new();
        let missing_layout = scene.device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: None,
            entries: &[BindGroupLayoutEntry::new("camera", UniformType::Matrix4)],
        });
        let layout = scene.device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[missing_layout.clone()],
        });
        let pipeline = scene.device.create_render_pipeline(&RenderPipelineDescriptor {
            label: None,
            layout: &layout,
            module: &scene.module,
            buffers: &[],
            topology: PrimitiveTopology::Triangles,
            front_face: FrontFace::Ccw,
            cull_mode: None,
        });
        let group = scene
            .device
            .create_bind_group(&BindGroupDescriptor {
                label: None,
                layout: &missing_layout,
                entries: &[BindGroupEntry { resource: scene.camera.as_entire_binding() }],
            })
            .unwrap();
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_bind_group(&[group.clone()]);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(
            err,
            Error::Binding(BindingError::MissingUniform { ref name }) if name == "camera"
        ));

        let pipeline = scene.position_pipeline("a_position");
        let group = scene.camera_group();
        scene.queue.write_buffer(&scene.camera, bytemuck::cast_slice(&[1.0f32; 6])).unwrap();
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_bind_group(&[group.clone()]);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(
            err,
            Error::Binding(BindingError::UniformSize { ty: UniformType::Matrix4, len: 6, .. })
        ));
    }

    #[test]
    fn buffers_are_dispatched_by_kind() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_vertex_buffer(&[scene.camera.clone()]);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferKind { expected: BufferKind::Vertex, actual: BufferKind::Uniform }
        ));

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_index_buffer(&scene.vertices);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferKind { expected: BufferKind::Index, actual: BufferKind::Vertex }
        ));
    }

    #[test]
    fn vertex_buffers_need_a_layout_per_slot() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline)
                .set_vertex_buffer(&[scene.vertices.clone(), scene.vertices.clone()]);
        });

        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(err, Error::Binding(BindingError::MissingVertexLayout { slot: 1 })));
    }

    #[test]
    fn instance_layouts_set_a_divisor() {
        let scene = Scene::new();
        let translations = scene
            .device
            .create_buffer(&BufferDescriptor {
                label: Some("translations"),
                size: 16,
                usage: BufferUsage::Vertex,
            })
            .unwrap();
        let pipeline = scene.pipeline(
            &[
                VertexBufferLayout::new([("a_position", AttributeType::Vec3)]),
                VertexBufferLayout::new([("a_translation", AttributeType::Vec2)])
                    .with_step_mode(VertexStepMode::Instance),
            ],
            None,
        );
        scene.backend.clear_calls();

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline)
                .set_vertex_buffer(&[scene.vertices.clone(), translations.clone()]);
        });
        scene.queue.submit([&commands]).unwrap();

        let calls = scene.backend.calls();
        assert!(calls.contains(&Call::VertexAttribPointer {
            index: 1,
            components: 2,
            stride: 8,
            offset: 0,
        }));
        assert_eq!(
            divisors(&calls),
            [
                Call::VertexAttribDivisor { index: 0, divisor: 0 },
                Call::VertexAttribDivisor { index: 1, divisor: 1 },
            ]
        );
    }

    #[test]
    fn per_vertex_pipeline_after_instanced_resets_attribute_state() {
        let scene = Scene::new();
        let translations = scene
            .device
            .create_buffer(&BufferDescriptor {
                label: Some("translations"),
                size: 32,
                usage: BufferUsage::Vertex,
            })
            .unwrap();
        let instanced = scene.pipeline(
            &[
                VertexBufferLayout::new([("a_position", AttributeType::Vec3)]),
                VertexBufferLayout::new([("a_translation", AttributeType::Vec2)])
                    .with_step_mode(VertexStepMode::Instance),
            ],
            None,
        );
        let per_vertex = scene
            .pipeline(&[VertexBufferLayout::new([("a_translation", AttributeType::Vec2)])], None);
        scene.backend.clear_calls();

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&instanced)
                .set_vertex_buffer(&[scene.vertices.clone(), translations.clone()])
                .draw_indexed(2)
                .set_pipeline(&per_vertex)
                .set_vertex_buffer(&[translations.clone()])
                .draw_indexed(2);
        });
        scene.queue.submit([&commands]).unwrap();

        let calls = scene.backend.calls();
        assert_eq!(
            divisors(&calls),
            [
                Call::VertexAttribDivisor { index: 0, divisor: 0 },
                Call::VertexAttribDivisor { index: 1, divisor: 1 },
                Call::VertexAttribDivisor { index: 1, divisor: 0 },
            ]
        );
        let disabled: Vec<_> = calls
            .iter()
            .filter(|call| matches!(call, Call::DisableVertexAttribArray(_)))
            .collect();
        assert_eq!(disabled, [&Call::DisableVertexAttribArray(0)]);
    }

    #[test]
    fn rebinding_the_same_attributes_disables_nothing() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline)
                .set_vertex_buffer(&[scene.vertices.clone()])
                .set_vertex_buffer(&[scene.vertices.clone()]);
        });

        scene.queue.submit([&commands]).unwrap();
        assert!(
            !scene
                .backend
                .calls()
                .iter()
                .any(|call| matches!(call, Call::DisableVertexAttribArray(_)))
        );
    }

    #[test]
    fn draws_are_checked_against_the_index_buffer() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).draw_indexed(1_000);
        });
        scene.queue.submit([&commands]).unwrap();
        assert_eq!(
            scene.backend.calls().last(),
            Some(&Call::DrawElements {
                topology: PrimitiveTopology::Triangles,
                count: 3_000,
                format: IndexFormat::Uint16,
                offset: 0,
            })
        );

        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline).set_index_buffer(&scene.indices).draw_indexed(3);
        });
        let err = scene.queue.submit([&commands]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { count: 9, capacity: 6 }));
    }

    #[test]
    fn command_buffers_keep_resources_alive() {
        let scene = Scene::new();
        let pipeline = scene.position_pipeline("a_position");
        let commands = scene.record(LoadOp::Load, |pass| {
            pass.set_pipeline(&pipeline)
                .set_vertex_buffer(&[scene.vertices.clone()])
                .set_index_buffer(&scene.indices)
                .draw_indexed(2);
        });

        let Scene { backend, queue, module, vertices, indices, .. } = scene;
        drop((module, vertices, indices, pipeline));
        assert_eq!(backend.live_buffers(), 2);
        assert_eq!(backend.live_programs(), 1);

        queue.submit([&commands]).unwrap();
        drop(commands);
        assert_eq!(backend.live_buffers(), 0);
        assert_eq!(backend.live_programs(), 0);
    }
}

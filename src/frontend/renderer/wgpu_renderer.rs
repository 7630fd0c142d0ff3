// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! wgpu implementation of the renderer contract
//!
//! [`WgpuRenderer`] owns the GPU resources the video layer allocates
//! through [`Renderer`]: uploaded frames and overlay masks become
//! `Rgba8Unorm` textures, offscreen effect targets become renderable
//! textures in the surface format, and effect programs become render
//! pipelines compiled from bundled WGSL sources.
//!
//! [`WgpuCommands`] records one frame worth of [`RenderCommands`] into
//! a wgpu command encoder. Render passes are opened lazily on the first
//! draw against the current attachment so that a requested clear can be
//! folded into the pass load operation, and switching the render target
//! splits the batch into a new pass. [`WgpuCommands::submit`] closes the
//! batch, submits it, and arranges for every inserted [`Fence`] to
//! signal when the GPU finishes the submission.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wgpu::util::DeviceExt;

use crate::core::config::EffectKind;
use crate::core::geom::{PixelRect, WorldRect};
use crate::core::render::{
    BlendMode, ColorMode, Fence, ImageId, ProgramId, RenderCommands, Renderer, TargetId, TexRect,
    TextureSampler,
};

const QUAD_SHADER: &str = include_str!("shaders/quad.wgsl");
const SCALE2X_SHADER: &str = include_str!("shaders/scale2x.wgsl");
const PRESCALE_SHADER: &str = include_str!("shaders/prescale.wgsl");

/// Per-draw uniform consumed by the quad shader
///
/// Matches the `QuadUniform` struct in `shaders/quad.wgsl`: a world
/// rectangle, a texture window, the constant color, and the half
/// extents of the projection plane.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadUniform {
    rect: [f32; 4],
    uv: [f32; 4],
    color: [f32; 4],
    plane: [f32; 4],
}

/// Uploaded image and its shader view
struct ImageSlot {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Offscreen render target and the image handle it is sampled through
struct TargetSlot {
    view: wgpu::TextureView,
    image: ImageId,
    width: u32,
    height: u32,
}

/// Compiled effect pipeline
struct ProgramSlot {
    pipeline: wgpu::RenderPipeline,
    kind: EffectKind,
}

/// The four variants of the common textured-quad pipeline
struct QuadPipelines {
    replace_opaque: wgpu::RenderPipeline,
    replace_alpha: wgpu::RenderPipeline,
    modulate_opaque: wgpu::RenderPipeline,
    modulate_alpha: wgpu::RenderPipeline,
}

impl QuadPipelines {
    fn select(&self, mode: ColorMode, blend: BlendMode) -> &wgpu::RenderPipeline {
        match (mode, blend) {
            (ColorMode::Replace, BlendMode::Opaque) => &self.replace_opaque,
            (ColorMode::Replace, BlendMode::Alpha) => &self.replace_alpha,
            (ColorMode::Modulate, BlendMode::Opaque) => &self.modulate_opaque,
            (ColorMode::Modulate, BlendMode::Alpha) => &self.modulate_alpha,
        }
    }
}

/// Clamp a pixel rectangle to an attachment of the given size
///
/// Returns `None` when nothing of the rectangle remains, which callers
/// treat as "leave the default state in place". wgpu validates viewport
/// and scissor rectangles against the attachment, so out-of-range
/// requests must be trimmed before they reach a render pass.
///
/// # Examples
///
/// ```
/// use retroframe::core::geom::PixelRect;
/// use retroframe::frontend::renderer::wgpu_renderer::clamp_rect;
///
/// let clamped = clamp_rect(PixelRect::new(-10, 0, 700, 500), 640, 480);
/// assert_eq!(clamped, Some(PixelRect::new(0, 0, 640, 480)));
/// assert_eq!(clamp_rect(PixelRect::new(700, 0, 800, 100), 640, 480), None);
/// ```
pub fn clamp_rect(rect: PixelRect, width: u32, height: u32) -> Option<PixelRect> {
    let x = rect.x.clamp(0, width as i32);
    let y = rect.y.clamp(0, height as i32);
    let x2 = rect.x2.clamp(x, width as i32);
    let y2 = rect.y2.clamp(y, height as i32);
    let clamped = PixelRect::new(x, y, x2, y2);
    if clamped.is_empty() {
        None
    } else {
        Some(clamped)
    }
}

fn sampler_index(sampler: TextureSampler) -> usize {
    match sampler {
        TextureSampler::NoMipClamp => 0,
        TextureSampler::NoLinearNoMipClamp => 1,
        TextureSampler::NoMipRepeat => 2,
        TextureSampler::NoLinearNoMipRepeat => 3,
    }
}

fn blend_state(blend: BlendMode) -> wgpu::BlendState {
    match blend {
        BlendMode::Opaque => wgpu::BlendState::REPLACE,
        BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
    }
}

/// GPU resource side of the renderer contract
///
/// Created once per device and shared between the video layer and the
/// per-frame [`WgpuCommands`] through `Rc<RefCell<_>>`. Handles are
/// allocated from a single counter; operations on stale handles log and
/// do nothing.
pub struct WgpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    quad_bind_layout: wgpu::BindGroupLayout,
    quad_pipeline_layout: wgpu::PipelineLayout,
    effect_bind_layout: wgpu::BindGroupLayout,
    effect_pipeline_layout: wgpu::PipelineLayout,
    samplers: [wgpu::Sampler; 4],
    quad_pipelines: Option<QuadPipelines>,
    images: HashMap<u64, ImageSlot>,
    targets: HashMap<u64, TargetSlot>,
    programs: HashMap<u64, ProgramSlot>,
    next_id: u64,
}

impl WgpuRenderer {
    /// Create a renderer for a device and output surface format
    ///
    /// # Arguments
    ///
    /// * `device` - wgpu device for creating GPU resources
    /// * `queue` - Command queue used for texture uploads
    /// * `surface_format` - Format of the surface the final pass targets
    ///
    /// # Returns
    ///
    /// A renderer with bind group layouts and samplers ready; the quad
    /// pipelines are built on the first
    /// [`compile_quad_programs`](Renderer::compile_quad_programs) call.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let quad_bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Bind Group Layout"),
            entries: &[
                // Sampled image
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // Quad uniform
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let quad_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Quad Pipeline Layout"),
                bind_group_layouts: &[&quad_bind_layout],
                push_constant_ranges: &[],
            });

        // Effects fetch texels directly, so the layout is a lone texture
        let effect_bind_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Effect Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                }],
            });

        let effect_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Effect Pipeline Layout"),
                bind_group_layouts: &[&effect_bind_layout],
                push_constant_ranges: &[],
            });

        let samplers = [
            make_sampler(device, "Linear Clamp Sampler", wgpu::FilterMode::Linear, wgpu::AddressMode::ClampToEdge),
            make_sampler(device, "Nearest Clamp Sampler", wgpu::FilterMode::Nearest, wgpu::AddressMode::ClampToEdge),
            make_sampler(device, "Linear Repeat Sampler", wgpu::FilterMode::Linear, wgpu::AddressMode::Repeat),
            make_sampler(device, "Nearest Repeat Sampler", wgpu::FilterMode::Nearest, wgpu::AddressMode::Repeat),
        ];

        log::info!("Initialized wgpu renderer ({:?} output)", surface_format);

        Self {
            device: device.clone(),
            queue: queue.clone(),
            surface_format,
            quad_bind_layout,
            quad_pipeline_layout,
            effect_bind_layout,
            effect_pipeline_layout,
            samplers,
            quad_pipelines: None,
            images: HashMap::new(),
            targets: HashMap::new(),
            programs: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn sampler(&self, sampler: TextureSampler) -> &wgpu::Sampler {
        &self.samplers[sampler_index(sampler)]
    }

    fn image_view(&self, image: ImageId) -> Option<wgpu::TextureView> {
        self.images.get(&image.0).map(|slot| slot.view.clone())
    }

    fn target_slot(&self, target: TargetId) -> Option<&TargetSlot> {
        self.targets.get(&target.0)
    }

    fn program_pipeline(&self, program: ProgramId) -> Option<wgpu::RenderPipeline> {
        self.programs.get(&program.0).map(|slot| slot.pipeline.clone())
    }

    fn build_quad_pipeline(
        &self,
        module: &wgpu::ShaderModule,
        entry: &str,
        blend: BlendMode,
    ) -> wgpu::RenderPipeline {
        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Quad Pipeline"),
                layout: Some(&self.quad_pipeline_layout),
                vertex: wgpu::VertexState {
                    module,
                    entry_point: Some("vs_main"),
                    buffers: &[], // Corners come from the vertex index
                    compilation_options: Default::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module,
                    entry_point: Some(entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: Some(blend_state(blend)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                multiview: None,
                cache: None,
            })
    }

    fn build_effect_pipeline(&self, module: &wgpu::ShaderModule) -> wgpu::RenderPipeline {
        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Effect Pipeline"),
                layout: Some(&self.effect_pipeline_layout),
                vertex: wgpu::VertexState {
                    module,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                multiview: None,
                cache: None,
            })
    }

    fn write_image(&self, slot: &ImageSlot, pixels: &[u8]) {
        let expected = (slot.width * slot.height * 4) as usize;
        if pixels.len() != expected {
            log::error!(
                "Image upload size mismatch: got {} bytes, need {} for {}x{}",
                pixels.len(),
                expected,
                slot.width,
                slot.height
            );
            return;
        }
        self.queue.write_texture(
            slot.texture.as_image_copy(),
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(slot.width * 4),
                rows_per_image: Some(slot.height),
            },
            wgpu::Extent3d {
                width: slot.width,
                height: slot.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

fn make_sampler(
    device: &wgpu::Device,
    label: &str,
    filter: wgpu::FilterMode,
    address: wgpu::AddressMode,
) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: address,
        address_mode_v: address,
        address_mode_w: address,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 0.0,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    })
}

impl Renderer for WgpuRenderer {
    fn name(&self) -> &str {
        "wgpu"
    }

    fn upload_image(&mut self, pixels: &[u8], width: u32, height: u32) -> ImageId {
        let width = width.max(1);
        let height = height.max(1);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Uploaded Image"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let slot = ImageSlot {
            texture,
            view,
            width,
            height,
        };
        self.write_image(&slot, pixels);
        let id = ImageId(self.next_id());
        self.images.insert(id.0, slot);
        log::debug!("Uploaded {}x{} image as {:?}", width, height, id);
        id
    }

    fn update_image(&mut self, image: ImageId, pixels: &[u8]) {
        match self.images.get(&image.0) {
            Some(slot) => self.write_image(slot, pixels),
            None => log::warn!("Update of stale image {:?}", image),
        }
    }

    fn drop_image(&mut self, image: ImageId) {
        if self.images.remove(&image.0).is_none() {
            log::debug!("Drop of stale image {:?}", image);
        }
    }

    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
        bit_depth: u8,
    ) -> (TargetId, ImageId) {
        let width = width.max(1);
        let height = height.max(1);
        // wgpu has no renderable 16-bit color format, so both depth
        // hints land on the surface format
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Effect Render Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.surface_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let target = TargetId(self.next_id());
        let image = ImageId(self.next_id());
        self.images.insert(
            image.0,
            ImageSlot {
                texture,
                view: view.clone(),
                width,
                height,
            },
        );
        self.targets.insert(
            target.0,
            TargetSlot {
                view,
                image,
                width,
                height,
            },
        );
        log::debug!(
            "Created {}x{} render target ({}-bit requested) as {:?}",
            width,
            height,
            bit_depth,
            target
        );
        (target, image)
    }

    fn drop_render_target(&mut self, target: TargetId) {
        match self.targets.remove(&target.0) {
            Some(slot) => {
                self.images.remove(&slot.image.0);
            }
            None => log::debug!("Drop of stale render target {:?}", target),
        }
    }

    fn compile_effect(&mut self, kind: EffectKind) -> Option<ProgramId> {
        let source = match kind {
            EffectKind::Direct => return None,
            EffectKind::Scale2x => SCALE2X_SHADER,
            EffectKind::Prescale2x => PRESCALE_SHADER,
        };
        // Trap shader and pipeline validation errors instead of letting
        // them reach the uncaptured handler
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Effect Shader"),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        let pipeline = self.build_effect_pipeline(&module);
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            log::warn!("Effect {} failed to compile: {}", kind, error);
            return None;
        }
        let id = ProgramId(self.next_id());
        self.programs.insert(id.0, ProgramSlot { pipeline, kind });
        log::info!("Compiled {} effect program as {:?}", kind, id);
        Some(id)
    }

    fn drop_program(&mut self, program: ProgramId) {
        match self.programs.remove(&program.0) {
            Some(slot) => log::debug!("Dropped {} effect program", slot.kind),
            None => log::debug!("Drop of stale program {:?}", program),
        }
    }

    fn compile_quad_programs(&mut self) {
        if self.quad_pipelines.is_some() {
            return;
        }
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Quad Shader"),
                source: wgpu::ShaderSource::Wgsl(QUAD_SHADER.into()),
            });
        self.quad_pipelines = Some(QuadPipelines {
            replace_opaque: self.build_quad_pipeline(&module, "fs_replace", BlendMode::Opaque),
            replace_alpha: self.build_quad_pipeline(&module, "fs_replace", BlendMode::Alpha),
            modulate_opaque: self.build_quad_pipeline(&module, "fs_modulate", BlendMode::Opaque),
            modulate_alpha: self.build_quad_pipeline(&module, "fs_modulate", BlendMode::Alpha),
        });
        log::info!("Compiled quad programs");
    }
}

/// One frame of recorded draw commands
///
/// Opens render passes lazily, splits the batch when the render target
/// changes, and folds requested clears into the next pass load
/// operation. Dropping without [`submit`](Self::submit) discards the
/// recording.
pub struct WgpuCommands {
    renderer: Rc<RefCell<WgpuRenderer>>,
    encoder: wgpu::CommandEncoder,
    pass: Option<wgpu::RenderPass<'static>>,
    surface_view: wgpu::TextureView,
    surface_size: (u32, u32),
    attachment_size: (u32, u32),
    target: Option<TargetId>,
    viewport: PixelRect,
    scissor: Option<PixelRect>,
    color: [f32; 4],
    mode: ColorMode,
    blend: BlendMode,
    sampler: TextureSampler,
    pending_clear: bool,
    surface_clear_pending: bool,
    fences: Vec<Fence>,
}

impl WgpuCommands {
    /// Begin recording a frame against a surface texture view
    ///
    /// The first pass on the surface clears it to black, whether or not
    /// the layer draws anything, so a frame with no content still
    /// presents a defined image.
    ///
    /// # Arguments
    ///
    /// * `renderer` - Shared renderer holding the frame's resources
    /// * `surface_view` - View of the acquired surface texture
    /// * `width` - Surface width in pixels
    /// * `height` - Surface height in pixels
    pub fn new(
        renderer: Rc<RefCell<WgpuRenderer>>,
        surface_view: wgpu::TextureView,
        width: u32,
        height: u32,
    ) -> Self {
        let encoder = renderer
            .borrow()
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Video Layer Encoder"),
            });
        Self {
            renderer,
            encoder,
            pass: None,
            surface_view,
            surface_size: (width, height),
            attachment_size: (width, height),
            target: None,
            viewport: PixelRect::with_size(0, 0, width as i32, height as i32),
            scissor: None,
            color: [1.0, 1.0, 1.0, 1.0],
            mode: ColorMode::Replace,
            blend: BlendMode::Opaque,
            sampler: TextureSampler::NoMipClamp,
            pending_clear: true,
            surface_clear_pending: true,
            fences: Vec::new(),
        }
    }

    fn end_pass(&mut self) {
        self.pass = None;
    }

    fn ensure_pass(&mut self, r: &WgpuRenderer) -> Option<&mut wgpu::RenderPass<'static>> {
        if self.pass.is_none() {
            let (view, width, height) = match self.target {
                None => (
                    self.surface_view.clone(),
                    self.surface_size.0,
                    self.surface_size.1,
                ),
                Some(target) => {
                    let Some(slot) = r.target_slot(target) else {
                        log::warn!("Render pass on dropped target {:?}", target);
                        return None;
                    };
                    (slot.view.clone(), slot.width, slot.height)
                }
            };
            let load = if self.pending_clear {
                wgpu::LoadOp::Clear(wgpu::Color::BLACK)
            } else {
                wgpu::LoadOp::Load
            };
            self.pending_clear = false;
            if self.target.is_none() {
                self.surface_clear_pending = false;
            }
            self.attachment_size = (width, height);
            let mut pass = self
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Video Layer Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            if let Some(vp) = clamp_rect(self.viewport, width, height) {
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width() as f32,
                    vp.height() as f32,
                    0.0,
                    1.0,
                );
            }
            if let Some(scissor) = self.scissor {
                if let Some(sc) = clamp_rect(scissor, width, height) {
                    pass.set_scissor_rect(
                        sc.x as u32,
                        sc.y as u32,
                        sc.width() as u32,
                        sc.height() as u32,
                    );
                }
            }
            self.pass = Some(pass);
        }
        self.pass.as_mut()
    }

    /// Submit the recorded frame
    ///
    /// Ends the open pass, emits the surface clear if nothing drew to
    /// the surface, submits the encoder, and wires every fence inserted
    /// during recording to the submission's completion.
    pub fn submit(mut self) {
        self.end_pass();
        if self.target.is_some() {
            self.target = None;
            self.attachment_size = self.surface_size;
            self.pending_clear = self.surface_clear_pending;
        }
        if self.pending_clear {
            self.viewport = PixelRect::with_size(
                0,
                0,
                self.surface_size.0 as i32,
                self.surface_size.1 as i32,
            );
            self.scissor = None;
            let renderer = Rc::clone(&self.renderer);
            let r = renderer.borrow();
            let _ = self.ensure_pass(&r);
            self.end_pass();
        }
        let r = self.renderer.borrow();
        r.queue.submit(std::iter::once(self.encoder.finish()));
        for fence in self.fences.drain(..) {
            r.queue.on_submitted_work_done(move || fence.signal());
        }
    }
}

impl RenderCommands for WgpuCommands {
    fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color = [r, g, b, a];
    }

    fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    fn bind_quad_program(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    fn set_sampler(&mut self, sampler: TextureSampler) {
        self.sampler = sampler;
    }

    fn set_render_target(&mut self, target: Option<TargetId>) {
        self.end_pass();
        if self.target.is_none() {
            self.surface_clear_pending = self.surface_clear_pending || self.pending_clear;
        }
        self.target = target;
        match target {
            None => {
                self.pending_clear = self.surface_clear_pending;
                self.attachment_size = self.surface_size;
                self.viewport = PixelRect::with_size(
                    0,
                    0,
                    self.surface_size.0 as i32,
                    self.surface_size.1 as i32,
                );
            }
            Some(t) => {
                self.pending_clear = false;
                let renderer = Rc::clone(&self.renderer);
                let r = renderer.borrow();
                if let Some(slot) = r.target_slot(t) {
                    self.attachment_size = (slot.width, slot.height);
                    self.viewport =
                        PixelRect::with_size(0, 0, slot.width as i32, slot.height as i32);
                } else {
                    log::warn!("Bound dropped render target {:?}", t);
                }
            }
        }
    }

    fn set_scissor(&mut self, rect: Option<PixelRect>) {
        self.scissor = rect;
        if let Some(pass) = self.pass.as_mut() {
            let (width, height) = self.attachment_size;
            match rect.and_then(|r| clamp_rect(r, width, height)) {
                Some(sc) => pass.set_scissor_rect(
                    sc.x as u32,
                    sc.y as u32,
                    sc.width() as u32,
                    sc.height() as u32,
                ),
                // Disabling mid-pass means scissoring back to the full attachment
                None => pass.set_scissor_rect(0, 0, width, height),
            }
        }
    }

    fn set_dither(&mut self, enabled: bool) {
        // No dither stage in this backend
        log::trace!("Dither hint: {}", enabled);
    }

    fn set_viewport(&mut self, rect: PixelRect) {
        self.viewport = rect;
        if let Some(pass) = self.pass.as_mut() {
            let (width, height) = self.attachment_size;
            if let Some(vp) = clamp_rect(rect, width, height) {
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width() as f32,
                    vp.height() as f32,
                    0.0,
                    1.0,
                );
            }
        }
    }

    fn viewport(&self) -> PixelRect {
        self.viewport
    }

    fn clear(&mut self) {
        self.end_pass();
        self.pending_clear = true;
    }

    fn draw_image(&mut self, image: ImageId, rect: WorldRect, uv: TexRect) {
        if self.viewport.is_empty() {
            return;
        }
        let renderer = Rc::clone(&self.renderer);
        let r = renderer.borrow();
        let Some(view) = r.image_view(image) else {
            log::warn!("Draw with stale image {:?}", image);
            return;
        };
        let Some(pipelines) = r.quad_pipelines.as_ref() else {
            log::warn!("Quad draw before quad programs were compiled");
            return;
        };
        let pipeline = pipelines.select(self.mode, self.blend).clone();
        let aspect = self.viewport.width() as f32 / self.viewport.height() as f32;
        let uniform = QuadUniform {
            rect: [rect.x, rect.y, rect.x2, rect.y2],
            uv: [uv.u, uv.v, uv.u2, uv.v2],
            color: self.color,
            plane: [aspect, 1.0, 0.0, 0.0],
        };
        let buffer = r.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = r.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Bind Group"),
            layout: &r.quad_bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(r.sampler(self.sampler)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffer.as_entire_binding(),
                },
            ],
        });
        let Some(pass) = self.ensure_pass(&r) else {
            return;
        };
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..6, 0..1);
    }

    fn run_effect(&mut self, program: ProgramId, src: ImageId) {
        let renderer = Rc::clone(&self.renderer);
        let r = renderer.borrow();
        let Some(pipeline) = r.program_pipeline(program) else {
            log::warn!("Run of stale effect program {:?}", program);
            return;
        };
        let Some(view) = r.image_view(src) else {
            log::warn!("Effect source image {:?} is stale", src);
            return;
        };
        let bind_group = r.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Effect Bind Group"),
            layout: &r.effect_bind_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            }],
        });
        let Some(pass) = self.ensure_pass(&r) else {
            return;
        };
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..6, 0..1);
    }

    fn insert_fence(&mut self) -> Fence {
        let fence = Fence::new();
        self.fences.push(fence.clone());
        fence
    }
}

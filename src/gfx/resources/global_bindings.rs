//! Global uniform bindings for camera and scene lighting
//!
//! Manages the per-frame uniform buffer shared by all objects: camera
//! matrices, the ambient term and the scene's light list. Bound to slot 0 in
//! every render pipeline.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Maximum number of point/directional lights packed into the uniform buffer
pub const MAX_LIGHTS: usize = 4;

/// A light in the scene
#[derive(Copy, Clone, Debug)]
pub enum Light {
    Point {
        position: [f32; 3],
        color: [f32; 3],
        intensity: f32,
    },
    Directional {
        direction: [f32; 3],
        color: [f32; 3],
        intensity: f32,
    },
}

/// Scene lighting: one ambient term plus up to [`MAX_LIGHTS`] lights
///
/// Lights beyond the limit are silently ignored by the uniform packing.
#[derive(Clone, Debug)]
pub struct Lighting {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub lights: Vec<Light>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.4,
            lights: vec![Light::Directional {
                direction: [-0.5, -1.0, -0.3],
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            }],
        }
    }
}

impl Lighting {
    pub fn add_point(&mut self, position: [f32; 3], color: [f32; 3], intensity: f32) {
        self.lights.push(Light::Point {
            position,
            color,
            intensity,
        });
    }

    pub fn add_directional(&mut self, direction: [f32; 3], color: [f32; 3], intensity: f32) {
        self.lights.push(Light::Directional {
            direction,
            color,
            intensity,
        });
    }

    pub fn set_ambient(&mut self, color: [f32; 3], intensity: f32) {
        self.ambient_color = color;
        self.ambient_intensity = intensity;
    }
}

const LIGHT_KIND_POINT: u32 = 0;
const LIGHT_KIND_DIRECTIONAL: u32 = 1;

/// One packed light slot; layout matches the Light struct in forward.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuLight {
    /// Position for point lights, direction for directional lights
    position: [f32; 3],
    kind: u32,
    color: [f32; 3],
    intensity: f32,
}

/// Global uniform buffer content
///
/// MUST match the GlobalUniform struct in forward.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// rgb premultiplied by the ambient intensity, w unused
    ambient: [f32; 4],
    lights: [GpuLight; MAX_LIGHTS],
    light_count: u32,
    _padding: [u32; 3],
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Packs camera and lighting state and uploads it
///
/// Called once per frame before rendering.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &Lighting,
) {
    let mut lights = [GpuLight {
        position: [0.0; 3],
        kind: LIGHT_KIND_POINT,
        color: [0.0; 3],
        intensity: 0.0,
    }; MAX_LIGHTS];

    let mut light_count = 0u32;
    for light in lighting.lights.iter().take(MAX_LIGHTS) {
        lights[light_count as usize] = match *light {
            Light::Point {
                position,
                color,
                intensity,
            } => GpuLight {
                position,
                kind: LIGHT_KIND_POINT,
                color,
                intensity,
            },
            Light::Directional {
                direction,
                color,
                intensity,
            } => GpuLight {
                position: direction,
                kind: LIGHT_KIND_DIRECTIONAL,
                color,
                intensity,
            },
        };
        light_count += 1;
    }

    let ambient = [
        lighting.ambient_color[0] * lighting.ambient_intensity,
        lighting.ambient_color[1] * lighting.ambient_intensity,
        lighting.ambient_color[2] * lighting.ambient_intensity,
        1.0,
    ];

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        ambient,
        lights,
        light_count,
        _padding: [0; 3],
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called before any rendering that uses global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

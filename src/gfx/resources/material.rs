//! Material system
//!
//! Materials are stored centrally in [`MaterialManager`] and referenced by
//! objects through their name. A material is a base color plus simple
//! metallic/roughness shading parameters, an optional image texture and an
//! `unlit` flag that bypasses lighting entirely (flat-colored buildings,
//! window photos, edge outlines).

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

use super::texture_resource::TextureResource;

/// Material ID for referencing materials
pub type MaterialId = String;

/// Shading bypass: output the base color (times texture) untouched by lights
pub const MATERIAL_FLAG_UNLIT: u32 = 1;
/// Sample the bound texture and multiply it into the base color
pub const MATERIAL_FLAG_TEXTURED: u32 = 1 << 1;

/// GPU uniform data for materials
///
/// Layout must match the MaterialUniform struct in forward.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
    pub flags: u32,
    _padding: [f32; 2],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &MaterialUBO, texture: &TextureResource) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition
///
/// Holds shading properties and the GPU resources shared by all objects
/// using this material.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub unlit: bool,
    /// Name of a texture registered with the material manager
    pub texture: Option<String>,

    // GPU resources - shared by all objects using this material
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
    // Which texture the current bind group was built with; the bind group is
    // rebuilt when the resolved texture changes (e.g. a load completes)
    bound_texture: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
            unlit: false,
            texture: None,
            material_ubo: None,
            material_bindings: None,
            bound_texture: None,
        }
    }
}

impl Material {
    /// Creates a new material with basic shading properties
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Builder pattern: Skip lighting for this material
    pub fn with_unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    /// Builder pattern: Reference a texture by its registered name
    ///
    /// The white fallback is used until the texture actually exists, so the
    /// material can be created before its image finishes loading.
    pub fn with_texture(mut self, texture_name: &str) -> Self {
        self.texture = Some(texture_name.to_string());
        self
    }

    /// Updates GPU resources for this material
    ///
    /// Resolves the referenced texture against the registered ones (falling
    /// back to plain white), rebuilds the bind group when the resolution
    /// changed, and syncs the uniform data.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        textures: &HashMap<String, TextureResource>,
        fallback: &TextureResource,
    ) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        let resolved = self
            .texture
            .as_ref()
            .filter(|name| textures.contains_key(*name))
            .cloned();
        let texture = resolved
            .as_ref()
            .and_then(|name| textures.get(name))
            .unwrap_or(fallback);

        if self.material_bindings.is_none() || self.bound_texture != resolved {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap(), texture);
            self.material_bindings = Some(bindings);
            self.bound_texture = resolved.clone();
        }

        let mut flags = 0;
        if self.unlit {
            flags |= MATERIAL_FLAG_UNLIT;
        }
        if resolved.is_some() {
            flags |= MATERIAL_FLAG_TEXTURED;
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            metallic: self.metallic,
            roughness: self.roughness,
            flags,
            _padding: [0.0; 2],
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings
            .as_ref()
            .and_then(|bindings| bindings.bind_group.as_ref())
    }
}

/// Central storage for materials and their textures
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    textures: HashMap<String, TextureResource>,
    // RGBA images waiting for a GPU device (loads can finish before init)
    pending_texture_data: Vec<(String, Vec<u8>, u32, u32)>,
    fallback_texture: Option<TextureResource>,
}

impl MaterialManager {
    pub fn new() -> Self {
        let mut materials = HashMap::new();
        let default = Material::default();
        materials.insert(default.name.clone(), default);

        Self {
            materials,
            textures: HashMap::new(),
            pending_texture_data: Vec::new(),
            fallback_texture: None,
        }
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Returns the material assigned to an object, or the default material
    /// when nothing (or something unknown) is assigned.
    pub fn get_material_for_object(&self, material_id: Option<&str>) -> &Material {
        material_id
            .and_then(|id| self.materials.get(id))
            .unwrap_or_else(|| {
                self.materials
                    .get("default")
                    .expect("default material missing")
            })
    }

    /// Lists all available material names
    pub fn list_materials(&self) -> Vec<&String> {
        self.materials.keys().collect()
    }

    /// Registers decoded RGBA image data under a name
    ///
    /// The GPU texture is created on the next `update_all_gpu_resources`
    /// call; materials referencing the name pick it up automatically.
    pub fn add_texture_data(&mut self, name: &str, rgba: Vec<u8>, width: u32, height: u32) {
        self.pending_texture_data
            .push((name.to_string(), rgba, width, height));
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.textures.contains_key(name)
            || self.pending_texture_data.iter().any(|(n, ..)| n == name)
    }

    /// Uploads pending textures and syncs every material's GPU state
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        let fallback = self
            .fallback_texture
            .get_or_insert_with(|| TextureResource::create_white(device, queue));

        for (name, rgba, width, height) in self.pending_texture_data.drain(..) {
            let texture =
                TextureResource::create_from_rgba_data(device, queue, &rgba, width, height, &name);
            self.textures.insert(name, texture);
        }

        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, &self.textures, fallback);
        }
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let material = manager.get_material_for_object(Some("missing"));
        assert_eq!(material.name, "default");
        assert_eq!(manager.get_material_for_object(None).name, "default");
    }

    #[test]
    fn pending_texture_is_visible_by_name() {
        let mut manager = MaterialManager::new();
        assert!(!manager.has_texture("board"));
        manager.add_texture_data("board", vec![0; 4], 1, 1);
        assert!(manager.has_texture("board"));
    }
}

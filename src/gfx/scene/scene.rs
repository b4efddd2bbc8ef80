use cgmath::Vector3;
use wgpu::Device;

use crate::assets::model::ModelData;
use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::{self, GeometryData},
    resources::{
        global_bindings::Lighting,
        material::{Material, MaterialManager},
    },
};

use super::object::{Mesh, MeshTopology, Object};

/// Reference to an object owned by a [`Scene`]
///
/// Handles are stable for the lifetime of the process: objects are only ever
/// appended, never removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub(crate) usize);

impl ObjectHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Main scene containing objects, materials, lights and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lighting: Lighting,
    /// Clear color of the frame, linear RGB
    pub background: [f64; 3],
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting: Lighting::default(),
            background: [0.1, 0.2, 0.3],
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    fn push_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Adds an object built from arbitrary triangle geometry
    pub fn add_geometry(&mut self, data: GeometryData) -> ObjectBuilder<'_> {
        let mesh = Mesh::from_geometry(&data, MeshTopology::Triangles);
        let mut object = Object::new(vec![mesh]);
        object.name = self.ensure_unique_name("object");
        let index = self.push_object(object);
        ObjectBuilder { scene: self, index }
    }

    /// Adds an axis-aligned box
    pub fn add_box(&mut self, width: f32, height: f32, depth: f32) -> ObjectBuilder<'_> {
        self.add_geometry(geometry::generate_box(width, height, depth))
    }

    /// Adds a unit cube
    pub fn add_cube(&mut self) -> ObjectBuilder<'_> {
        self.add_geometry(geometry::generate_cube())
    }

    /// Adds an upright plane (rotate it to lay it flat)
    pub fn add_plane(
        &mut self,
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> ObjectBuilder<'_> {
        self.add_geometry(geometry::generate_plane(
            width,
            height,
            width_segments,
            height_segments,
        ))
    }

    /// Adds a UV sphere
    pub fn add_sphere(
        &mut self,
        radius: f32,
        longitude_segments: u32,
        latitude_segments: u32,
    ) -> ObjectBuilder<'_> {
        self.add_geometry(geometry::generate_sphere(
            radius,
            longitude_segments,
            latitude_segments,
        ))
    }

    /// Adds a capped cylinder
    pub fn add_cylinder(&mut self, radius: f32, height: f32, segments: u32) -> ObjectBuilder<'_> {
        self.add_geometry(geometry::generate_cylinder(radius, height, segments))
    }

    /// Instantiates a loaded model as a new scene object
    ///
    /// Registers the model's materials (existing names win, so instantiating
    /// the same model repeatedly is cheap) and builds one object holding all
    /// of its meshes. Called from asset-load completion callbacks.
    pub fn instantiate(&mut self, model: &ModelData) -> ObjectBuilder<'_> {
        for def in &model.materials {
            if self.material_manager.get_material(&def.name).is_none() {
                self.material_manager.add_material(
                    Material::new(&def.name, def.base_color, def.metallic, def.roughness),
                );
            }
        }

        let mut meshes = Vec::with_capacity(model.meshes.len());
        let mut material_id = None;
        for mesh_data in &model.meshes {
            meshes.push(Mesh::from_arrays(
                &mesh_data.positions,
                &mesh_data.normals,
                &mesh_data.tex_coords,
                mesh_data.indices.clone(),
            ));
            // A scene object carries one material; the first mesh with an
            // assigned material decides it
            if material_id.is_none() {
                if let Some(index) = mesh_data.material {
                    material_id = model.materials.get(index).map(|def| def.name.clone());
                }
            }
        }

        let mut object = Object::new(meshes);
        object.name = self.ensure_unique_name(&model.name);
        object.material_id = material_id;
        let index = self.push_object(object);
        ObjectBuilder { scene: self, index }
    }

    /// Creates a new material and adds it to the material manager
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager.get_material_mut(name).unwrap()
    }

    /// Convenience method for creating materials with RGB colors
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Registers decoded image data as a named texture
    pub fn add_texture_data(&mut self, name: &str, rgba: Vec<u8>, width: u32, height: u32) {
        self.material_manager
            .add_texture_data(name, rgba, width, height);
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Syncs all CPU-side state to the GPU
    ///
    /// Lazily creates GPU resources for objects added since the last frame
    /// (asset callbacks append objects at arbitrary times), uploads pending
    /// textures, refreshes material uniforms and writes object transforms.
    pub fn flush_gpu(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device);
            }
            object.update_transform(queue);
        }

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    // Lookup helpers

    pub fn object(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle.0)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.objects.get_mut(handle.0)
    }

    /// Gets all object names for UI display
    pub fn get_object_names(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.name.clone()).collect()
    }

    /// Gets the total number of objects
    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Gets mutable reference to an object by index (UI selection)
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets immutable reference to an object by index
    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let base = if desired_name.is_empty() {
            "object"
        } else {
            desired_name
        };
        let mut counter = 0;
        let mut test_name = base.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", base, counter);
        }

        test_name
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| {
                obj.meshes
                    .iter()
                    .filter(|m| m.topology == MeshTopology::Triangles)
                    .map(|m| m.index_count() / 3)
                    .sum::<u32>()
            })
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count()).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Configures the most recently added object, builder style
///
/// All methods return the builder; finish with [`ObjectBuilder::handle`] to
/// get the [`ObjectHandle`] for animator registration or later lookup.
pub struct ObjectBuilder<'a> {
    scene: &'a mut Scene,
    index: usize,
}

impl<'a> ObjectBuilder<'a> {
    fn object(&mut self) -> &mut Object {
        &mut self.scene.objects[self.index]
    }

    pub fn with_name(mut self, name: &str) -> Self {
        let unique = self.scene.ensure_unique_name(name);
        self.object().name = unique;
        self
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.object().set_material(material_id);
        self
    }

    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.object().transform.position = Vector3::from(position);
        self
    }

    /// Euler rotation in radians
    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.object().transform.rotation = Vector3::from(rotation);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.object().transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn with_scale_xyz(mut self, scale: [f32; 3]) -> Self {
        self.object().transform.scale = Vector3::from(scale);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.object().visible = false;
        self
    }

    /// Turns a closed shape inside out (render its interior faces)
    pub fn inside_out(mut self) -> Self {
        for mesh in &mut self.object().meshes {
            mesh.flip_winding();
        }
        self
    }

    /// Attaches a hard-edge outline drawn with the line pipeline
    ///
    /// The outline shares the object's transform; its color becomes an unlit
    /// material registered (once) under a name derived from the color.
    pub fn with_edges(mut self, color: [f32; 3]) -> Self {
        let outlines: Vec<GeometryData> = self
            .object()
            .meshes
            .iter()
            .filter(|m| m.topology == MeshTopology::Triangles)
            .map(|m| geometry::edge_outline(&m.to_geometry()))
            .collect();

        let material_name = format!("edge_{:.2}_{:.2}_{:.2}", color[0], color[1], color[2]);
        if self
            .scene
            .material_manager
            .get_material(&material_name)
            .is_none()
        {
            self.scene.material_manager.add_material(
                Material::new(
                    &material_name,
                    [color[0], color[1], color[2], 1.0],
                    0.0,
                    1.0,
                )
                .with_unlit(),
            );
        }

        let object = self.object();
        for outline in outlines {
            object
                .meshes
                .push(Mesh::from_geometry(&outline, MeshTopology::Lines));
        }
        object.edge_material_id = Some(material_name);
        self
    }

    pub fn handle(self) -> ObjectHandle {
        ObjectHandle(self.index)
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

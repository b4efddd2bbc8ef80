//! Scene objects: meshes, transforms and GPU state
//!
//! An [`Object`] is a named group of meshes with a mutable [`Transform`].
//! The motion animator and the UI panels write to the transform fields; the
//! matrix is rebuilt and uploaded during the scene's per-frame GPU flush.

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;

use super::vertex::Vertex3D;

/// How a mesh's indices are interpreted by the renderer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshTopology {
    Triangles,
    Lines,
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    pub topology: MeshTopology,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>, topology: MeshTopology) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            topology,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(data: &GeometryData, topology: MeshTopology) -> Self {
        let vertices = (0..data.vertices.len())
            .map(|i| Vertex3D {
                position: data.vertices[i],
                normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: data.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect();
        Self::new(vertices, data.indices.clone(), topology)
    }

    /// Builds a triangle mesh from the flat arrays the asset loader produces
    pub fn from_arrays(
        positions: &[f32],
        normals: &[f32],
        tex_coords: &[f32],
        indices: Vec<u32>,
    ) -> Self {
        let mut vertices = Vec::with_capacity(positions.len() / 3);
        for i in 0..positions.len() / 3 {
            let uv = if tex_coords.len() >= (i + 1) * 2 {
                [tex_coords[i * 2], tex_coords[i * 2 + 1]]
            } else {
                [0.0, 0.0]
            };
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                tex_coords: uv,
            });
        }
        Self::new(vertices, indices, MeshTopology::Triangles)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Exports the CPU-side mesh data back into flat geometry arrays
    pub fn to_geometry(&self) -> GeometryData {
        let mut data = GeometryData::new();
        for vertex in &self.vertices {
            data.vertices.push(vertex.position);
            data.normals.push(vertex.normal);
            data.tex_coords.push(vertex.tex_coords);
        }
        data.indices = self.indices.clone();
        data
    }

    /// Reverses winding and flips normals (see `GeometryData::flip_winding`)
    pub fn flip_winding(&mut self) {
        for triangle in self.indices.chunks_mut(3) {
            triangle.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            vertex.normal = [-vertex.normal[0], -vertex.normal[1], -vertex.normal[2]];
        }
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Position, Euler rotation (radians) and scale of an object
///
/// These fields are the animator's mutation target; `matrix()` composes them
/// as T * Ry * Rx * Rz * S.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// GPU resources backing one object's transform uniform
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    pub visible: bool,
    /// Material for triangle meshes; `None` renders with the default material
    pub material_id: Option<String>,
    /// Material for line meshes (edge outlines); lines are skipped when unset
    pub edge_material_id: Option<String>,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            name: String::new(),
            meshes,
            transform: Transform::default(),
            visible: true,
            material_id: None,
            edge_material_id: None,
            gpu_resources: None,
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn get_material_id(&self) -> Option<&str> {
        self.material_id.as_deref()
    }

    pub fn has_line_meshes(&self) -> bool {
        self.meshes
            .iter()
            .any(|mesh| mesh.topology == MeshTopology::Lines)
    }

    /// Creates vertex/index buffers and the transform uniform
    ///
    /// Called lazily by the scene's GPU flush, so objects can be added at any
    /// time (including from asset-load callbacks after startup).
    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let matrix: [[f32; 4]; 4] = self.transform.matrix().into();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(&matrix),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout = transform_bind_group_layout(device);
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }

    /// Writes the current transform matrix to the GPU
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let matrix: [[f32; 4]; 4] = self.transform.matrix().into();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(&matrix),
            );
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }
}

/// The per-object transform bind group layout (slot 1 in both pipelines)
pub fn transform_bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Transform Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_matrix_translates() {
        let mut transform = Transform::default();
        transform.position = Vector3::new(1.0, 2.0, 3.0);
        let m = transform.matrix();
        assert_eq!(m.w.x, 1.0);
        assert_eq!(m.w.y, 2.0);
        assert_eq!(m.w.z, 3.0);
    }

    #[test]
    fn transform_matrix_rotates_around_y() {
        let mut transform = Transform::default();
        transform.rotation.y = std::f32::consts::FRAC_PI_2;
        let m = transform.matrix();
        // +X axis maps to -Z under a quarter turn around Y
        assert!((m.x.x).abs() < 1.0e-6);
        assert!((m.x.z + 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn mesh_flip_winding_reverses_triangles() {
        let data = crate::gfx::geometry::generate_cube();
        let mut mesh = Mesh::from_geometry(&data, MeshTopology::Triangles);
        let before = mesh.indices[1];
        mesh.flip_winding();
        assert_eq!(mesh.indices[2], before);
    }
}

//! CPU-side model and texture data
//!
//! Everything in this module is plain data that can cross the loader-thread
//! boundary; GPU resources are created later when the scene instantiates it.

use std::path::Path;

use crate::gfx::geometry::accumulate_vertex_normals;

use super::AssetError;

/// One mesh of a loaded model, as flat arrays
#[derive(Debug)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: Vec<u32>,
    /// Index into the model's material list
    pub material: Option<usize>,
}

/// Material parameters extracted from MTL or glTF
#[derive(Debug)]
pub struct MaterialDef {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

/// A fully decoded model, ready to instantiate into a scene
#[derive(Debug)]
pub struct ModelData {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub materials: Vec<MaterialDef>,
}

/// A decoded RGBA8 image
pub struct TextureData {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}

/// Loads an OBJ file with its MTL materials
pub fn load_obj(path: &Path) -> Result<ModelData, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        log::warn!(
            "no usable MTL for {}: {}; using default materials",
            path.display(),
            err
        );
        Vec::new()
    });

    let material_defs = materials
        .iter()
        .enumerate()
        .map(|(i, mtl)| {
            let name = if mtl.name.is_empty() {
                format!("material_{}", i)
            } else {
                mtl.name.clone()
            };
            let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
            MaterialDef {
                name,
                base_color: [
                    diffuse[0],
                    diffuse[1],
                    diffuse[2],
                    mtl.dissolve.unwrap_or(1.0),
                ],
                // MTL has no direct metallic value; shininess maps to roughness
                metallic: 0.0,
                roughness: 1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
            }
        })
        .collect();

    let mut meshes = Vec::with_capacity(models.len());
    for m in models.iter() {
        let mesh = &m.mesh;

        let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
            mesh.normals.clone()
        } else {
            accumulate_vertex_normals(&mesh.positions, &mesh.indices)
        };

        meshes.push(MeshData {
            name: m.name.clone(),
            positions: mesh.positions.clone(),
            normals,
            tex_coords: mesh.texcoords.clone(),
            indices: mesh.indices.clone(),
            material: mesh.material_id,
        });
    }

    Ok(ModelData {
        name: file_stem(path),
        meshes,
        materials: material_defs,
    })
}

/// Loads a glTF (or binary glb) file
pub fn load_gltf(path: &Path) -> Result<ModelData, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;

    let materials = document
        .materials()
        .enumerate()
        .map(|(i, material)| {
            let pbr = material.pbr_metallic_roughness();
            MaterialDef {
                name: material
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("material_{}", i)),
                base_color: pbr.base_color_factor(),
                metallic: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
            }
        })
        .collect();

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|b| &b[..]));

            let Some(position_reader) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<f32> = position_reader.flatten().collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                // Non-indexed primitive: index every vertex in order
                None => (0..(positions.len() / 3) as u32).collect(),
            };

            let normals: Vec<f32> = match reader.read_normals() {
                Some(normal_reader) => normal_reader.flatten().collect(),
                None => accumulate_vertex_normals(&positions, &indices),
            };

            let tex_coords: Vec<f32> = reader
                .read_tex_coords(0)
                .map(|uvs| uvs.into_f32().flatten().collect())
                .unwrap_or_default();

            meshes.push(MeshData {
                name: mesh.name().unwrap_or("primitive").to_string(),
                positions,
                normals,
                tex_coords,
                indices,
                material: primitive.material().index(),
            });
        }
    }

    Ok(ModelData {
        name: file_stem(path),
        meshes,
        materials,
    })
}

/// Decodes an image file into RGBA8
pub fn load_texture(path: &Path) -> Result<TextureData, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLE_OBJ: &str = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn obj_without_normals_gets_computed_ones() {
        let path = std::env::temp_dir().join("maquette_test_triangle.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(TRIANGLE_OBJ.as_bytes()).unwrap();

        let model = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(model.meshes.len(), 1);
        let mesh = &model.meshes[0];
        assert_eq!(mesh.positions.len(), 9);
        assert_eq!(mesh.normals.len(), 9);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        // CCW triangle in the XY plane faces +Z
        assert!((mesh.normals[2] - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn missing_file_reports_an_obj_error() {
        let err = load_obj(Path::new("/nonexistent/model.obj")).unwrap_err();
        assert!(matches!(err, AssetError::Obj { .. }));
    }
}

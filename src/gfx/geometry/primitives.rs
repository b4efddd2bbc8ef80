//! # Primitive Shape Generation
//!
//! Generators for the shapes the demo scenes are assembled from. All shapes
//! are centered at the origin, wound counter-clockwise and carry normals and
//! texture coordinates.

use super::GeometryData;
use std::collections::HashMap;
use std::f32::consts::PI;

/// Generate an axis-aligned box with the given dimensions
///
/// The box spans -width/2..width/2 on X, -height/2..height/2 on Y and
/// -depth/2..depth/2 on Z. Each face has its own four vertices so normals
/// stay hard.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    // (face normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        (
            [0.0, 0.0, 1.0],
            [[-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd]],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [[hw, -hh, -hd], [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd]],
        ),
        // +X
        (
            [1.0, 0.0, 0.0],
            [[hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd]],
        ),
    ];

    let mut data = GeometryData::new();
    let face_uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    for (normal, corners) in faces.iter() {
        let base = data.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(face_uvs.iter()) {
            data.vertices.push(*corner);
            data.normals.push(*normal);
            data.tex_coords.push(*uv);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a unit cube centered at the origin
pub fn generate_cube() -> GeometryData {
    generate_box(1.0, 1.0, 1.0)
}

/// Generate a UV sphere of the given radius
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (min 3)
/// * `latitude_segments` - Number of horizontal segments (min 2)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 at the north pole
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            // Unit direction doubles as the normal
            let dir = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([dir[0] * radius, dir[1] * radius, dir[2] * radius]);
            data.normals.push(dir);
            data.tex_coords.push([
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(first + 1);
            data.indices.push(second);

            data.indices.push(second);
            data.indices.push(first + 1);
            data.indices.push(second + 1);
        }
    }

    data
}

/// Generate a plane in the XY plane with its normal on +Z
///
/// Matches the convention of classic scene-graph plane geometry: the plane
/// stands upright and is rotated by the caller (e.g. `rotation.x = -PI/2`
/// to lay it flat as a floor).
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for row in 0..=h_segs {
        let v = row as f32 / h_segs as f32;
        for col in 0..=w_segs {
            let u = col as f32 / w_segs as f32;
            data.vertices
                .push([(u - 0.5) * width, (v - 0.5) * height, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, 1.0 - v]);
        }
    }

    for row in 0..h_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row + 1);

            data.indices.push(next_row + 1);
            data.indices.push(next_row);
            data.indices.push(i);
        }
    }

    data
}

/// Generate a capped cylinder along the Y axis
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side wall
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let (x, z) = (radius * cos_a, radius * sin_a);
        let u = i as f32 / segs as f32;

        data.vertices.push([x, -half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.tex_coords.push([u, 1.0]);

        data.vertices.push([x, half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.tex_coords.push([u, 0.0]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;

        data.indices
            .extend_from_slice(&[bottom, top, next_bottom, top, next_top, next_bottom]);
    }

    // Caps
    let cap_specs = [(-half_height, [0.0, -1.0, 0.0]), (half_height, [0.0, 1.0, 0.0])];
    for (y, normal) in cap_specs.iter() {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, *y, 0.0]);
        data.normals.push(*normal);
        data.tex_coords.push([0.5, 0.5]);

        let ring_start = data.vertices.len() as u32;
        for i in 0..=segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            let (sin_a, cos_a) = angle.sin_cos();
            data.vertices.push([radius * cos_a, *y, radius * sin_a]);
            data.normals.push(*normal);
            data.tex_coords.push([0.5 + cos_a * 0.5, 0.5 + sin_a * 0.5]);
        }
        for i in 0..segs {
            if normal[1] > 0.0 {
                data.indices
                    .extend_from_slice(&[center, ring_start + i + 1, ring_start + i]);
            } else {
                data.indices
                    .extend_from_slice(&[center, ring_start + i, ring_start + i + 1]);
            }
        }
    }

    data
}

/// Extract a line-list outline of all hard edges in a triangle geometry
///
/// An edge is part of the outline when it borders only one triangle or when
/// its two triangles are not coplanar. Duplicated corner vertices (as the box
/// generator produces) are collapsed by position first so face seams are
/// detected correctly.
pub fn edge_outline(source: &GeometryData) -> GeometryData {
    const COPLANAR_DOT: f32 = 0.9999;

    let quantize = |p: &[f32; 3]| {
        (
            (p[0] * 1.0e4).round() as i64,
            (p[1] * 1.0e4).round() as i64,
            (p[2] * 1.0e4).round() as i64,
        )
    };

    // Collapse duplicated corners to canonical ids
    let mut canonical_ids: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut canonical_pos: Vec<[f32; 3]> = Vec::new();
    let mut remap = Vec::with_capacity(source.vertices.len());
    for position in &source.vertices {
        let id = *canonical_ids.entry(quantize(position)).or_insert_with(|| {
            canonical_pos.push(*position);
            (canonical_pos.len() - 1) as u32
        });
        remap.push(id);
    }

    // Collect the face normals adjacent to every canonical edge
    let mut edge_faces: HashMap<(u32, u32), Vec<[f32; 3]>> = HashMap::new();
    for triangle in source.indices.chunks(3) {
        let ids = [
            remap[triangle[0] as usize],
            remap[triangle[1] as usize],
            remap[triangle[2] as usize],
        ];
        let [a, b, c] = [
            canonical_pos[ids[0] as usize],
            canonical_pos[ids[1] as usize],
            canonical_pos[ids[2] as usize],
        ];
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let mut n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n = [n[0] / len, n[1] / len, n[2] / len];
        }

        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            let key = if ids[i] < ids[j] {
                (ids[i], ids[j])
            } else {
                (ids[j], ids[i])
            };
            edge_faces.entry(key).or_default().push(n);
        }
    }

    let mut data = GeometryData::new();
    for ((a, b), normals) in edge_faces {
        let hard = match normals.as_slice() {
            [_] => true,
            [n0, n1] => n0[0] * n1[0] + n0[1] * n1[1] + n0[2] * n1[2] < COPLANAR_DOT,
            // Non-manifold edge, keep it visible
            _ => true,
        };
        if hard {
            let base = data.vertices.len() as u32;
            for &id in &[a, b] {
                data.vertices.push(canonical_pos[id as usize]);
                data.normals.push([0.0, 1.0, 0.0]);
                data.tex_coords.push([0.0, 0.0]);
            }
            data.indices.push(base);
            data.indices.push(base + 1);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let slab = generate_box(10.0, 1.0, 10.0);
        let max_y = slab
            .vertices
            .iter()
            .map(|v| v[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_y, 0.5);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.0, 8, 6);
        assert!(!sphere.vertices.is_empty());
        assert!(!sphere.indices.is_empty());
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        // Every vertex sits on the sphere surface
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 2.0).abs() < 1.0e-4);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices

        // Flat in XY, facing +Z
        for (v, n) in plane.vertices.iter().zip(plane.normals.iter()) {
            assert_eq!(v[2], 0.0);
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let segs = 12;
        let cylinder = generate_cylinder(1.0, 2.0, segs);
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());
        // side quads + two capped fans
        assert_eq!(cylinder.triangle_count() as u32, segs * 2 + segs * 2);

        let max_y = cylinder
            .vertices
            .iter()
            .map(|v| v[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_y, 1.0);
    }

    #[test]
    fn test_flip_winding() {
        let mut cube = generate_cube();
        let first = [cube.indices[0], cube.indices[1], cube.indices[2]];
        cube.flip_winding();
        assert_eq!(
            [cube.indices[0], cube.indices[1], cube.indices[2]],
            [first[0], first[2], first[1]]
        );
        assert_eq!(cube.normals[0], [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_cube_edge_outline() {
        let outline = edge_outline(&generate_cube());
        // A cube has 12 hard edges -> 12 line segments
        assert_eq!(outline.indices.len(), 24);
        assert_eq!(outline.vertices.len(), 24);
    }
}

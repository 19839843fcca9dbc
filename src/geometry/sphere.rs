//! UV sphere tessellation.

use glam::Vec3;

use super::{MeshData, MeshVertex};

/// Build a UV sphere centered on the origin.
///
/// Vertices form a `(width + 1) × (height + 1)` grid of rings from the
/// north pole (+Y) to the south pole. The seam column is duplicated so
/// texture coordinates wrap cleanly, and the degenerate triangles at both
/// poles are skipped. Segment counts below 3 (width) and 2 (height) are
/// raised to those minimums.
#[must_use]
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    let mut grid = Vec::with_capacity(height as usize + 1);

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        // Pole vertices sit mid-segment in u so their texel is centered.
        let u_offset = match iy {
            0 => 0.5 / width as f32,
            _ if iy == height => -0.5 / width as f32,
            _ => 0.0,
        };
        let (sin_v, cos_v) = (v * std::f32::consts::PI).sin_cos();

        let mut row = Vec::with_capacity(width as usize + 1);
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let (sin_u, cos_u) = (u * std::f32::consts::TAU).sin_cos();
            let position = Vec3::new(
                -radius * cos_u * sin_v,
                radius * cos_v,
                radius * sin_u * sin_v,
            );
            row.push(vertices.len() as u32);
            vertices.push(MeshVertex {
                position: position.to_array(),
                normal: position.normalize_or_zero().to_array(),
                uv: [u + u_offset, v],
            });
        }
        grid.push(row);
    }

    let mut indices = Vec::with_capacity((width * height * 6) as usize);
    for iy in 0..height as usize {
        for ix in 0..width as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height as usize - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

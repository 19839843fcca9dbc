//! CPU linear-blend skinning.

use glam::{Mat4, Vec3};

use crate::geometry::MeshVertex;

/// Joint matrices for one skin: `world[joint] * inverse_bind[joint]`.
///
/// `joints` are node indices into `world`. Joints pointing outside
/// `world` and missing inverse-bind entries resolve to identity.
#[must_use]
pub fn joint_matrices(joints: &[usize], inverse_bind: &[Mat4], world: &[Mat4]) -> Vec<Mat4> {
    joints
        .iter()
        .enumerate()
        .map(|(i, &node)| {
            let joint_world = world.get(node).copied().unwrap_or(Mat4::IDENTITY);
            let ibm = inverse_bind.get(i).copied().unwrap_or(Mat4::IDENTITY);
            joint_world * ibm
        })
        .collect()
}

/// Blend each vertex of `rest` by up to four joint influences and write
/// the result to `out`.
///
/// Weights are normalized per vertex. A vertex whose weights sum to zero
/// is copied unchanged. `out` is resized to match `rest`.
pub fn skin_vertices(
    rest: &[MeshVertex],
    joints: &[[u16; 4]],
    weights: &[[f32; 4]],
    joint_mats: &[Mat4],
    out: &mut Vec<MeshVertex>,
) {
    out.clear();
    out.extend_from_slice(rest);

    for ((vertex, influence), weight) in out.iter_mut().zip(joints).zip(weights) {
        let total: f32 = weight.iter().sum();
        if total <= f32::EPSILON {
            continue;
        }
        let mut skin = Mat4::ZERO;
        for (&joint, &w) in influence.iter().zip(weight) {
            if w == 0.0 {
                continue;
            }
            let m = joint_mats
                .get(usize::from(joint))
                .copied()
                .unwrap_or(Mat4::IDENTITY);
            skin += m * (w / total);
        }

        let position = skin.transform_point3(Vec3::from_array(vertex.position));
        let normal = skin
            .transform_vector3(Vec3::from_array(vertex.normal))
            .normalize_or_zero();
        vertex.position = position.to_array();
        vertex.normal = normal.to_array();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn vertex(position: [f32; 3]) -> MeshVertex {
        MeshVertex {
            position,
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }

    #[test]
    fn joint_matrix_cancels_bind_pose() {
        let bind = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let mats = joint_matrices(&[0], &[bind.inverse()], &[bind]);
        assert!(mats[0].abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn unknown_joint_node_is_identity() {
        let mats = joint_matrices(&[7], &[], &[Mat4::IDENTITY]);
        assert_eq!(mats, vec![Mat4::IDENTITY]);
    }

    #[test]
    fn weights_blend_and_normalize() {
        let mats = [
            Mat4::from_translation(Vec3::X * 2.0),
            Mat4::from_translation(Vec3::Z * 4.0),
        ];
        let rest = [vertex([0.0, 0.0, 0.0])];
        let mut out = Vec::new();
        // Sums to 2; normalized to 0.5 / 0.5.
        skin_vertices(&rest, &[[0, 1, 0, 0]], &[[1.0, 1.0, 0.0, 0.0]], &mats, &mut out);
        assert_relative_eq!(out[0].position[0], 1.0);
        assert_relative_eq!(out[0].position[2], 2.0);
    }

    #[test]
    fn unweighted_vertices_are_untouched() {
        let mats = [Mat4::from_translation(Vec3::ONE)];
        let rest = [vertex([1.0, 2.0, 3.0])];
        let mut out = Vec::new();
        skin_vertices(&rest, &[[0; 4]], &[[0.0; 4]], &mats, &mut out);
        assert_eq!(out, rest);
    }

    #[test]
    fn normals_rotate_with_the_joint() {
        let mats = [Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2)];
        let rest = [vertex([0.0, 0.0, 0.0])];
        let mut out = Vec::new();
        skin_vertices(&rest, &[[0; 4]], &[[1.0, 0.0, 0.0, 0.0]], &mats, &mut out);
        assert_relative_eq!(out[0].normal[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(out[0].normal[1], 0.0, epsilon = 1e-6);
    }
}

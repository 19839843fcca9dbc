//! Host-side mirrors of the WGSL uniform structs.
//!
//! Layout is computed by encase so the Rust structs can use plain glam
//! vectors without manual padding.

use encase::{internal::WriteInto, ShaderType, UniformBuffer};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::OrbitalError;
use crate::scene::SceneGraph;

/// `Lights` in `modules/lighting.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct LightsUniform {
    /// World-space point light position.
    pub point_position: Vec3,
    /// Point light intensity.
    pub point_intensity: f32,
    /// Linear point light color.
    pub point_color: Vec3,
    /// Distance falloff exponent.
    pub point_decay: f32,
    /// Summed linear ambient radiance.
    pub ambient: Vec3,
}

impl LightsUniform {
    /// Collect the first point light and the total ambient term.
    ///
    /// A graph without a point light yields a black one at the origin.
    #[must_use]
    pub fn from_graph(graph: &SceneGraph) -> Self {
        let (point_position, point_color, point_intensity, point_decay) = graph
            .point_lights()
            .next()
            .map_or((Vec3::ZERO, Vec3::ZERO, 0.0, 0.0), |(p, l)| {
                (p, l.color, l.intensity, l.decay)
            });
        Self {
            point_position,
            point_intensity,
            point_color,
            point_decay,
            ambient: graph.ambient_radiance(),
        }
    }
}

/// `Material` in `mesh.wgsl` and `star.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct MaterialUniform {
    /// Linear RGBA multiplier for the color map.
    pub base_color: Vec4,
    /// UV scale applied before sampling.
    pub uv_repeat: Vec2,
    /// Nonzero to perturb normals by the normal map.
    pub use_normal_map: u32,
}

impl MaterialUniform {
    /// Untextured, non-tiled material of `base_color`.
    #[must_use]
    pub fn flat(base_color: Vec4) -> Self {
        Self {
            base_color,
            uv_repeat: Vec2::ONE,
            use_normal_map: 0,
        }
    }
}

/// `ObjectUniform` in `mesh.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct ObjectUniform {
    /// Object-to-world matrix.
    pub model: Mat4,
    /// Inverse transpose of `model`, for normals.
    pub normal_matrix: Mat4,
}

impl ObjectUniform {
    /// Uniform for `model`. Singular matrices get an identity normal
    /// matrix.
    #[must_use]
    pub fn new(model: Mat4) -> Self {
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self {
            model,
            normal_matrix,
        }
    }
}

/// Serialize `value` with uniform address-space layout.
///
/// # Errors
///
/// Returns [`OrbitalError::Uniform`] if encase rejects the value.
pub fn encode<T: ShaderType + WriteInto>(value: &T) -> Result<Vec<u8>, OrbitalError> {
    let mut buffer = UniformBuffer::new(Vec::<u8>::new());
    buffer
        .write(value)
        .map_err(|e| OrbitalError::Uniform(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LightingOptions;
    use crate::scene::Environment;

    #[test]
    fn sizes_match_wgsl_layout() {
        assert_eq!(LightsUniform::min_size().get(), 48);
        assert_eq!(MaterialUniform::min_size().get(), 32);
        assert_eq!(ObjectUniform::min_size().get(), 128);
    }

    #[test]
    fn encoded_fields_land_at_wgsl_offsets() {
        let lights = LightsUniform {
            point_position: Vec3::new(1.0, 2.0, 3.0),
            point_intensity: 4.0,
            point_color: Vec3::new(5.0, 6.0, 7.0),
            point_decay: 8.0,
            ambient: Vec3::new(9.0, 10.0, 11.0),
        };
        let bytes = encode(&lights).unwrap();
        let floats: Vec<f32> = bytes[..44]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(
            floats,
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]
        );
    }

    #[test]
    fn lights_come_from_the_graph() {
        let mut graph = SceneGraph::new();
        let _ = Environment::setup(&mut graph, &LightingOptions::default());
        let lights = LightsUniform::from_graph(&graph);
        assert_eq!(lights.point_position, Vec3::new(5.0, 5.0, 80.0));
        assert_eq!(lights.point_decay, 2.0);
        assert_eq!(lights.ambient, Vec3::ONE);
    }

    #[test]
    fn empty_graph_is_dark() {
        let lights = LightsUniform::from_graph(&SceneGraph::new());
        assert_eq!(lights.point_intensity, 0.0);
        assert_eq!(lights.ambient, Vec3::ZERO);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let object = ObjectUniform::new(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        let n = object.normal_matrix.transform_vector3(Vec3::X);
        assert!(n.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
        assert_eq!(ObjectUniform::new(Mat4::ZERO).normal_matrix, Mat4::IDENTITY);
    }
}

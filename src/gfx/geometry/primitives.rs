//! Procedural primitives: subdivided planes for floors and backdrops, and
//! the random star scatter behind the ambient scene.

use rand::Rng;

/// Raw geometry produced by the generators, ready to become a
/// [`Mesh`](crate::gfx::scene::Mesh).
pub struct GeometryData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generates a subdivided plane in the XY plane, centered at the origin,
/// normals facing +Z. Callers orient it with the object transform (the
/// floor rotates it flat, the backdrop tilts it).
pub fn generate_plane(width: f32, height: f32, segments_x: u32, segments_y: u32) -> GeometryData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=segments_y {
        for x in 0..=segments_x {
            let px = (x as f32 / segments_x as f32 - 0.5) * width;
            let py = (y as f32 / segments_y as f32 - 0.5) * height;
            positions.extend_from_slice(&[px, py, 0.0]);
            normals.extend_from_slice(&[0.0, 0.0, 1.0]);
        }
    }

    let stride = segments_x + 1;
    for y in 0..segments_y {
        for x in 0..segments_x {
            let i0 = y * stride + x;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i3, i0, i3, i2]);
        }
    }

    GeometryData {
        positions,
        normals,
        indices,
    }
}

/// Axis-aligned box that star positions are drawn from.
#[derive(Debug, Clone, Copy)]
pub struct StarFieldBounds {
    pub x: (f32, f32),
    pub y: (f32, f32),
    pub z: (f32, f32),
}

impl Default for StarFieldBounds {
    fn default() -> Self {
        // The ambient scene's box: a wide shallow slab, lifted slightly,
        // stretched deep along the view axis.
        Self {
            x: (-30.0, 30.0),
            y: (-28.0, 32.0),
            z: (-100.0, 100.0),
        }
    }
}

/// Scatters `count` star positions uniformly inside `bounds`.
pub fn generate_star_field(
    count: usize,
    bounds: StarFieldBounds,
    rng: &mut impl Rng,
) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            [
                rng.random_range(bounds.x.0..bounds.x.1),
                rng.random_range(bounds.y.0..bounds.y.1),
                rng.random_range(bounds.z.0..bounds.z.1),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_eq!(plane.positions.len(), plane.normals.len());
    }

    #[test]
    fn test_plane_normals_face_positive_z() {
        let plane = generate_plane(10.0, 10.0, 1, 1);
        for normal in plane.normals.chunks(3) {
            assert_eq!(normal, &[0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_star_field_within_bounds() {
        let bounds = StarFieldBounds::default();
        let mut rng = rand::rng();
        let stars = generate_star_field(1000, bounds, &mut rng);
        assert_eq!(stars.len(), 1000);
        for star in &stars {
            assert!(star[0] >= bounds.x.0 && star[0] < bounds.x.1);
            assert!(star[1] >= bounds.y.0 && star[1] < bounds.y.1);
            assert!(star[2] >= bounds.z.0 && star[2] < bounds.z.1);
        }
    }
}

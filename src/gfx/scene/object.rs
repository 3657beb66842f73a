//! Scene objects: geometry, decomposed transforms and per-object GPU state.
//!
//! Transforms stay decomposed (translation / Euler rotation / scale) so the
//! choreography core can mutate a single rotation component per tick and
//! the matrix is recomposed once per frame at upload time.

use std::ops::Range;

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::{ParticleVertex, Vertex3D};

/// Decomposed object transform. Rotation is XYZ Euler in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Recomposes the model matrix. Order: T * Rz * Ry * Rx * S.
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_z(cgmath::Rad(self.rotation.z))
            * Matrix4::from_angle_y(cgmath::Rad(self.rotation.y))
            * Matrix4::from_angle_x(cgmath::Rad(self.rotation.x));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Triangle mesh with lazily created GPU buffers.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal arrays (3 floats per vertex)
    /// and a triangle index list.
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;

        let mut vertices = Vec::with_capacity(positions.len() / 3);
        for i in 0..positions.len() / 3 {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
            });
        }

        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Area-weighted vertex normals for meshes that arrive without them.
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0_f32; positions.len()];

        let vertex = |i: usize| [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]];

        for triangle in indices.chunks(3) {
            let (i0, i1, i2) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            let (v0, v1, v2) = (vertex(i0), vertex(i1), vertex(i2));

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            // Cross product, unnormalized so larger faces weigh more
            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &vi in &[i0, i1, i2] {
                normals[vi * 3] += face_normal[0];
                normals[vi * 3 + 1] += face_normal[1];
                normals[vi * 3 + 2] += face_normal[2];
            }
        }

        for i in 0..vertex_count {
            let length = (normals[i * 3].powi(2)
                + normals[i * 3 + 1].powi(2)
                + normals[i * 3 + 2].powi(2))
            .sqrt();
            if length > 0.0 {
                normals[i * 3] /= length;
                normals[i * 3 + 1] /= length;
                normals[i * 3 + 2] /= length;
            }
        }

        normals
    }

    /// Clones the CPU-side geometry; GPU buffers start out uncreated on
    /// the clone. Used when one loaded model is placed several times.
    pub fn clone_geometry(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: self.index_count,
        }
    }

    fn init_gpu_buffers(&mut self, device: &wgpu::Device) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Point cloud with a lazily created GPU buffer.
pub struct PointCloud {
    vertices: Vec<ParticleVertex>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl PointCloud {
    pub fn new(positions: Vec<[f32; 3]>) -> Self {
        let vertex_count = positions.len() as u32;
        let vertices = positions
            .into_iter()
            .map(|position| ParticleVertex { position })
            .collect();
        Self {
            vertices,
            vertex_buffer: None,
            vertex_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn init_gpu_buffers(&mut self, device: &wgpu::Device) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.vertex_buffer = Some(vertex_buffer);
    }
}

/// What an object draws: triangle meshes or a point cloud.
pub enum ObjectGeometry {
    Meshes(Vec<Mesh>),
    Points(PointCloud),
}

/// Per-object uniform data. Must match `ObjectUniform` in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Per-object GPU state: the model+color uniform and its bind group.
pub struct ObjectGpuResources {
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
}

/// A named scene object with geometry, transform, and flat color.
pub struct Object {
    pub name: String,
    pub geometry: ObjectGeometry,
    pub transform: Transform,
    pub color: [f32; 4],
    pub visible: bool,
    gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: impl Into<String>, geometry: ObjectGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            transform: Transform::identity(),
            color: [0.8, 0.8, 0.8, 1.0],
            visible: true,
            gpu_resources: None,
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    fn uniform(&self) -> ObjectUniform {
        // cgmath matrices are column-major, as the GPU expects
        let model: [[f32; 4]; 4] = self.transform.matrix().into();
        ObjectUniform {
            model,
            color: self.color,
        }
    }

    /// Creates the vertex/index buffers and the uniform bind group. Must
    /// run once after the device exists and before the first draw.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        match &mut self.geometry {
            ObjectGeometry::Meshes(meshes) => {
                for mesh in meshes.iter_mut() {
                    mesh.init_gpu_buffers(device);
                }
            }
            ObjectGeometry::Points(cloud) => cloud.init_gpu_buffers(device),
        }

        let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: bytemuck::bytes_of(&self.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            object_buffer,
            object_bind_group,
        });
    }

    /// Syncs the recomposed transform and color to the GPU, if resources
    /// exist yet.
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu) = &self.gpu_resources {
            queue.write_buffer(&gpu.object_buffer, 0, bytemuck::bytes_of(&self.uniform()));
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|gpu| &gpu.object_bind_group)
    }
}

/// Render-pass extension for drawing scene objects.
pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_points(&mut self, cloud: &'a PointCloud, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Not uploaded yet
        };
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_points(&mut self, cloud: &'b PointCloud, instances: Range<u32>) {
        let Some(vertex_buffer) = &cloud.vertex_buffer else {
            return;
        };
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.draw(0..cloud.vertex_count, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        match &object.geometry {
            ObjectGeometry::Meshes(meshes) => {
                for mesh in meshes {
                    self.draw_mesh(mesh);
                }
            }
            ObjectGeometry::Points(cloud) => self.draw_points(cloud, 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_identity_matrix() {
        let matrix = Transform::identity().matrix();
        let identity: Matrix4<f32> = cgmath::SquareMatrix::identity();
        let m: [[f32; 4]; 4] = matrix.into();
        let i: [[f32; 4]; 4] = identity.into();
        assert_eq!(m, i);
    }

    #[test]
    fn test_mesh_interleaves_positions_and_normals() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let mesh = Mesh::new(positions, normals, vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn test_face_normals_flat_triangle() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = Mesh::calculate_face_normals(&positions, &[0, 1, 2]);
        // CCW triangle in the XY plane faces +Z
        for i in 0..3 {
            assert!((normals[i * 3 + 2] - 1.0).abs() < 1e-6);
        }
    }
}

use miplab_common::MeshData;
use wgpu::util::DeviceExt;

use crate::shader::{Shader, Vertex};

fn vertices(mesh: &MeshData) -> Vec<Vertex> {
    mesh.vertices
        .iter()
        .map(|v| Vertex {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        })
        .collect()
}

/// Vertex and index buffers for one object.
pub struct GpuMesh {
    name: String,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices(mesh)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(
            mesh = %mesh.name,
            vertices = mesh.vertices.len(),
            indices = mesh.indices.len(),
            "uploaded mesh"
        );
        Self {
            name: mesh.name.clone(),
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Issue the indexed draw with `shader`'s staged uniforms.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, shader: &Shader, queue: &wgpu::Queue) {
        shader.upload(queue);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miplab_common::MeshVertex;

    #[test]
    fn vertices_keep_attributes() {
        let mesh = MeshData {
            name: "one".into(),
            vertices: vec![MeshVertex {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 0.0, 1.0],
                uv: [0.25, 0.75],
            }],
            indices: vec![0, 0, 0],
        };
        let gpu = vertices(&mesh);
        let bytes: &[u8] = bytemuck::cast_slice(&gpu);
        assert_eq!(bytes.len(), 32);
        assert_eq!(gpu[0].uv, [0.25, 0.75]);
        assert_eq!(gpu[0].position, [1.0, 2.0, 3.0]);
    }
}

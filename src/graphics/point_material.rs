use bevy::{
    prelude::*,
    reflect::TypePath,
    render::{
        render_resource::{AsBindGroup, ShaderRef},
        storage::ShaderStorageBuffer,
    },
};

const SHADER_ASSET_PATH: &str = "shaders/point_sprite.wgsl";

/// Instanced billboard material for a point cloud.
///
/// Every instance shares one quad mesh and one material handle so bevy's
/// automatic instancing kicks in; the vertex shader looks up the per-point
/// color in the storage buffer through the instance's `MeshTag`. A cloud with
/// a uniform tint just ships a single-entry buffer.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointSpriteMaterial {
    #[storage(0, read_only)]
    pub colors: Handle<ShaderStorageBuffer>,
    pub alpha_mode: AlphaMode,
}

impl Material for PointSpriteMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }
}

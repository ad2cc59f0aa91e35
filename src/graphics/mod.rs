use bevy::prelude::*;

mod point_material;

pub use point_material::PointSpriteMaterial;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointSpriteMaterial>::default());
    }
}

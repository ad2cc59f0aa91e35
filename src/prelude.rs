pub use crate::galaxy::{
    GalaxyAssets, GalaxyConfig, GalaxyConfigUi, GalaxyParams, PointCloud, RegenScheduler,
};
pub use crate::graphics::PointSpriteMaterial;

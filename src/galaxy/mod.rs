mod debounce;
mod galaxy_config;
mod point_cloud;
mod spawn_points;

pub use debounce::{Debounce, DebounceState};
pub use galaxy_config::{
    GalaxyConfig, GalaxyConfigPlugin, GalaxyConfigUi, GalaxyParams, RegenScheduler,
};
pub use point_cloud::{generate_galaxy, generate_starfield, PointCloud};
pub use spawn_points::{GalaxyAssets, GalaxyPoint, GalaxyRoot, SpawnPointsPlugin, StarfieldRoot};

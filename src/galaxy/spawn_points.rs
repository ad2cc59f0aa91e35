use crate::galaxy::point_cloud::{generate_galaxy, generate_starfield, srgb_to_linear};
use crate::prelude::*;
use bevy::prelude::*;
use bevy::render::mesh::MeshTag;
use bevy::render::storage::ShaderStorageBuffer;
use std::time::Instant;

/// Backdrop cube half-extent, as a multiple of the camera's starting
/// distance from the galaxy origin. Tunable; the baseline value is arbitrary
/// but matches the observed scene.
const STARFIELD_SCALE: f32 = 60.0;
const STARFIELD_TINT: [f32; 3] = [0.85, 0.88, 1.0];
const STARFIELD_POINT_SIZE: f32 = 0.5;

/// Both clouds turn about +Y by elapsed seconds divided by this.
const ROTATION_PERIOD: f32 = 8.0;

pub struct SpawnPointsPlugin;

impl Plugin for SpawnPointsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_galaxy_assets).add_systems(
            Update,
            (
                regenerate_galaxy,
                spawn_starfield.after(regenerate_galaxy),
                rotate_clouds,
            ),
        );
    }
}

#[derive(Component)]
pub struct GalaxyRoot;

#[derive(Component)]
pub struct StarfieldRoot;

/// Marker on every spawned galaxy point instance.
#[derive(Component)]
pub struct GalaxyPoint;

/// The one live set of galaxy resources. `regenerate_galaxy` releases every
/// handle and despawns the root before building a replacement, so two clouds
/// are never attached at once.
#[derive(Resource)]
pub struct GalaxyAssets {
    pub quad: Handle<Mesh>,
    pub material: Option<Handle<PointSpriteMaterial>>,
    pub colors: Option<Handle<ShaderStorageBuffer>>,
    pub root: Option<Entity>,
    pub generation: i32,
}

fn setup_galaxy_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(GalaxyAssets {
        // Shared unit billboard; per-point size rides on the instance scale.
        quad: meshes.add(Rectangle::from_size(Vec2::splat(2.0))),
        material: None,
        colors: None,
        root: None,
        // Behind the config's starting generation so the first frame builds.
        generation: -1,
    });
}

/// Rebuilds the galaxy whenever the committed generation moves.
///
/// Disposal runs first: the previous root (and all point instances under it)
/// is despawned and the previous material and color buffer are removed from
/// their asset collections. Only then is the new cloud computed and attached.
fn regenerate_galaxy(
    mut commands: Commands,
    config: Res<GalaxyConfig>,
    state: Option<ResMut<GalaxyAssets>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
) {
    let Some(mut state) = state else {
        return;
    };
    if state.generation == config.generation {
        return;
    }

    if let Some(root) = state.root.take() {
        commands.entity(root).despawn();
    }
    if let Some(material) = state.material.take() {
        materials.remove(&material);
    }
    if let Some(colors) = state.colors.take() {
        buffers.remove(&colors);
    }

    let started = Instant::now();
    let cloud = generate_galaxy(&config.params);

    let color_data: Vec<[f32; 4]> = cloud.colors.iter().map(|c| srgb_to_linear(*c)).collect();
    let colors = buffers.add(ShaderStorageBuffer::from(color_data));
    let material = materials.add(PointSpriteMaterial {
        colors: colors.clone(),
        alpha_mode: AlphaMode::Add,
    });

    let scale = Vec3::splat(config.params.size);
    let root = commands
        .spawn((GalaxyRoot, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for (i, position) in cloud.positions.iter().enumerate() {
                parent.spawn((
                    GalaxyPoint,
                    Mesh3d(state.quad.clone()),
                    MeshMaterial3d(material.clone()),
                    MeshTag(i as u32),
                    Transform::from_translation(Vec3::from_array(*position)).with_scale(scale),
                ));
            }
        })
        .id();

    state.root = Some(root);
    state.material = Some(material);
    state.colors = Some(colors);
    state.generation = config.generation;

    info!(
        "galaxy generation {}: {} points in {:.1?}",
        config.generation,
        cloud.len(),
        started.elapsed()
    );
}

/// One-shot backdrop, spawned after the first galaxy build so the extent can
/// be derived from the camera's distance to the (origin-centered) galaxy.
fn spawn_starfield(
    mut commands: Commands,
    mut spawned: Local<bool>,
    state: Option<Res<GalaxyAssets>>,
    config: Res<GalaxyConfig>,
    camera: Query<&Transform, With<Camera3d>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
) {
    if *spawned {
        return;
    }
    let Some(state) = state else {
        return;
    };
    if state.root.is_none() {
        return;
    }
    let Ok(camera) = camera.single() else {
        return;
    };

    let extent = camera.translation.distance(Vec3::ZERO) * STARFIELD_SCALE;
    let cloud = generate_starfield(config.params.count, extent, STARFIELD_TINT);

    // Uniform tint: a single-entry color buffer shared by every instance.
    let colors = buffers.add(ShaderStorageBuffer::from(vec![srgb_to_linear(
        STARFIELD_TINT,
    )]));
    let material = materials.add(PointSpriteMaterial {
        colors,
        alpha_mode: AlphaMode::Add,
    });
    let quad = meshes.add(Rectangle::from_size(Vec2::splat(2.0)));

    let scale = Vec3::splat(STARFIELD_POINT_SIZE);
    commands
        .spawn((StarfieldRoot, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for position in &cloud.positions {
                parent.spawn((
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(material.clone()),
                    MeshTag(0),
                    Transform::from_translation(Vec3::from_array(*position)).with_scale(scale),
                ));
            }
        });

    info!("starfield: {} points, extent {extent:.0}", cloud.len());
    *spawned = true;
}

fn rotate_clouds(
    time: Res<Time>,
    mut query: Query<&mut Transform, Or<(With<GalaxyRoot>, With<StarfieldRoot>)>>,
) {
    let angle = time.elapsed_secs() / ROTATION_PERIOD;
    for mut transform in &mut query {
        transform.rotation = Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::GalaxyParams;
    use bevy::asset::AssetPlugin;

    fn headless_app(count: u32) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Mesh>();
        app.init_asset::<ShaderStorageBuffer>();
        app.init_asset::<PointSpriteMaterial>();
        app.insert_resource(GalaxyConfig {
            params: GalaxyParams { count, ..default() },
            generation: 0,
        });
        app.add_systems(Startup, setup_galaxy_assets);
        app.add_systems(Update, regenerate_galaxy);
        app
    }

    fn live_counts(app: &mut App) -> (usize, usize, usize, usize) {
        let mut point_query = app.world_mut().query_filtered::<Entity, With<GalaxyPoint>>();
        let points = point_query.iter(app.world()).count();
        let mut root_query = app.world_mut().query_filtered::<Entity, With<GalaxyRoot>>();
        let roots = root_query.iter(app.world()).count();
        let materials = app.world().resource::<Assets<PointSpriteMaterial>>().len();
        let buffers = app.world().resource::<Assets<ShaderStorageBuffer>>().len();
        (points, roots, materials, buffers)
    }

    #[test]
    fn first_update_builds_the_cloud() {
        let mut app = headless_app(500);
        app.update();
        assert_eq!(live_counts(&mut app), (500, 1, 1, 1));
    }

    #[test]
    fn regeneration_leaves_exactly_one_live_resource_set() {
        let mut app = headless_app(500);
        app.update();

        {
            let mut config = app.world_mut().resource_mut::<GalaxyConfig>();
            config.params.count = 800;
            config.generation += 1;
        }
        app.update();
        // Despawn commands apply at the end of the update; a second tick
        // settles the hierarchy without triggering another rebuild.
        app.update();

        assert_eq!(live_counts(&mut app), (800, 1, 1, 1));
    }

    #[test]
    fn unchanged_generation_does_not_rebuild() {
        let mut app = headless_app(500);
        app.update();
        let root_before = app.world().resource::<GalaxyAssets>().root;
        app.update();
        assert_eq!(app.world().resource::<GalaxyAssets>().root, root_before);
        assert_eq!(live_counts(&mut app), (500, 1, 1, 1));
    }
}

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, orbit_camera_system);
    }
}

const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 60.0;
// Just short of the poles so look_at never degenerates.
const PITCH_LIMIT: f32 = 1.54;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d { ..default() },
        Transform::from_xyz(3.0, 6.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        CameraOrbit::from_position(Vec3::new(3.0, 6.0, 5.0)),
    ));
}

/// Damped orbit rig around the galaxy origin. Dragging steers the target
/// angles; the actual angles chase them each frame. Scroll is cached in a
/// buffer and converted to distance over time for a smooth zoom.
#[derive(Component, Clone)]
pub struct CameraOrbit {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    smooth_zoom_buffer: f32,
}

impl CameraOrbit {
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().max(MIN_DISTANCE);
        let yaw = position.x.atan2(position.z);
        let pitch = (position.y / distance).asin();
        Self {
            target: Vec3::ZERO,
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn translation(&self) -> Vec3 {
        let planar = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                planar * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                planar * self.yaw.cos(),
            )
    }
}

pub fn orbit_camera_system(
    mut query: Query<(&mut Transform, &mut CameraOrbit)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    let mut drag = Vec2::ZERO;
    for ev in motion_evr.read() {
        drag += ev.delta;
    }
    if mouse_buttons.pressed(MouseButton::Left) {
        orbit.target_yaw -= drag.x * 0.005;
        orbit.target_pitch = (orbit.target_pitch + drag.y * 0.005).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // scroll delta is cached to a buffer
    // buffer is converted to actual zoom over time for a smooth zooming effect
    for ev in scroll_evr.read() {
        match ev.unit {
            MouseScrollUnit::Line => orbit.smooth_zoom_buffer += ev.y * 0.1,
            MouseScrollUnit::Pixel => orbit.smooth_zoom_buffer += ev.y * 0.005,
        }
    }
    let zoom_step = orbit.smooth_zoom_buffer * 0.2;
    orbit.smooth_zoom_buffer -= zoom_step;
    orbit.distance = (orbit.distance * (1.0 - zoom_step)).clamp(MIN_DISTANCE, MAX_DISTANCE);

    // Damping: chase the drag targets instead of snapping to them.
    let blend = 1.0 - (-10.0 * time.delta_secs()).exp();
    orbit.yaw += (orbit.target_yaw - orbit.yaw) * blend;
    orbit.pitch += (orbit.target_pitch - orbit.pitch) * blend;

    transform.translation = orbit.translation();
    transform.look_at(orbit.target, Vec3::Y);
}

use crate::galaxy::Debounce;
use bevy::prelude::*;
use std::time::Duration;

/// How long the panel has to stay quiet before an edit is committed.
pub const REGEN_DEBOUNCE: Duration = Duration::from_millis(300);

/// The generator parameter set. Slider bounds live in [`Self::MIN`] and
/// [`Self::MAX`]; the panel enforces them, the generator trusts them.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GalaxyParams {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branch_count: u32,
    pub spin: f32,
    pub random_power: f32,
    pub falloff_power: f32,
    pub inside_color: [f32; 3],
    pub outside_color: [f32; 3],
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 29_000,
            size: 0.02,
            radius: 5.0,
            branch_count: 4,
            spin: 1.0,
            random_power: 3.0,
            falloff_power: 1.5,
            // #ff6830
            inside_color: [1.0, 0.408, 0.188],
            // #1b3984
            outside_color: [0.106, 0.224, 0.518],
        }
    }
}

impl GalaxyParams {
    pub const MIN: Self = Self {
        count: 1_000,
        size: 0.001,
        radius: 0.5,
        branch_count: 2,
        spin: -5.0,
        random_power: 2.0,
        falloff_power: 0.5,
        inside_color: [0.0; 3],
        outside_color: [0.0; 3],
    };
    pub const MAX: Self = Self {
        count: 100_000,
        size: 0.1,
        radius: 10.0,
        branch_count: 8,
        spin: 5.0,
        random_power: 12.0,
        falloff_power: 3.0,
        inside_color: [1.0; 3],
        outside_color: [1.0; 3],
    };
}

/// Committed parameters. The spawning side rebuilds the cloud whenever
/// `generation` moves past the one it last built.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub params: GalaxyParams,
    pub generation: i32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            params: GalaxyParams::default(),
            generation: 0,
        }
    }
}

/// Staging copy the egui panel edits directly. Commits into [`GalaxyConfig`]
/// only once the debounce window runs out, so a slider drag lands as a single
/// regeneration.
#[derive(Resource, Default)]
pub struct GalaxyConfigUi {
    pub params: GalaxyParams,
}

/// Pending-commit state. The panel arms the timer on every staged edit;
/// `color_drag` keeps the window open while a color-picker drag is still
/// holding the pointer down, so color edits land on release.
#[derive(Resource)]
pub struct RegenScheduler {
    timer: Debounce,
    pub color_drag: bool,
}

impl Default for RegenScheduler {
    fn default() -> Self {
        Self {
            timer: Debounce::new(REGEN_DEBOUNCE),
            color_drag: false,
        }
    }
}

impl RegenScheduler {
    pub fn request(&mut self) {
        self.timer.trigger();
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta)
    }
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::default())
            .insert_resource(GalaxyConfigUi::default())
            .insert_resource(RegenScheduler::default())
            .add_systems(Update, apply_ui_updates);
    }
}

/// Moves staged edits into the committed config when the debounce window
/// elapses, bumping the generation so the spawner rebuilds.
fn apply_ui_updates(
    time: Res<Time>,
    mut scheduler: ResMut<RegenScheduler>,
    ui: Res<GalaxyConfigUi>,
    mut config: ResMut<GalaxyConfig>,
) {
    if !scheduler.tick(time.delta()) {
        return;
    }
    if config.params == ui.params {
        return;
    }
    config.params = ui.params;
    config.generation += 1;
    debug!("committed parameter edit, generation {}", config.generation);
}

use crate::galaxy::{GalaxyConfigUi, GalaxyParams, RegenScheduler};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn ui_system(
    mut contexts: EguiContexts,
    mut ui_config: ResMut<GalaxyConfigUi>,
    mut scheduler: ResMut<RegenScheduler>,
) {
    let ctx = contexts.ctx_mut();

    let minval = GalaxyParams::MIN;
    let maxval = GalaxyParams::MAX;

    let mut changed = false;
    let mut color_changed = false;

    egui::SidePanel::left("galaxy_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");

            let params = &mut ui_config.params;
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                        .step_by(100.0)
                        .text("Count"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.size, minval.size..=maxval.size)
                        .step_by(0.001)
                        .text("Size"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                        .step_by(0.5)
                        .text("Radius"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut params.branch_count,
                        minval.branch_count..=maxval.branch_count,
                    )
                    .text("Branches"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                        .step_by(0.1)
                        .text("Spin"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut params.random_power,
                        minval.random_power..=maxval.random_power,
                    )
                    .step_by(1.0)
                    .text("Random Power"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut params.falloff_power,
                        minval.falloff_power..=maxval.falloff_power,
                    )
                    .step_by(0.1)
                    .text("Falloff Power"),
                )
                .changed();

            ui.separator();
            ui.horizontal(|ui| {
                color_changed |= ui.color_edit_button_rgb(&mut params.inside_color).changed();
                ui.label("Inside Color");
            });
            ui.horizontal(|ui| {
                color_changed |= ui
                    .color_edit_button_rgb(&mut params.outside_color)
                    .changed();
                ui.label("Outside Color");
            });
        });

    if changed || color_changed {
        scheduler.request();
    }
    if color_changed {
        scheduler.color_drag = true;
    }
    // A color-picker drag streams intermediate values; hold the window open
    // until the pointer is released so the drag commits once.
    if scheduler.color_drag {
        if ctx.input(|i| i.pointer.any_down()) {
            scheduler.request();
        } else {
            scheduler.color_drag = false;
        }
    }
}

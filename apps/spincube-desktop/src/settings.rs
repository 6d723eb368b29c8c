use egui::{Color32, RichText};
use spincube_core::{RenderLoop, RotationMode};
use spincube_input::GestureSensitivity;
use std::ops::RangeInclusive;

/// Slider exponents (log10) for each sensitivity.
const ROTATION_EXPONENTS: RangeInclusive<f32> = -6.0..=-1.0;
const VELOCITY_EXPONENTS: RangeInclusive<f32> = -7.0..=-2.0;

/// Bottom settings panel: sensitivity sliders and frame diagnostics.
pub fn show(
    ctx: &egui::Context,
    sensitivity: &mut GestureSensitivity,
    render_loop: &RenderLoop,
    height: f32,
) {
    egui::TopBottomPanel::bottom("settings")
        .exact_height(height)
        .show(ctx, |ui| {
            ui.heading("Gesture Sensitivity");
            ui.separator();

            if let Some(exponent) = log_slider(
                ui,
                "Rotation Sensitivity",
                sensitivity.rotation(),
                sensitivity.is_rotation_default(),
                ROTATION_EXPONENTS,
            ) {
                sensitivity.set_rotation_log10(exponent);
            }

            if let Some(exponent) = log_slider(
                ui,
                "Velocity Sensitivity",
                sensitivity.velocity(),
                sensitivity.is_velocity_default(),
                VELOCITY_EXPONENTS,
            ) {
                sensitivity.set_velocity_log10(exponent);
            }

            if ui.button("Reset to defaults").clicked() {
                *sensitivity = GestureSensitivity::default();
            }

            ui.separator();
            let timer = render_loop.frame_timer();
            ui.label(format!(
                "Frame: {:.2} ms ({:.0} fps)",
                timer.average().as_secs_f64() * 1000.0,
                timer.fps()
            ));
            let rotation = render_loop.rotation();
            let mode = match rotation.mode() {
                RotationMode::AutoRotating => "auto-rotate",
                RotationMode::UserDriven => "inertia",
            };
            let angles = rotation.orientation();
            ui.label(format!(
                "Mode: {mode}  X: {:.0}°  Y: {:.0}°",
                angles.x.to_degrees().rem_euclid(360.0),
                angles.y.to_degrees().rem_euclid(360.0)
            ));
            ui.small("Drag or swipe the cube to spin it");
        });
}

/// Labelled log10 slider. Returns the new exponent when the user moved it.
fn log_slider(
    ui: &mut egui::Ui,
    label: &str,
    value: f32,
    is_default: bool,
    exponents: RangeInclusive<f32>,
) -> Option<f32> {
    let accent = if is_default {
        Color32::LIGHT_BLUE
    } else {
        Color32::ORANGE
    };

    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(format!("{value:.6}")).monospace().weak());
        });
    });

    let mut exponent = value.log10();
    let changed = ui
        .scope(|ui| {
            ui.visuals_mut().selection.bg_fill = accent;
            ui.add(
                egui::Slider::new(&mut exponent, exponents)
                    .step_by(0.1)
                    .show_value(false)
                    .trailing_fill(true),
            )
            .changed()
        })
        .inner;
    ui.add_space(6.0);

    changed.then_some(exponent)
}

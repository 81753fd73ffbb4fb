use glam::Vec3;
use miplab_kernel::{FilterMode, Interpolation, ObjectKind, Selection, TextureFamily};

/// Read-only values shown under the controls.
pub struct FrameStats {
    pub elapsed: f32,
    pub frame_ms: f32,
    pub camera_position: Vec3,
    pub filter: FilterMode,
    pub texture_index: usize,
}

/// The "Parameters" window. Only `selection` is mutated.
pub fn parameters_window(ctx: &egui::Context, selection: &mut Selection, stats: &FrameStats) {
    egui::Window::new("Parameters")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Object");
            ui.horizontal(|ui| {
                for kind in ObjectKind::ALL {
                    ui.radio_value(&mut selection.object, kind, kind.label());
                }
            });

            ui.label("Textures");
            ui.horizontal(|ui| {
                for family in TextureFamily::ALL {
                    ui.radio_value(&mut selection.texture, family, family.label());
                }
            });

            ui.separator();
            ui.label("Mipmapping");
            ui.horizontal(|ui| {
                ui.radio_value(&mut selection.filter.mipmapping, false, "No");
                ui.radio_value(&mut selection.filter.mipmapping, true, "Yes");
            });

            ui.label("Texel minification");
            ui.horizontal(|ui| {
                for interp in Interpolation::ALL {
                    ui.radio_value(&mut selection.filter.texel, interp, interp.label());
                }
            });

            ui.label("Mipmap minification");
            ui.horizontal(|ui| {
                for interp in Interpolation::ALL {
                    ui.radio_value(&mut selection.filter.mipmap, interp, interp.label());
                }
            });

            ui.separator();
            let mut size = selection.coord_multiplier();
            let slider = egui::Slider::new(
                &mut size,
                Selection::MIN_COORD_MULTIPLIER..=Selection::MAX_COORD_MULTIPLIER,
            )
            .logarithmic(true)
            .text("Size");
            if ui.add(slider).changed() {
                selection.set_coord_multiplier(size);
            }

            ui.separator();
            ui.label(format!(
                "Filter: {} (variant {})",
                stats.filter, stats.texture_index
            ));
            ui.label(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                stats.camera_position.x, stats.camera_position.y, stats.camera_position.z
            ));
            ui.label(format!(
                "Time: {:.1}s  Frame: {:.1}ms",
                stats.elapsed, stats.frame_ms
            ));
            ui.small("WASD: Move | R/F: Up/Down | Q/E: Turn | T/G: Pitch");
        });
}

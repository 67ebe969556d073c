use egui::Context;

use crate::router::Route;

use super::*;
use super::ThemePreference;

impl MediaDeckApp {
    /// Navigation bar shown above every private page.
    pub(super) fn render_navbar(&mut self, ctx: &Context) {
        let current = self.state.current_route();
        let mut target = None;
        let mut logout = false;

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎵 Media Player");
                ui.separator();

                for (route, label) in [(Route::Medias, "Media"), (Route::Playlists, "Playlists")] {
                    if ui.selectable_label(current == route, label).clicked() && current != route {
                        target = Some(route);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        logout = true;
                    }

                    let (icon, next) = match self.settings.theme {
                        ThemePreference::Dark => ("☀", ThemePreference::Light),
                        ThemePreference::Light => ("🌙", ThemePreference::Dark),
                    };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        self.settings.theme = next;
                        self.apply_theme(ctx);
                    }
                });
            });
        });

        if logout {
            self.state.logout();
        } else if let Some(route) = target {
            self.state.navigate(route);
        }
    }
}

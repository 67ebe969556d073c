use std::sync::mpsc::Sender;

use egui::{Align2, Color32, Context, Vec2};
use mediadeck_types::{CreatePlaylistRequest, Media, MediaId};

use crate::api::ApiClient;
use crate::state::AppMessage;

/// Dialog for creating a playlist with an initial set of media.
pub struct PlaylistModal {
    pub name: String,
    pub show_in_player: bool,
    /// Selected media, in selection order
    pub selected: Vec<MediaId>,
    /// Media available for selection
    pub media: Vec<Media>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

impl Default for PlaylistModal {
    fn default() -> Self {
        Self {
            name: String::new(),
            show_in_player: true,
            selected: Vec::new(),
            media: Vec::new(),
            loading: false,
            saving: false,
            error: None,
        }
    }
}

impl PlaylistModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the selectable media.
    pub fn load_media(&mut self, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.loading = true;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.list_media().await {
                Ok(media) => {
                    let _ = tx.send(AppMessage::PlaylistFormMediaLoaded(media));
                }
                Err(e) => {
                    tracing::error!("Failed to load media for playlist form: {}", e);
                    let _ = tx.send(AppMessage::PlaylistFormMediaFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    pub fn on_media_loaded(&mut self, media: Vec<Media>) {
        self.media = media;
        self.loading = false;
    }

    pub fn on_media_failed(&mut self) {
        self.loading = false;
    }

    /// Select or deselect a media item.
    pub fn toggle_media(&mut self, id: MediaId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    /// Build the request body, or record why it cannot be sent.
    pub fn build_request(&mut self) -> Option<CreatePlaylistRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            self.error = Some("Playlist name is required".to_string());
            return None;
        }
        self.error = None;
        Some(CreatePlaylistRequest {
            name: name.to_string(),
            show_in_player: self.show_in_player,
            media_ids: self.selected.clone(),
        })
    }

    /// Clear the form after a successful create.
    pub fn reset(&mut self) {
        self.name.clear();
        self.show_in_player = true;
        self.selected.clear();
        self.saving = false;
        self.error = None;
    }

    /// Names of the selected media, in selection order.
    fn selected_names(&self) -> String {
        self.selected
            .iter()
            .filter_map(|id| self.media.iter().find(|m| m.id == *id))
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Show the dialog. Returns `false` once the user closed it.
    pub fn show(&mut self, ctx: &Context, api: &ApiClient, tx: &Sender<AppMessage>) -> bool {
        let mut open = true;
        let mut cancel = false;
        let mut submit = false;

        egui::Window::new("Create playlist")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Playlist name");
                ui.add(egui::TextEdit::singleline(&mut self.name).desired_width(320.0));
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Show in player:");
                    egui::ComboBox::from_id_salt("show_in_player")
                        .selected_text(if self.show_in_player { "Yes" } else { "No" })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.show_in_player, true, "Yes");
                            ui.selectable_value(&mut self.show_in_player, false, "No");
                        });
                });
                ui.add_space(6.0);

                ui.label("Media");
                if self.loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading media...");
                    });
                } else if self.media.is_empty() {
                    ui.weak("No media available");
                } else {
                    let mut toggled = None;
                    egui::ScrollArea::vertical()
                        .max_height(200.0)
                        .show(ui, |ui| {
                            for media in &self.media {
                                let mut checked = self.selected.contains(&media.id);
                                if ui.checkbox(&mut checked, &media.name).changed() {
                                    toggled = Some(media.id);
                                }
                            }
                        });
                    if let Some(id) = toggled {
                        self.toggle_media(id);
                    }
                    if !self.selected.is_empty() {
                        ui.weak(format!("Selected: {}", self.selected_names()));
                    }
                }

                if let Some(ref error) = self.error {
                    ui.colored_label(Color32::RED, error);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if ui
                        .add_enabled(!self.saving, egui::Button::new("Save"))
                        .clicked()
                    {
                        submit = true;
                    }
                    if self.saving {
                        ui.spinner();
                    }
                });
            });

        if submit {
            if let Some(request) = self.build_request() {
                self.save(request, api, ctx, tx);
            }
        }

        open && !cancel
    }

    fn save(
        &mut self,
        request: CreatePlaylistRequest,
        api: &ApiClient,
        ctx: &Context,
        tx: &Sender<AppMessage>,
    ) {
        self.saving = true;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.create_playlist(&request).await {
                Ok(playlist) => {
                    let _ = tx.send(AppMessage::PlaylistCreated(playlist));
                }
                Err(e) => {
                    tracing::error!("Failed to create playlist: {}", e);
                    let _ = tx.send(AppMessage::PlaylistCreateFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_defaults_to_shown_in_player() {
        let modal = PlaylistModal::new();
        assert!(modal.show_in_player);
        assert!(modal.selected.is_empty());
    }

    #[test]
    fn test_toggle_keeps_selection_order() {
        let mut modal = PlaylistModal::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        modal.toggle_media(b);
        modal.toggle_media(a);
        modal.toggle_media(c);
        modal.toggle_media(a);

        assert_eq!(modal.selected, vec![b, c]);
    }

    #[test]
    fn test_build_request_requires_name() {
        let mut modal = PlaylistModal::new();
        modal.name = "   ".to_string();

        assert!(modal.build_request().is_none());
        assert!(modal.error.is_some());
    }

    #[test]
    fn test_build_request() {
        let mut modal = PlaylistModal::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        modal.name = " Favorites ".to_string();
        modal.toggle_media(a);
        modal.toggle_media(b);

        let request = modal.build_request().unwrap();
        assert_eq!(request.name, "Favorites");
        assert!(request.show_in_player);
        assert_eq!(request.media_ids, vec![a, b]);
    }

    #[test]
    fn test_reset_after_create() {
        let mut modal = PlaylistModal::new();
        modal.name = "Favorites".to_string();
        modal.show_in_player = false;
        modal.toggle_media(Uuid::new_v4());
        modal.saving = true;

        modal.reset();
        assert!(modal.name.is_empty());
        assert!(modal.show_in_player);
        assert!(modal.selected.is_empty());
        assert!(!modal.saving);
    }
}

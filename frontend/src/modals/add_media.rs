use std::sync::mpsc::Sender;

use egui::{Align2, Context, Vec2};
use mediadeck_types::{Media, MediaId, PlaylistId};

use crate::api::ApiClient;
use crate::state::AppMessage;

/// Picker listing all media; picking one adds it to the target playlist.
pub struct AddMediaModal {
    pub playlist_id: PlaylistId,
    pub playlist_name: String,
    /// Media already in the playlist when the picker opened
    pub already_added: Vec<MediaId>,
    pub media: Vec<Media>,
    /// Suppresses the list while the media fetch is in flight
    pub loading: bool,
    /// Media whose association request is in flight
    pub adding: Option<MediaId>,
}

impl AddMediaModal {
    pub fn new(playlist_id: PlaylistId, playlist_name: String, already_added: Vec<MediaId>) -> Self {
        Self {
            playlist_id,
            playlist_name,
            already_added,
            media: Vec::new(),
            loading: false,
            adding: None,
        }
    }

    /// Fetch the media list; called each time the picker opens.
    pub fn load_media(&mut self, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.loading = true;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.list_media().await {
                Ok(media) => {
                    let _ = tx.send(AppMessage::PickerMediaLoaded(media));
                }
                Err(e) => {
                    tracing::error!("Failed to load media for picker: {}", e);
                    let _ = tx.send(AppMessage::PickerMediaFailed(e.to_string()));
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

    /// Record a completed association so the entry is shown as added.
    pub fn on_media_added(&mut self, media_id: MediaId) {
        if !self.already_added.contains(&media_id) {
            self.already_added.push(media_id);
        }
        self.adding = None;
    }

    pub fn on_add_failed(&mut self) {
        self.adding = None;
    }

    /// Show the picker. Returns `false` once the user closed it.
    pub fn show(&mut self, ctx: &Context, api: &ApiClient, tx: &Sender<AppMessage>) -> bool {
        let mut open = true;
        let mut close = false;
        let mut picked: Option<Media> = None;

        egui::Window::new(format!("Add media to \"{}\"", self.playlist_name))
            .id(egui::Id::new("add_media_modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                if self.loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading media...");
                    });
                } else if self.media.is_empty() {
                    ui.weak("No media available");
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| {
                            for media in &self.media {
                                ui.horizontal(|ui| {
                                    ui.vertical(|ui| {
                                        ui.strong(&media.name);
                                        if !media.description.is_empty() {
                                            ui.weak(&media.description);
                                        }
                                    });
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if self.already_added.contains(&media.id) {
                                                ui.weak("In playlist");
                                            } else if self.adding == Some(media.id) {
                                                ui.spinner();
                                            } else if ui
                                                .add_enabled(
                                                    self.adding.is_none(),
                                                    egui::Button::new("➕"),
                                                )
                                                .on_hover_text("Add to playlist")
                                                .clicked()
                                            {
                                                picked = Some(media.clone());
                                            }
                                        },
                                    );
                                });
                                ui.separator();
                            }
                        });
                }

                ui.add_space(4.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

        if let Some(media) = picked {
            self.add(media, api, ctx, tx);
        }

        open && !close
    }

    fn add(&mut self, media: Media, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.adding = Some(media.id);

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();
        let playlist_id = self.playlist_id;

        crate::app::spawn_task(async move {
            match api.add_media_to_playlist(&playlist_id, &media.id).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PlaylistMediaAdded { playlist_id, media });
                }
                Err(e) => {
                    tracing::error!("Failed to add media to playlist: {}", e);
                    let _ = tx.send(AppMessage::PlaylistMediaAddFailed(e.to_string()));
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

    fn media(name: &str) -> Media {
        Media {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            file_path: format!("{}.mp4", name),
            file_type: "video/mp4".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_loading_flag_cleared_on_load() {
        let mut modal = AddMediaModal::new(Uuid::new_v4(), "Favorites".to_string(), vec![]);
        modal.loading = true;

        modal.on_media_loaded(vec![media("a"), media("b")]);
        assert!(!modal.loading);
        assert_eq!(modal.media.len(), 2);
    }

    #[test]
    fn test_loading_flag_cleared_on_failure() {
        let mut modal = AddMediaModal::new(Uuid::new_v4(), "Favorites".to_string(), vec![]);
        modal.loading = true;

        modal.on_media_failed();
        assert!(!modal.loading);
        assert!(modal.media.is_empty());
    }

    #[test]
    fn test_added_media_marked_once() {
        let id = Uuid::new_v4();
        let mut modal = AddMediaModal::new(Uuid::new_v4(), "Favorites".to_string(), vec![]);
        modal.adding = Some(id);

        modal.on_media_added(id);
        modal.on_media_added(id);
        assert_eq!(modal.already_added, vec![id]);
        assert!(modal.adding.is_none());
    }
}

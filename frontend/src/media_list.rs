//! Media catalog page.

use std::sync::mpsc::Sender;

use egui::{Align2, Context, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use mediadeck_types::{Media, MediaId};

use crate::api::ApiClient;
use crate::modals::MediaModal;
use crate::notifications::Notifications;
use crate::pagination::Pagination;
use crate::state::AppMessage;

/// Lifecycle of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    Idle,
    Loading,
    Loaded,
    /// A create/update/delete is in flight
    Mutating,
    /// Initial load failed
    Failed,
}

/// Media whose name, description or file path contains `filter`, ignoring case.
pub fn filter_media<'a>(medias: &'a [Media], filter: &str) -> Vec<&'a Media> {
    let needle = filter.to_lowercase();
    medias
        .iter()
        .filter(|m| m.matches_lowercase(&needle))
        .collect()
}

enum RowAction {
    Edit(Media),
    Delete(Media),
}

/// Media list page state.
#[derive(Default)]
pub struct MediaListPage {
    /// Local mirror of the server collection
    pub medias: Vec<Media>,
    /// Substring filter
    pub filter: String,
    pub state: LoadState,
    pub pagination: Pagination,
    /// Open create/edit dialog
    pub modal: Option<MediaModal>,
    /// Record awaiting delete confirmation
    pub delete_confirm: Option<Media>,
}

impl MediaListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filtered view.
    pub fn filtered(&self) -> Vec<&Media> {
        filter_media(&self.medias, &self.filter)
    }

    /// Entering the page: fetch again on the next render.
    pub fn on_mount(&mut self) {
        self.state = LoadState::Idle;
    }

    /// Replace the whole collection with a server listing.
    ///
    /// Listings that arrive when no load is pending are stale and dropped.
    pub fn on_loaded(&mut self, medias: Vec<Media>) {
        if self.state != LoadState::Loading {
            tracing::debug!("Dropping stale media listing");
            return;
        }
        tracing::info!("Loaded {} media", medias.len());
        self.medias = medias;
        self.state = LoadState::Loaded;
    }

    pub fn on_load_failed(&mut self, error: &str, notifications: &mut Notifications) {
        tracing::error!("Media list failed to load: {}", error);
        if self.state != LoadState::Loading {
            return;
        }
        self.state = LoadState::Failed;
        notifications.error("Could not load media. Try again.");
    }

    /// Merge a saved record: replace by id, or prepend if new.
    pub fn upsert(&mut self, media: Media) {
        match self.medias.iter_mut().find(|m| m.id == media.id) {
            Some(existing) => *existing = media,
            None => self.medias.insert(0, media),
        }
    }

    /// Drop a record from the local collection.
    pub fn remove(&mut self, id: &MediaId) {
        self.medias.retain(|m| &m.id != id);
    }

    pub fn on_media_saved(&mut self, media: Media, notifications: &mut Notifications) {
        notifications.success(format!("Media \"{}\" saved.", media.name));
        self.upsert(media);
        self.modal = None;
        self.state = LoadState::Loaded;
    }

    /// Keep the dialog open so the user can retry.
    pub fn on_save_failed(&mut self, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.modal {
            modal.saving = false;
        }
        self.state = LoadState::Loaded;
        notifications.error("Could not save media. Try again.");
    }

    pub fn on_media_deleted(&mut self, id: &MediaId, name: &str, notifications: &mut Notifications) {
        self.remove(id);
        self.state = LoadState::Loaded;
        notifications.success(format!("Media \"{}\" deleted.", name));
    }

    pub fn on_delete_failed(&mut self, notifications: &mut Notifications) {
        self.state = LoadState::Loaded;
        notifications.error("Could not delete media. Try again.");
    }

    /// Fetch the full collection.
    pub fn refresh(&mut self, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.state = LoadState::Loading;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.list_media().await {
                Ok(medias) => {
                    let _ = tx.send(AppMessage::MediaLoaded(medias));
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::MediaLoadFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    fn delete(&mut self, media: Media, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.state = LoadState::Mutating;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.delete_media(&media.id).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::MediaDeleted {
                        id: media.id,
                        name: media.name,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to delete media {}: {}", media.id, e);
                    let _ = tx.send(AppMessage::MediaDeleteFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    /// Render the media page.
    pub fn render(&mut self, ui: &mut Ui, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        if self.state == LoadState::Idle {
            self.refresh(api, ctx, tx);
        }

        ui.heading("Media");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.add(
                egui::TextEdit::singleline(&mut self.filter)
                    .hint_text("name, description or file URL")
                    .desired_width(260.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ Create media").clicked() {
                    self.modal = Some(MediaModal::create());
                }
                if ui
                    .add_enabled(
                        self.state != LoadState::Loading,
                        egui::Button::new("🔄 Refresh"),
                    )
                    .clicked()
                {
                    self.refresh(api, ctx, tx);
                }
                if matches!(self.state, LoadState::Loading | LoadState::Mutating) {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);

        let total = self.filtered().len();
        self.pagination.clamp(total);
        let range = self.pagination.range(total);
        let rows: Vec<Media> = self.filtered()[range].iter().map(|m| (*m).clone()).collect();

        let action = render_table(ui, &rows);
        ui.add_space(4.0);
        if self.state == LoadState::Loaded && self.medias.is_empty() {
            ui.weak("No media yet.");
        } else if total == 0 && !self.filter.is_empty() {
            ui.weak("No media matches the filter.");
        }
        self.pagination.show(ui, "media_page_size", total);

        match action {
            Some(RowAction::Edit(media)) => self.modal = Some(MediaModal::edit(&media)),
            Some(RowAction::Delete(media)) => self.delete_confirm = Some(media),
            None => {}
        }

        if let Some(ref mut modal) = self.modal {
            let busy = modal.saving;
            if !modal.show(ctx, api, tx) {
                self.modal = None;
            } else if modal.saving && !busy {
                self.state = LoadState::Mutating;
            }
        }

        self.render_delete_confirm_dialog(ctx, api, tx);
    }

    fn render_delete_confirm_dialog(&mut self, ctx: &Context, api: &ApiClient, tx: &Sender<AppMessage>) {
        let Some(media) = self.delete_confirm.clone() else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Do you really want to delete the media \"{}\"?", media.name));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui
                        .button(egui::RichText::new("Delete").color(egui::Color32::RED))
                        .clicked()
                    {
                        confirmed = true;
                    }
                });
            });

        if confirmed {
            self.delete_confirm = None;
            self.delete(media, api, ctx, tx);
        } else if cancelled {
            self.delete_confirm = None;
        }
    }
}

fn render_table(ui: &mut Ui, rows: &[Media]) -> Option<RowAction> {
    let mut action = None;

    TableBuilder::new(ui)
        .id_salt("media_table")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(180.0).resizable(true))
        .column(Column::initial(220.0).resizable(true).clip(true))
        .column(Column::initial(240.0).resizable(true).clip(true))
        .column(Column::initial(100.0))
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Description");
            });
            header.col(|ui| {
                ui.strong("File URL");
            });
            header.col(|ui| {
                ui.strong("Type");
            });
            header.col(|ui| {
                ui.strong("Actions");
            });
        })
        .body(|mut body| {
            for media in rows {
                body.row(28.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&media.name);
                    });
                    row.col(|ui| {
                        ui.label(&media.description);
                    });
                    row.col(|ui| {
                        ui.label(&media.file_path).on_hover_text(&media.file_path);
                    });
                    row.col(|ui| {
                        ui.label(&media.file_type);
                    });
                    row.col(|ui| {
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            action = Some(RowAction::Edit(media.clone()));
                        }
                        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                            action = Some(RowAction::Delete(media.clone()));
                        }
                    });
                });
            }
        });

    action
}

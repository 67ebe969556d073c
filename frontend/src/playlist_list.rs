//! Playlist page: expandable playlist rows with their nested media.

use std::collections::HashSet;
use std::sync::mpsc::Sender;

use egui::{Align2, Context, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use mediadeck_types::{Media, MediaId, Playlist, PlaylistId};

use crate::api::ApiClient;
use crate::media_list::LoadState;
use crate::modals::{AddMediaModal, PlaylistModal};
use crate::notifications::Notifications;
use crate::pagination::Pagination;
use crate::state::AppMessage;

/// One rendered row of the flattened playlist grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaylistRow<'a> {
    Playlist {
        playlist: &'a Playlist,
        expanded: bool,
    },
    /// Indented row for media nested under an expanded playlist
    Media {
        playlist_id: PlaylistId,
        media: &'a Media,
    },
}

impl PlaylistRow<'_> {
    /// Stable identity of the row.
    pub fn key(&self) -> (PlaylistId, Option<MediaId>) {
        match self {
            PlaylistRow::Playlist { playlist, .. } => (playlist.id, None),
            PlaylistRow::Media { playlist_id, media } => (*playlist_id, Some(media.id)),
        }
    }
}

enum RowAction {
    Toggle(PlaylistId),
    AddMedia(PlaylistId),
    Remove(PlaylistId, Media),
}

/// Playlist list page state.
#[derive(Default)]
pub struct PlaylistListPage {
    pub playlists: Vec<Playlist>,
    /// Substring filter on playlist name
    pub filter: String,
    pub state: LoadState,
    pub pagination: Pagination,
    /// Playlists whose media rows are shown
    pub expanded: HashSet<PlaylistId>,
    pub create_modal: Option<PlaylistModal>,
    pub add_modal: Option<AddMediaModal>,
    /// Association awaiting removal confirmation
    pub remove_confirm: Option<(PlaylistId, Media)>,
}

impl PlaylistListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playlists whose name contains the filter, ignoring case.
    pub fn filtered(&self) -> Vec<&Playlist> {
        let needle = self.filter.to_lowercase();
        self.playlists
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Flip the expanded state of a playlist.
    pub fn toggle_expand(&mut self, id: PlaylistId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    fn flatten<'a>(&self, playlists: &[&'a Playlist]) -> Vec<PlaylistRow<'a>> {
        let mut rows = Vec::new();
        for playlist in playlists {
            let expanded = self.expanded.contains(&playlist.id);
            rows.push(PlaylistRow::Playlist { playlist, expanded });
            if expanded {
                rows.extend(playlist.media.iter().map(|media| PlaylistRow::Media {
                    playlist_id: playlist.id,
                    media,
                }));
            }
        }
        rows
    }

    /// All rows of the filtered view.
    pub fn rows(&self) -> Vec<PlaylistRow<'_>> {
        self.flatten(&self.filtered())
    }

    /// Rows of the current page. Nested rows stay with their playlist.
    pub fn page_rows(&self) -> Vec<PlaylistRow<'_>> {
        let filtered = self.filtered();
        let range = self.pagination.range(filtered.len());
        self.flatten(&filtered[range])
    }

    /// Number of paged entries, i.e. filtered playlists.
    pub fn row_count(&self) -> usize {
        self.filtered().len()
    }

    /// Entering the page: fetch again on the next render.
    pub fn on_mount(&mut self) {
        self.state = LoadState::Idle;
    }

    /// Replace the playlists with a server listing, unless it is stale.
    pub fn on_loaded(&mut self, playlists: Vec<Playlist>) {
        if self.state != LoadState::Loading {
            tracing::debug!("Dropping stale playlist listing");
            return;
        }
        tracing::info!("Loaded {} playlists", playlists.len());
        self.playlists = playlists;
        self.state = LoadState::Loaded;
    }

    pub fn on_load_failed(&mut self, error: &str, notifications: &mut Notifications) {
        tracing::error!("Playlist list failed to load: {}", error);
        if self.state != LoadState::Loading {
            return;
        }
        self.state = LoadState::Failed;
        notifications.error("Could not load playlists. Try again.");
    }

    /// Close the create dialog and schedule a full refetch.
    pub fn on_playlist_created(&mut self, playlist: Playlist, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.create_modal {
            modal.reset();
        }
        self.create_modal = None;
        self.state = LoadState::Idle;
        notifications.success(format!("Playlist \"{}\" created.", playlist.name));
    }

    pub fn on_create_failed(&mut self, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.create_modal {
            modal.saving = false;
        }
        notifications.error("Could not create playlist. Try again.");
    }

    pub fn on_form_media_loaded(&mut self, media: Vec<Media>) {
        if let Some(ref mut modal) = self.create_modal {
            modal.on_media_loaded(media);
        }
    }

    pub fn on_form_media_failed(&mut self, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.create_modal {
            modal.on_media_failed();
        }
        notifications.error("Could not load media. Try again.");
    }

    /// Results for a picker that has since closed are dropped.
    pub fn on_picker_media_loaded(&mut self, media: Vec<Media>) {
        if let Some(ref mut modal) = self.add_modal {
            modal.on_media_loaded(media);
        }
    }

    pub fn on_picker_media_failed(&mut self, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.add_modal {
            modal.on_media_failed();
        }
        notifications.error("Could not load media. Try again.");
    }

    /// Append `media` to the playlist unless it is already there.
    pub fn on_media_added(
        &mut self,
        playlist_id: &PlaylistId,
        media: Media,
        notifications: &mut Notifications,
    ) {
        if let Some(ref mut modal) = self.add_modal {
            if &modal.playlist_id == playlist_id {
                modal.on_media_added(media.id);
            }
        }
        notifications.success(format!("Media \"{}\" added to playlist.", media.name));
        if let Some(playlist) = self.playlists.iter_mut().find(|p| &p.id == playlist_id) {
            if !playlist.contains(&media.id) {
                playlist.media.push(media);
            }
        }
    }

    pub fn on_add_failed(&mut self, notifications: &mut Notifications) {
        if let Some(ref mut modal) = self.add_modal {
            modal.on_add_failed();
        }
        notifications.error("Could not add media to playlist. Try again.");
    }

    pub fn on_media_removed(
        &mut self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
        name: &str,
        notifications: &mut Notifications,
    ) {
        if let Some(playlist) = self.playlists.iter_mut().find(|p| &p.id == playlist_id) {
            playlist.media.retain(|m| &m.id != media_id);
        }
        self.state = LoadState::Loaded;
        notifications.success(format!("Media \"{}\" removed from playlist.", name));
    }

    pub fn on_remove_failed(&mut self, notifications: &mut Notifications) {
        self.state = LoadState::Loaded;
        notifications.error("Could not remove media from playlist. Try again.");
    }

    /// Fetch all playlists with their nested media.
    pub fn refresh(&mut self, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.state = LoadState::Loading;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.list_playlists().await {
                Ok(playlists) => {
                    let _ = tx.send(AppMessage::PlaylistsLoaded(playlists));
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PlaylistsLoadFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    fn remove_media(
        &mut self,
        playlist_id: PlaylistId,
        media: Media,
        api: &ApiClient,
        ctx: &Context,
        tx: &Sender<AppMessage>,
    ) {
        self.state = LoadState::Mutating;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();

        crate::app::spawn_task(async move {
            match api.remove_media_from_playlist(&playlist_id, &media.id).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PlaylistMediaRemoved {
                        playlist_id,
                        media_id: media.id,
                        name: media.name,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to remove media from playlist: {}", e);
                    let _ = tx.send(AppMessage::PlaylistMediaRemoveFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    fn open_add_media(&mut self, playlist_id: PlaylistId, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        let Some(playlist) = self.playlists.iter().find(|p| p.id == playlist_id) else {
            return;
        };
        let already_added = playlist.media.iter().map(|m| m.id).collect();
        let mut modal = AddMediaModal::new(playlist.id, playlist.name.clone(), already_added);
        modal.load_media(api, ctx, tx);
        self.add_modal = Some(modal);
    }

    /// Render the playlist page.
    pub fn render(&mut self, ui: &mut Ui, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        if self.state == LoadState::Idle {
            self.refresh(api, ctx, tx);
        }

        ui.heading("Playlists");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.add(
                egui::TextEdit::singleline(&mut self.filter)
                    .hint_text("playlist name")
                    .desired_width(260.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ Create playlist").clicked() {
                    let mut modal = PlaylistModal::new();
                    modal.load_media(api, ctx, tx);
                    self.create_modal = Some(modal);
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

        let total = self.row_count();
        self.pagination.clamp(total);

        let action = render_table(ui, &self.page_rows());
        ui.add_space(4.0);
        if self.state == LoadState::Loaded && self.playlists.is_empty() {
            ui.weak("No playlists yet.");
        } else if total == 0 && !self.filter.is_empty() {
            ui.weak("No playlist matches the filter.");
        }
        self.pagination.show(ui, "playlist_page_size", total);

        match action {
            Some(RowAction::Toggle(id)) => self.toggle_expand(id),
            Some(RowAction::AddMedia(id)) => self.open_add_media(id, api, ctx, tx),
            Some(RowAction::Remove(playlist_id, media)) => {
                self.remove_confirm = Some((playlist_id, media))
            }
            None => {}
        }

        if let Some(ref mut modal) = self.create_modal {
            if !modal.show(ctx, api, tx) {
                self.create_modal = None;
            }
        }

        if let Some(ref mut modal) = self.add_modal {
            if !modal.show(ctx, api, tx) {
                self.add_modal = None;
            }
        }

        self.render_remove_confirm_dialog(ctx, api, tx);
    }

    fn render_remove_confirm_dialog(&mut self, ctx: &Context, api: &ApiClient, tx: &Sender<AppMessage>) {
        let Some((playlist_id, media)) = self.remove_confirm.clone() else {
            return;
        };
        let playlist_name = self
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Confirm removal")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Remove \"{}\" from playlist \"{}\"?",
                    media.name, playlist_name
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui
                        .button(egui::RichText::new("Remove").color(egui::Color32::RED))
                        .clicked()
                    {
                        confirmed = true;
                    }
                });
            });

        if confirmed {
            self.remove_confirm = None;
            self.remove_media(playlist_id, media, api, ctx, tx);
        } else if cancelled {
            self.remove_confirm = None;
        }
    }
}

fn render_table(ui: &mut Ui, rows: &[PlaylistRow<'_>]) -> Option<RowAction> {
    let mut action = None;

    TableBuilder::new(ui)
        .id_salt("playlist_table")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(300.0).resizable(true).clip(true))
        .column(Column::initial(120.0))
        .column(Column::initial(80.0))
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Shown in player");
            });
            header.col(|ui| {
                ui.strong("Media");
            });
            header.col(|ui| {
                ui.strong("Actions");
            });
        })
        .body(|mut body| {
            for row in rows {
                body.row(28.0, |mut table_row| match *row {
                    PlaylistRow::Playlist { playlist, expanded } => {
                        table_row.col(|ui| {
                            let icon = if expanded { "▼" } else { "▶" };
                            if ui.small_button(icon).clicked() {
                                action = Some(RowAction::Toggle(playlist.id));
                            }
                            ui.label(&playlist.name);
                        });
                        table_row.col(|ui| {
                            ui.label(if playlist.show_in_player { "Yes" } else { "No" });
                        });
                        table_row.col(|ui| {
                            ui.label(playlist.media.len().to_string());
                        });
                        table_row.col(|ui| {
                            if ui.small_button("➕ Add media").clicked() {
                                action = Some(RowAction::AddMedia(playlist.id));
                            }
                        });
                    }
                    PlaylistRow::Media { playlist_id, media } => {
                        table_row.col(|ui| {
                            ui.add_space(28.0);
                            ui.label(&media.name).on_hover_text(&media.file_path);
                        });
                        table_row.col(|ui| {
                            ui.weak(&media.file_type);
                        });
                        table_row.col(|_ui| {});
                        table_row.col(|ui| {
                            if ui.small_button("🗑").on_hover_text("Remove from playlist").clicked() {
                                action = Some(RowAction::Remove(playlist_id, media.clone()));
                            }
                        });
                    }
                });
            }
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ToastLevel;
    use uuid::Uuid;

    fn media(name: &str) -> Media {
        Media {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            file_path: format!("https://cdn.example.com/{}.mp4", name),
            file_type: "video/mp4".to_string(),
            created_at: None,
        }
    }

    fn playlist(name: &str, media: Vec<Media>) -> Playlist {
        Playlist {
            id: Uuid::new_v4(),
            name: name.to_string(),
            show_in_player: true,
            media,
        }
    }

    fn sample_page() -> PlaylistListPage {
        let mut page = PlaylistListPage::new();
        page.state = LoadState::Loading;
        page.on_loaded(vec![
            playlist("Morning", vec![media("intro"), media("news")]),
            playlist("Evening", vec![media("outro")]),
            playlist("Empty", vec![]),
        ]);
        page
    }

    fn keys(page: &PlaylistListPage) -> Vec<(PlaylistId, Option<MediaId>)> {
        page.rows().iter().map(|r| r.key()).collect()
    }

    #[test]
    fn test_collapsed_rows_are_playlists_only() {
        let page = sample_page();
        assert_eq!(page.rows().len(), 3);
        assert!(keys(&page).iter().all(|(_, media)| media.is_none()));
    }

    #[test]
    fn test_expanded_playlist_followed_by_its_media() {
        let mut page = sample_page();
        let morning = page.playlists[0].clone();

        page.toggle_expand(morning.id);

        let keys = keys(&page);
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0], (morning.id, None));
        assert_eq!(keys[1], (morning.id, Some(morning.media[0].id)));
        assert_eq!(keys[2], (morning.id, Some(morning.media[1].id)));
        assert_eq!(keys[3], (page.playlists[1].id, None));
    }

    #[test]
    fn test_toggle_twice_restores_rows() {
        let mut page = sample_page();
        let evening = page.playlists[1].id;
        page.toggle_expand(page.playlists[0].id);
        let before = keys(&page);

        page.toggle_expand(evening);
        assert_ne!(keys(&page), before);
        page.toggle_expand(evening);
        assert_eq!(keys(&page), before);
    }

    #[test]
    fn test_filter_by_name_ignoring_case() {
        let mut page = sample_page();
        page.filter = "MORN".to_string();
        assert_eq!(page.row_count(), 1);
        assert_eq!(page.filtered()[0].name, "Morning");

        page.filter = "nothing".to_string();
        assert_eq!(page.row_count(), 0);
        assert!(page.rows().is_empty());
    }

    #[test]
    fn test_nested_rows_stay_on_parent_page() {
        let mut page = sample_page();
        page.pagination.page_size = 2;
        page.toggle_expand(page.playlists[1].id);

        let first: Vec<_> = page.page_rows().iter().map(|r| r.key()).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[2], (page.playlists[1].id, Some(page.playlists[1].media[0].id)));

        page.pagination.page = 1;
        let second: Vec<_> = page.page_rows().iter().map(|r| r.key()).collect();
        assert_eq!(second, vec![(page.playlists[2].id, None)]);
        assert_eq!(page.row_count(), 3);
    }

    #[test]
    fn test_media_added_appended_once() {
        let mut page = sample_page();
        let mut notes = Notifications::new();
        let target = page.playlists[2].id;
        let added = media("jingle");

        page.on_media_added(&target, added.clone(), &mut notes);
        page.on_media_added(&target, added.clone(), &mut notes);

        assert_eq!(page.playlists[2].media, vec![added]);
        assert_eq!(notes.latest().map(|t| t.level), Some(ToastLevel::Success));
    }

    #[test]
    fn test_media_removed_from_playlist_only() {
        let mut page = sample_page();
        let mut notes = Notifications::new();
        let morning = page.playlists[0].clone();
        let removed = morning.media[0].clone();

        page.on_media_removed(&morning.id, &removed.id, &removed.name, &mut notes);

        assert!(!page.playlists[0].contains(&removed.id));
        assert_eq!(page.playlists[0].media.len(), 1);
        assert_eq!(page.playlists[1].media.len(), 1);
    }

    #[test]
    fn test_remove_failure_keeps_media() {
        let mut page = sample_page();
        let mut notes = Notifications::new();
        let before = page.playlists.clone();

        page.on_remove_failed(&mut notes);

        assert_eq!(page.playlists, before);
        assert_eq!(notes.latest().map(|t| t.level), Some(ToastLevel::Error));
    }

    #[test]
    fn test_created_playlist_triggers_refetch() {
        let mut page = sample_page();
        let mut notes = Notifications::new();
        page.create_modal = Some(PlaylistModal::new());

        page.on_playlist_created(playlist("Favorites", vec![]), &mut notes);

        assert!(page.create_modal.is_none());
        assert_eq!(page.state, LoadState::Idle);
        assert_eq!(notes.latest().map(|t| t.level), Some(ToastLevel::Success));
    }

    #[test]
    fn test_picker_results_dropped_when_closed() {
        let mut page = sample_page();
        page.on_picker_media_loaded(vec![media("late")]);
        assert!(page.add_modal.is_none());
    }

    #[test]
    fn test_remount_refetches_after_visit() {
        let mut page = sample_page();
        page.on_mount();
        assert_eq!(page.state, LoadState::Idle);

        page.state = LoadState::Loading;
        page.on_loaded(vec![playlist("Fresh", vec![])]);
        assert_eq!(page.playlists.len(), 1);
        assert_eq!(page.state, LoadState::Loaded);
    }

    #[test]
    fn test_listing_without_pending_load_dropped() {
        let mut page = PlaylistListPage::new();
        page.on_loaded(vec![playlist("Old session", vec![media("a")])]);

        assert!(page.playlists.is_empty());
        assert_eq!(page.state, LoadState::Idle);
    }
}

use std::time::Duration;

use egui::Context;

use crate::login::CredentialsAction;
use crate::router::Route;
use crate::state::AppMessage;

use super::*;

/// Delay between a successful registration and the switch to the login page.
const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(1);

impl eframe::App for MediaDeckApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        if self.needs_initial_settings_apply {
            self.needs_initial_settings_apply = false;
            self.apply_theme(ctx);
        }

        self.state.drain_messages(ctx);
        self.state.enforce_route();

        #[cfg(not(target_arch = "wasm32"))]
        if self.state.token_dirty {
            if let Some(storage) = frame.storage_mut() {
                crate::storage::persist_to(storage, mediadeck_types::TOKEN_STORAGE_KEY);
                self.state.token_dirty = false;
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = frame;

        let route = self.state.current_route();
        if route.is_private() {
            self.render_navbar(ctx);
        }

        let state = &mut self.state;
        match route {
            Route::Login => state.render_login(ctx),
            Route::Register => state.render_register(ctx),
            Route::Medias => {
                let tx = state.channels.sender();
                egui::CentralPanel::default().show(ctx, |ui| {
                    state.media_page.render(ui, &state.api, ctx, &tx);
                });
            }
            Route::Playlists => {
                let tx = state.channels.sender();
                egui::CentralPanel::default().show(ctx, |ui| {
                    state.playlist_page.render(ui, &state.api, ctx, &tx);
                });
            }
        }

        self.state.notifications.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, APP_SETTINGS_KEY, &self.settings);

        #[cfg(not(target_arch = "wasm32"))]
        {
            crate::storage::persist_to(storage, mediadeck_types::TOKEN_STORAGE_KEY);
            self.state.token_dirty = false;
        }
    }
}

impl AppState {
    /// The page currently shown.
    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    /// Apply every async result received since the last frame.
    pub fn drain_messages(&mut self, ctx: &Context) {
        while let Ok(msg) = self.channels.rx.try_recv() {
            self.process_message(msg, ctx);
        }
    }

    /// Apply one async result to the application state.
    pub fn process_message(&mut self, msg: AppMessage, ctx: &Context) {
        match msg {
            AppMessage::LoginSucceeded(response) => {
                self.auth.login(response.token);
                self.token_dirty = true;
                self.api
                    .set_auth_token(self.auth.token().map(str::to_string));
                self.login_screen.reset();
                self.notifications.success("Logged in.");
                self.navigate(Route::Medias);
            }
            AppMessage::LoginFailed(error) => {
                tracing::error!("Login failed: {}", error);
                self.login_screen.on_failed();
                self.notifications.error("Invalid email or password");
            }
            AppMessage::RegisterSucceeded => {
                self.register_screen.reset();
                self.notifications
                    .success("Account created. You can now log in.");
                let tx = self.channels.sender();
                let ctx = ctx.clone();
                spawn_task(async move {
                    sleep(REGISTER_REDIRECT_DELAY).await;
                    let _ = tx.send(AppMessage::Navigate(Route::Login));
                    ctx.request_repaint();
                });
            }
            AppMessage::RegisterFailed(error) => {
                tracing::error!("Registration failed: {}", error);
                self.register_screen.on_finished();
                self.notifications
                    .error("Could not register. Check your details and try again.");
            }
            AppMessage::Navigate(route) => self.navigate(route),

            AppMessage::MediaLoaded(medias) => self.media_page.on_loaded(medias),
            AppMessage::MediaLoadFailed(error) => {
                self.media_page
                    .on_load_failed(&error, &mut self.notifications)
            }
            AppMessage::MediaSaved(media) => {
                tracing::info!("Saved media {}", media.id);
                self.media_page
                    .on_media_saved(media, &mut self.notifications);
            }
            AppMessage::MediaSaveFailed(error) => {
                tracing::error!("Failed to save media: {}", error);
                self.media_page.on_save_failed(&mut self.notifications);
            }
            AppMessage::MediaDeleted { id, name } => {
                tracing::info!("Deleted media {}", id);
                self.media_page
                    .on_media_deleted(&id, &name, &mut self.notifications);
            }
            AppMessage::MediaDeleteFailed(_) => {
                self.media_page.on_delete_failed(&mut self.notifications)
            }

            AppMessage::PlaylistsLoaded(playlists) => self.playlist_page.on_loaded(playlists),
            AppMessage::PlaylistsLoadFailed(error) => self
                .playlist_page
                .on_load_failed(&error, &mut self.notifications),
            AppMessage::PlaylistCreated(playlist) => {
                tracing::info!("Created playlist {}", playlist.id);
                self.playlist_page
                    .on_playlist_created(playlist, &mut self.notifications);
            }
            AppMessage::PlaylistCreateFailed(_) => {
                self.playlist_page.on_create_failed(&mut self.notifications)
            }
            AppMessage::PlaylistFormMediaLoaded(media) => {
                self.playlist_page.on_form_media_loaded(media)
            }
            AppMessage::PlaylistFormMediaFailed(_) => self
                .playlist_page
                .on_form_media_failed(&mut self.notifications),

            AppMessage::PickerMediaLoaded(media) => self.playlist_page.on_picker_media_loaded(media),
            AppMessage::PickerMediaFailed(_) => self
                .playlist_page
                .on_picker_media_failed(&mut self.notifications),
            AppMessage::PlaylistMediaAdded { playlist_id, media } => {
                tracing::info!("Added media {} to playlist {}", media.id, playlist_id);
                self.playlist_page
                    .on_media_added(&playlist_id, media, &mut self.notifications);
            }
            AppMessage::PlaylistMediaAddFailed(_) => {
                self.playlist_page.on_add_failed(&mut self.notifications)
            }
            AppMessage::PlaylistMediaRemoved {
                playlist_id,
                media_id,
                name,
            } => {
                tracing::info!("Removed media {} from playlist {}", media_id, playlist_id);
                self.playlist_page.on_media_removed(
                    &playlist_id,
                    &media_id,
                    &name,
                    &mut self.notifications,
                );
            }
            AppMessage::PlaylistMediaRemoveFailed(_) => {
                self.playlist_page.on_remove_failed(&mut self.notifications)
            }
        }
    }

    /// Navigate to `route`, applying the guard.
    pub fn navigate(&mut self, route: Route) {
        let previous = self.router.current();
        self.router.navigate(route, self.auth.is_authenticated());
        self.mount_if_changed(previous);
    }

    /// Re-check the current route against the guard and browser history.
    pub fn enforce_route(&mut self) {
        let previous = self.router.current();
        self.router.enforce(self.auth.is_authenticated());
        self.mount_if_changed(previous);
    }

    /// A page entered from another route fetches its data again.
    fn mount_if_changed(&mut self, previous: Route) {
        let current = self.router.current();
        if current == previous {
            return;
        }
        match current {
            Route::Medias => self.media_page.on_mount(),
            Route::Playlists => self.playlist_page.on_mount(),
            Route::Login | Route::Register => {}
        }
    }

    /// Drop the token and every page's cached data.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.token_dirty = true;
        self.api.set_auth_token(None);
        self.media_page = MediaListPage::new();
        self.playlist_page = PlaylistListPage::new();
        self.notifications.success("Logged out.");
        self.navigate(Route::Login);
    }

    fn render_login(&mut self, ctx: &Context) {
        egui::CentralPanel::default().show(ctx, |_ui| {});

        match self.login_screen.show(ctx) {
            CredentialsAction::None => {}
            CredentialsAction::SwitchScreen => self.navigate(Route::Register),
            CredentialsAction::Submit { email, password } => {
                let api = self.api.clone();
                let tx = self.channels.sender();
                let ctx = ctx.clone();

                spawn_task(async move {
                    match api.login(&email, &password).await {
                        Ok(response) => {
                            let _ = tx.send(AppMessage::LoginSucceeded(response));
                        }
                        Err(e) => {
                            let _ = tx.send(AppMessage::LoginFailed(e.to_string()));
                        }
                    }
                    ctx.request_repaint();
                });
            }
        }
    }

    fn render_register(&mut self, ctx: &Context) {
        egui::CentralPanel::default().show(ctx, |_ui| {});

        match self.register_screen.show(ctx) {
            CredentialsAction::None => {}
            CredentialsAction::SwitchScreen => self.navigate(Route::Login),
            CredentialsAction::Submit { email, password } => {
                let api = self.api.clone();
                let tx = self.channels.sender();
                let ctx = ctx.clone();

                spawn_task(async move {
                    match api.register(&email, &password).await {
                        Ok(_) => {
                            tracing::info!("Registered {}", email);
                            let _ = tx.send(AppMessage::RegisterSucceeded);
                        }
                        Err(e) => {
                            let _ = tx.send(AppMessage::RegisterFailed(e.to_string()));
                        }
                    }
                    ctx.request_repaint();
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_list::LoadState;
    use crate::notifications::ToastLevel;
    use crate::storage::get_local_storage;
    use mediadeck_types::{LoginResponse, Media};
    use uuid::Uuid;

    fn logged_out_state(storage_key: &str) -> AppState {
        AppState::new(
            ApiClient::new("http://127.0.0.1:1"),
            AuthContext::load(storage_key),
        )
    }

    fn login(state: &mut AppState, token: &str) {
        let response = LoginResponse {
            token: token.to_string(),
            extra: Default::default(),
        };
        state.process_message(AppMessage::LoginSucceeded(response), &Context::default());
    }

    #[test]
    fn test_failed_login_stays_on_login_without_token() {
        let key = "app_test_failed_login";
        let mut state = logged_out_state(key);
        assert_eq!(state.current_route(), Route::Login);

        state.process_message(
            AppMessage::LoginFailed("HTTP 401 error: Unauthorized".to_string()),
            &Context::default(),
        );

        assert_eq!(state.current_route(), Route::Login);
        assert!(!state.auth.is_authenticated());
        assert!(get_local_storage(key).is_none());
        assert!(state.api.auth_token().is_none());
        let toast = state.notifications.latest().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Invalid email or password");
    }

    #[test]
    fn test_successful_login_stores_token_and_opens_media() {
        let key = "app_test_successful_login";
        let mut state = logged_out_state(key);

        login(&mut state, "jwt-abc");

        assert_eq!(state.current_route(), Route::Medias);
        assert_eq!(get_local_storage(key).as_deref(), Some("jwt-abc"));
        assert_eq!(state.api.auth_token(), Some("jwt-abc"));
        assert!(state.token_dirty);
        assert_eq!(
            state.notifications.latest().map(|t| t.level),
            Some(ToastLevel::Success)
        );
    }

    #[test]
    fn test_reentering_page_refetches() {
        let mut state = logged_out_state("app_test_reentry");
        login(&mut state, "jwt-abc");
        state.media_page.state = LoadState::Loaded;
        state.playlist_page.state = LoadState::Loaded;

        state.navigate(Route::Playlists);
        assert_eq!(state.playlist_page.state, LoadState::Idle);
        state.playlist_page.state = LoadState::Loaded;

        state.navigate(Route::Medias);
        assert_eq!(state.media_page.state, LoadState::Idle);
        assert_eq!(state.playlist_page.state, LoadState::Loaded);
    }

    #[test]
    fn test_navigating_to_same_page_keeps_data() {
        let mut state = logged_out_state("app_test_same_page");
        login(&mut state, "jwt-abc");
        state.media_page.state = LoadState::Loaded;

        state.navigate(Route::Medias);
        assert_eq!(state.media_page.state, LoadState::Loaded);
    }

    #[test]
    fn test_listing_from_previous_session_ignored_after_logout() {
        let key = "app_test_logout_stale";
        let mut state = logged_out_state(key);
        login(&mut state, "jwt-abc");
        state.media_page.state = LoadState::Loading;

        state.logout();
        let stale = Media {
            id: Uuid::new_v4(),
            name: "Old".to_string(),
            description: String::new(),
            file_path: "old.mp4".to_string(),
            file_type: "video/mp4".to_string(),
            created_at: None,
        };
        state.process_message(AppMessage::MediaLoaded(vec![stale]), &Context::default());

        assert_eq!(state.current_route(), Route::Login);
        assert!(get_local_storage(key).is_none());
        assert!(state.media_page.medias.is_empty());
        assert_eq!(state.media_page.state, LoadState::Idle);
    }
}

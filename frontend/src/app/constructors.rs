use mediadeck_types::TOKEN_STORAGE_KEY;

use super::*;
use super::{ThemePreference, APP_SETTINGS_KEY};

impl AppState {
    /// State for a client talking to `api` on behalf of `auth`.
    ///
    /// The token held by `auth`, if any, is handed to the client before the
    /// first route is resolved.
    pub fn new(api: ApiClient, auth: AuthContext) -> Self {
        let mut api = api;
        api.set_auth_token(auth.token().map(str::to_string));

        tracing::info!(
            "MediaDeck starting against {} (authenticated: {})",
            api.base_url(),
            auth.is_authenticated()
        );

        let router = Router::new(auth.is_authenticated());

        Self {
            api,
            auth,
            router,
            channels: AppStateChannels::new(),
            notifications: Notifications::new(),
            login_screen: LoginScreen::default(),
            register_screen: RegisterScreen::default(),
            media_page: MediaListPage::new(),
            playlist_page: PlaylistListPage::new(),
            token_dirty: false,
        }
    }
}

impl MediaDeckApp {
    /// Create a new application instance talking to `api`.
    pub fn new(cc: &eframe::CreationContext<'_>, api: ApiClient) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(storage) = cc.storage {
            crate::storage::restore_from(storage, TOKEN_STORAGE_KEY);
        }

        Self {
            state: AppState::new(api, AuthContext::load(TOKEN_STORAGE_KEY)),
            settings: cc
                .storage
                .and_then(|s| eframe::get_value(s, APP_SETTINGS_KEY))
                .unwrap_or_default(),
            needs_initial_settings_apply: true,
        }
    }

    /// Apply the current theme preference to the UI context.
    pub(super) fn apply_theme(&self, ctx: &egui::Context) {
        tracing::debug!("Applying theme: {:?}", self.settings.theme);

        let visuals = match self.settings.theme {
            ThemePreference::Dark => egui::Visuals::dark(),
            ThemePreference::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }
}

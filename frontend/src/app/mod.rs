//! Main application structure.

mod constructors;
mod rendering;
mod update;

use crate::api::ApiClient;
use crate::auth::AuthContext;
use crate::login::{LoginScreen, RegisterScreen};
use crate::media_list::MediaListPage;
use crate::notifications::Notifications;
use crate::playlist_list::PlaylistListPage;
use crate::router::Router;
use crate::state::AppStateChannels;

/// Spawn a future on the current platform's executor.
#[cfg(target_arch = "wasm32")]
pub fn spawn_task<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_task<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

/// Wait without blocking the UI thread.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: std::time::Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: std::time::Duration) {
    tokio::time::sleep(duration).await;
}

/// Theme preference for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
enum ThemePreference {
    #[default]
    Dark,
    Light,
}

/// Persisted application settings.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct AppSettings {
    theme: ThemePreference,
}

const APP_SETTINGS_KEY: &str = "app_settings";

/// Application state that does not depend on an eframe context.
pub struct AppState {
    /// API client for the remote REST API
    api: ApiClient,
    /// Owner of the authentication token
    auth: AuthContext,
    router: Router,
    /// Channels for async results
    channels: AppStateChannels,
    notifications: Notifications,
    login_screen: LoginScreen,
    register_screen: RegisterScreen,
    media_page: MediaListPage,
    playlist_page: PlaylistListPage,
    /// Set when the token changed and must be written to persistent storage
    token_dirty: bool,
}

/// The MediaDeck application.
pub struct MediaDeckApp {
    state: AppState,
    settings: AppSettings,
    /// Apply persisted settings on the first frame
    needs_initial_settings_apply: bool,
}

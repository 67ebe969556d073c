//! MediaDeck frontend library.
//!
//! An egui application managing media records and playlists on a remote
//! REST API. Runs in the browser (WASM) and as a native window.

#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
mod app;
pub mod auth;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
mod login;
pub mod media_form;
pub mod media_list;
mod modals;
pub mod notifications;
pub mod pagination;
pub mod playlist_list;
pub mod router;
pub mod state;
mod storage;

pub use app::MediaDeckApp;

/// Native entry point (tracing must already be initialized).
#[cfg(not(target_arch = "wasm32"))]
pub fn run_native_gui(api: api::ApiClient) -> eframe::Result<()> {
    tracing::info!("Initializing MediaDeck against {}", api.base_url());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("MediaDeck"),
        ..Default::default()
    };

    eframe::run_native(
        "MediaDeck",
        native_options,
        Box::new(move |cc| Ok(Box::new(MediaDeckApp::new(cc, api)))),
    )
}

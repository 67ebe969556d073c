//! Application messages and channel-based IPC for async operations.

use std::sync::mpsc::{channel, Receiver, Sender};

use mediadeck_types::{LoginResponse, Media, MediaId, Playlist, PlaylistId};

use crate::router::Route;

/// Messages sent from async operations to the main UI thread.
#[derive(Debug)]
pub enum AppMessage {
    /// Login accepted by the server
    LoginSucceeded(LoginResponse),
    /// Login rejected or failed
    LoginFailed(String),
    /// Registration accepted
    RegisterSucceeded,
    /// Registration failed
    RegisterFailed(String),
    /// Deferred navigation request
    Navigate(Route),

    /// Media loaded for the media list page
    MediaLoaded(Vec<Media>),
    /// Media list loading failed
    MediaLoadFailed(String),
    /// Media created or updated
    MediaSaved(Media),
    /// Media create/update failed
    MediaSaveFailed(String),
    /// Media deleted
    MediaDeleted { id: MediaId, name: String },
    /// Media deletion failed
    MediaDeleteFailed(String),

    /// Playlists loaded
    PlaylistsLoaded(Vec<Playlist>),
    /// Playlist loading failed
    PlaylistsLoadFailed(String),
    /// Playlist created
    PlaylistCreated(Playlist),
    /// Playlist creation failed
    PlaylistCreateFailed(String),
    /// Media options loaded for the playlist creation dialog
    PlaylistFormMediaLoaded(Vec<Media>),
    /// Media options for the playlist creation dialog failed to load
    PlaylistFormMediaFailed(String),

    /// Media options loaded for the add-media picker
    PickerMediaLoaded(Vec<Media>),
    /// Media options for the add-media picker failed to load
    PickerMediaFailed(String),
    /// Media associated with a playlist
    PlaylistMediaAdded { playlist_id: PlaylistId, media: Media },
    /// Media association failed
    PlaylistMediaAddFailed(String),
    /// Media removed from a playlist
    PlaylistMediaRemoved {
        playlist_id: PlaylistId,
        media_id: MediaId,
        name: String,
    },
    /// Media removal from a playlist failed
    PlaylistMediaRemoveFailed(String),
}

/// Application state channels.
pub struct AppStateChannels {
    /// Sender for app messages (cloned for each async operation)
    pub tx: Sender<AppMessage>,
    /// Receiver for app messages (owned by main UI thread)
    pub rx: Receiver<AppMessage>,
}

impl AppStateChannels {
    /// Create new application state channels.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Get a clone of the sender for use in async operations.
    pub fn sender(&self) -> Sender<AppMessage> {
        self.tx.clone()
    }
}

impl Default for AppStateChannels {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared types for the MediaDeck client.
//!
//! This crate contains the wire models exchanged with the MediaDeck REST API:
//! media records, playlists and the authentication payloads.

/// Default origin of the MediaDeck REST API.
pub const DEFAULT_API_URL: &str = "https://localhost:7202";

/// Local storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

pub mod auth;
pub mod media;
pub mod playlist;

// Re-export commonly used types
pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use media::{Media, MediaFields, MediaId};
pub use playlist::{CreatePlaylistRequest, Playlist, PlaylistId};

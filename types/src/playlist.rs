//! Playlists and their media associations.

use crate::media::{Media, MediaId};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a playlist, assigned by the server.
pub type PlaylistId = Uuid;

/// A named, ordered association of media items.
///
/// The API speaks Portuguese field names (`nome`, `exibirNoPlayer`, `midias`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Whether the player shows this playlist
    #[serde(rename = "exibirNoPlayer", default)]
    pub show_in_player: bool,
    /// Associated media in insertion order
    #[serde(rename = "midias", default, deserialize_with = "null_as_empty_vec")]
    pub media: Vec<Media>,
}

impl Playlist {
    /// Whether `media_id` is already associated with this playlist.
    pub fn contains(&self, media_id: &MediaId) -> bool {
        self.media.iter().any(|m| &m.id == media_id)
    }
}

/// Request body for creating a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "exibirNoPlayer")]
    pub show_in_player: bool,
    /// Media to associate at creation time, in selection order
    #[serde(rename = "midiasIds")]
    pub media_ids: Vec<MediaId>,
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> Result<Vec<Media>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Media>>::deserialize(deserializer)?.unwrap_or_default())
}

use mediadeck_types::{CreatePlaylistRequest, MediaId, Playlist, PlaylistId};

use super::*;

impl ApiClient {
    /// List all playlists with their nested media.
    pub async fn list_playlists(&self) -> ApiResult<Vec<Playlist>> {
        let url = format!("{}/api/Playlist", self.base_url);
        tracing::debug!("Fetching playlists from: {}", url);

        let response = self
            .send(self.with_auth(self.client.get(&url)), "playlist listing")
            .await?;
        let playlists: Vec<Playlist> = Self::decode(response, "playlist listing").await?;

        tracing::debug!("Successfully loaded {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Create a playlist with an initial set of media.
    pub async fn create_playlist(&self, request: &CreatePlaylistRequest) -> ApiResult<Playlist> {
        let url = format!("{}/api/PlayList", self.base_url);
        tracing::info!(
            "Creating playlist {} with {} media",
            request.name,
            request.media_ids.len()
        );

        let response = self
            .send(
                self.with_auth(self.client.post(&url).json(request)),
                "playlist creation",
            )
            .await?;
        let playlist: Playlist = Self::decode(response, "playlist creation").await?;

        tracing::info!("Created playlist {} ({})", playlist.name, playlist.id);
        Ok(playlist)
    }

    /// Associate one media record with a playlist.
    pub async fn add_media_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
    ) -> ApiResult<()> {
        let url = format!(
            "{}/api/PlayList/{}/midias/{}",
            self.base_url, playlist_id, media_id
        );
        tracing::info!("Adding media {} to playlist {}", media_id, playlist_id);

        let response = self
            .send(
                self.with_auth(self.client.post(&url)),
                "playlist media association",
            )
            .await?;

        Self::acknowledge(response, "Playlist media association").await
    }

    /// Remove one media record from a playlist.
    pub async fn remove_media_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        media_id: &MediaId,
    ) -> ApiResult<()> {
        let url = format!(
            "{}/api/PlayList/{}/midias/{}",
            self.base_url, playlist_id, media_id
        );
        tracing::info!("Removing media {} from playlist {}", media_id, playlist_id);

        let response = self
            .send(
                self.with_auth(self.client.delete(&url)),
                "playlist media removal",
            )
            .await?;

        Self::acknowledge(response, "Playlist media removal").await
    }
}

use mediadeck_types::{Media, MediaFields, MediaId};

use super::*;

impl ApiClient {
    /// List all media records.
    pub async fn list_media(&self) -> ApiResult<Vec<Media>> {
        let url = format!("{}/api/Midia", self.base_url);
        tracing::debug!("Fetching media from: {}", url);

        let response = self
            .send(self.with_auth(self.client.get(&url)), "media listing")
            .await?;
        let media: Vec<Media> = Self::decode(response, "media listing").await?;

        tracing::debug!("Successfully loaded {} media", media.len());
        Ok(media)
    }

    /// Create a media record.
    pub async fn create_media(&self, fields: &MediaFields) -> ApiResult<Media> {
        let url = format!("{}/api/Midia", self.base_url);
        tracing::info!("Creating media: {}", fields.name);

        let response = self
            .send(
                self.with_auth(self.client.post(&url).json(fields)),
                "media creation",
            )
            .await?;
        let media: Media = Self::decode(response, "media creation").await?;

        tracing::info!("Created media {} ({})", media.name, media.id);
        Ok(media)
    }

    /// Replace the editable fields of a media record.
    pub async fn update_media(&self, id: &MediaId, fields: &MediaFields) -> ApiResult<Media> {
        let url = format!("{}/api/Midia/{}", self.base_url, id);
        tracing::info!("Updating media {}", id);

        let response = self
            .send(
                self.with_auth(self.client.put(&url).json(fields)),
                "media update",
            )
            .await?;
        let media: Media = Self::decode(response, "media update").await?;

        tracing::info!("Updated media {} ({})", media.name, media.id);
        Ok(media)
    }

    /// Delete a media record.
    pub async fn delete_media(&self, id: &MediaId) -> ApiResult<()> {
        let url = format!("{}/api/Midia/{}", self.base_url, id);
        tracing::info!("Deleting media {}", id);

        let response = self
            .send(self.with_auth(self.client.delete(&url)), "media deletion")
            .await?;

        Self::acknowledge(response, "Media deletion").await
    }
}

//! Media catalog records.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a media record, assigned by the server.
///
/// The API issues GUIDs; a listing containing any other id shape fails to
/// decode as a whole.
pub type MediaId = Uuid;

/// A named reference to an external file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub name: String,
    /// Optional on the wire; `null` and missing both decode as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// URL or storage reference of the file
    pub file_path: String,
    pub file_type: String,
    /// Server-assigned creation timestamp, kept as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Media {
    /// Editable fields of this record, as sent on update.
    pub fn fields(&self) -> MediaFields {
        MediaFields {
            name: self.name.clone(),
            description: self.description.clone(),
            file_path: self.file_path.clone(),
            file_type: self.file_type.clone(),
        }
    }

    /// Case-insensitive substring match against name, description and file path.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.file_path.to_lowercase().contains(needle)
    }
}

/// Request body for creating or updating a media record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(garde::Validate))]
pub struct MediaFields {
    #[cfg_attr(feature = "validation", garde(custom(not_blank)))]
    pub name: String,
    #[cfg_attr(feature = "validation", garde(skip))]
    pub description: String,
    #[cfg_attr(feature = "validation", garde(custom(not_blank)))]
    pub file_path: String,
    #[cfg_attr(feature = "validation", garde(custom(not_blank)))]
    pub file_type: String,
}

#[cfg(feature = "validation")]
#[allow(clippy::ptr_arg)]
fn not_blank(value: &String, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("is required"));
    }
    Ok(())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_camel_case() {
        let id = Uuid::new_v4();
        let media: Media = serde_json::from_value(json!({
            "id": id,
            "name": "Intro",
            "description": null,
            "filePath": "https://cdn.example.com/intro.mp4",
            "fileType": "video/mp4",
            "createdAt": "2024-05-01T12:00:00"
        }))
        .unwrap();

        assert_eq!(media.id, id);
        assert_eq!(media.description, "");
        assert_eq!(media.file_type, "video/mp4");
        assert_eq!(media.created_at.as_deref(), Some("2024-05-01T12:00:00"));
    }

    #[test]
    fn test_decode_without_optional_fields() {
        let media: Media = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": "Jingle",
            "filePath": "jingle.mp3",
            "fileType": "audio/mpeg"
        }))
        .unwrap();

        assert!(media.description.is_empty());
        assert!(media.created_at.is_none());
    }

    #[test]
    fn test_id_accepts_uppercase_guid() {
        let media: Media = serde_json::from_value(json!({
            "id": "3F2504E0-4F89-11D3-9A0C-0305E82C3301",
            "name": "Jingle",
            "filePath": "jingle.mp3",
            "fileType": "audio/mpeg"
        }))
        .unwrap();

        assert_eq!(
            media.id.to_string(),
            "3f2504e0-4f89-11d3-9a0c-0305e82c3301"
        );
    }

    #[test]
    fn test_non_uuid_id_rejects_whole_listing() {
        let listing = json!([
            {"id": Uuid::new_v4(), "name": "Ok", "filePath": "a.mp4", "fileType": "video/mp4"},
            {"id": "42", "name": "Legacy", "filePath": "b.mp4", "fileType": "video/mp4"}
        ]);

        assert!(serde_json::from_value::<Vec<Media>>(listing).is_err());
    }

    #[test]
    fn test_fields_body_shape() {
        let fields = MediaFields {
            name: "Intro".to_string(),
            description: String::new(),
            file_path: "intro.mp4".to_string(),
            file_type: "video/mp4".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({
                "name": "Intro",
                "description": "",
                "filePath": "intro.mp4",
                "fileType": "video/mp4"
            })
        );
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let media = Media {
            id: Uuid::new_v4(),
            name: "Morning Show".to_string(),
            description: "Weekday OPENER".to_string(),
            file_path: "s3://bucket/Morning.mp4".to_string(),
            file_type: "video/mp4".to_string(),
            created_at: None,
        };

        assert!(media.matches_lowercase("morning"));
        assert!(media.matches_lowercase("opener"));
        assert!(media.matches_lowercase("bucket/morning"));
        assert!(media.matches_lowercase(""));
        assert!(!media.matches_lowercase("evening"));
    }

    #[cfg(feature = "validation")]
    #[test]
    fn test_validation_rejects_blank_required_fields() {
        use garde::Validate;

        let fields = MediaFields {
            name: "   ".to_string(),
            description: String::new(),
            file_path: "clip.mp4".to_string(),
            file_type: String::new(),
        };
        let report = fields.validate().unwrap_err();
        let failed: Vec<String> = report.iter().map(|(path, _)| path.to_string()).collect();

        assert_eq!(failed.len(), 2);
        assert!(failed.iter().any(|p| p == "name"));
        assert!(failed.iter().any(|p| p == "file_type"));
    }
}

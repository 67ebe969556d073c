//! Reusable media form used for both creating and editing.

use egui::{Color32, Ui};
use garde::Validate;
use mediadeck_types::{Media, MediaFields, MediaId};

/// What the user did with the form this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit(MediaFields),
    Cancel,
}

/// Form state for a single media record.
#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    /// Set when editing an existing record
    pub id: Option<MediaId>,
    pub name: String,
    pub description: String,
    pub file_path: String,
    pub file_type: String,
    /// Read-only, shown when editing
    pub created_at: Option<String>,
    /// Validation messages from the last submit attempt
    pub errors: Vec<String>,
}

impl MediaForm {
    /// Empty form for a new record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated with an existing record.
    pub fn from_media(media: &Media) -> Self {
        Self {
            id: Some(media.id),
            name: media.name.clone(),
            description: media.description.clone(),
            file_path: media.file_path.clone(),
            file_type: media.file_type.clone(),
            created_at: media.created_at.clone(),
            errors: Vec::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Save changes"
        } else {
            "Create"
        }
    }

    /// Validate required fields and build the request body.
    ///
    /// On failure the offending fields are recorded in `errors` and `None` is returned.
    pub fn validate(&mut self) -> Option<MediaFields> {
        let fields = MediaFields {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            file_path: self.file_path.trim().to_string(),
            file_type: self.file_type.trim().to_string(),
        };

        match fields.validate() {
            Ok(()) => {
                self.errors.clear();
                Some(fields)
            }
            Err(report) => {
                self.errors = report
                    .iter()
                    .map(|(path, error)| format!("{} {}", field_label(&path.to_string()), error))
                    .collect();
                None
            }
        }
    }

    /// Render the form. `busy` disables submitting while a save is in flight.
    pub fn show(&mut self, ui: &mut Ui, busy: bool) -> FormAction {
        let mut action = FormAction::None;

        egui::Grid::new("media_form_grid")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name *");
                ui.add(egui::TextEdit::singleline(&mut self.name).desired_width(320.0));
                ui.end_row();

                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut self.description)
                        .desired_rows(3)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("File URL *");
                ui.add(egui::TextEdit::singleline(&mut self.file_path).desired_width(320.0));
                ui.end_row();

                ui.label("File type *");
                ui.add(
                    egui::TextEdit::singleline(&mut self.file_type)
                        .hint_text("video/mp4")
                        .desired_width(320.0),
                );
                ui.end_row();

                if let Some(ref created_at) = self.created_at {
                    ui.label("Created");
                    ui.weak(created_at);
                    ui.end_row();
                }
            });

        for error in &self.errors {
            ui.colored_label(Color32::RED, error);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                action = FormAction::Cancel;
            }
            let submit = ui.add_enabled(!busy, egui::Button::new(self.submit_label()));
            if submit.clicked() {
                if let Some(fields) = self.validate() {
                    action = FormAction::Submit(fields);
                }
            }
            if busy {
                ui.spinner();
            }
        });

        action
    }
}

fn field_label(path: &str) -> &'static str {
    match path {
        "name" => "Name",
        "file_path" => "File URL",
        "file_type" => "File type",
        _ => "Field",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_media() -> Media {
        Media {
            id: Uuid::new_v4(),
            name: "Intro".to_string(),
            description: "Opening clip".to_string(),
            file_path: "https://cdn.example.com/intro.mp4".to_string(),
            file_type: "video/mp4".to_string(),
            created_at: Some("2024-05-01T12:00:00".to_string()),
        }
    }

    #[test]
    fn test_new_form_is_create() {
        let form = MediaForm::new();
        assert!(!form.is_edit());
        assert_eq!(form.submit_label(), "Create");
    }

    #[test]
    fn test_from_media_prepopulates() {
        let media = sample_media();
        let mut form = MediaForm::from_media(&media);

        assert!(form.is_edit());
        assert_eq!(form.submit_label(), "Save changes");
        assert_eq!(form.validate(), Some(media.fields()));
    }

    #[test]
    fn test_validate_trims_required_fields() {
        let mut form = MediaForm {
            name: "  Jingle ".to_string(),
            file_path: " jingle.mp3".to_string(),
            file_type: "audio/mpeg ".to_string(),
            ..MediaForm::default()
        };

        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Jingle");
        assert_eq!(fields.file_path, "jingle.mp3");
        assert_eq!(fields.file_type, "audio/mpeg");
        assert!(fields.description.is_empty());
    }

    #[test]
    fn test_validate_blocks_missing_required_fields() {
        let mut form = MediaForm {
            description: "only a description".to_string(),
            ..MediaForm::default()
        };

        assert_eq!(form.validate(), None);
        assert_eq!(form.errors.len(), 3);
        assert!(form.errors.iter().any(|e| e.starts_with("Name")));
        assert!(form.errors.iter().any(|e| e.starts_with("File URL")));
        assert!(form.errors.iter().any(|e| e.starts_with("File type")));

        form.name = "Fixed".to_string();
        form.file_path = "fixed.mp4".to_string();
        form.file_type = "video/mp4".to_string();
        assert!(form.validate().is_some());
        assert!(form.errors.is_empty());
    }
}

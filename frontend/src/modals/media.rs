use std::sync::mpsc::Sender;

use egui::{Align2, Context, Vec2};
use mediadeck_types::{Media, MediaFields};

use crate::api::ApiClient;
use crate::media_form::{FormAction, MediaForm};
use crate::state::AppMessage;

/// Create/edit dialog wrapping [`MediaForm`].
pub struct MediaModal {
    pub form: MediaForm,
    /// Whether a save request is in flight
    pub saving: bool,
}

impl MediaModal {
    /// Dialog for a new record.
    pub fn create() -> Self {
        Self {
            form: MediaForm::new(),
            saving: false,
        }
    }

    /// Dialog for editing `media`.
    pub fn edit(media: &Media) -> Self {
        Self {
            form: MediaForm::from_media(media),
            saving: false,
        }
    }

    /// Show the dialog. Returns `false` once the user closed it.
    pub fn show(
        &mut self,
        ctx: &Context,
        api: &ApiClient,
        tx: &Sender<AppMessage>,
    ) -> bool {
        let mut open = true;
        let mut action = FormAction::None;
        let title = if self.form.is_edit() {
            "Edit media"
        } else {
            "Create media"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.form.show(ui, self.saving);
            });

        match action {
            FormAction::None => open,
            FormAction::Cancel => false,
            FormAction::Submit(fields) => {
                self.save(fields, api, ctx, tx);
                true
            }
        }
    }

    fn save(&mut self, fields: MediaFields, api: &ApiClient, ctx: &Context, tx: &Sender<AppMessage>) {
        self.saving = true;

        let api = api.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();
        let id = self.form.id;

        crate::app::spawn_task(async move {
            let result = match id {
                Some(id) => api.update_media(&id, &fields).await,
                None => api.create_media(&fields).await,
            };

            match result {
                Ok(media) => {
                    let _ = tx.send(AppMessage::MediaSaved(media));
                }
                Err(e) => {
                    tracing::error!("Failed to save media: {}", e);
                    let _ = tx.send(AppMessage::MediaSaveFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }
}

//! Transient toast notifications shared by every page and dialog.

use std::collections::VecDeque;
use std::time::Duration;

use egui::{Align2, Color32, Context, RichText};
use instant::Instant;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn color(&self) -> Color32 {
        match self {
            ToastLevel::Success => Color32::from_rgb(46, 125, 50),
            ToastLevel::Error => Color32::from_rgb(198, 40, 40),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created_at: Instant,
}

/// Queue of toasts, rendered top-center and dismissed automatically.
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        tracing::debug!("Toast ({:?}): {}", level, message);
        self.toasts.push_back(Toast {
            level,
            message,
            created_at: Instant::now(),
        });
    }

    /// Active toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Most recent toast, if any.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Drop toasts older than [`TOAST_DURATION`] at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.duration_since(t.created_at) < TOAST_DURATION);
    }

    /// Dismiss a toast by position.
    pub fn dismiss(&mut self, index: usize) {
        self.toasts.remove(index);
    }

    /// Render the active toasts and schedule a repaint for the next expiry.
    pub fn show(&mut self, ctx: &Context) {
        let now = Instant::now();
        self.prune(now);
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (index, toast) in self.toasts.iter().enumerate() {
                    egui::Frame::new()
                        .fill(toast.level.color())
                        .corner_radius(4.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                                if ui
                                    .small_button(RichText::new("✖").color(Color32::WHITE))
                                    .clicked()
                                {
                                    dismissed = Some(index);
                                }
                            });
                        });
                    ui.add_space(4.0);
                }
            });

        if let Some(index) = dismissed {
            self.dismiss(index);
        }

        if let Some(oldest) = self.toasts.front() {
            let remaining =
                TOAST_DURATION.saturating_sub(now.duration_since(oldest.created_at));
            ctx.request_repaint_after(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut notes = Notifications::new();
        notes.success("saved");
        notes.error("failed");

        let messages: Vec<_> = notes.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["saved", "failed"]);
        assert_eq!(notes.latest().map(|t| t.level), Some(ToastLevel::Error));
    }

    #[test]
    fn test_prune_dismisses_after_duration() {
        let mut notes = Notifications::new();
        notes.success("saved");
        let now = Instant::now();

        notes.prune(now);
        assert!(!notes.is_empty());

        notes.prune(now + TOAST_DURATION + Duration::from_millis(10));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_dismiss_by_index() {
        let mut notes = Notifications::new();
        notes.success("one");
        notes.success("two");
        notes.dismiss(0);

        assert_eq!(notes.latest().map(|t| t.message.as_str()), Some("two"));
        assert_eq!(notes.iter().count(), 1);
    }
}

//! Client-side paging for the list pages.

use std::ops::Range;

use egui::Ui;

/// Page sizes offered to the user.
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZES[0],
        }
    }
}

impl Pagination {
    /// Number of pages for `total` items (at least one).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Keep the page index valid after the item count changed.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Index range of the current page within `total` items.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Render page size selector and previous/next controls for `total` items.
    pub fn show(&mut self, ui: &mut Ui, id_salt: &str, total: usize) {
        self.clamp(total);
        let range = self.range(total);

        ui.horizontal(|ui| {
            ui.label("Rows per page:");
            egui::ComboBox::from_id_salt(id_salt)
                .selected_text(self.page_size.to_string())
                .width(50.0)
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZES {
                        if ui
                            .selectable_label(self.page_size == size, size.to_string())
                            .clicked()
                        {
                            self.page_size = size;
                            self.page = 0;
                        }
                    }
                });

            ui.separator();
            if total == 0 {
                ui.label("0 of 0");
            } else {
                ui.label(format!("{}–{} of {}", range.start + 1, range.end, total));
            }

            if ui
                .add_enabled(self.page > 0, egui::Button::new("◀"))
                .clicked()
            {
                self.page -= 1;
            }
            if ui
                .add_enabled(self.page + 1 < self.page_count(total), egui::Button::new("▶"))
                .clicked()
            {
                self.page += 1;
            }
        });
    }
}

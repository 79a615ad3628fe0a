//! Two-column egui view of a [`PropertyGrid`].
//!
//! The view reads editor state from the grid each frame and routes
//! committed input back through [`PropertyGrid::on_user_edit`] and
//! [`PropertyGrid::select_choice`]. Text edits commit when the field loses
//! focus, which includes pressing Enter.

use egui::{Color32, ComboBox, Id, RichText, TextEdit, Ui};
use propgrid_core::{EditorContent, EditorWidget, PropertyGrid, Row};

use crate::layout::{header_frame, row_label, section_label, separator};
use crate::{sizing, theme};

/// An edit collected while drawing, applied once the grid is released.
enum Commit {
    Text { name: String, raw: String },
    Choice { name: String, index: usize },
}

/// Width of the label column: the widest display name or first header title.
pub fn label_column_width(ui: &Ui, grid: &PropertyGrid, font_size: f32) -> f32 {
    let font_id = egui::FontId::proportional(font_size);
    let titles = grid.header().map(|header| header.first.as_str());
    grid.rows()
        .iter()
        .map(|row| row.descriptor.display_name.as_str())
        .chain(titles)
        .map(|text| {
            ui.painter()
                .layout_no_wrap(text.to_string(), font_id.clone(), Color32::PLACEHOLDER)
                .size()
                .x
        })
        .fold(0.0, f32::max)
        + 2.0 * sizing::LABEL_PADDING
}

/// Property grid view.
pub struct PropertyGridView<'a> {
    grid: &'a mut PropertyGrid,
    id: Id,
    font_size: f32,
}

impl<'a> PropertyGridView<'a> {
    /// Create a view over `grid`.
    pub fn new(grid: &'a mut PropertyGrid) -> Self {
        Self {
            grid,
            id: Id::new("propgrid"),
            font_size: sizing::FONT_SIZE,
        }
    }

    /// Distinguish this view from other grids in the same window.
    pub fn id_salt(mut self, salt: impl std::hash::Hash) -> Self {
        self.id = Id::new(salt);
        self
    }

    /// Set the label font size.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Show the grid and return true if an edit was committed.
    pub fn show(self, ui: &mut Ui) -> bool {
        let label_width = label_column_width(ui, self.grid, self.font_size);

        if let Some(header) = self.grid.header() {
            header_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    header_label(ui, &header.first, label_width, self.font_size);
                    header_label(ui, &header.second, sizing::VALUE_MIN_WIDTH, self.font_size);
                });
            });
            separator(ui);
        }

        if self.grid.rows().is_empty() {
            section_label(ui, "No properties");
            return false;
        }

        let mut commits = Vec::new();
        egui::Grid::new(self.id)
            .num_columns(2)
            .striped(true)
            .min_col_width(sizing::VALUE_MIN_WIDTH.min(label_width))
            .show(ui, |ui| {
                for row in self.grid.rows() {
                    let label = row_label(
                        ui,
                        &row.descriptor.display_name,
                        label_width,
                        self.font_size,
                        theme::TEXT,
                    );
                    if !row.descriptor.description.is_empty() {
                        label.on_hover_text(row.descriptor.description.as_str());
                    }
                    if let Some(commit) = editor_cell(ui, self.id, row) {
                        commits.push(commit);
                    }
                    ui.end_row();
                }
            });

        let edited = !commits.is_empty();
        for commit in commits {
            match commit {
                Commit::Text { name, raw } => {
                    log::debug!("commit `{name}` = {raw:?}");
                    self.grid.on_user_edit(&name, &raw);
                }
                Commit::Choice { name, index } => {
                    log::debug!("select `{name}` choice {index}");
                    self.grid.select_choice(&name, index);
                }
            }
        }
        edited
    }
}

fn header_label(ui: &mut Ui, title: &str, width: f32, font_size: f32) {
    let text = RichText::new(title).strong().size(font_size).color(theme::TEXT);
    ui.add_sized([width, sizing::ROW_HEIGHT], egui::Label::new(text));
}

fn editor_cell(ui: &mut Ui, grid_id: Id, row: &Row) -> Option<Commit> {
    let editor = &row.editor;
    let id = grid_id.with(editor.property());
    match editor.content() {
        EditorContent::Text(text) => text_cell(ui, id, editor, text),
        EditorContent::Choice { choices, selected } => {
            choice_cell(ui, id, editor, choices, *selected)
        }
    }
}

fn text_cell(ui: &mut Ui, id: Id, editor: &EditorWidget, text: &str) -> Option<Commit> {
    // Keep the in-progress text across frames while the field has focus.
    let mut buffer = ui
        .data(|data| data.get_temp::<String>(id))
        .unwrap_or_else(|| text.to_string());

    let mut edit = TextEdit::singleline(&mut buffer)
        .id(id)
        .desired_width(f32::INFINITY);
    if editor.is_invalid() {
        edit = edit.text_color(theme::INVALID);
    }
    let response = ui.add_enabled(editor.is_interactive(), edit);

    if response.lost_focus() {
        ui.data_mut(|data| data.remove::<String>(id));
        return (buffer != text).then(|| Commit::Text {
            name: editor.property().to_string(),
            raw: buffer,
        });
    }
    if response.has_focus() {
        ui.data_mut(|data| data.insert_temp(id, buffer));
    }
    None
}

fn choice_cell(
    ui: &mut Ui,
    id: Id,
    editor: &EditorWidget,
    choices: &[String],
    selected: Option<usize>,
) -> Option<Commit> {
    let mut picked = None;
    ui.add_enabled_ui(editor.is_interactive(), |ui| {
        ComboBox::from_id_salt(id)
            .selected_text(editor.display().unwrap_or_default())
            .width(ui.available_width().max(sizing::VALUE_MIN_WIDTH))
            .show_ui(ui, |ui| {
                for (index, choice) in choices.iter().enumerate() {
                    if ui
                        .selectable_label(selected == Some(index), choice.as_str())
                        .clicked()
                    {
                        picked = Some(index);
                    }
                }
            });
    });
    picked
        .filter(|&index| Some(index) != selected)
        .map(|index| Commit::Choice {
            name: editor.property().to_string(),
            index,
        })
}

//! egui views for the PropGrid property grid.
//!
//! - **Grid**: two-column property grid bound to a [`PropertyGrid`]
//! - **Picture**: picture box honoring the core [`SizeMode`] layout
//! - **Layout**: separators, section labels and row labels
//!
//! [`PropertyGrid`]: propgrid_core::PropertyGrid
//! [`SizeMode`]: propgrid_core::SizeMode

pub mod grid;
pub mod layout;
pub mod picture;

pub use grid::{PropertyGridView, label_column_width};
pub use layout::{header_frame, row_label, section_label, separator};
pub use picture::{PictureBoxView, image_size, to_screen};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Height of one property row
    pub const ROW_HEIGHT: f32 = 22.0;
    /// Horizontal padding inside a label cell
    pub const LABEL_PADDING: f32 = 6.0;
    /// Minimum width of the value column
    pub const VALUE_MIN_WIDTH: f32 = 120.0;
    /// Default font size
    pub const FONT_SIZE: f32 = 13.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Text of input that failed to parse (red)
    pub const INVALID: Color32 = Color32::from_rgb(220, 38, 38);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Header row background
    pub const HEADER_BG: Color32 = Color32::from_rgb(243, 244, 246);
}

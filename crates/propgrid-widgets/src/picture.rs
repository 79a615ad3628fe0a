//! Picture box view: draws an image where the core layout places it.

use egui::{CornerRadius, Image, ImageSource, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, vec2};
use propgrid_core::PictureBox;

use crate::theme;

/// Pixel size of a texture, for [`PictureBox::set_image`].
pub fn image_size(texture: &egui::TextureHandle) -> kurbo::Size {
    let [width, height] = texture.size();
    kurbo::Size::new(width as f64, height as f64)
}

/// Map a box-relative rectangle onto the screen at `origin`.
pub fn to_screen(origin: Pos2, rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(origin.x + rect.x0 as f32, origin.y + rect.y0 as f32),
        Pos2::new(origin.x + rect.x1 as f32, origin.y + rect.y1 as f32),
    )
}

/// Picture box view.
pub struct PictureBoxView<'a> {
    picture: &'a PictureBox,
    image: Option<ImageSource<'a>>,
    border: bool,
}

impl<'a> PictureBoxView<'a> {
    /// Create a view of `picture` with nothing to draw yet.
    pub fn new(picture: &'a PictureBox) -> Self {
        Self {
            picture,
            image: None,
            border: true,
        }
    }

    /// Set the image source; its size should match the picture box's image.
    pub fn image(mut self, image: impl Into<ImageSource<'a>>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Draw a one-pixel border around the box.
    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Show the picture box at its current size.
    pub fn show(self, ui: &mut Ui) -> Response {
        let size = self.picture.size();
        let (rect, response) =
            ui.allocate_exact_size(vec2(size.width as f32, size.height as f32), Sense::hover());

        if !ui.is_rect_visible(rect) {
            return response;
        }

        if self.border {
            ui.painter().rect_stroke(
                rect,
                CornerRadius::ZERO,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
        }

        if let (Some(layout), Some(source)) = (self.picture.layout(), self.image) {
            let target = to_screen(rect.min, layout.image_rect);
            if target.width() > 0.0 && target.height() > 0.0 {
                // Centered images larger than the box are cropped to it.
                let mut clipped = ui.new_child(egui::UiBuilder::new().max_rect(rect));
                clipped.set_clip_rect(rect.intersect(ui.clip_rect()));
                Image::new(source)
                    .fit_to_exact_size(target.size())
                    .paint_at(&clipped, target);
            }
        }

        response
    }
}

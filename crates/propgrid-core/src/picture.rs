//! Picture box: places an image inside a fixed-size area.
//!
//! Layout works in whole pixels. The drawable area is inset by one pixel
//! on each side, so scaled images lose two pixels per axis.

use std::any::Any;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::EnumerationError;
use crate::metadata::DisplayInfo;
use crate::surface::{Inspect, Surface};
use crate::value::EnumProperty;

/// Border inset in pixels.
const INSET: f64 = 1.0;

/// How an image is fitted to the picture box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeMode {
    /// Native size, anchored top-left.
    #[default]
    Normal,
    /// Scaled to fill the box, ignoring aspect ratio.
    Stretch,
    /// Scaled to fit the box, keeping aspect ratio, centered.
    Zoom,
    /// Native size, centered.
    Center,
    /// Native size; the box resizes to the image.
    AutoSize,
}

impl EnumProperty for SizeMode {
    const TYPE_NAME: &'static str = "SizeMode";

    fn variants() -> &'static [Self] {
        &[
            SizeMode::Normal,
            SizeMode::Stretch,
            SizeMode::Zoom,
            SizeMode::Center,
            SizeMode::AutoSize,
        ]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            SizeMode::Normal => "NORMAL",
            SizeMode::Stretch => "STRETCH",
            SizeMode::Zoom => "ZOOM",
            SizeMode::Center => "CENTER",
            SizeMode::AutoSize => "AUTOSIZE",
        }
    }
}

/// Where the image lands and how large the box ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PictureLayout {
    /// Image rectangle relative to the box origin.
    pub image_rect: Rect,
    /// Box size after layout; differs from the input only for `AutoSize`.
    pub box_size: Size,
}

fn whole(size: Size) -> Size {
    Size::new(size.width.max(0.0).trunc(), size.height.max(0.0).trunc())
}

fn shrink(size: Size) -> Size {
    Size::new(
        (size.width - 2.0 * INSET).max(0.0),
        (size.height - 2.0 * INSET).max(0.0),
    )
}

/// Scaled image size for `mode`.
fn image_size(image: Size, area: Size, mode: SizeMode) -> Size {
    match mode {
        SizeMode::Normal | SizeMode::Center | SizeMode::AutoSize => image,
        SizeMode::Stretch => shrink(area),
        SizeMode::Zoom => {
            let image_ratio = image.width / image.height;
            let fits_width = area.height > 0.0 && image_ratio >= area.width / area.height;
            let scaled = if fits_width {
                Size::new(area.width, (image.height * area.width / image.width).trunc())
            } else {
                Size::new((image.width * area.height / image.height).trunc(), area.height)
            };
            shrink(scaled)
        }
    }
}

/// Lay out an image of `image` size in a box of `area` size.
///
/// Returns `None` when the image has no area.
pub fn layout(image: Size, area: Size, mode: SizeMode) -> Option<PictureLayout> {
    let image = whole(image);
    let area = whole(area);
    if image.width <= 0.0 || image.height <= 0.0 {
        return None;
    }

    let size = image_size(image, area, mode);
    let (origin, box_size) = match mode {
        SizeMode::Zoom | SizeMode::Center => {
            let x = ((area.width - size.width) / 2.0).trunc();
            let y = ((area.height - size.height) / 2.0).trunc();
            (Point::new(x, y), area)
        }
        SizeMode::AutoSize => (Point::new(INSET, INSET), size),
        SizeMode::Normal | SizeMode::Stretch => (Point::new(INSET, INSET), area),
    };

    Some(PictureLayout {
        image_rect: Rect::from_origin_size(origin, size),
        box_size,
    })
}

/// A box showing one image under a [`SizeMode`].
///
/// Only the image dimensions are tracked here; pixel data belongs to the
/// view that draws it.
#[derive(Debug, Clone)]
pub struct PictureBox {
    image: Option<Size>,
    size: Size,
    size_mode: SizeMode,
    layout: Option<PictureLayout>,
    tag: Option<Rc<dyn Any>>,
}

impl PictureBox {
    pub fn new(size: Size) -> Self {
        Self {
            image: None,
            size,
            size_mode: SizeMode::default(),
            layout: None,
            tag: None,
        }
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    /// Set or clear the image, given its pixel dimensions.
    pub fn set_image(&mut self, image: Option<Size>) {
        self.image = image;
        self.update();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.update();
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn set_size_mode(&mut self, mode: SizeMode) {
        self.size_mode = mode;
        self.update();
    }

    /// Arbitrary user data attached to the box.
    pub fn tag(&self) -> Option<&Rc<dyn Any>> {
        self.tag.as_ref()
    }

    pub fn set_tag(&mut self, tag: Option<Rc<dyn Any>>) {
        self.tag = tag;
    }

    /// Current layout; `None` while there is nothing to draw.
    pub fn layout(&self) -> Option<&PictureLayout> {
        self.layout.as_ref()
    }

    fn update(&mut self) {
        self.layout = self
            .image
            .and_then(|image| layout(image, self.size, self.size_mode));
        if let (SizeMode::AutoSize, Some(layout)) = (self.size_mode, self.layout) {
            self.size = layout.box_size;
        }
    }
}

impl Default for PictureBox {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Inspect for PictureBox {
    fn surface(&self) -> Result<Surface, EnumerationError> {
        Ok(Surface::builder::<PictureBox>()
            .opaque_getter("getImage", "Image")
            .method("setImage")
            .getter("getSizeMode", |p| p.size_mode)
            .info(DisplayInfo::new("SizeMode"))
            .setter("setSizeMode", |p, mode| p.set_size_mode(mode))
            .info(DisplayInfo::new("SizeMode"))
            .opaque_getter("getTag", "Object")
            .method("setTag")
            .build())
    }
}

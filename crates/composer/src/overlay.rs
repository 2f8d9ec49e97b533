//! Frame layout: the source image on top, a white label in the top-left
//! corner and a progress bar in a strip below the image.
//!
//! ```text
//! +----------------------------+  y = 0
//! | label @ (10, 10)           |
//! |          image             |
//! +----------------------------+  y = h
//! |                            |  10 px gap
//! |  ########........          |  20 px bar, x = 10 .. w - 10
//! |                            |  10 px margin
//! +----------------------------+  y = h + 40
//! ```

use image::{imageops, DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::font::LabelFont;

/// Label position relative to the canvas origin.
pub const LABEL_ORIGIN: (i32, i32) = (10, 10);

/// Height of the progress bar.
pub const BAR_HEIGHT: u32 = 20;

/// Vertical gap between the image bottom and the bar.
pub const BAR_GAP: u32 = 10;

/// Extra canvas height below the image besides the bar itself.
pub const STRIP_MARGIN: u32 = 20;

/// Horizontal inset of the bar track from both canvas edges.
pub const BAR_INSET: u32 = 10;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Geometry of a frame built around a `width` x `image_height` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub width: u32,
    pub image_height: u32,
}

impl FrameLayout {
    pub fn new(width: u32, image_height: u32) -> Self {
        Self { width, image_height }
    }

    pub fn canvas_height(&self) -> u32 {
        self.image_height + BAR_HEIGHT + STRIP_MARGIN
    }

    pub fn bar_top(&self) -> u32 {
        self.image_height + BAR_GAP
    }

    /// Track width; images narrower than both insets get an empty track.
    pub fn track_width(&self) -> u32 {
        self.width.saturating_sub(2 * BAR_INSET)
    }

    /// Filled width for frame `index` (0-based) out of `total`:
    /// `floor((index + 1) / total * track_width)`.
    pub fn fill_width(&self, index: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        let done = (index + 1).min(total) as u64;
        (self.track_width() as u64 * done / total as u64) as u32
    }
}

/// Build the overlay frame for one image.
pub fn compose_frame(
    image: &DynamicImage,
    label: &str,
    index: usize,
    total: usize,
    font: &LabelFont,
) -> RgbImage {
    let layout = FrameLayout::new(image.width(), image.height());
    let mut canvas = RgbImage::new(layout.width, layout.canvas_height());

    imageops::replace(&mut canvas, &image.to_rgb8(), 0, 0);

    font.draw(&mut canvas, WHITE, LABEL_ORIGIN.0, LABEL_ORIGIN.1, label);

    let fill = layout.fill_width(index, total);
    if fill > 0 {
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(BAR_INSET as i32, layout.bar_top() as i32).of_size(fill, BAR_HEIGHT),
            WHITE,
        );
    }

    canvas
}

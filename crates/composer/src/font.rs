//! Label font selection.
//!
//! A regular-weight TrueType font is looked up on the running system; when
//! none can be loaded the built-in bitmap font from [`crate::glyphs`] is used
//! instead. The fallback changes the label size but never fails a run.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};
use tracing::{debug, info};

use crate::glyphs;

/// Pixel size of TrueType labels.
pub const LABEL_FONT_SIZE: f32 = 35.0;

/// Regular sans-serif fonts tried in order when no font is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// Font used to draw frame labels.
pub enum LabelFont {
    TrueType {
        font: Font<'static>,
        source: PathBuf,
    },
    Bitmap,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType { source, .. } => f.debug_struct("TrueType").field("source", source).finish(),
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl LabelFont {
    /// Load `preferred` if given, otherwise the first usable system font,
    /// otherwise the built-in bitmap font.
    pub fn load(preferred: Option<&Path>) -> Self {
        let preferred = preferred.map(Path::to_path_buf);
        let candidates = preferred
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = Self::from_file(&path) {
                info!(font = %path.display(), "Using TrueType label font");
                return font;
            }
        }

        info!("No TrueType font available, using built-in bitmap font");
        Self::Bitmap
    }

    /// Load a TrueType font file, or `None` if it is missing or unparsable.
    pub fn from_file(path: &Path) -> Option<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(font = %path.display(), error = %e, "Font not readable");
                return None;
            }
        };

        match Font::try_from_vec(bytes) {
            Some(font) => Some(Self::TrueType {
                font,
                source: path.to_path_buf(),
            }),
            None => {
                debug!(font = %path.display(), "Font file could not be parsed");
                None
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            Self::TrueType { font, .. } => {
                draw_text_mut(canvas, color, x, y, Scale::uniform(LABEL_FONT_SIZE), font, text);
            }
            Self::Bitmap => glyphs::draw_text(canvas, color, x, y, text),
        }
    }
}

//! SVG asset utilities.
//!
//! - [`extract`]: Root element markup of an SVG file, for inlining into HTML

mod extract;

pub use extract::{ImageAsset, extract_svg_markup};

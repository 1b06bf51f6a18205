//! Image asset handling.
//!
//! # Modules
//!
//! - [`svg`]: Inline SVG extraction

pub mod svg;

//! Utility modules shared by the renderer, extractor and rehydration pass.

pub mod html;
pub mod mime;
pub mod str;

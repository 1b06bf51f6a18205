//! Filters applied to rendered page fragments.
//!
//! - `title`: Marks the document title of development installations

mod title;

pub use title::*;

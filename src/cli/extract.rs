//! `extract` command: print the inlinable markup of an SVG file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::image::svg::{ImageAsset, extract_svg_markup};
use crate::log;

pub fn run_extract(path: &Path, mime: Option<&str>) -> Result<()> {
    let asset = match mime {
        Some(mime) => ImageAsset::new(path, mime),
        None => ImageAsset::from_path(path),
    };

    let markup = extract_svg_markup(&asset)
        .with_context(|| format!("failed to extract {}", path.display()))?;
    match markup {
        Some(markup) => println!("{markup}"),
        None => log!("extract"; "{} ({}): nothing to inline", path.display(), asset.mime),
    }
    Ok(())
}

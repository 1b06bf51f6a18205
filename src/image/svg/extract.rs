//! Inline SVG markup extraction.
//!
//! Reads an SVG image asset and returns the markup of its root element,
//! ready to be embedded in HTML: the XML declaration, doctype and prolog
//! comments are dropped, and so is the root's default `xmlns` declaration.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

use crate::debug;
use crate::utils::mime;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("malformed SVG")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed SVG attribute")]
    Attr(#[from] AttrError),

    #[error("failed to serialize SVG")]
    Write(#[from] std::io::Error),

    #[error("SVG has no root element")]
    NoRoot,

    #[error("SVG root element is never closed")]
    Unclosed,
}

/// An image file together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub mime: String,
}

impl ImageAsset {
    pub fn new(path: impl Into<PathBuf>, mime: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime: mime.into(),
        }
    }

    /// Classify by file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = mime::from_path(&path);
        Self::new(path, mime)
    }

    #[inline]
    pub fn is_svg(&self) -> bool {
        mime::is_svg(&self.mime)
    }
}

/// Read an SVG asset and return its root element markup.
///
/// - `Ok(None)` if the asset is not SVG (the file is not touched), or the
///   file cannot be read or is empty
/// - `Err` if the file is read but is not well-formed XML
pub fn extract_svg_markup(asset: &ImageAsset) -> Result<Option<String>, SvgError> {
    if !asset.is_svg() {
        return Ok(None);
    }

    let content = match fs::read_to_string(&asset.path) {
        Ok(content) => content,
        Err(err) => {
            debug!("extract"; "cannot read {}: {}", asset.path.display(), err);
            return Ok(None);
        }
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    root_markup(&content).map(Some)
}

/// Serialize only the root element of an XML document, minus its default namespace.
pub fn root_markup(xml: &str) -> Result<String, SvgError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(xml.len())));
    let mut depth = 0usize;
    let mut in_root = false;

    loop {
        match reader.read_event()? {
            Event::Eof if in_root => return Err(SvgError::Unclosed),
            Event::Eof => return Err(SvgError::NoRoot),
            Event::Start(e) if !in_root => {
                in_root = true;
                depth = 1;
                writer.write_event(Event::Start(without_default_ns(&e)?))?;
            }
            Event::Empty(e) if !in_root => {
                writer.write_event(Event::Empty(without_default_ns(&e)?))?;
                break;
            }
            // Prolog: declaration, doctype, comments, whitespace
            _ if !in_root => {}
            Event::Start(e) => {
                depth += 1;
                writer.write_event(Event::Start(e))?;
            }
            Event::End(e) => {
                depth -= 1;
                writer.write_event(Event::End(e))?;
                if depth == 0 {
                    break;
                }
            }
            event => writer.write_event(event)?,
        }
    }

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Copy a start tag, dropping a plain `xmlns` attribute.
fn without_default_ns(start: &BytesStart) -> Result<BytesStart<'static>, SvgError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut root = BytesStart::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"xmlns" {
            continue;
        }
        root.push_attribute((attr.key.as_ref(), attr.value.as_ref()));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!-- Generator: Sketch -->\n",
        "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" viewBox=\"0 0 24 24\">",
        "<title>A &amp; B</title><!-- keep --><path d=\"M0 0h24v24H0z\"/>",
        "</svg>\n"
    );

    #[test]
    fn test_root_markup_strips_prolog_and_default_ns() {
        assert_eq!(
            root_markup(ICON).unwrap(),
            concat!(
                "<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\" viewBox=\"0 0 24 24\">",
                "<title>A &amp; B</title><!-- keep --><path d=\"M0 0h24v24H0z\"/>",
                "</svg>"
            )
        );
    }

    #[test]
    fn test_root_markup_empty_root() {
        assert_eq!(
            root_markup("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\"/>").unwrap(),
            "<svg width=\"1\"/>"
        );
    }

    #[test]
    fn test_root_markup_nested_same_name() {
        let svg = "<svg><svg x=\"1\"><rect/></svg><circle r=\"2\"/></svg><trailing/>";
        assert_eq!(
            root_markup(svg).unwrap(),
            "<svg><svg x=\"1\"><rect/></svg><circle r=\"2\"/></svg>"
        );
    }

    #[test]
    fn test_root_markup_malformed() {
        assert!(root_markup("<svg><g></svg>").is_err());
        assert!(matches!(root_markup("<svg><g>"), Err(_)));
        assert!(matches!(root_markup("plain text"), Err(SvgError::NoRoot)));
    }

    #[test]
    fn test_extract_non_svg_is_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        fs::write(&path, ICON).unwrap();

        let asset = ImageAsset::new(&path, mime::types::PNG);
        assert_eq!(extract_svg_markup(&asset).unwrap(), None);
    }

    #[test]
    fn test_extract_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        fs::write(&path, ICON).unwrap();

        let asset = ImageAsset::from_path(&path);
        assert!(asset.is_svg());
        let markup = extract_svg_markup(&asset).unwrap().unwrap();
        assert!(markup.starts_with("<svg xmlns:xlink="));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_extract_unreadable_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ImageAsset::new(dir.path().join("missing.svg"), mime::types::SVG);
        assert_eq!(extract_svg_markup(&missing).unwrap(), None);

        let empty_path = dir.path().join("empty.svg");
        fs::write(&empty_path, "").unwrap();
        assert_eq!(extract_svg_markup(&ImageAsset::from_path(&empty_path)).unwrap(), None);
    }

    #[test]
    fn test_extract_malformed_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.svg");
        fs::write(&path, "<svg><path></svg>").unwrap();

        assert!(extract_svg_markup(&ImageAsset::from_path(&path)).is_err());
    }
}

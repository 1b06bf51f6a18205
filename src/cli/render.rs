//! `icon`, `img` and `title` commands.

use anyhow::{Context, Result};
use serde_json::Value;

use super::args::{IconArgs, ImageArgs};
use crate::config::IconkitConfig;
use crate::hooks::dev_title;
use crate::render::{IconRenderer, IconRequest, ImageRequest, Role, Scope};
use crate::{debug, log};

/// Render an icon and print it. Prints nothing for an unusable request.
pub fn run_icon(args: &IconArgs, config: &IconkitConfig) -> Result<()> {
    emit("icon", render_icon(args, config)?);
    Ok(())
}

/// Render an image tag and print it. Prints nothing for an unusable request.
pub fn run_image(args: &ImageArgs, config: &IconkitConfig) -> Result<()> {
    emit("img", render_image(args, config)?);
    Ok(())
}

pub fn run_title(title: &str, config: &IconkitConfig) -> Result<()> {
    println!("{}", dev_title(title, config.site.dev));
    Ok(())
}

fn emit(module: &str, markup: Option<String>) {
    match markup {
        Some(markup) => println!("{markup}"),
        None => log!(module; "nothing to render: no usable icon name"),
    }
}

pub fn render_icon(args: &IconArgs, config: &IconkitConfig) -> Result<Option<String>> {
    let Some(request) = icon_request(args)? else {
        return Ok(None);
    };
    debug!("icon"; "{:?}", request);
    Ok(IconRenderer::new(config.asset_roots()).render_icon(&request))
}

pub fn render_image(args: &ImageArgs, config: &IconkitConfig) -> Result<Option<String>> {
    let Some(request) = image_request(args)? else {
        return Ok(None);
    };
    debug!("img"; "{:?}", request);
    Ok(IconRenderer::new(config.asset_roots()).render_image(&request))
}

// ============================================================================
// Request building
// ============================================================================

fn parse_json(json: &str) -> Result<Value> {
    serde_json::from_str(json).context("request is not valid JSON")
}

fn icon_request(args: &IconArgs) -> Result<Option<IconRequest>> {
    if let Some(json) = &args.json {
        return Ok(IconRequest::from_json(&parse_json(json)?));
    }

    let Some(icon) = args.icon.as_deref().filter(|icon| !icon.is_empty()) else {
        return Ok(None);
    };
    let mut request = IconRequest::new(icon)
        .role(args.role.as_deref().map(Role::parse).unwrap_or_default())
        .scope(args.scope.as_deref().map(Scope::parse).unwrap_or_default());
    if let Some(set) = &args.set {
        request = request.set(set);
    }
    if !args.classes.is_empty() {
        request = request.classes(args.classes.clone());
    }
    if let Some(title) = &args.title {
        request = request.title(title);
    }
    if let Some(desc) = &args.desc {
        request = request.desc(desc);
    }
    Ok(Some(request))
}

fn image_request(args: &ImageArgs) -> Result<Option<ImageRequest>> {
    if let Some(json) = &args.json {
        return Ok(ImageRequest::from_json(&parse_json(json)?));
    }

    let Some(icon) = args.icon.as_deref().filter(|icon| !icon.is_empty()) else {
        return Ok(None);
    };
    let mut request = ImageRequest::new(icon)
        .role(args.role.as_deref().map(Role::parse).unwrap_or_default())
        .scope(args.scope.as_deref().map(Scope::parse).unwrap_or_default());
    if !args.classes.is_empty() {
        request = request.classes(args.classes.clone());
    }
    if let Some(alt) = &args.alt {
        request = request.alt(alt);
    }
    Ok(Some(request))
}

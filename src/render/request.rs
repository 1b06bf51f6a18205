//! Render requests for sprite icons and standalone SVG images.

use serde_json::Value;

use super::DEFAULT_SET;

/// ARIA role of the rendered element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Presentation,
    Image,
}

impl Role {
    /// Only the literal `"image"` selects `Image`; anything else is `Presentation`.
    pub fn parse(s: &str) -> Self {
        if s == "image" {
            Self::Image
        } else {
            Self::Presentation
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Image => "image",
        }
    }
}

/// Which theme's asset root serves the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// The primary (parent) theme.
    #[default]
    Base,
    /// The override (child) theme.
    Child,
}

impl Scope {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("child") {
            Self::Child
        } else {
            Self::Base
        }
    }
}

/// CSS classes given either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classes {
    One(String),
    Many(Vec<String>),
}

impl Classes {
    /// Space-join the classes.
    pub fn joined(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(list) => list.join(" "),
        }
    }

    /// Read classes from an untyped value; anything but a string or a list is ignored.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::One(s.clone())),
            Value::Array(items) => Some(Self::Many(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl From<&str> for Classes {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<Vec<String>> for Classes {
    fn from(list: Vec<String>) -> Self {
        Self::Many(list)
    }
}

/// Request for an icon out of a sprite document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Fragment identifier of the icon inside the sprite.
    pub icon: String,
    pub classes: Option<Classes>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub role: Role,
    /// Sprite file name without extension.
    pub set: String,
    pub scope: Scope,
}

impl IconRequest {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            classes: None,
            title: None,
            desc: None,
            role: Role::default(),
            set: DEFAULT_SET.to_string(),
            scope: Scope::default(),
        }
    }

    pub fn set(mut self, set: impl Into<String>) -> Self {
        self.set = set.into();
        self
    }

    pub fn classes(mut self, classes: impl Into<Classes>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Build a request from untyped data (e.g. a JSON object from a template).
    ///
    /// Returns `None` when `icon` is missing, empty or not a string, or when
    /// `set` is given but is not a string.
    pub fn from_json(value: &Value) -> Option<Self> {
        let icon = required_icon(value)?;
        let set = match value.get("set") {
            None => DEFAULT_SET,
            Some(set) => set.as_str()?,
        };

        Some(Self {
            icon: icon.to_string(),
            classes: value.get("classes").and_then(Classes::from_json),
            title: text_field(value, "title"),
            desc: text_field(value, "desc"),
            role: role_field(value),
            set: set.to_string(),
            scope: scope_field(value),
        })
    }
}

/// Request for a standalone SVG image (`assets/images/{icon}.svg`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub icon: String,
    pub classes: Option<Classes>,
    pub alt: Option<String>,
    pub role: Role,
    pub scope: Scope,
}

impl ImageRequest {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            classes: None,
            alt: None,
            role: Role::default(),
            scope: Scope::default(),
        }
    }

    pub fn classes(mut self, classes: impl Into<Classes>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Build a request from untyped data. `None` when `icon` is unusable.
    pub fn from_json(value: &Value) -> Option<Self> {
        let icon = required_icon(value)?;

        Some(Self {
            icon: icon.to_string(),
            classes: value.get("classes").and_then(Classes::from_json),
            alt: text_field(value, "alt"),
            role: role_field(value),
            scope: scope_field(value),
        })
    }
}

fn required_icon(value: &Value) -> Option<&str> {
    value
        .get("icon")
        .and_then(Value::as_str)
        .filter(|icon| !icon.is_empty())
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn role_field(value: &Value) -> Role {
    value
        .get("role")
        .and_then(Value::as_str)
        .map(Role::parse)
        .unwrap_or_default()
}

fn scope_field(value: &Value) -> Scope {
    value
        .get("scope")
        .and_then(Value::as_str)
        .map(Scope::parse)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("image"), Role::Image);
        assert_eq!(Role::parse("presentation"), Role::Presentation);
        assert_eq!(Role::parse("Image"), Role::Presentation);
        assert_eq!(Role::parse("button"), Role::Presentation);
        assert_eq!(Role::parse(""), Role::Presentation);
    }

    #[test]
    fn test_classes_joined() {
        assert_eq!(Classes::from("btn").joined(), "btn");
        assert_eq!(
            Classes::from(vec!["a".to_string(), "b".to_string()]).joined(),
            "a b"
        );
    }

    #[test]
    fn test_icon_request_from_json() {
        let req = IconRequest::from_json(&json!({
            "icon": "close",
            "set": "ui",
            "role": "image",
            "classes": ["a", "b"],
            "title": "Close",
            "scope": "child",
        }))
        .unwrap();

        assert_eq!(req.icon, "close");
        assert_eq!(req.role, Role::Image);
        assert_eq!(req.scope, Scope::Child);
        assert_eq!(req.classes.unwrap().joined(), "a b");
        assert_eq!(req.title.as_deref(), Some("Close"));
        assert_eq!(req.desc, None);
    }

    #[test]
    fn test_icon_request_defaults() {
        let req = IconRequest::from_json(&json!({ "icon": "menu" })).unwrap();
        assert_eq!(req, IconRequest::new("menu"));
        assert_eq!(req.set, "ui");
        assert_eq!(req.role, Role::Presentation);
    }

    #[test]
    fn test_icon_request_rejects_bad_icon() {
        assert!(IconRequest::from_json(&json!({})).is_none());
        assert!(IconRequest::from_json(&json!({ "icon": "" })).is_none());
        assert!(IconRequest::from_json(&json!({ "icon": 42 })).is_none());
        assert!(IconRequest::from_json(&json!({ "icon": ["close"] })).is_none());
    }

    #[test]
    fn test_icon_request_rejects_non_string_set() {
        assert!(IconRequest::from_json(&json!({ "icon": "close", "set": 1 })).is_none());
        assert!(IconRequest::from_json(&json!({ "icon": "close", "set": null })).is_none());
        // An empty string is still a string
        let req = IconRequest::from_json(&json!({ "icon": "close", "set": "" })).unwrap();
        assert_eq!(req.set, "");
    }

    #[test]
    fn test_garbage_optional_fields_are_ignored() {
        let req = IconRequest::from_json(&json!({
            "icon": "close",
            "classes": 7,
            "title": false,
            "role": 3,
        }))
        .unwrap();
        assert_eq!(req.classes, None);
        assert_eq!(req.title, None);
        assert_eq!(req.role, Role::Presentation);
    }

    #[test]
    fn test_image_request_from_json() {
        let req = ImageRequest::from_json(&json!({ "icon": "logo", "alt": "Logo" })).unwrap();
        assert_eq!(req.icon, "logo");
        assert_eq!(req.alt.as_deref(), Some("Logo"));
        assert!(ImageRequest::from_json(&json!({ "icon": null })).is_none());
    }
}

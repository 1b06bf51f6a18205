//! Configuration sections of `iconkit.toml`.
//!
//! | Section          | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `[site]`         | Page origin and development flag          |
//! | `[theme]`        | Base theme asset root and version         |
//! | `[theme.child]`  | Optional child theme asset root           |
//! | `[rehydrate]`    | Where cross-origin sprites are read from  |

mod rehydrate;
mod site;
mod theme;

pub use rehydrate::{RehydrateConfig, SpriteSourceKind};
pub use site::SiteSectionConfig;
pub use theme::ThemeSectionConfig;

//! Display theme preference.
//!
//! The preference is stored as raw text (`light` or `dark`), not JSON.

use crate::storage::{KeyValueStorage, StorageResult};
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Resolves the startup theme.
///
/// Saved preference wins; otherwise the system preference decides.
pub fn load_theme<S>(storage: &S, key: &str, system_prefers_dark: bool) -> Theme
where
    S: KeyValueStorage + ?Sized,
{
    let fallback = if system_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    };

    match storage.get_item(key) {
        Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
            warn!("event=theme_load module=theme status=ignored reason=unknown_value key={key}");
            fallback
        }),
        Ok(None) => fallback,
        Err(err) => {
            warn!("event=theme_load module=theme status=error key={key} error={err}");
            fallback
        }
    }
}

pub fn save_theme<S>(storage: &S, key: &str, theme: Theme) -> StorageResult<()>
where
    S: KeyValueStorage + ?Sized,
{
    storage.set_item(key, theme.as_str())?;
    info!(
        "event=theme_save module=theme status=ok theme={}",
        theme.as_str()
    );
    Ok(())
}

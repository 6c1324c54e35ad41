use serde::{Deserialize, Serialize};

use super::display_profile::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::geometry::Rect;

/// Absolute window position from configs written before display profiles
/// existed. Read once at startup to seed a profile, then scrubbed by the
/// host once [`crate::DisplayManager::needs_clear_legacy_config`] reports
/// the migration happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyWindowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<i32>,
}

impl LegacyWindowConfig {
    /// Either coordinate present is enough to attempt migration.
    pub fn has_position(&self) -> bool {
        self.window_x.is_some() || self.window_y.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The legacy rectangle with missing fields defaulted the same way the
    /// old config loader defaulted them.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.window_x.unwrap_or(0),
            self.window_y.unwrap_or(0),
            self.window_width.unwrap_or(DEFAULT_WIDTH),
            self.window_height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named reference corner (or center) of a monitor's work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    /// Fixed pixel size.
    #[default]
    Fixed,
    /// Size expressed as a fraction of the work area, clamped to min/max.
    ScreenRelative,
}

pub const DEFAULT_OFFSET_X: i32 = -20;
pub const DEFAULT_OFFSET_Y: i32 = -50;
pub const DEFAULT_WIDTH: i32 = 350;
pub const DEFAULT_HEIGHT: i32 = 600;
pub const DEFAULT_WIDTH_RATIO: f64 = 0.15;
pub const DEFAULT_HEIGHT_RATIO: f64 = 0.35;
pub const DEFAULT_MIN_WIDTH: i32 = 200;
pub const DEFAULT_MAX_WIDTH: i32 = 600;
pub const DEFAULT_MIN_HEIGHT: i32 = 300;
pub const DEFAULT_MAX_HEIGHT: i32 = 900;

pub type ProfileCollection = BTreeMap<String, DisplayProfile>;

/// Persisted placement preference for one monitor fingerprint.
///
/// Every field is optional in the stored record: a missing or malformed field
/// degrades to its default independently of the others (see
/// [`DisplayProfile::effective`]), never the whole record. Field names keep
/// the camelCase config keys earlier releases wrote so existing files
/// round-trip, and unknown keys are preserved verbatim for forward
/// compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_mode: Option<SizeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DisplayProfile {
    /// The hard-coded default profile: bottom-right corner, tucked 20 px in
    /// and 50 px up to stay clear of a taskbar, fixed 350x600.
    pub fn preset() -> Self {
        Self {
            anchor: Some(Anchor::BottomRight),
            offset_x: Some(DEFAULT_OFFSET_X),
            offset_y: Some(DEFAULT_OFFSET_Y),
            size_mode: Some(SizeMode::Fixed),
            width: Some(DEFAULT_WIDTH),
            height: Some(DEFAULT_HEIGHT),
            width_ratio: Some(DEFAULT_WIDTH_RATIO),
            height_ratio: Some(DEFAULT_HEIGHT_RATIO),
            min_width: Some(DEFAULT_MIN_WIDTH),
            max_width: Some(DEFAULT_MAX_WIDTH),
            min_height: Some(DEFAULT_MIN_HEIGHT),
            max_height: Some(DEFAULT_MAX_HEIGHT),
            extra: BTreeMap::new(),
        }
    }

    /// A profile counts as placed once both offsets have been recorded.
    /// Legacy migration is skipped for such profiles.
    pub fn has_offsets(&self) -> bool {
        self.offset_x.is_some() && self.offset_y.is_some()
    }

    /// Read-merge-write: only the `Some` fields of the patch replace the
    /// current values; everything else is preserved, unknown keys included.
    pub fn merge(&mut self, patch: &ProfilePatch) {
        if patch.anchor.is_some() {
            self.anchor = patch.anchor;
        }
        if patch.offset_x.is_some() {
            self.offset_x = patch.offset_x;
        }
        if patch.offset_y.is_some() {
            self.offset_y = patch.offset_y;
        }
        if patch.size_mode.is_some() {
            self.size_mode = patch.size_mode;
        }
        if patch.width.is_some() {
            self.width = patch.width;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        if patch.width_ratio.is_some() {
            self.width_ratio = patch.width_ratio;
        }
        if patch.height_ratio.is_some() {
            self.height_ratio = patch.height_ratio;
        }
        if patch.min_width.is_some() {
            self.min_width = patch.min_width;
        }
        if patch.max_width.is_some() {
            self.max_width = patch.max_width;
        }
        if patch.min_height.is_some() {
            self.min_height = patch.min_height;
        }
        if patch.max_height.is_some() {
            self.max_height = patch.max_height;
        }
    }

    /// Resolve the record into concrete values, falling back to the defaults
    /// field by field. Non-positive sizes and non-finite ratios count as
    /// unset.
    pub fn effective(&self) -> EffectiveProfile {
        EffectiveProfile {
            anchor: self.anchor.unwrap_or_default(),
            offset_x: self.offset_x.unwrap_or(DEFAULT_OFFSET_X),
            offset_y: self.offset_y.unwrap_or(DEFAULT_OFFSET_Y),
            size_mode: self.size_mode.unwrap_or_default(),
            width: self.width.filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH),
            height: self.height.filter(|h| *h > 0).unwrap_or(DEFAULT_HEIGHT),
            width_ratio: self
                .width_ratio
                .filter(|r| r.is_finite() && *r > 0.0)
                .unwrap_or(DEFAULT_WIDTH_RATIO),
            height_ratio: self
                .height_ratio
                .filter(|r| r.is_finite() && *r > 0.0)
                .unwrap_or(DEFAULT_HEIGHT_RATIO),
            min_width: self.min_width.filter(|v| *v > 0).unwrap_or(DEFAULT_MIN_WIDTH),
            max_width: self.max_width.filter(|v| *v > 0).unwrap_or(DEFAULT_MAX_WIDTH),
            min_height: self
                .min_height
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MIN_HEIGHT),
            max_height: self
                .max_height
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_HEIGHT),
        }
    }
}

/// Fully resolved view of a profile; what the placement math consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveProfile {
    pub anchor: Anchor,
    pub offset_x: i32,
    pub offset_y: i32,
    pub size_mode: SizeMode,
    pub width: i32,
    pub height: i32,
    pub width_ratio: f64,
    pub height_ratio: f64,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

/// Partial update applied through [`DisplayProfile::merge`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfilePatch {
    pub anchor: Option<Anchor>,
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
    pub size_mode: Option<SizeMode>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub width_ratio: Option<f64>,
    pub height_ratio: Option<f64>,
    pub min_width: Option<i32>,
    pub max_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
}

pub const PREVIEW_OFFSET_LIMIT: i32 = 50;

/// Clamp an offset for the settings-form miniature preview. Presentation
/// only: stored offsets and the authoritative placement calculation are
/// never clamped to this range.
pub fn preview_offset(value: i32) -> i32 {
    value.clamp(-PREVIEW_OFFSET_LIMIT, PREVIEW_OFFSET_LIMIT)
}

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Monitor attributes as reported by the host toolkit. Constructed fresh on
/// every query; the engine only ever holds on to derived fingerprints and
/// profiles, never to descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorDescriptor {
    pub id: String,
    /// Full monitor bounds (origin + size) in host-native units.
    pub bounds: Rect,
    pub scale_factor: f64,
    /// Bounds minus OS-reserved chrome such as the taskbar.
    pub work_area: Rect,
    pub is_primary: bool,
}

/// A monitor descriptor paired with its derived fingerprint. This is what the
/// engine hands back to the host and to UI observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub fingerprint: String,
    pub monitor: MonitorDescriptor,
}

//! Display profile & placement engine for a desktop-companion overlay
//! window.
//!
//! The engine fingerprints monitors from their reported geometry, keeps one
//! placement profile per fingerprint (anchor + offset + size policy),
//! computes window rectangles from profiles, inverts user moves/resizes
//! back into profile data, reacts to monitor hot-plug, and migrates
//! pre-profile configs with absolute window positions.
//!
//! The windowing toolkit stays behind the [`DisplayHost`] trait: the host
//! supplies monitor descriptors and the window rectangle, and applies the
//! rectangles the engine returns.

pub mod core;
pub mod error;
pub mod models;

pub use crate::core::display_events::{DisplayEvent, ListenerId};
pub use crate::core::display_manager::{DisplayHost, DisplayManager, PlacementUpdate};
pub use crate::core::fingerprint::fingerprint;
pub use crate::core::profile_store::ProfileStore;
pub use crate::core::window_bounds::{compute_bounds, inverse_offset, size_ratio};
pub use crate::error::PlacementError;
pub use crate::models::{
    preview_offset, Anchor, DisplayProfile, DisplaySnapshot, LegacyWindowConfig,
    MonitorDescriptor, ProfileCollection, ProfilePatch, Rect, SizeMode,
};

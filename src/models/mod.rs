pub mod display_profile;
pub mod geometry;
pub mod legacy;
pub mod monitor;

pub use display_profile::{
    preview_offset, Anchor, DisplayProfile, EffectiveProfile, ProfileCollection, ProfilePatch,
    SizeMode,
};
pub use geometry::{Point, Rect};
pub use legacy::LegacyWindowConfig;
pub use monitor::{DisplaySnapshot, MonitorDescriptor};

pub mod display_events;
pub mod display_manager;
pub mod fingerprint;
pub mod legacy_migration;
pub mod persistence;
pub mod profile_store;
pub mod window_bounds;

pub use display_events::{DisplayEvent, Listener, ListenerId};
pub use display_manager::{DisplayHost, DisplayManager, PlacementUpdate};
pub use profile_store::ProfileStore;

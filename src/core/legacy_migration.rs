//! One-shot conversion of a pre-profile config (absolute window position)
//! into a display profile on the monitor that position belongs to.

use tracing::debug;

use super::profile_store::ProfileStore;
use super::window_bounds::inverse_offset;
use crate::models::{DisplayProfile, DisplaySnapshot, LegacyWindowConfig, ProfilePatch};

pub struct StartupProfile {
    pub profile: DisplayProfile,
    /// True when legacy fields were folded into the profile; the host should
    /// scrub them from its saved config so they can never re-migrate with
    /// stale values.
    pub migrated: bool,
}

/// Resolve the profile to place the window with at startup.
///
/// An existing profile that already carries offsets always wins and skips
/// migration. Otherwise a legacy absolute position, when present, is
/// inverted through the profile's anchor so the first automatic placement
/// reproduces the exact legacy rectangle. With neither, the default profile
/// is created.
pub fn resolve_startup_profile(
    store: &mut ProfileStore,
    display: &DisplaySnapshot,
    primary: Option<&str>,
    legacy: Option<&LegacyWindowConfig>,
) -> StartupProfile {
    let fingerprint = display.fingerprint.as_str();

    if let Some(existing) = store.get_if_exists(fingerprint) {
        if existing.has_offsets() {
            debug!(%fingerprint, "existing profile wins, skipping legacy migration");
            return StartupProfile {
                profile: existing.clone(),
                migrated: false,
            };
        }
    }

    if let Some(legacy) = legacy.filter(|l| l.has_position()) {
        let legacy_rect = legacy.rect();
        debug!(%fingerprint, x = legacy_rect.x, y = legacy_rect.y, "migrating legacy window position");

        let anchor = store.get_or_create(fingerprint, primary).effective().anchor;
        let (offset_x, offset_y) = inverse_offset(&display.monitor, legacy_rect, anchor);
        let profile = store.update(
            fingerprint,
            &ProfilePatch {
                offset_x: Some(offset_x),
                offset_y: Some(offset_y),
                width: Some(legacy_rect.width),
                height: Some(legacy_rect.height),
                ..ProfilePatch::default()
            },
            primary,
        );
        return StartupProfile {
            profile,
            migrated: true,
        };
    }

    StartupProfile {
        profile: store.get_or_create(fingerprint, primary).clone(),
        migrated: false,
    }
}

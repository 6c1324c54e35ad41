use tracing::{debug, trace};

use crate::models::{DisplayProfile, ProfileCollection, ProfilePatch};

/// Owns the fingerprint -> profile mapping. Profiles are created on first
/// access and never deleted automatically, so a monitor that disappears and
/// later returns with the same fingerprint restores its exact placement.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: ProfileCollection,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only lookup with no side effect; safe for preview paths.
    pub fn get_if_exists(&self, fingerprint: &str) -> Option<&DisplayProfile> {
        self.profiles.get(fingerprint)
    }

    /// Existing profile verbatim; otherwise a clone of the primary monitor's
    /// profile (a second monitor starts from the user's tuned preferences),
    /// otherwise the hard-coded preset. Creation stores the profile so the
    /// next export persists it.
    pub fn get_or_create(&mut self, fingerprint: &str, primary: Option<&str>) -> &DisplayProfile {
        self.ensure(fingerprint, primary)
    }

    /// Read-merge-write update; missing entries are created first under the
    /// same rules as [`ProfileStore::get_or_create`].
    pub fn update(
        &mut self,
        fingerprint: &str,
        patch: &ProfilePatch,
        primary: Option<&str>,
    ) -> DisplayProfile {
        let profile = self.ensure(fingerprint, primary);
        profile.merge(patch);
        trace!(%fingerprint, ?patch, "profile updated");
        profile.clone()
    }

    /// Bulk replace from the host's persisted config. No validation beyond
    /// shape: unknown fields inside each profile ride along verbatim.
    pub fn load(&mut self, profiles: ProfileCollection) {
        debug!(count = profiles.len(), "display profiles loaded");
        self.profiles = profiles;
    }

    /// Snapshot for the host to persist.
    pub fn export(&self) -> ProfileCollection {
        self.profiles.clone()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn ensure(&mut self, fingerprint: &str, primary: Option<&str>) -> &mut DisplayProfile {
        if !self.profiles.contains_key(fingerprint) {
            let profile = match primary.and_then(|fp| self.profiles.get(fp)).cloned() {
                Some(inherited) => {
                    trace!(%fingerprint, "inheriting profile from primary display");
                    inherited
                }
                None => {
                    debug!(%fingerprint, "new profile created");
                    DisplayProfile::preset()
                }
            };
            self.profiles.insert(fingerprint.to_owned(), profile);
        }
        self.profiles
            .entry(fingerprint.to_owned())
            .or_insert_with(DisplayProfile::preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Anchor;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = ProfileStore::new();
        let first = store.get_or_create("aaa", None).clone();
        let second = store.get_or_create("aaa", None).clone();
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn new_fingerprint_inherits_primary_profile() {
        let mut store = ProfileStore::new();
        store.update(
            "primary",
            &ProfilePatch {
                anchor: Some(Anchor::TopLeft),
                offset_x: Some(99),
                ..ProfilePatch::default()
            },
            None,
        );

        let inherited = store.get_or_create("secondary", Some("primary")).clone();
        assert_eq!(inherited.anchor, Some(Anchor::TopLeft));
        assert_eq!(inherited.offset_x, Some(99));
    }

    #[test]
    fn falls_back_to_preset_without_primary_profile() {
        let mut store = ProfileStore::new();
        let profile = store.get_or_create("aaa", Some("missing-primary")).clone();
        assert_eq!(profile, DisplayProfile::preset());
    }

    #[test]
    fn get_if_exists_never_creates() {
        let store = ProfileStore::new();
        assert!(store.get_if_exists("aaa").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_merges_into_existing_record() {
        let mut store = ProfileStore::new();
        store.get_or_create("aaa", None);
        let updated = store.update(
            "aaa",
            &ProfilePatch {
                offset_y: Some(-75),
                ..ProfilePatch::default()
            },
            None,
        );
        assert_eq!(updated.offset_y, Some(-75));
        // unspecified fields kept from the preset
        assert_eq!(updated.width, DisplayProfile::preset().width);
    }

    #[test]
    fn load_and_export_round_trip() {
        let mut store = ProfileStore::new();
        store.get_or_create("aaa", None);
        let exported = store.export();

        let mut other = ProfileStore::new();
        other.load(exported.clone());
        assert_eq!(other.export(), exported);
    }
}

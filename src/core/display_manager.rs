use tracing::{debug, warn};

use super::display_events::{DisplayEvent, Listener, ListenerId, ListenerRegistry};
use super::fingerprint::fingerprint;
use super::legacy_migration::resolve_startup_profile;
use super::profile_store::ProfileStore;
use super::window_bounds::{compute_bounds, inverse_offset, size_ratio};
use crate::error::PlacementError;
use crate::models::{
    DisplayProfile, DisplaySnapshot, LegacyWindowConfig, MonitorDescriptor, Point,
    ProfileCollection, ProfilePatch, Rect,
};

/// Toolkit boundary. The host owns the real window and the OS monitor list;
/// the engine only ever sees descriptors and rectangles through this trait.
pub trait DisplayHost {
    /// Fresh enumeration of the attached monitors.
    fn monitors(&self) -> Vec<MonitorDescriptor>;
    /// Outer rectangle of the overlay window, if one currently exists.
    fn window_rect(&self) -> Option<Rect>;
}

/// Result of folding a finished user move/resize back into the store, handed
/// to the host so a settings panel can reflect the new values.
#[derive(Debug, Clone)]
pub struct PlacementUpdate {
    pub display: DisplaySnapshot,
    pub profile: DisplayProfile,
}

/// Orchestrates fingerprinting, the profile store, placement math and
/// hot-plug reaction for one overlay window. All methods are synchronous;
/// the host delivers events serially on its control thread.
pub struct DisplayManager<H: DisplayHost> {
    host: H,
    store: ProfileStore,
    listeners: ListenerRegistry,
    needs_clear_legacy: bool,
}

impl<H: DisplayHost> DisplayManager<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            store: ProfileStore::new(),
            listeners: ListenerRegistry::default(),
            needs_clear_legacy: false,
        }
    }

    pub fn load_profiles(&mut self, profiles: ProfileCollection) {
        self.store.load(profiles);
    }

    pub fn export_profiles(&self) -> ProfileCollection {
        self.store.export()
    }

    /// Read-only access for preview paths that must not create profiles.
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn add_listener(&mut self, listener: Listener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Snapshot of the monitor the window currently sits on (nearest to the
    /// rectangle's center), or the primary monitor when no rectangle is
    /// given.
    pub fn current_display(&self, rect: Option<Rect>) -> Result<DisplaySnapshot, PlacementError> {
        let monitors = self.host.monitors();
        self.snapshot_for(&monitors, rect)
    }

    /// Snapshots for every attached monitor, for picker UIs. Monitors with
    /// degenerate geometry are skipped rather than failing the enumeration.
    pub fn all_displays(&self) -> Vec<DisplaySnapshot> {
        self.host
            .monitors()
            .into_iter()
            .filter_map(|monitor| match fingerprint(&monitor) {
                Ok(fp) => Some(DisplaySnapshot {
                    fingerprint: fp,
                    monitor,
                }),
                Err(err) => {
                    warn!(%err, "skipping monitor in enumeration");
                    None
                }
            })
            .collect()
    }

    /// Startup placement: resolves the monitor (from the legacy position
    /// when one is saved), runs legacy migration if needed and returns the
    /// rectangle the host should open the window with.
    pub fn initial_window_bounds(
        &mut self,
        legacy: Option<&LegacyWindowConfig>,
    ) -> Result<Rect, PlacementError> {
        let monitors = self.host.monitors();
        // only a complete saved position is trusted to pick the monitor;
        // a lone coordinate still triggers migration below
        let rect_hint = legacy
            .filter(|l| l.window_x.is_some() && l.window_y.is_some())
            .map(|l| l.rect());
        let display = self.snapshot_for(&monitors, rect_hint)?;
        let primary = self.primary_fingerprint(&monitors);

        let startup =
            resolve_startup_profile(&mut self.store, &display, primary.as_deref(), legacy);
        if startup.migrated {
            self.needs_clear_legacy = true;
        }
        Ok(compute_bounds(&display.monitor, &startup.profile))
    }

    /// True once legacy fields were migrated; the host checks this after
    /// startup and scrubs the legacy fields from its saved config.
    pub fn needs_clear_legacy_config(&self) -> bool {
        self.needs_clear_legacy
    }

    /// Recompute bounds for the window's current monitor (or primary).
    pub fn recalculate_bounds(&mut self, current: Option<Rect>) -> Result<Rect, PlacementError> {
        let monitors = self.host.monitors();
        let display = self.snapshot_for(&monitors, current)?;
        let primary = self.primary_fingerprint(&monitors);
        let profile = self
            .store
            .get_or_create(&display.fingerprint, primary.as_deref())
            .clone();
        Ok(compute_bounds(&display.monitor, &profile))
    }

    /// Placement on an explicitly chosen monitor, for "move to display"
    /// actions. Fails with [`PlacementError::UnknownDisplay`] when the
    /// fingerprint is no longer attached; the caller falls back to
    /// [`DisplayManager::recalculate_bounds`].
    pub fn bounds_for_display(&mut self, target: &str) -> Result<Rect, PlacementError> {
        let monitors = self.host.monitors();
        let monitor = monitors
            .iter()
            .find(|m| fingerprint(m).map(|fp| fp == target).unwrap_or(false))
            .ok_or_else(|| PlacementError::UnknownDisplay {
                fingerprint: target.to_owned(),
            })?;
        let primary = self.primary_fingerprint(&monitors);
        let profile = self.store.get_or_create(target, primary.as_deref()).clone();
        debug!(fingerprint = %target, "moving window to selected display");
        Ok(compute_bounds(monitor, &profile))
    }

    /// The user finished dragging the window: recover the offset under the
    /// profile's anchor and persist it, so the next automatic placement
    /// reproduces this position.
    pub fn handle_move_end(&mut self, rect: Rect) -> Result<PlacementUpdate, PlacementError> {
        let (display, primary) = self.locate(rect)?;
        let anchor = self
            .store
            .get_or_create(&display.fingerprint, primary.as_deref())
            .effective()
            .anchor;
        let (offset_x, offset_y) = inverse_offset(&display.monitor, rect, anchor);

        let profile = self.store.update(
            &display.fingerprint,
            &ProfilePatch {
                offset_x: Some(offset_x),
                offset_y: Some(offset_y),
                width: Some(rect.width),
                height: Some(rect.height),
                ..ProfilePatch::default()
            },
            primary.as_deref(),
        );
        Ok(PlacementUpdate { display, profile })
    }

    /// The user finished resizing: additionally record the screen-relative
    /// ratios so the size tracks the work area on other monitors.
    pub fn handle_resize_end(&mut self, rect: Rect) -> Result<PlacementUpdate, PlacementError> {
        let (display, primary) = self.locate(rect)?;
        let anchor = self
            .store
            .get_or_create(&display.fingerprint, primary.as_deref())
            .effective()
            .anchor;
        let (offset_x, offset_y) = inverse_offset(&display.monitor, rect, anchor);
        let (width_ratio, height_ratio) = size_ratio(&display.monitor, rect);

        let profile = self.store.update(
            &display.fingerprint,
            &ProfilePatch {
                offset_x: Some(offset_x),
                offset_y: Some(offset_y),
                width: Some(rect.width),
                height: Some(rect.height),
                width_ratio: Some(width_ratio),
                height_ratio: Some(height_ratio),
                ..ProfilePatch::default()
            },
            primary.as_deref(),
        );
        Ok(PlacementUpdate { display, profile })
    }

    /// Resolution, scale or work area changed on some monitor. The window's
    /// placement is recomputed from its *current* rectangle rather than from
    /// the changed monitor, since the window's nearest monitor may itself
    /// have changed, and a single `PlacementChanged` event is emitted.
    pub fn on_metrics_changed(&mut self, monitor: &MonitorDescriptor, changed: &[String]) {
        debug!(monitor = %monitor.id, ?changed, scale = monitor.scale_factor, "display metrics changed");

        let monitors = self.host.monitors();
        let window_rect = self.host.window_rect();
        let display = match self.snapshot_for(&monitors, window_rect) {
            Ok(display) => display,
            Err(err) => {
                warn!(%err, "cannot resolve display after metrics change");
                return;
            }
        };
        let primary = self.primary_fingerprint(&monitors);
        let profile = self
            .store
            .get_or_create(&display.fingerprint, primary.as_deref())
            .clone();
        let new_rect = compute_bounds(&display.monitor, &profile);
        let old_rect = window_rect.unwrap_or(new_rect);

        self.listeners.notify(&DisplayEvent::PlacementChanged {
            old_rect,
            new_rect,
            display,
        });
    }

    /// Attach notification: no geometry recomputation, observers refresh
    /// their enumerations.
    pub fn on_display_added(&self, monitor: &MonitorDescriptor) {
        debug!(monitor = %monitor.id, width = monitor.bounds.width, height = monitor.bounds.height, "display added");
        self.listeners.notify(&DisplayEvent::DisplayAdded {
            monitor: monitor.clone(),
        });
    }

    pub fn on_display_removed(&self, monitor: &MonitorDescriptor) {
        debug!(monitor = %monitor.id, "display removed");
        self.listeners.notify(&DisplayEvent::DisplayRemoved {
            monitor: monitor.clone(),
        });
    }

    fn locate(
        &self,
        rect: Rect,
    ) -> Result<(DisplaySnapshot, Option<String>), PlacementError> {
        let monitors = self.host.monitors();
        let display = self.snapshot_for(&monitors, Some(rect))?;
        let primary = self.primary_fingerprint(&monitors);
        Ok((display, primary))
    }

    fn snapshot_for(
        &self,
        monitors: &[MonitorDescriptor],
        rect: Option<Rect>,
    ) -> Result<DisplaySnapshot, PlacementError> {
        let monitor = match rect {
            Some(rect) => nearest_monitor(monitors, rect.center()),
            None => monitors
                .iter()
                .find(|m| m.is_primary)
                .or_else(|| monitors.first()),
        }
        .ok_or(PlacementError::NoMonitors)?;

        Ok(DisplaySnapshot {
            fingerprint: fingerprint(monitor)?,
            monitor: monitor.clone(),
        })
    }

    fn primary_fingerprint(&self, monitors: &[MonitorDescriptor]) -> Option<String> {
        let primary = monitors
            .iter()
            .find(|m| m.is_primary)
            .or_else(|| monitors.first())?;
        fingerprint(primary).ok()
    }
}

/// The monitor containing the point, else the one closest to it. Mirrors
/// how desktop toolkits resolve "display nearest point".
fn nearest_monitor(monitors: &[MonitorDescriptor], point: Point) -> Option<&MonitorDescriptor> {
    monitors
        .iter()
        .find(|m| m.bounds.contains(point))
        .or_else(|| monitors.iter().min_by_key(|m| m.bounds.distance_sq(point)))
}

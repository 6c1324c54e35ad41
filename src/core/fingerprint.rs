use sha2::{Digest, Sha256};
use tracing::trace;

use crate::error::PlacementError;
use crate::models::MonitorDescriptor;

/// 12 hex chars (48 bits): short enough to read in a settings panel, long
/// enough that a collision across one user's monitor set is negligible.
pub const FINGERPRINT_LEN: usize = 12;

/// Derive a stable identity for a monitor from its id, full bounds and scale
/// factor. The work area is deliberately excluded: it fluctuates with panel
/// auto-hide and must not fragment identity.
///
/// Deterministic and stable across restarts as long as the host reports the
/// same attributes. Degenerate geometry fails fast as a host-contract
/// violation.
pub fn fingerprint(monitor: &MonitorDescriptor) -> Result<String, PlacementError> {
    if monitor.bounds.width <= 0
        || monitor.bounds.height <= 0
        || !monitor.scale_factor.is_finite()
        || monitor.scale_factor <= 0.0
    {
        return Err(PlacementError::InvalidMonitor {
            id: monitor.id.clone(),
            width: monitor.bounds.width,
            height: monitor.bounds.height,
            scale_factor: monitor.scale_factor,
        });
    }

    let mut hasher = Sha256::new();
    hasher.update(monitor.id.as_bytes());
    hasher.update(b"|");
    hasher.update(monitor.bounds.width.to_le_bytes());
    hasher.update(monitor.bounds.height.to_le_bytes());
    hasher.update(monitor.scale_factor.to_bits().to_le_bytes());
    let digest = hasher.finalize();

    let hash = hex::encode(&digest[..FINGERPRINT_LEN / 2]);
    trace!(fingerprint = %hash, monitor = %monitor.id, "fingerprint generated");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rect;

    fn monitor() -> MonitorDescriptor {
        MonitorDescriptor {
            id: "DP-1".to_string(),
            bounds: Rect::new(0, 0, 1920, 1080),
            scale_factor: 1.0,
            work_area: Rect::new(0, 0, 1920, 1040),
            is_primary: true,
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let m = monitor();
        assert_eq!(fingerprint(&m).unwrap(), fingerprint(&m).unwrap());
        assert_eq!(fingerprint(&m).unwrap().len(), FINGERPRINT_LEN);
    }

    #[test]
    fn ignores_work_area_changes() {
        let mut m = monitor();
        let before = fingerprint(&m).unwrap();
        // taskbar auto-hide grows the work area but must not change identity
        m.work_area = Rect::new(0, 0, 1920, 1080);
        assert_eq!(fingerprint(&m).unwrap(), before);
    }

    #[test]
    fn distinguishes_resolution_and_scale() {
        let base = monitor();
        let mut other_res = monitor();
        other_res.bounds.width = 2560;
        let mut other_scale = monitor();
        other_scale.scale_factor = 2.0;

        let fp = fingerprint(&base).unwrap();
        assert_ne!(fingerprint(&other_res).unwrap(), fp);
        assert_ne!(fingerprint(&other_scale).unwrap(), fp);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let mut m = monitor();
        m.bounds.width = 0;
        assert!(matches!(
            fingerprint(&m),
            Err(PlacementError::InvalidMonitor { .. })
        ));

        let mut m = monitor();
        m.scale_factor = f64::NAN;
        assert!(fingerprint(&m).is_err());
    }
}

//! Anchor-based placement math: profile -> rectangle, and the inverse that
//! recovers a profile's offset or size ratio from a rectangle the user
//! dragged into place. Everything here is pure and works in f64 until the
//! final rounding.

use tracing::debug;

use crate::models::{Anchor, DisplayProfile, MonitorDescriptor, Rect, SizeMode};
use crate::models::display_profile::{DEFAULT_HEIGHT_RATIO, DEFAULT_WIDTH_RATIO};

fn anchor_base(work_area: Rect, anchor: Anchor) -> (f64, f64) {
    let (x, y, w, h) = (
        work_area.x as f64,
        work_area.y as f64,
        work_area.width as f64,
        work_area.height as f64,
    );
    match anchor {
        Anchor::TopLeft => (x, y),
        Anchor::TopRight => (x + w, y),
        Anchor::BottomLeft => (x, y + h),
        Anchor::BottomRight => (x + w, y + h),
        Anchor::Center => (x + w / 2.0, y + h / 2.0),
    }
}

/// Compute the window rectangle for a profile on a monitor.
///
/// Offsets are anchor-aware: on a right/bottom anchor they shift the
/// window's right/bottom edge, so a negative `offset_y` on a bottom anchor
/// moves the window up and away from the taskbar. The result is always
/// clamped fully inside the work area, whatever the offsets say.
pub fn compute_bounds(monitor: &MonitorDescriptor, profile: &DisplayProfile) -> Rect {
    let p = profile.effective();
    let wa = monitor.work_area;

    let (width, height) = match p.size_mode {
        SizeMode::Fixed => (p.width as f64, p.height as f64),
        SizeMode::ScreenRelative => (
            (wa.width as f64 * p.width_ratio)
                .min(p.max_width as f64)
                .max(p.min_width as f64),
            (wa.height as f64 * p.height_ratio)
                .min(p.max_height as f64)
                .max(p.min_height as f64),
        ),
    };
    let width = width.round();
    let height = height.round();

    let (base_x, base_y) = anchor_base(wa, p.anchor);
    let (offset_x, offset_y) = (p.offset_x as f64, p.offset_y as f64);

    let (x, y) = match p.anchor {
        Anchor::TopLeft => (base_x + offset_x, base_y + offset_y),
        Anchor::TopRight => (base_x + offset_x - width, base_y + offset_y),
        Anchor::BottomLeft => (base_x + offset_x, base_y + offset_y - height),
        Anchor::BottomRight => (base_x + offset_x - width, base_y + offset_y - height),
        Anchor::Center => (
            base_x + offset_x - width / 2.0,
            base_y + offset_y - height / 2.0,
        ),
    };

    let x = x
        .min(wa.x as f64 + wa.width as f64 - width)
        .max(wa.x as f64);
    let y = y
        .min(wa.y as f64 + wa.height as f64 - height)
        .max(wa.y as f64);

    let rect = Rect::new(
        x.round() as i32,
        y.round() as i32,
        width as i32,
        height as i32,
    );
    debug!(
        anchor = ?p.anchor,
        offset_x = p.offset_x,
        offset_y = p.offset_y,
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "window bounds computed"
    );
    rect
}

/// Recover the offset that would have produced `rect` under `anchor`: the
/// exact algebraic inverse of the offset step of [`compute_bounds`]. Used
/// after the user finishes a manual move or resize.
pub fn inverse_offset(monitor: &MonitorDescriptor, rect: Rect, anchor: Anchor) -> (i32, i32) {
    let (base_x, base_y) = anchor_base(monitor.work_area, anchor);
    let (x, y, w, h) = (
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );

    let (offset_x, offset_y) = match anchor {
        Anchor::TopLeft => (x - base_x, y - base_y),
        Anchor::TopRight => (x + w - base_x, y - base_y),
        Anchor::BottomLeft => (x - base_x, y + h - base_y),
        Anchor::BottomRight => (x + w - base_x, y + h - base_y),
        Anchor::Center => (x + w / 2.0 - base_x, y + h / 2.0 - base_y),
    };
    (offset_x.round() as i32, offset_y.round() as i32)
}

/// Window size as a fraction of the work area, for converting a fixed-size
/// placement into a screen-relative one when persisting a resize.
pub fn size_ratio(monitor: &MonitorDescriptor, rect: Rect) -> (f64, f64) {
    let wa = monitor.work_area;
    if wa.width <= 0 || wa.height <= 0 {
        return (DEFAULT_WIDTH_RATIO, DEFAULT_HEIGHT_RATIO);
    }
    (
        rect.width as f64 / wa.width as f64,
        rect.height as f64 / wa.height as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfilePatch;

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
    fn bottom_right_fixture() {
        let rect = compute_bounds(&monitor(), &DisplayProfile::preset());
        assert_eq!(rect, Rect::new(1550, 390, 350, 600));
    }

    #[test]
    fn top_left_fixture() {
        let mut profile = DisplayProfile::preset();
        profile.merge(&ProfilePatch {
            anchor: Some(Anchor::TopLeft),
            offset_x: Some(10),
            offset_y: Some(10),
            ..ProfilePatch::default()
        });
        let rect = compute_bounds(&monitor(), &profile);
        assert_eq!(rect, Rect::new(10, 10, 350, 600));
    }

    #[test]
    fn extreme_offsets_stay_on_screen() {
        let m = monitor();
        for anchor in [
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
            Anchor::Center,
        ] {
            let mut profile = DisplayProfile::preset();
            profile.merge(&ProfilePatch {
                anchor: Some(anchor),
                offset_x: Some(-9000),
                offset_y: Some(9000),
                ..ProfilePatch::default()
            });
            let rect = compute_bounds(&m, &profile);
            assert!(rect.x >= m.work_area.x, "{anchor:?} left edge off-screen");
            assert!(rect.y >= m.work_area.y, "{anchor:?} top edge off-screen");
            assert!(rect.right() <= m.work_area.right(), "{anchor:?} right edge off-screen");
            assert!(rect.bottom() <= m.work_area.bottom(), "{anchor:?} bottom edge off-screen");
        }
    }

    #[test]
    fn screen_relative_size_respects_clamps() {
        let mut profile = DisplayProfile::preset();
        profile.merge(&ProfilePatch {
            size_mode: Some(SizeMode::ScreenRelative),
            width_ratio: Some(0.5),   // 960 px, above max_width 600
            height_ratio: Some(0.1),  // 104 px, below min_height 300
            ..ProfilePatch::default()
        });
        let rect = compute_bounds(&monitor(), &profile);
        assert_eq!(rect.width, 600);
        assert_eq!(rect.height, 300);
    }

    #[test]
    fn offset_round_trips_through_compute_for_every_anchor() {
        let m = monitor();
        let target = Rect::new(420, 133, 350, 600);
        for anchor in [
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
            Anchor::Center,
        ] {
            let (ox, oy) = inverse_offset(&m, target, anchor);
            let mut profile = DisplayProfile::preset();
            profile.merge(&ProfilePatch {
                anchor: Some(anchor),
                offset_x: Some(ox),
                offset_y: Some(oy),
                ..ProfilePatch::default()
            });
            assert_eq!(compute_bounds(&m, &profile), target, "{anchor:?}");
        }
    }

    #[test]
    fn size_ratio_is_rect_over_work_area() {
        let (wr, hr) = size_ratio(&monitor(), Rect::new(0, 0, 384, 520));
        assert!((wr - 0.2).abs() < 1e-9);
        assert!((hr - 0.5).abs() < 1e-9);
    }
}

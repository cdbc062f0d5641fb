use crate::geometry::WheelGeometry;
use tonewheel_theory::circle::Ring;

/// Pointer travel beyond which a gesture counts as a drag rather than a tap.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

struct Drag {
    last_angle_rads: f32,
    start_x_px: f32,
    start_y_px: f32,
    is_drag: bool,
}

/// Press/drag/tap bookkeeping for the wheel, kept apart from the event pump
/// the way `TileStrip` sits under `ChordPad`. A press starts a gesture,
/// motion spins the wheel by the pointer's angular travel around the centre,
/// and release reports the wedge under the pointer unless the pointer
/// wandered more than `DRAG_THRESHOLD_PX` from where it went down.
#[derive(Default)]
pub struct Gesture {
    rotation_rads: f32,
    drag: Option<Drag>,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outer ring's accumulated rotation.
    pub fn rotation_rads(&self) -> f32 {
        self.rotation_rads
    }

    pub fn press(&mut self, geometry: WheelGeometry, x_px: f32, y_px: f32) {
        self.drag = Some(Drag {
            last_angle_rads: pointer_angle(geometry, x_px, y_px),
            start_x_px: x_px,
            start_y_px: y_px,
            is_drag: false,
        });
    }

    /// Spins the wheel by the pointer's angular travel while pressed.
    /// Rotation follows every motion event; only the tap is suppressed once
    /// the travel from the press point passes the threshold.
    pub fn motion(&mut self, geometry: WheelGeometry, x_px: f32, y_px: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let angle_rads = pointer_angle(geometry, x_px, y_px);
        self.rotation_rads += angle_rads - drag.last_angle_rads;
        drag.last_angle_rads = angle_rads;
        let dx_px = x_px - drag.start_x_px;
        let dy_px = y_px - drag.start_y_px;
        if dx_px.hypot(dy_px) > DRAG_THRESHOLD_PX {
            drag.is_drag = true;
        }
    }

    /// Ends the gesture. Returns the ring and sector under the pointer if
    /// the gesture stayed a tap, `None` after a drag or off the rings.
    pub fn release(
        &mut self,
        geometry: WheelGeometry,
        x_px: f32,
        y_px: f32,
    ) -> Option<(Ring, usize)> {
        let drag = self.drag.take()?;
        if drag.is_drag {
            return None;
        }
        geometry.hit_test(x_px, y_px, self.rotation_rads)
    }
}

fn pointer_angle(geometry: WheelGeometry, x_px: f32, y_px: f32) -> f32 {
    (y_px - geometry.center_y_px).atan2(x_px - geometry.center_x_px)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn geometry() -> WheelGeometry {
        WheelGeometry::new(480, 480)
    }

    /// X coordinate of the middle of the outer ring, straight right of
    /// centre, where sector 0 sits before any rotation.
    fn outer_ring_x_px(geometry: WheelGeometry) -> f32 {
        geometry.center_x_px + geometry.label_radius_px(Ring::Major)
    }

    #[test]
    fn release_without_motion_is_a_tap() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        let x_px = outer_ring_x_px(geometry);
        gesture.press(geometry, x_px, 240.0);
        assert_eq!(
            gesture.release(geometry, x_px, 240.0),
            Some((Ring::Major, 0))
        );
        assert_eq!(gesture.rotation_rads(), 0.0);
    }

    #[test]
    fn small_wiggles_still_tap() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        let x_px = outer_ring_x_px(geometry);
        gesture.press(geometry, x_px, 240.0);
        gesture.motion(geometry, x_px + 2.0, 242.0);
        gesture.motion(geometry, x_px, 240.0);
        assert_eq!(
            gesture.release(geometry, x_px, 240.0),
            Some((Ring::Major, 0))
        );
    }

    #[test]
    fn drags_past_the_threshold_do_not_tap() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        let x_px = outer_ring_x_px(geometry);
        gesture.press(geometry, x_px, 240.0);
        gesture.motion(geometry, x_px, 245.0);
        assert!(gesture.rotation_rads() > 0.0);
        assert_eq!(gesture.release(geometry, x_px, 245.0), None);
    }

    #[test]
    fn dragging_accumulates_rotation() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        // a quarter turn: grab the right edge, drag to the bottom
        let radius_px = geometry.label_radius_px(Ring::Major);
        gesture.press(geometry, 240.0 + radius_px, 240.0);
        gesture.motion(geometry, 240.0, 240.0 + radius_px);
        assert!((gesture.rotation_rads() - FRAC_PI_2).abs() < 1e-4);
        assert_eq!(gesture.release(geometry, 240.0, 240.0 + radius_px), None);
    }

    #[test]
    fn a_new_press_taps_again_after_a_drag() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        let x_px = outer_ring_x_px(geometry);
        gesture.press(geometry, x_px, 240.0);
        gesture.motion(geometry, x_px + 20.0, 240.0);
        assert_eq!(gesture.release(geometry, x_px + 20.0, 240.0), None);
        // the drag flag must not leak into the next gesture
        gesture.press(geometry, x_px, 240.0);
        assert_eq!(
            gesture.release(geometry, x_px, 240.0),
            Some((Ring::Major, 0))
        );
    }

    #[test]
    fn motion_without_a_press_does_nothing() {
        let geometry = geometry();
        let mut gesture = Gesture::new();
        gesture.motion(geometry, 300.0, 300.0);
        assert_eq!(gesture.rotation_rads(), 0.0);
        assert_eq!(gesture.release(geometry, 300.0, 300.0), None);
    }
}

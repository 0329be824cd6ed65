//! Spatial audio support
//!
//! Holds the listener pose and converts between game-world coordinates and
//! the meter-based coordinates the playback backend works in. The backend
//! renders positional audio through a two-ear model, so the listener pose is
//! expressed as a pair of ear positions derived from the forward/up frame.

use crate::foundation::math::Vec3;

/// Distance between the virtual ears, in meters
const HEAD_WIDTH: f32 = 0.18;

/// Listener position and orientation in world space
///
/// `forward` and `up` must be mutually perpendicular; that is the caller's
/// contract and is not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerPose {
    /// Listener position in world units
    pub position: Vec3,
    /// Direction the listener is facing
    pub forward: Vec3,
    /// Up vector, perpendicular to `forward`
    pub up: Vec3,
}

impl Default for ListenerPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -1.0),
            forward: Vec3::new(0.0, 0.0, 1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl ListenerPose {
    /// Create a pose from position, forward, and up vectors
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        Self {
            position,
            forward,
            up,
        }
    }

    /// Compute the left and right ear positions in meters
    ///
    /// The ears sit on the axis `forward x up`, half a head-width either side
    /// of the listener position. `units_per_meter` is the world distance
    /// scale used to convert the pose into backend coordinates.
    pub fn ear_positions(&self, units_per_meter: f32) -> ([f32; 3], [f32; 3]) {
        let right_axis = self.forward.cross(&self.up);
        let right_axis = if right_axis.norm() > f32::EPSILON {
            right_axis.normalize()
        } else {
            // Degenerate forward/up pair; fall back to the world x axis
            Vec3::x()
        };

        let center = scale_to_meters(self.position, units_per_meter);
        let offset = right_axis * (HEAD_WIDTH / 2.0);

        let left = center - offset;
        let right = center + offset;
        ([left.x, left.y, left.z], [right.x, right.y, right.z])
    }
}

/// Convert a world-space position into backend (meter) coordinates
pub fn scale_to_meters(position: Vec3, units_per_meter: f32) -> Vec3 {
    if units_per_meter > f32::EPSILON {
        position / units_per_meter
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_pose_faces_positive_z() {
        let pose = ListenerPose::default();
        assert_eq!(pose.forward, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(pose.up, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_ears_straddle_the_listener() {
        let pose = ListenerPose::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        let (left, right) = pose.ear_positions(1.0);

        // forward x up = -x, so the left ear lands on +x and the right on -x
        assert_relative_eq!(left[0], HEAD_WIDTH / 2.0);
        assert_relative_eq!(right[0], -HEAD_WIDTH / 2.0);
        assert_relative_eq!(left[1], 0.0);
        assert_relative_eq!(left[2], 0.0);
    }

    #[test]
    fn test_ears_follow_orientation() {
        // Facing +x with y up puts the ear axis on z
        let pose = ListenerPose::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let (left, right) = pose.ear_positions(1.0);

        assert_relative_eq!(left[0], 0.0);
        assert_relative_eq!(right[0], 0.0);
        assert_relative_eq!(left[2], -right[2]);
        assert!(left[2].abs() > 0.0);
    }

    #[test]
    fn test_degenerate_frame_falls_back() {
        let pose = ListenerPose::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let (left, right) = pose.ear_positions(1.0);
        assert_relative_eq!(left[0], -HEAD_WIDTH / 2.0);
        assert_relative_eq!(right[0], HEAD_WIDTH / 2.0);
    }

    #[test]
    fn test_distance_scaling() {
        // With 100 units per meter, a position 200 units out is 2 meters away
        let scaled = scale_to_meters(Vec3::new(200.0, 0.0, 0.0), 100.0);
        assert_relative_eq!(scaled.x, 2.0);

        // A zero scale factor is ignored rather than dividing by zero
        let unscaled = scale_to_meters(Vec3::new(5.0, 0.0, 0.0), 0.0);
        assert_relative_eq!(unscaled.x, 5.0);
    }
}

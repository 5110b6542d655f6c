/// Lowest / highest elevation the camera may reach, in degrees.
pub const ELEVATION_LIMIT: f32 = 85.0;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 2.0;

/// Virtual camera position around the subject.
///
/// `azimuth` is in `[0, 360)` degrees with 0° at the front, `elevation` is in
/// `[-85, 85]` degrees above the horizontal plane and `distance` scales the
/// orbit radius within `[0.5, 2.0]`. The host application owns the value; the
/// widget only ever hands back complete replacements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
}

impl CameraParams {
    pub fn new(azimuth: f32, elevation: f32, distance: f32) -> Self {
        Self {
            azimuth,
            elevation,
            distance,
        }
    }

    /// Same parameters pulled back into their valid ranges.
    pub fn normalized(self) -> Self {
        Self {
            azimuth: wrap_degrees(self.azimuth.rem_euclid(360.0)),
            elevation: clamp_elevation(self.elevation),
            distance: clamp_distance(self.distance),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Single-step wrap into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    if degrees >= 360.0 {
        degrees - 360.0
    } else if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

pub fn clamp_elevation(degrees: f32) -> f32 {
    degrees.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT)
}

/// Clamp to the distance range and snap to two decimals.
pub fn clamp_distance(distance: f32) -> f32 {
    let clamped = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    (clamped * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_face_the_front() {
        let params = CameraParams::default();
        assert_eq!(params, CameraParams::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn wrap_handles_both_boundaries() {
        assert_eq!(wrap_degrees(361.0), 1.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-2.0), 358.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }

    #[test]
    fn normalized_pulls_values_into_range() {
        let params = CameraParams::new(725.0, -120.0, 3.7).normalized();
        assert_eq!(params.azimuth, 5.0);
        assert_eq!(params.elevation, -85.0);
        assert_eq!(params.distance, 2.0);
    }

    #[test]
    fn distance_snaps_to_hundredths() {
        assert!((clamp_distance(1.23456) - 1.23).abs() < 1e-6);
        assert_eq!(clamp_distance(0.1), 0.5);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut params = CameraParams::new(90.0, 30.0, 1.5);
        params.reset();
        assert_eq!(params, CameraParams::default());
    }
}

use super::state::{CameraParams, ELEVATION_LIMIT};
use nalgebra_glm as glm;

pub const BASE_RADIUS: f32 = 60.0;
pub const DISTANCE_GAIN: f32 = 40.0;
pub const SUBJECT_HALF_HEIGHT: f32 = 40.0;
pub const SUBJECT_WIDTH: f32 = 56.0;
pub const GRID_EXTENT: f32 = 120.0;
pub const GRID_STEP: f32 = 30.0;
pub const RING_SEGMENTS: usize = 64;
pub const ARC_SEGMENTS: usize = 32;

/// 3D geometry of one frame, all derived from the current [`CameraParams`].
#[derive(Debug, Clone)]
pub struct Scene {
    pub ring_radius: f32,
    pub camera: glm::Vec3,
    pub azimuth_handle: glm::Vec3,
    pub elevation_handle: glm::Vec3,
    pub subject: glm::Vec3,
    /// Point on the floor straight below the subject.
    pub subject_floor: glm::Vec3,
    /// Closed loop, `RING_SEGMENTS` vertices.
    pub orbit_ring: Vec<glm::Vec3>,
    /// Open meridian, `ARC_SEGMENTS + 1` vertices from -85° to +85°.
    pub elevation_arc: Vec<glm::Vec3>,
    pub floor_grid: Vec<[glm::Vec3; 2]>,
    pub look_at: [glm::Vec3; 2],
}

pub fn ring_radius(distance: f32) -> f32 {
    BASE_RADIUS + distance * DISTANCE_GAIN
}

/// Point on the orbit sphere. Azimuth 0° looks at the subject from +Z (its
/// front) and grows clockwise seen from above, so 90° sits at -X, the
/// subject's right. Elevation raises the point above the horizontal plane.
pub fn orbit_point(azimuth_deg: f32, elevation_deg: f32, radius: f32) -> glm::Vec3 {
    let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
    let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
    glm::vec3(
        -radius * cos_el * sin_az,
        radius * sin_el,
        radius * cos_el * cos_az,
    )
}

impl Scene {
    pub fn derive(params: &CameraParams) -> Self {
        let radius = ring_radius(params.distance);
        let camera = orbit_point(params.azimuth, params.elevation, radius);
        let azimuth_handle = orbit_point(params.azimuth, 0.0, radius);
        let subject = glm::vec3(0.0, 0.0, 0.0);

        let orbit_ring = (0..RING_SEGMENTS)
            .map(|i| orbit_point(i as f32 * 360.0 / RING_SEGMENTS as f32, 0.0, radius))
            .collect();

        let elevation_arc = (0..=ARC_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ARC_SEGMENTS as f32;
                let elevation = -ELEVATION_LIMIT + t * 2.0 * ELEVATION_LIMIT;
                orbit_point(params.azimuth, elevation, radius)
            })
            .collect();

        Self {
            ring_radius: radius,
            camera,
            azimuth_handle,
            elevation_handle: camera,
            subject,
            subject_floor: glm::vec3(0.0, -SUBJECT_HALF_HEIGHT, 0.0),
            orbit_ring,
            elevation_arc,
            floor_grid: floor_grid(),
            look_at: [subject, camera],
        }
    }
}

/// Lattice of segments on the floor plane, independent of the camera.
pub fn floor_grid() -> Vec<[glm::Vec3; 2]> {
    let y = -SUBJECT_HALF_HEIGHT;
    let lines = (2.0 * GRID_EXTENT / GRID_STEP).round() as usize;
    let mut segments = Vec::with_capacity((lines + 1) * 2);
    for i in 0..=lines {
        let offset = -GRID_EXTENT + i as f32 * GRID_STEP;
        segments.push([
            glm::vec3(offset, y, -GRID_EXTENT),
            glm::vec3(offset, y, GRID_EXTENT),
        ]);
        segments.push([
            glm::vec3(-GRID_EXTENT, y, offset),
            glm::vec3(GRID_EXTENT, y, offset),
        ]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn ring_radius_follows_distance() {
        assert!(approx_eq(ring_radius(0.5), 80.0));
        assert!(approx_eq(ring_radius(1.0), 100.0));
        assert!(approx_eq(ring_radius(2.0), 140.0));
    }

    #[test]
    fn camera_sits_in_front_at_default() {
        let scene = Scene::derive(&CameraParams::default());
        assert!(approx_eq(scene.camera.x, 0.0));
        assert!(approx_eq(scene.camera.y, 0.0));
        assert!(approx_eq(scene.camera.z, 100.0));
    }

    #[test]
    fn quarter_turn_moves_camera_to_the_subjects_right() {
        let scene = Scene::derive(&CameraParams::new(90.0, 0.0, 1.0));
        assert!(approx_eq(scene.camera.x, -100.0));
        assert!(approx_eq(scene.camera.z, 0.0));

        let opposite = Scene::derive(&CameraParams::new(270.0, 0.0, 1.0));
        assert!(approx_eq(opposite.camera.x, 100.0));
    }

    #[test]
    fn azimuth_turns_clockwise_seen_from_above() {
        let front = orbit_point(0.0, 0.0, 100.0);
        for azimuth in [30.0, 90.0, 150.0] {
            let turned = orbit_point(azimuth, 0.0, 100.0);
            // Counter-clockwise about +Y would give a positive y component.
            assert!(glm::cross(&front, &turned).y < 0.0, "azimuth {azimuth}");
        }
    }

    #[test]
    fn azimuth_handle_stays_on_the_horizontal_ring() {
        let scene = Scene::derive(&CameraParams::new(135.0, 60.0, 1.5));
        assert!(approx_eq(scene.azimuth_handle.y, 0.0));
        assert!(approx_eq(glm::length(&scene.azimuth_handle), scene.ring_radius));
        assert!(scene.camera.y > 0.0);
        assert_eq!(scene.elevation_handle, scene.camera);
    }

    #[test]
    fn camera_stays_on_the_orbit_sphere() {
        let scene = Scene::derive(&CameraParams::new(212.0, -47.0, 0.75));
        assert!(approx_eq(glm::length(&scene.camera), scene.ring_radius));
    }

    #[test]
    fn sample_counts() {
        let scene = Scene::derive(&CameraParams::default());
        assert_eq!(scene.orbit_ring.len(), RING_SEGMENTS);
        assert_eq!(scene.elevation_arc.len(), ARC_SEGMENTS + 1);
        assert_eq!(scene.orbit_ring.len() + scene.elevation_arc.len() - 1, 96);
    }

    #[test]
    fn elevation_arc_spans_the_limits_through_current_azimuth() {
        let scene = Scene::derive(&CameraParams::new(90.0, 10.0, 1.0));
        let first = scene.elevation_arc.first().unwrap();
        let last = scene.elevation_arc.last().unwrap();
        let expected_y = scene.ring_radius * 85.0_f32.to_radians().sin();
        assert!(approx_eq(first.y, -expected_y));
        assert!(approx_eq(last.y, expected_y));
        for point in &scene.elevation_arc {
            assert!(approx_eq(point.z, 0.0));
            assert!(point.x <= 0.0);
        }
    }

    #[test]
    fn floor_grid_lies_on_the_floor_plane() {
        let grid = floor_grid();
        assert_eq!(grid.len(), 18);
        for [a, b] in &grid {
            assert!(approx_eq(a.y, -SUBJECT_HALF_HEIGHT));
            assert!(approx_eq(b.y, -SUBJECT_HALF_HEIGHT));
        }
    }

    #[test]
    fn look_at_runs_from_subject_to_camera() {
        let scene = Scene::derive(&CameraParams::new(30.0, 20.0, 1.2));
        assert_eq!(scene.look_at[0], scene.subject);
        assert_eq!(scene.look_at[1], scene.camera);
    }
}

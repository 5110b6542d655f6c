use super::controller::DragTarget;
use super::projection::{Projected, ViewConfig};
use super::scene::{SUBJECT_HALF_HEIGHT, SUBJECT_WIDTH, Scene};
use super::state::CameraParams;
use egui::{Color32, Pos2, Rect, Stroke, Vec2, pos2, vec2};

pub const ACTIVE_OPACITY: f32 = 1.0;
pub const RESTING_OPACITY: f32 = 0.55;
pub const DIMMED_OPACITY: f32 = 0.2;
pub const ACTIVE_STROKE: f32 = 3.0;
pub const RESTING_STROKE: f32 = 2.0;
/// Opacity factor for segments behind the subject.
pub const BACK_FADE: f32 = 0.45;

pub const HANDLE_RADIUS: f32 = 7.0;
pub const HANDLE_HIT_RADIUS: f32 = 16.0;

pub const AZIMUTH_COLOR: Color32 = Color32::from_rgb(45, 212, 191);
pub const ELEVATION_COLOR: Color32 = Color32::from_rgb(244, 114, 182);
pub const CAMERA_COLOR: Color32 = Color32::from_rgb(250, 204, 21);
pub const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(90, 90, 100, 90);
pub const GUIDE_COLOR: Color32 = Color32::from_rgba_premultiplied(200, 200, 200, 140);
pub const SHADOW_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub opacity: f32,
    pub stroke_width: f32,
}

impl Emphasis {
    const ACTIVE: Self = Self {
        opacity: ACTIVE_OPACITY,
        stroke_width: ACTIVE_STROKE,
    };
    const RESTING: Self = Self {
        opacity: RESTING_OPACITY,
        stroke_width: RESTING_STROKE,
    };
    const DIMMED: Self = Self {
        opacity: DIMMED_OPACITY,
        stroke_width: RESTING_STROKE,
    };

    pub fn is_active(&self) -> bool {
        self.opacity >= ACTIVE_OPACITY
    }
}

pub fn ring_emphasis(drag: DragTarget) -> Emphasis {
    match drag {
        DragTarget::Azimuth | DragTarget::Orbit => Emphasis::ACTIVE,
        DragTarget::Elevation => Emphasis::DIMMED,
        DragTarget::None | DragTarget::Zoom => Emphasis::RESTING,
    }
}

pub fn arc_emphasis(drag: DragTarget) -> Emphasis {
    match drag {
        DragTarget::Elevation | DragTarget::Orbit => Emphasis::ACTIVE,
        DragTarget::Azimuth => Emphasis::DIMMED,
        DragTarget::None | DragTarget::Zoom => Emphasis::RESTING,
    }
}

/// Projected polyline with per-vertex depth.
#[derive(Debug, Clone)]
pub struct Path {
    pub points: Vec<Projected>,
    pub closed: bool,
    pub color: Color32,
    pub emphasis: Emphasis,
}

impl Path {
    fn project(points: &[nalgebra_glm::Vec3], closed: bool, color: Color32, emphasis: Emphasis, view: &ViewConfig) -> Self {
        Self {
            points: points.iter().map(|p| view.project_point(p)).collect(),
            closed,
            color,
            emphasis,
        }
    }

    /// Consecutive vertex pairs, including the closing one for loops.
    pub fn segments(&self) -> impl Iterator<Item = (&Projected, &Projected)> {
        let count = self.points.len();
        let pairs = if self.closed { count } else { count.saturating_sub(1) };
        (0..pairs).map(move |i| (&self.points[i], &self.points[(i + 1) % count]))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub center: Pos2,
    pub radius: f32,
    pub hit_radius: f32,
    pub color: Color32,
    pub active: bool,
}

impl Handle {
    pub fn hit(&self, pos: Pos2) -> Option<f32> {
        let distance = self.center.distance(pos);
        (distance <= self.hit_radius).then_some(distance)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubjectMarker {
    pub rect: Rect,
    pub scale: f32,
    pub shadow_center: Pos2,
    pub shadow_radii: Vec2,
}

/// Camera body glyph, rotated so its lens faces the subject.
#[derive(Debug, Clone, Copy)]
pub struct CameraGlyph {
    pub center: Pos2,
    /// Screen-space angle of the camera-to-subject vector, radians.
    pub angle: f32,
    pub scale: f32,
}

impl CameraGlyph {
    fn rotate(&self, local: Vec2) -> Pos2 {
        let (sin, cos) = self.angle.sin_cos();
        let local = local * self.scale;
        self.center + vec2(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    }

    pub fn body(&self) -> Vec<Pos2> {
        [vec2(-9.0, -6.0), vec2(5.0, -6.0), vec2(5.0, 6.0), vec2(-9.0, 6.0)]
            .into_iter()
            .map(|v| self.rotate(v))
            .collect()
    }

    /// Lens triangle, tip pointing at the subject.
    pub fn lens(&self) -> Vec<Pos2> {
        [vec2(5.0, -4.0), vec2(11.0, 0.0), vec2(5.0, 4.0)]
            .into_iter()
            .map(|v| self.rotate(v))
            .collect()
    }
}

/// Drawable primitive in widget-local coordinates.
#[derive(Debug, Clone)]
pub enum Primitive {
    Segment {
        points: [Pos2; 2],
        stroke: Stroke,
        dashed: bool,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Pos2>,
        fill: Color32,
        stroke: Stroke,
    },
    /// Reference photo card, or a placeholder when there is none.
    Subject { rect: Rect },
}

/// Everything needed to draw and hit-test one frame of the widget.
#[derive(Debug, Clone)]
pub struct Frame {
    pub params: CameraParams,
    pub drag: DragTarget,
    pub grid: Vec<[Pos2; 2]>,
    pub orbit_ring: Path,
    pub elevation_arc: Path,
    pub subject: SubjectMarker,
    pub look_at: [Pos2; 2],
    pub azimuth_handle: Handle,
    pub elevation_handle: Handle,
    pub camera: CameraGlyph,
}

pub fn derive_frame(params: &CameraParams, view: &ViewConfig, drag: DragTarget) -> Frame {
    let scene = Scene::derive(params);

    let grid = scene
        .floor_grid
        .iter()
        .map(|[a, b]| [view.project_point(a).screen, view.project_point(b).screen])
        .collect();

    let orbit_ring = Path::project(&scene.orbit_ring, true, AZIMUTH_COLOR, ring_emphasis(drag), view);
    let elevation_arc = Path::project(
        &scene.elevation_arc,
        false,
        ELEVATION_COLOR,
        arc_emphasis(drag),
        view,
    );

    let subject = view.project_point(&scene.subject);
    let floor = view.project_point(&scene.subject_floor);
    let size = vec2(SUBJECT_WIDTH, SUBJECT_HALF_HEIGHT * 2.0) * subject.scale;
    let subject = SubjectMarker {
        rect: Rect::from_center_size(subject.screen, size),
        scale: subject.scale,
        shadow_center: floor.screen,
        shadow_radii: vec2(SUBJECT_WIDTH * 0.6, SUBJECT_WIDTH * 0.18) * floor.scale,
    };

    let camera = view.project_point(&scene.camera);
    let azimuth = view.project_point(&scene.azimuth_handle);
    let elevation = view.project_point(&scene.elevation_handle);

    let to_subject = subject.rect.center() - camera.screen;
    let glyph = CameraGlyph {
        center: camera.screen,
        angle: to_subject.y.atan2(to_subject.x),
        scale: camera.scale,
    };

    Frame {
        params: *params,
        drag,
        grid,
        look_at: [subject.rect.center(), camera.screen],
        azimuth_handle: Handle {
            center: azimuth.screen,
            radius: HANDLE_RADIUS * azimuth.scale,
            hit_radius: HANDLE_HIT_RADIUS,
            color: AZIMUTH_COLOR,
            active: orbit_ring.emphasis.is_active(),
        },
        elevation_handle: Handle {
            center: elevation.screen,
            radius: HANDLE_RADIUS * elevation.scale,
            hit_radius: HANDLE_HIT_RADIUS,
            color: ELEVATION_COLOR,
            active: elevation_arc.emphasis.is_active(),
        },
        orbit_ring,
        elevation_arc,
        subject,
        camera: glyph,
    }
}

impl Frame {
    /// Control under `pos`: the nearest handle, azimuth on ties. Anything
    /// that is not a handle falls through to the orbit surface.
    pub fn hit_test(&self, pos: Pos2) -> DragTarget {
        match (self.azimuth_handle.hit(pos), self.elevation_handle.hit(pos)) {
            (Some(az), Some(el)) if el < az => DragTarget::Elevation,
            (Some(_), _) => DragTarget::Azimuth,
            (None, Some(_)) => DragTarget::Elevation,
            (None, None) => DragTarget::Orbit,
        }
    }

    /// Back-to-front draw list: grid, rings, subject, guide, handles, camera.
    pub fn primitives(&self, show_grid: bool) -> Vec<Primitive> {
        let mut out = Vec::new();

        if show_grid {
            out.extend(self.grid.iter().map(|points| Primitive::Segment {
                points: *points,
                stroke: Stroke::new(1.0, GRID_COLOR),
                dashed: false,
            }));
        }

        for path in [&self.orbit_ring, &self.elevation_arc] {
            out.extend(path.segments().map(|(a, b)| {
                let mut opacity = path.emphasis.opacity;
                if (a.depth + b.depth) * 0.5 < 0.0 {
                    opacity *= BACK_FADE;
                }
                Primitive::Segment {
                    points: [a.screen, b.screen],
                    stroke: Stroke::new(path.emphasis.stroke_width, path.color.gamma_multiply(opacity)),
                    dashed: false,
                }
            }));
        }

        out.push(Primitive::Polygon {
            points: ellipse(self.subject.shadow_center, self.subject.shadow_radii, 24),
            fill: SHADOW_COLOR,
            stroke: Stroke::NONE,
        });
        out.push(Primitive::Subject {
            rect: self.subject.rect,
        });

        out.push(Primitive::Segment {
            points: self.look_at,
            stroke: Stroke::new(1.0, GUIDE_COLOR),
            dashed: true,
        });

        for handle in [&self.azimuth_handle, &self.elevation_handle] {
            let radius = if handle.active {
                handle.radius * 1.3
            } else {
                handle.radius
            };
            out.push(Primitive::Circle {
                center: handle.center,
                radius,
                fill: handle.color,
                stroke: Stroke::new(1.5, Color32::WHITE),
            });
        }

        out.push(Primitive::Polygon {
            points: self.camera.body(),
            fill: Color32::from_gray(40),
            stroke: Stroke::new(1.5, CAMERA_COLOR),
        });
        out.push(Primitive::Polygon {
            points: self.camera.lens(),
            fill: CAMERA_COLOR,
            stroke: Stroke::NONE,
        });

        out
    }
}

fn ellipse(center: Pos2, radii: Vec2, samples: usize) -> Vec<Pos2> {
    (0..samples)
        .map(|i| {
            let t = i as f32 / samples as f32 * std::f32::consts::TAU;
            pos2(center.x + radii.x * t.cos(), center.y + radii.y * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(params: CameraParams, drag: DragTarget) -> Frame {
        derive_frame(&params, &ViewConfig::default(), drag)
    }

    #[test]
    fn dragging_azimuth_highlights_ring_and_dims_arc() {
        let f = frame(CameraParams::default(), DragTarget::Azimuth);
        assert_eq!(f.orbit_ring.emphasis.opacity, ACTIVE_OPACITY);
        assert_eq!(f.elevation_arc.emphasis.opacity, DIMMED_OPACITY);
        assert!(f.azimuth_handle.active);
        assert!(!f.elevation_handle.active);
    }

    #[test]
    fn dragging_elevation_highlights_arc_and_dims_ring() {
        let f = frame(CameraParams::default(), DragTarget::Elevation);
        assert_eq!(f.elevation_arc.emphasis.opacity, ACTIVE_OPACITY);
        assert_eq!(f.orbit_ring.emphasis.opacity, DIMMED_OPACITY);
    }

    #[test]
    fn orbit_highlights_both() {
        let f = frame(CameraParams::default(), DragTarget::Orbit);
        assert_eq!(f.orbit_ring.emphasis, ring_emphasis(DragTarget::Orbit));
        assert_eq!(f.orbit_ring.emphasis.opacity, ACTIVE_OPACITY);
        assert_eq!(f.elevation_arc.emphasis.opacity, ACTIVE_OPACITY);
        assert_eq!(f.orbit_ring.emphasis.stroke_width, ACTIVE_STROKE);
    }

    #[test]
    fn idle_and_zoom_rest() {
        for drag in [DragTarget::None, DragTarget::Zoom] {
            assert_eq!(ring_emphasis(drag).opacity, RESTING_OPACITY);
            assert_eq!(arc_emphasis(drag).opacity, RESTING_OPACITY);
        }
    }

    #[test]
    fn subject_sits_at_viewport_center() {
        let view = ViewConfig::default();
        let f = frame(CameraParams::new(123.0, 40.0, 1.7), DragTarget::None);
        assert_eq!(f.subject.rect.center(), view.center);
        assert!((f.subject.scale - 1.0).abs() < 1e-5);
        // Floor is below the subject on screen.
        assert!(f.subject.shadow_center.y > view.center.y);
    }

    #[test]
    fn handles_coincide_at_zero_elevation() {
        let f = frame(CameraParams::new(45.0, 0.0, 1.0), DragTarget::None);
        assert!(f.azimuth_handle.center.distance(f.elevation_handle.center) < 1e-3);

        let raised = frame(CameraParams::new(45.0, 50.0, 1.0), DragTarget::None);
        assert!(raised.elevation_handle.center.y < raised.azimuth_handle.center.y);
    }

    #[test]
    fn hit_test_picks_nearest_handle() {
        let f = frame(CameraParams::new(60.0, 45.0, 1.0), DragTarget::None);
        assert_eq!(f.hit_test(f.camera.center), DragTarget::Elevation);
        assert_eq!(f.hit_test(f.elevation_handle.center), DragTarget::Elevation);
        assert_eq!(f.hit_test(f.azimuth_handle.center), DragTarget::Azimuth);
        assert_eq!(f.hit_test(pos2(2.0, 2.0)), DragTarget::Orbit);
    }

    #[test]
    fn azimuth_handle_is_grabbable_at_zero_elevation() {
        let f = frame(CameraParams::default(), DragTarget::None);
        // Camera, elevation handle and azimuth handle all coincide here.
        assert_eq!(f.hit_test(f.azimuth_handle.center), DragTarget::Azimuth);
        assert_eq!(f.hit_test(f.camera.center), DragTarget::Azimuth);
        assert_eq!(
            f.hit_test(f.azimuth_handle.center + vec2(4.0, 0.0)),
            DragTarget::Azimuth
        );
    }

    #[test]
    fn slightly_raised_camera_is_grabbed_by_elevation() {
        let f = frame(CameraParams::new(0.0, 6.0, 1.0), DragTarget::None);
        assert!(f.azimuth_handle.center.distance(f.elevation_handle.center) < HANDLE_HIT_RADIUS);
        assert_eq!(f.hit_test(f.elevation_handle.center), DragTarget::Elevation);
        assert_eq!(f.hit_test(f.azimuth_handle.center), DragTarget::Azimuth);
    }

    #[test]
    fn camera_lens_points_at_subject() {
        for params in [
            CameraParams::new(0.0, 0.0, 1.0),
            CameraParams::new(90.0, 30.0, 1.5),
            CameraParams::new(250.0, -40.0, 0.5),
        ] {
            let f = frame(params, DragTarget::None);
            let lens = f.camera.lens();
            let tip = lens[1];
            let subject = f.subject.rect.center();
            assert!(tip.distance(subject) < f.camera.center.distance(subject));
        }
    }

    #[test]
    fn ring_is_closed_and_arc_is_open() {
        let f = frame(CameraParams::default(), DragTarget::None);
        assert_eq!(f.orbit_ring.segments().count(), f.orbit_ring.points.len());
        assert_eq!(
            f.elevation_arc.segments().count(),
            f.elevation_arc.points.len() - 1
        );
    }

    #[test]
    fn primitives_draw_back_to_front() {
        let f = frame(CameraParams::default(), DragTarget::None);
        let prims = f.primitives(true);
        let subject_at = prims
            .iter()
            .position(|p| matches!(p, Primitive::Subject { .. }))
            .unwrap();
        let first_circle = prims
            .iter()
            .position(|p| matches!(p, Primitive::Circle { .. }))
            .unwrap();
        assert!(matches!(prims[0], Primitive::Segment { .. }));
        assert!(subject_at < first_circle);
        assert!(matches!(prims.last(), Some(Primitive::Polygon { .. })));

        let without_grid = f.primitives(false);
        assert_eq!(prims.len() - without_grid.len(), f.grid.len());
    }

    #[test]
    fn frame_is_a_pure_function_of_params() {
        let params = CameraParams::new(33.0, -12.0, 1.25);
        let a = frame(params, DragTarget::Orbit);
        let b = frame(params, DragTarget::Orbit);
        assert_eq!(a.camera.center, b.camera.center);
        assert_eq!(a.azimuth_handle.center, b.azimuth_handle.center);
        assert_eq!(a.params, params);
    }
}

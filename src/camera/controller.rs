use super::state::{CameraParams, clamp_distance, clamp_elevation, wrap_degrees};
use egui::Pos2;

pub const ROTATE_SENSITIVITY: f32 = 0.8;
pub const ZOOM_DRAG_SENSITIVITY: f32 = 0.005;
pub const ZOOM_WHEEL_SENSITIVITY: f32 = 0.001;

/// Control currently being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Azimuth,
    Elevation,
    Zoom,
    Orbit,
}

/// Transient interaction state of the camera widget.
///
/// The controller never stores camera parameters. Every accepted gesture
/// yields a full replacement [`CameraParams`] for the owner to publish.
#[derive(Debug, Clone, Default)]
pub struct OrbitController {
    drag: DragTarget,
    last_pointer_pos: Option<Pos2>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> DragTarget {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragTarget::None
    }

    /// Start dragging `target`. Ignored in read-only mode.
    pub fn on_pointer_down(&mut self, target: DragTarget, position: Pos2, editable: bool) {
        if !editable || target == DragTarget::None {
            return;
        }
        log::debug!("camera drag started: {:?}", target);
        self.drag = target;
        self.last_pointer_pos = Some(position);
    }

    /// Apply the active drag rule for the motion since the last event.
    /// A pointer that has not moved yields nothing.
    pub fn on_pointer_move(&mut self, position: Pos2, params: CameraParams) -> Option<CameraParams> {
        if !self.is_dragging() {
            return None;
        }
        let last = self.last_pointer_pos?;
        if last == position {
            return None;
        }
        self.last_pointer_pos = Some(position);
        let delta_x = position.x - last.x;
        let delta_y = position.y - last.y;

        let updated = match self.drag {
            DragTarget::None => return None,
            DragTarget::Azimuth => CameraParams {
                azimuth: rotate_azimuth(params.azimuth, delta_x),
                ..params
            },
            DragTarget::Elevation => CameraParams {
                elevation: tilt_elevation(params.elevation, delta_y),
                ..params
            },
            DragTarget::Orbit => CameraParams {
                azimuth: rotate_azimuth(params.azimuth, delta_x),
                elevation: tilt_elevation(params.elevation, delta_y),
                ..params
            },
            DragTarget::Zoom => CameraParams {
                distance: zoom(params.distance, delta_y * ZOOM_DRAG_SENSITIVITY),
                ..params
            },
        };
        Some(updated)
    }

    pub fn on_pointer_up(&mut self) {
        self.release();
    }

    /// Pointer left the widget; ends the drag so it cannot get stuck.
    pub fn on_pointer_leave(&mut self) {
        self.release();
    }

    /// Wheel zoom works in any drag state and does not change it.
    pub fn on_wheel(&self, wheel_delta_y: f32, params: CameraParams) -> CameraParams {
        CameraParams {
            distance: zoom(params.distance, wheel_delta_y * ZOOM_WHEEL_SENSITIVITY),
            ..params
        }
    }

    fn release(&mut self) {
        if self.is_dragging() {
            log::debug!("camera drag ended: {:?}", self.drag);
        }
        self.drag = DragTarget::None;
        self.last_pointer_pos = None;
    }
}

pub fn rotate_azimuth(azimuth: f32, delta_x: f32) -> f32 {
    let wrapped = wrap_degrees(azimuth + delta_x * ROTATE_SENSITIVITY);
    // 359.6 rounds up to 360
    wrap_degrees(wrapped.round())
}

pub fn tilt_elevation(elevation: f32, delta_y: f32) -> f32 {
    clamp_elevation(elevation - delta_y * ROTATE_SENSITIVITY).round()
}

pub fn zoom(distance: f32, delta: f32) -> f32 {
    clamp_distance(distance + delta)
}

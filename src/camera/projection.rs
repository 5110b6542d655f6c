use egui::{Pos2, pos2};
use nalgebra_glm as glm;

pub const VIEWPORT_SIZE: f32 = 320.0;

/// Fixed oblique view the widget is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Rotation about the vertical axis, radians.
    pub yaw: f32,
    /// Downward tilt about the horizontal axis, radians.
    pub pitch: f32,
    pub focal_distance: f32,
    pub screen_scale: f32,
    pub center: Pos2,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            yaw: 20.0_f32.to_radians(),
            pitch: 25.0_f32.to_radians(),
            focal_distance: 600.0,
            screen_scale: 1.0,
            center: pos2(VIEWPORT_SIZE * 0.5, VIEWPORT_SIZE * 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Pos2,
    /// Perspective factor, 1.0 on the plane through the origin.
    pub scale: f32,
    /// View-space depth, positive towards the viewer.
    pub depth: f32,
}

impl ViewConfig {
    pub fn project(&self, x: f32, y: f32, z: f32) -> Projected {
        self.project_point(&glm::vec3(x, y, z))
    }

    pub fn project_point(&self, point: &glm::Vec3) -> Projected {
        let yawed = glm::rotate_y_vec3(point, self.yaw);
        let view = glm::rotate_x_vec3(&yawed, self.pitch);

        let scale = self.focal_distance / (self.focal_distance - view.z);
        let k = scale * self.screen_scale;

        Projected {
            screen: pos2(self.center.x + view.x * k, self.center.y - view.y * k),
            scale,
            depth: view.z,
        }
    }
}

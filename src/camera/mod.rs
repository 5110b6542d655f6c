mod controller;
mod frame;
mod projection;
mod scene;
mod state;
mod widget;

pub use controller::OrbitController;
pub use state::{CameraParams, ELEVATION_LIMIT, MAX_DISTANCE, MIN_DISTANCE};
pub use widget::CameraControl;

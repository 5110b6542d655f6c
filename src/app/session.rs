use crate::camera::{CameraParams, OrbitController};
use crate::photo::PhotoSlot;

/// Everything the user is currently working on. Lives for the whole run
/// and is never written to disk.
pub struct Session {
    pub camera: CameraParams,
    pub controller: OrbitController,
    pub source: PhotoSlot,
    pub result: PhotoSlot,
    pub instructions: String,
    pub generating: bool,
    pub status: Option<String>,
    pub note: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            camera: CameraParams::default(),
            controller: OrbitController::new(),
            source: PhotoSlot::new("source"),
            result: PhotoSlot::new("result"),
            instructions: String::new(),
            generating: false,
            status: None,
            note: None,
        }
    }

    pub fn can_generate(&self) -> bool {
        self.source.is_loaded() && !self.generating
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_needs_a_source_and_no_request_in_flight() {
        let mut session = Session::new();
        assert!(!session.can_generate());
        session.source.status = crate::photo::slot::PhotoStatus::Loaded;
        assert!(session.can_generate());
        session.generating = true;
        assert!(!session.can_generate());
    }
}

use crate::app::app::App;
use crate::photo::{PhotoLoadResult, PhotoTarget, decode, load_photo};
use std::path::PathBuf;

impl App {
    pub(crate) fn start_photo_load(&mut self, target: PhotoTarget, path: PathBuf) {
        let slot = match target {
            PhotoTarget::Source => &mut self.session.source,
            PhotoTarget::Result => &mut self.session.result,
        };
        if slot.is_loading() {
            log::debug!("{} already loading, ignoring {}", slot.label, path.display());
            return;
        }
        slot.set_loading();

        let sender = self.photo_sender.clone();
        self.runtime.spawn(async move {
            log::info!("loading photo {}", path.display());
            let result = match load_photo(&path).await {
                Ok(photo) => PhotoLoadResult::Success { target, photo },
                Err(e) => PhotoLoadResult::Error {
                    target,
                    error: e.summary(),
                },
            };
            let _ = sender.send(result);
        });
    }

    /// Decode bytes that are already in memory (dropped files, generated images).
    pub(crate) fn start_photo_decode(&mut self, target: PhotoTarget, name: String, bytes: Vec<u8>) {
        match target {
            PhotoTarget::Source => self.session.source.set_loading(),
            PhotoTarget::Result => self.session.result.set_loading(),
        }

        let sender = self.photo_sender.clone();
        self.runtime.spawn_blocking(move || {
            let result = match decode(name, bytes) {
                Ok(photo) => PhotoLoadResult::Success { target, photo },
                Err(e) => PhotoLoadResult::Error {
                    target,
                    error: e.summary(),
                },
            };
            let _ = sender.send(result);
        });
    }
}

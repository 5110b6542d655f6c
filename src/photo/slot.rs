use super::loader::DecodedPhoto;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PhotoStatus {
    Empty,
    Loading,
    Loaded,
    Error(String),
}

/// One displayed photo: the source reference or the generated result.
pub struct PhotoSlot {
    pub label: &'static str,
    pub status: PhotoStatus,
    pub name: String,
    pub encoded: Option<Arc<Vec<u8>>>,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub texture: Option<egui::TextureHandle>,
}

impl PhotoSlot {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            status: PhotoStatus::Empty,
            name: String::new(),
            encoded: None,
            mime: "image/png",
            width: 0,
            height: 0,
            texture: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, PhotoStatus::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, PhotoStatus::Loaded)
    }

    pub fn has_error(&self) -> bool {
        matches!(self.status, PhotoStatus::Error(_))
    }

    pub fn set_loading(&mut self) {
        self.status = PhotoStatus::Loading;
    }

    pub fn set_error(&mut self, error: String) {
        self.status = PhotoStatus::Error(error);
    }

    /// Store a decoded photo and upload it as an egui texture.
    pub fn set_photo(&mut self, ctx: &egui::Context, photo: DecodedPhoto) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [photo.width as usize, photo.height as usize],
            &photo.rgba,
        );
        let texture = ctx.load_texture(
            format!("{}-photo", self.label),
            image,
            egui::TextureOptions::LINEAR,
        );
        self.store(photo);
        self.texture = Some(texture);
    }

    fn store(&mut self, photo: DecodedPhoto) {
        self.status = PhotoStatus::Loaded;
        self.name = photo.name;
        self.encoded = Some(photo.encoded);
        self.mime = photo.mime;
        self.width = photo.width;
        self.height = photo.height;
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.label);
    }

    pub fn texture_id(&self) -> Option<egui::TextureId> {
        self.texture.as_ref().map(|t| t.id())
    }

    /// Largest size with the photo's aspect ratio that fits in `max`.
    pub fn fit_size(&self, max: egui::Vec2) -> egui::Vec2 {
        if self.width == 0 || self.height == 0 {
            return egui::Vec2::ZERO;
        }
        let size = egui::vec2(self.width as f32, self.height as f32);
        let factor = (max.x / size.x).min(max.y / size.y).min(1.0);
        size * factor
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            PhotoStatus::Empty => "Empty".to_string(),
            PhotoStatus::Loading => "Loading...".to_string(),
            PhotoStatus::Loaded => format!("{} ({}x{})", self.name, self.width, self.height),
            PhotoStatus::Error(err) => format!("Error: {}", err),
        }
    }

    pub fn status_color(&self) -> egui::Color32 {
        match &self.status {
            PhotoStatus::Empty => egui::Color32::GRAY,
            PhotoStatus::Loading => egui::Color32::YELLOW,
            PhotoStatus::Loaded => egui::Color32::GREEN,
            PhotoStatus::Error(_) => egui::Color32::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(width: u32, height: u32) -> DecodedPhoto {
        DecodedPhoto {
            name: "cat.jpg".to_string(),
            encoded: Arc::new(vec![1, 2, 3]),
            mime: "image/jpeg",
            rgba: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[test]
    fn status_follows_lifecycle() {
        let mut slot = PhotoSlot::new("source");
        assert_eq!(slot.status_text(), "Empty");
        slot.set_loading();
        assert!(slot.is_loading());
        slot.store(photo(4, 2));
        assert!(slot.is_loaded());
        assert_eq!(slot.status_text(), "cat.jpg (4x2)");
        assert_eq!(slot.mime, "image/jpeg");
        slot.set_error("boom".to_string());
        assert!(slot.has_error());
        slot.clear();
        assert_eq!(slot.status, PhotoStatus::Empty);
        assert!(slot.encoded.is_none());
        assert_eq!(slot.label, "source");
    }

    #[test]
    fn fit_size_keeps_aspect_and_never_upscales() {
        let mut slot = PhotoSlot::new("result");
        assert_eq!(slot.fit_size(egui::vec2(100.0, 100.0)), egui::Vec2::ZERO);

        slot.store(photo(400, 200));
        assert_eq!(slot.fit_size(egui::vec2(100.0, 100.0)), egui::vec2(100.0, 50.0));
        assert_eq!(slot.fit_size(egui::vec2(1000.0, 1000.0)), egui::vec2(400.0, 200.0));
    }
}

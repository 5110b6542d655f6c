use crate::app::session::Session;
use crate::error::AppError;
use crate::generation::{
    GenerationClient, GenerationError, GenerationRequest, GenerationResult, build_prompt,
    start_generation,
};
use crate::photo::{PhotoLoadResult, PhotoTarget, extension_for};
use crate::renderer::Renderer;
use crate::settings::{API_KEY_ENV, Settings};
use crate::ui::{Ui, UiActions};
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    ui: Ui,
    renderer: Renderer,
    egui_state: State,
    settings: Settings,
    pub(crate) session: Session,
    pub(crate) runtime: tokio::runtime::Handle,
    pub(crate) photo_sender: Sender<PhotoLoadResult>,
    photo_receiver: Receiver<PhotoLoadResult>,
    generation_sender: Sender<GenerationResult>,
    generation_receiver: Receiver<GenerationResult>,
}

impl App {
    pub fn new(window: Arc<Window>, runtime: tokio::runtime::Handle) -> Result<Self, AppError> {
        let renderer = pollster::block_on(Renderer::new(&window))?;

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx.clone(),
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let settings = Settings::load();
        let (photo_sender, photo_receiver) = channel();
        let (generation_sender, generation_receiver) = channel();

        Ok(Self {
            window,
            ui: Ui::new(),
            renderer,
            egui_state,
            settings,
            session: Session::new(),
            runtime,
            photo_sender,
            photo_receiver,
            generation_sender,
            generation_receiver,
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if !egui_response.consumed
                    && event.logical_key
                        == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            _ => {}
        }

        EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        }
    }

    fn drain_background_results(&mut self) {
        let ctx = self.renderer.egui_context();

        while let Ok(result) = self.photo_receiver.try_recv() {
            match result {
                PhotoLoadResult::Success { target, photo } => {
                    log::info!("loaded {} ({}x{})", photo.name, photo.width, photo.height);
                    self.slot_mut(target).set_photo(&ctx, photo);
                }
                PhotoLoadResult::Error { target, error } => {
                    log::warn!("photo load failed: {error}");
                    self.slot_mut(target).set_error(error);
                }
            }
        }

        while let Ok(result) = self.generation_receiver.try_recv() {
            self.session.generating = false;
            match result {
                GenerationResult::Success(image) => {
                    self.session.status = None;
                    self.session.note = image.note;
                    let name = format!("reshoot.{}", extension_for(&image.mime));
                    self.start_photo_decode(PhotoTarget::Result, name, image.data);
                }
                GenerationResult::Error(error) => {
                    self.session.status = Some(error);
                }
            }
        }
    }

    fn slot_mut(&mut self, target: PhotoTarget) -> &mut crate::photo::PhotoSlot {
        match target {
            PhotoTarget::Source => &mut self.session.source,
            PhotoTarget::Result => &mut self.session.result,
        }
    }

    fn handle_dropped_files(&mut self) {
        let dropped = self
            .renderer
            .egui_context()
            .input(|i| i.raw.dropped_files.clone());

        // Only the first file; there is a single subject.
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.start_photo_load(PhotoTarget::Source, path);
        } else if let Some(bytes) = file.bytes {
            self.start_photo_decode(PhotoTarget::Source, file.name, bytes.to_vec());
        }
    }

    fn apply_actions(&mut self, actions: UiActions) {
        if actions.open_photo {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif"])
                .pick_file()
            {
                self.start_photo_load(PhotoTarget::Source, path);
            }
        }

        if actions.clear_photo {
            self.session.source.clear();
        }

        if actions.generate {
            if let Err(e) = self.request_generation() {
                log::warn!("cannot start generation: {}", e.summary());
                self.session.status = Some(e.summary());
            }
        }

        if actions.save_result {
            if let Err(e) = self.save_result() {
                log::error!("failed to save result: {}", e.summary());
                self.session.status = Some(e.summary());
            }
        }
    }

    fn request_generation(&mut self) -> Result<(), AppError> {
        let photo = self
            .session
            .source
            .encoded
            .clone()
            .ok_or(GenerationError::MissingPhoto)?;
        let api_key = self
            .settings
            .generation
            .resolved_api_key()
            .ok_or(GenerationError::MissingApiKey { env: API_KEY_ENV })?;

        let client = GenerationClient::new(&self.settings.generation, api_key)?;
        let request = GenerationRequest {
            photo,
            mime: self.session.source.mime,
            prompt: build_prompt(&self.session.camera, &self.session.instructions),
        };

        log::debug!("prompt: {}", request.prompt);
        self.session.generating = true;
        self.session.status = None;
        self.session.note = None;
        start_generation(&self.runtime, client, request, self.generation_sender.clone());
        Ok(())
    }

    fn save_result(&self) -> Result<(), AppError> {
        let Some(data) = self.session.result.encoded.as_ref() else {
            return Ok(());
        };
        let extension = extension_for(self.session.result.mime);
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &[extension])
            .set_file_name(format!("reshoot.{extension}"))
            .save_file()
        else {
            return Ok(());
        };

        std::fs::write(&path, data.as_slice()).map_err(|e| {
            AppError::new("save-result")
                .with_arg("path", path.display())
                .push_std(e)
        })?;
        log::info!("saved result to {}", path.display());
        Ok(())
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.drain_background_results();
        self.handle_dropped_files();

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut actions = UiActions::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            actions = self.ui.show(ctx, &mut self.session, &mut self.settings);
        });

        self.apply_actions(actions);

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [
                self.window.inner_size().width,
                self.window.inner_size().height,
            ],
            pixels_per_point: full_output.pixels_per_point,
        };

        match self
            .renderer
            .render(paint_jobs, full_output.textures_delta, screen_descriptor)
        {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
                Ok(())
            }
            other => other,
        }
    }
}

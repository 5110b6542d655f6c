use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod camera;
mod error;
mod generation;
mod photo;
mod renderer;
mod settings;
mod ui;

pub const CONFY_APP_NAME: &str = "reshoot";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let initial_photo = std::env::args().nth(1).map(PathBuf::from);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::handler::AppHandler {
        app: None,
        initial_photo,
        runtime: tokio::runtime::Runtime::new()?,
    };

    event_loop.run_app(&mut handler)?;

    Ok(())
}

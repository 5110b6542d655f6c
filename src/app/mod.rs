pub mod app;
pub mod handler;
pub mod session;
mod start_load;

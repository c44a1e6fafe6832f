mod actions;
mod app;
mod dom;
mod error;
mod input;
mod logging;
mod palette;
mod render;
mod state;
mod util;

pub use app::{initialize, initialize_with_config, SketchEditor};
pub use error::InitError;

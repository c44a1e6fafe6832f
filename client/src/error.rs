use thiserror::Error;
use wasm_bindgen::JsValue;

use sitesketch_shared::ConfigError;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("missing element: {0}")]
    MissingSurface(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("invalid editor config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for InitError {
    fn from(value: JsValue) -> Self {
        InitError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

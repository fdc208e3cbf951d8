use thiserror::Error;

/// Errors raised while setting the engine up.
///
/// Rendering itself never fails: a zero-size surface defers, an off-screen
/// backdrop pauses. Only configuration and platform setup can go wrong.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config json: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    ConfigValue { field: &'static str, reason: String },

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("{0} context not supported")]
    ContextUnavailable(&'static str),

    #[error("shader compile failed: {0}")]
    ShaderCompile(String),

    #[error("program link failed: {0}")]
    ProgramLink(String),

    #[error("webgl resource allocation failed: {0}")]
    GlResource(&'static str),

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl EngineError {
    pub(crate) fn value(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::ConfigValue { field, reason: reason.into() }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

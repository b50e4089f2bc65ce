//! Build-time configuration.
//!
//! `API_BASE_URL` is read when the bundle is compiled (`trunk build`), since a
//! static wasm bundle has no process environment at runtime.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub fn api_base_url() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// Origin the app is served from, e.g. `http://localhost:3000`
pub fn origin() -> String {
    gloo::utils::window()
        .location()
        .origin()
        .unwrap_or_default()
}

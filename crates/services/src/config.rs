use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Endpoints of the REST backend and the auxiliary services.
///
/// An auxiliary URL that is absent leaves that service disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub backend_url: String,
    pub translate_url: Option<String>,
    pub context_url: Option<String>,
    pub pictures_url: Option<String>,
    pub subtitles_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::with_backend(DEFAULT_BACKEND_URL)
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            backend_url: optional_var("LINGO_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.into()),
            translate_url: optional_var("LINGO_TRANSLATE_URL"),
            context_url: optional_var("LINGO_CONTEXT_URL"),
            pictures_url: optional_var("LINGO_PICTURES_URL"),
            subtitles_url: optional_var("LINGO_SUBS_URL"),
        }
    }

    /// Backend only; every auxiliary service disabled.
    #[must_use]
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            backend_url: url.into(),
            translate_url: None,
            context_url: None,
            pictures_url: None,
            subtitles_url: None,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

//! Per-request platform resolution.
//!
//! The browser and native builds of the app differ in exactly one way: a
//! browser page must send its own `Origin` and ask the fetch layer to include
//! cross-origin credentials, while the native app sends neither. The source
//! of truth for that difference is this one value, resolved per request and
//! applied in one place.

use reqwest::RequestBuilder;

/// Header-and-option set for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    origin: Option<String>,
    include_credentials: bool,
}

impl RequestContext {
    /// Resolve the context for the current runtime.
    #[cfg(target_arch = "wasm32")]
    pub fn resolve() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self {
            origin,
            include_credentials: true,
        }
    }

    /// Resolve the context for the current runtime.
    ///
    /// Native builds omit credentials and cross-origin mode entirely.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve() -> Self {
        Self::default()
    }

    /// Context for a browser page served from `origin`.
    pub fn browser(origin: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            include_credentials: true,
        }
    }

    pub fn is_browser(&self) -> bool {
        self.include_credentials
    }

    /// Apply the resolved headers and fetch options to a request.
    pub fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(origin) = &self.origin {
            request = request.header(reqwest::header::ORIGIN, origin);
        }
        #[cfg(target_arch = "wasm32")]
        if self.include_credentials {
            request = request.fetch_credentials_include();
        }
        request
    }
}

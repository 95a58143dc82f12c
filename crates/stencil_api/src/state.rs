//! Shared application state.

use std::sync::Arc;

use stencil_core::TemplateStore;

/// State available to all handlers via `State<AppState>`.
///
/// Holds only the durable store. Each request opens its own engine session
/// over it, so no catalog state lives here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TemplateStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }
}

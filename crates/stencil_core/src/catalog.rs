//! The name-keyed catalog of templates offered for rendering.
//!
//! A catalog lives for one request (see [`crate::engine::EngineSession`]);
//! it is rebuilt from the store by [`bootstrap`] rather than shared across
//! requests, so its contents are always a pure function of current store
//! state plus the mutations of the request it serves.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::model::Template;
use crate::render::{RenderOutcome, RenderReply, Renderer};
use crate::schema::ArgumentSchema;
use crate::store::TemplateStore;

/// Render closure registered for one template.
pub type RenderFn = Box<dyn Fn(&HashMap<String, String>) -> RenderReply + Send + Sync>;

/// A registered template: its argument schema and render closure.
pub struct CatalogEntry {
    schema: ArgumentSchema,
    render: RenderFn,
}

impl CatalogEntry {
    pub fn new(schema: ArgumentSchema, render: RenderFn) -> Self {
        Self { schema, render }
    }

    pub fn schema(&self) -> &ArgumentSchema {
        &self.schema
    }

    pub fn render(&self, values: &HashMap<String, String>) -> RenderReply {
        (self.render)(values)
    }
}

/// A registry of templates keyed by name.
///
/// Re-registering an existing name replaces the entry in place; the last
/// write wins.
#[derive(Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a template under `name`, replacing any prior entry.
    pub fn register(&mut self, name: impl Into<String>, schema: ArgumentSchema, render: RenderFn) {
        let name = name.into();
        debug!("Registering template: {}", name);
        self.entries.insert(name, CatalogEntry::new(schema, render));
    }

    /// Remove a template from the catalog.
    pub fn unregister(&mut self, name: &str) -> Option<CatalogEntry> {
        debug!("Unregistering template: {}", name);
        self.entries.remove(name)
    }

    /// Get a registered template by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Check if a template is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get all registered template names.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Register one template: build its render closure over the body and the
/// schema's required names, then insert it under the template's name.
pub fn register_template(catalog: &mut Catalog, template: &Template, schema: ArgumentSchema) {
    let renderer = Renderer::new();
    let body = template.body.clone();
    let required = schema.required_names();
    let known_inputs = schema.names();
    let render: RenderFn = Box::new(move |values| {
        match renderer.render(&body, values, &required) {
            RenderOutcome::Complete(text) => RenderReply::Rendered { text },
            RenderOutcome::MissingRequired(missing) => RenderReply::MissingInputs {
                missing,
                template: body.clone(),
                known_inputs: known_inputs.clone(),
            },
        }
    });
    catalog.register(&template.name, schema, render);
}

/// Load every persisted template into a fresh catalog.
///
/// Templates are processed one at a time; a template whose inputs cannot be
/// read or whose schema cannot be built is logged and skipped so that one
/// malformed record does not take down the whole catalog. Failing to list
/// templates at all is fatal.
pub async fn bootstrap(store: &dyn TemplateStore) -> EngineResult<Catalog> {
    let mut catalog = Catalog::new();
    for template in store.list_templates().await? {
        let inputs = match store.list_inputs(template.id).await {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!("Skipping template '{}': {}", template.name, e);
                continue;
            }
        };
        match ArgumentSchema::from_inputs(&inputs) {
            Ok(schema) => register_template(&mut catalog, &template, schema),
            Err(e) => warn!("Skipping template '{}': {}", template.name, e),
        }
    }
    debug!("Catalog bootstrapped with {} templates", catalog.len());
    Ok(catalog)
}

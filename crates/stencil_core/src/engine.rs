//! Request-scoped engine sessions.
//!
//! The hosting environment gives no guarantee that process state survives
//! between requests, so every request opens its own [`EngineSession`]: a
//! fresh catalog bootstrapped from the store. Within a session the steps of
//! a mutation (persist, recompute inputs, re-register) run in strict order;
//! no state is shared across sessions except the store itself.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{bootstrap, register_template, Catalog};
use crate::error::{EngineError, EngineResult};
use crate::extract::PlaceholderExtractor;
use crate::model::{InputSpec, NewTemplate, Template, TemplateUpdate};
use crate::render::RenderReply;
use crate::schema::ArgumentSchema;
use crate::store::TemplateStore;

/// A saved or updated template together with its current input names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedTemplate {
    pub template: Template,
    pub input_names: Vec<String>,
}

/// One request's view of the template engine.
pub struct EngineSession {
    store: Arc<dyn TemplateStore>,
    extractor: PlaceholderExtractor,
    catalog: Catalog,
}

impl EngineSession {
    /// Open a session: bootstrap a fresh catalog from the store.
    pub async fn open(store: Arc<dyn TemplateStore>) -> EngineResult<Self> {
        let catalog = bootstrap(store.as_ref()).await?;
        Ok(Self {
            store,
            extractor: PlaceholderExtractor::new(),
            catalog,
        })
    }

    /// The catalog as this session sees it.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Create a template, derive its inputs from the body, and register it.
    pub async fn save_template(&mut self, new: NewTemplate) -> EngineResult<SavedTemplate> {
        if new.name.trim().is_empty() {
            return Err(EngineError::Validation(
                "template name must not be empty".to_string(),
            ));
        }
        if new.body.trim().is_empty() {
            return Err(EngineError::Validation(
                "template body must not be empty".to_string(),
            ));
        }
        if self
            .store
            .get_template_by_name(&new.name)
            .await?
            .is_some()
        {
            return Err(EngineError::NameTaken(new.name));
        }

        let template = self.store.create_template(new).await?;
        let input_names = self.extractor.extract(&template.body);
        let specs: Vec<InputSpec> = input_names
            .iter()
            .map(|name| InputSpec::required(name))
            .collect();
        self.store.replace_inputs(template.id, specs).await?;

        let schema = ArgumentSchema::from_placeholders(&input_names);
        register_template(&mut self.catalog, &template, schema);
        info!(
            "Saved template '{}' with {} inputs",
            template.name,
            input_names.len()
        );

        Ok(SavedTemplate {
            template,
            input_names,
        })
    }

    /// Apply a partial update. Inputs are recomputed only when the body
    /// actually changed; the registration is replaced either way, and a
    /// rename drops the old name from the catalog.
    pub async fn update_template(
        &mut self,
        id: Uuid,
        update: TemplateUpdate,
    ) -> EngineResult<SavedTemplate> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(EngineError::Validation(
                "template name must not be empty".to_string(),
            ));
        }
        if update.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(EngineError::Validation(
                "template body must not be empty".to_string(),
            ));
        }

        let existing = self
            .store
            .get_template(id)
            .await?
            .ok_or(EngineError::TemplateNotFound(id))?;

        if let Some(name) = update.name.as_deref() {
            if name != existing.name && self.store.get_template_by_name(name).await?.is_some() {
                return Err(EngineError::NameTaken(name.to_string()));
            }
        }

        let body_changed = update
            .body
            .as_deref()
            .is_some_and(|body| body != existing.body);
        let updated = self.store.update_template(id, update).await?;

        let (input_names, schema) = if body_changed {
            let names = self.extractor.extract(&updated.body);
            let specs: Vec<InputSpec> = names.iter().map(|n| InputSpec::required(n)).collect();
            self.store.replace_inputs(updated.id, specs).await?;
            let schema = ArgumentSchema::from_placeholders(&names);
            (names, schema)
        } else {
            let inputs = self.store.list_inputs(updated.id).await?;
            let schema = ArgumentSchema::from_inputs(&inputs)?;
            (schema.names(), schema)
        };

        if existing.name != updated.name {
            self.catalog.unregister(&existing.name);
        }
        register_template(&mut self.catalog, &updated, schema);
        info!("Updated template '{}'", updated.name);

        Ok(SavedTemplate {
            template: updated,
            input_names,
        })
    }

    /// Delete a template, its inputs (by store cascade), and its catalog
    /// registration. Returns the deleted record.
    pub async fn delete_template(&mut self, id: Uuid) -> EngineResult<Template> {
        let existing = self
            .store
            .get_template(id)
            .await?
            .ok_or(EngineError::TemplateNotFound(id))?;
        self.store.delete_template(id).await?;
        self.catalog.unregister(&existing.name);
        info!("Deleted template '{}'", existing.name);
        Ok(existing)
    }

    /// List all persisted templates.
    pub async fn list_templates(&self) -> EngineResult<Vec<Template>> {
        Ok(self.store.list_templates().await?)
    }

    /// Fetch a single template by id.
    pub async fn get_template(&self, id: Uuid) -> EngineResult<Template> {
        self.store
            .get_template(id)
            .await?
            .ok_or(EngineError::TemplateNotFound(id))
    }

    /// Render the template registered under `name` against `values`.
    ///
    /// Missing required values produce a [`RenderReply::MissingInputs`]
    /// diagnostic, not an error.
    pub fn render_by_name(
        &self,
        name: &str,
        values: &HashMap<String, String>,
    ) -> EngineResult<RenderReply> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| EngineError::NameNotFound(name.to_string()))?;
        Ok(entry.render(values))
    }
}

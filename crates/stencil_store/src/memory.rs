//! In-memory store for tests and local development.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use stencil_core::model::{InputSpec, NewTemplate, Template, TemplateInput, TemplateUpdate};
use stencil_core::store::{StoreError, StoreResult, TemplateStore};

#[derive(Default)]
struct State {
    templates: Vec<Template>,
    inputs: Vec<TemplateInput>,
}

/// A [`TemplateStore`] backed by process memory.
///
/// Mirrors the relational store's semantics: cascade delete of inputs,
/// insertion-ordered input listing, partial updates refreshing `updated_at`.
#[derive(Default)]
pub struct MemoryTemplateStore {
    state: RwLock<State>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template and its input records directly, bypassing the engine.
    ///
    /// Intended for tests that need to stage store contents the public
    /// operations would refuse to produce (duplicate names, malformed input
    /// rows).
    pub fn seed(&self, template: Template, inputs: Vec<TemplateInput>) {
        let mut state = self.state.write().expect("store lock poisoned");
        state.templates.push(template);
        state.inputs.extend(inputs);
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn create_template(&self, new: NewTemplate) -> StoreResult<Template> {
        let now = Utc::now();
        let template = Template {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            body: new.body,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.write().expect("store lock poisoned");
        state.templates.push(template.clone());
        Ok(template)
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>> {
        let state = self.state.read().expect("store lock poisoned");
        Ok(state.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn get_template_by_name(&self, name: &str) -> StoreResult<Option<Template>> {
        let state = self.state.read().expect("store lock poisoned");
        Ok(state.templates.iter().find(|t| t.name == name).cloned())
    }

    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        let state = self.state.read().expect("store lock poisoned");
        Ok(state.templates.clone())
    }

    async fn update_template(&self, id: Uuid, update: TemplateUpdate) -> StoreResult<Template> {
        let mut state = self.state.write().expect("store lock poisoned");
        let template = state
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("template {}", id)))?;
        if let Some(name) = update.name {
            template.name = name;
        }
        if let Some(description) = update.description {
            template.description = Some(description);
        }
        if let Some(body) = update.body {
            template.body = body;
        }
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    async fn delete_template(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().expect("store lock poisoned");
        let before = state.templates.len();
        state.templates.retain(|t| t.id != id);
        if state.templates.len() == before {
            return Err(StoreError::NotFound(format!("template {}", id)));
        }
        // Cascade, as the relational schema does.
        state.inputs.retain(|i| i.template_id != id);
        Ok(())
    }

    async fn replace_inputs(&self, template_id: Uuid, inputs: Vec<InputSpec>) -> StoreResult<()> {
        let mut state = self.state.write().expect("store lock poisoned");
        state.inputs.retain(|i| i.template_id != template_id);
        let now = Utc::now();
        state.inputs.extend(inputs.into_iter().map(|spec| TemplateInput {
            id: Uuid::new_v4(),
            template_id,
            name: spec.name,
            description: spec.description,
            required: spec.required,
            created_at: now,
        }));
        Ok(())
    }

    async fn list_inputs(&self, template_id: Uuid) -> StoreResult<Vec<TemplateInput>> {
        let state = self.state.read().expect("store lock poisoned");
        Ok(state
            .inputs
            .iter()
            .filter(|i| i.template_id == template_id)
            .cloned()
            .collect())
    }
}

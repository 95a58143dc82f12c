//! Engine behavior against the in-memory store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use stencil_core::{
    bootstrap, EngineError, EngineSession, NewTemplate, RenderReply, Template, TemplateInput,
    TemplateStore, TemplateUpdate,
};
use stencil_store::MemoryTemplateStore;

fn new_template(name: &str, body: &str) -> NewTemplate {
    NewTemplate {
        name: name.to_string(),
        description: None,
        body: body.to_string(),
    }
}

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn open_session(store: &Arc<MemoryTemplateStore>) -> EngineSession {
    EngineSession::open(Arc::clone(store) as Arc<dyn TemplateStore>)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_save_then_render_in_same_session() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    session
        .save_template(new_template("greeting", "Hi {n}"))
        .await
        .unwrap();

    let names: Vec<_> = session
        .list_templates()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["greeting"]);

    let reply = session
        .render_by_name("greeting", &values(&[("n", "Ada")]))
        .unwrap();
    assert_eq!(
        reply,
        RenderReply::Rendered {
            text: "Hi Ada".to_string()
        }
    );
}

#[tokio::test]
async fn test_saved_template_visible_to_fresh_session() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut writer = open_session(&store).await;
    writer
        .save_template(new_template("greeting", "Hi {n}"))
        .await
        .unwrap();

    // A later request bootstraps its own catalog from the store.
    let reader = open_session(&store).await;
    assert!(reader.catalog().contains("greeting"));
    let reply = reader
        .render_by_name("greeting", &values(&[("n", "Ada")]))
        .unwrap();
    assert_eq!(
        reply,
        RenderReply::Rendered {
            text: "Hi Ada".to_string()
        }
    );
}

#[tokio::test]
async fn test_update_replaces_inputs_wholesale() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    let saved = session
        .save_template(new_template("swap", "{x}"))
        .await
        .unwrap();
    assert_eq!(saved.input_names, vec!["x"]);

    let updated = session
        .update_template(
            saved.template.id,
            TemplateUpdate {
                body: Some("{y}".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.input_names, vec!["y"]);

    let inputs = store.list_inputs(saved.template.id).await.unwrap();
    let names: Vec<_> = inputs.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["y"]);
    assert!(inputs.iter().all(|i| i.required));
}

#[tokio::test]
async fn test_rename_moves_registration() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    let saved = session
        .save_template(new_template("old-name", "Hi {n}"))
        .await
        .unwrap();
    session
        .update_template(
            saved.template.id,
            TemplateUpdate {
                name: Some("new-name".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!session.catalog().contains("old-name"));
    assert!(session.catalog().contains("new-name"));
    assert!(matches!(
        session.render_by_name("old-name", &HashMap::new()),
        Err(EngineError::NameNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_cascades_and_unregisters() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    let saved = session
        .save_template(new_template("greeting", "Hi {n}"))
        .await
        .unwrap();
    session.delete_template(saved.template.id).await.unwrap();

    assert!(store.list_inputs(saved.template.id).await.unwrap().is_empty());
    assert!(!session.catalog().contains("greeting"));
    assert!(matches!(
        session.render_by_name("greeting", &values(&[("n", "Ada")])),
        Err(EngineError::NameNotFound(name)) if name == "greeting"
    ));
}

#[tokio::test]
async fn test_missing_required_diagnostic() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    session
        .save_template(new_template("letter", "Dear {firstName} {lastName},"))
        .await
        .unwrap();

    let reply = session
        .render_by_name("letter", &values(&[("firstName", "John")]))
        .unwrap();
    assert_eq!(
        reply,
        RenderReply::MissingInputs {
            missing: vec!["lastName".to_string()],
            template: "Dear {firstName} {lastName},".to_string(),
            known_inputs: vec!["firstName".to_string(), "lastName".to_string()],
        }
    );
}

#[tokio::test]
async fn test_round_trip_leaves_no_placeholders() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    let saved = session
        .save_template(new_template("full", "{a} then {b} then {a}"))
        .await
        .unwrap();

    let reply = session
        .render_by_name("full", &values(&[("a", "1"), ("b", "2")]))
        .unwrap();
    let RenderReply::Rendered { text } = reply else {
        panic!("expected a rendered reply");
    };
    for name in &saved.input_names {
        assert!(!text.contains(&format!("{{{}}}", name)));
    }
    assert_eq!(text, "1 then 2 then 1");
}

#[tokio::test]
async fn test_duplicate_name_rejected() {
    let store = Arc::new(MemoryTemplateStore::new());
    let mut session = open_session(&store).await;

    session
        .save_template(new_template("greeting", "Hi {n}"))
        .await
        .unwrap();
    let result = session
        .save_template(new_template("greeting", "Hello {n}"))
        .await;
    assert!(matches!(result, Err(EngineError::NameTaken(name)) if name == "greeting"));
}

#[tokio::test]
async fn test_bootstrap_skips_malformed_template() {
    let store = Arc::new(MemoryTemplateStore::new());

    // A record whose input row could never have come from extraction.
    let now = Utc::now();
    let broken_id = Uuid::new_v4();
    store.seed(
        Template {
            id: broken_id,
            name: "broken".to_string(),
            description: None,
            body: "Hi {n}".to_string(),
            created_at: now,
            updated_at: now,
        },
        vec![TemplateInput {
            id: Uuid::new_v4(),
            template_id: broken_id,
            name: String::new(),
            description: None,
            required: true,
            created_at: now,
        }],
    );

    let mut session = open_session(&store).await;
    session
        .save_template(new_template("healthy", "Hello {n}"))
        .await
        .unwrap();

    let catalog = bootstrap(store.as_ref()).await.unwrap();
    assert!(catalog.contains("healthy"));
    assert!(!catalog.contains("broken"));
}

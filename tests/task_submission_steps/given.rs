//! Given steps for task submission BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::{Map, Value, json};
use sightline::task::services::CreateTaskRequest;

#[given(r#"a create request named "{name}" for "{url}" with standard "{standard}""#)]
fn create_request(world: &mut SubmissionWorld, name: String, url: String, standard: String) {
    world.pending_body = Some(json!({"name": name, "url": url, "standard": standard}));
}

#[given(r#"the request carries header "{key}" with value "{value}" as JSON text"#)]
fn request_header_text(
    world: &mut SubmissionWorld,
    key: String,
    value: String,
) -> Result<(), eyre::Report> {
    let mut headers = Map::new();
    headers.insert(key, Value::String(value));
    let text = serde_json::to_string(&headers)?;
    let body = world
        .pending_body
        .as_mut()
        .and_then(Value::as_object_mut)
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    body.insert("headers".to_owned(), Value::String(text));
    Ok(())
}

#[given(r#"an existing task named "{name}" for "{url}""#)]
fn existing_task(
    world: &mut SubmissionWorld,
    name: String,
    url: String,
) -> Result<(), eyre::Report> {
    let body = json!({"name": name, "url": url, "standard": "WCAG2AA"});
    let created = run_async(world.service.submit_create(CreateTaskRequest::new(body)))
        .wrap_err("create task for edit scenario")?;
    world.task = Some(created);
    Ok(())
}

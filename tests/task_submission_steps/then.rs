//! Then steps for task submission BDD scenarios.

use super::world::SubmissionWorld;
use rstest_bdd_macros::then;
use serde_json::{Value, json};
use sightline::task::services::TaskLifecycleError;

fn stored_field(world: &SubmissionWorld, key: &str) -> Result<Value, eyre::Report> {
    let stored = world.stored_json()?;
    stored
        .get(key)
        .cloned()
        .ok_or_else(|| eyre::eyre!("stored task has no {key} field"))
}

fn edit_error(world: &SubmissionWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    let result = world
        .last_edit_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing edit result in scenario world"))?;
    match result {
        Ok(task) => Err(eyre::eyre!("expected the edit to fail, got {task:?}")),
        Err(err) => Ok(err),
    }
}

#[then("the task is stored with an identifier")]
fn task_stored(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    let create_result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    create_result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected task creation failure: {err}"))?;

    if !stored_field(world, "id")?.is_string() {
        return Err(eyre::eyre!("expected a string identifier"));
    }
    Ok(())
}

#[then("the stored ignore list is empty")]
fn ignore_empty(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    let ignore = stored_field(world, "ignore")?;
    if ignore != json!([]) {
        return Err(eyre::eyre!("expected empty ignore list, found {ignore}"));
    }
    Ok(())
}

#[then(r#"the stored runners are "{runner}""#)]
fn runners_are(world: &SubmissionWorld, runner: String) -> Result<(), eyre::Report> {
    let runners = stored_field(world, "runners")?;
    if runners != json!([runner]) {
        return Err(eyre::eyre!("expected runners [{runner}], found {runners}"));
    }
    Ok(())
}

#[then(r#"the stored header "{key}" is "{value}""#)]
fn header_is(world: &SubmissionWorld, key: String, value: String) -> Result<(), eyre::Report> {
    let headers = stored_field(world, "headers")?;
    if !headers.is_object() {
        return Err(eyre::eyre!("expected headers mapping, found {headers}"));
    }
    if headers.get(&key) != Some(&Value::String(value.clone())) {
        return Err(eyre::eyre!("expected header {key}={value}, found {headers}"));
    }
    Ok(())
}

#[then(r#"the edit is rejected for field "{field}""#)]
fn edit_rejected(world: &SubmissionWorld, field: String) -> Result<(), eyre::Report> {
    let err = edit_error(world)?;
    let rejection = err
        .rejection()
        .ok_or_else(|| eyre::eyre!("expected a validation rejection, got {err}"))?;
    if rejection.field_names() != [field.as_str()] {
        return Err(eyre::eyre!(
            "expected rejection of {field}, found {:?}",
            rejection.field_names()
        ));
    }
    Ok(())
}

#[then("the edit reports the task as not found")]
fn edit_not_found(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    let err = edit_error(world)?;
    if !err.is_not_found() {
        return Err(eyre::eyre!("expected not found, got {err}"));
    }
    Ok(())
}

#[then(r#"the stored name is "{name}""#)]
fn name_is(world: &SubmissionWorld, name: String) -> Result<(), eyre::Report> {
    let stored = stored_field(world, "name")?;
    if stored != json!(name) {
        return Err(eyre::eyre!("expected name {name}, found {stored}"));
    }
    Ok(())
}

#[then(r#"the stored url is "{url}""#)]
fn url_is(world: &SubmissionWorld, url: String) -> Result<(), eyre::Report> {
    let stored = stored_field(world, "url")?;
    if stored != json!(url) {
        return Err(eyre::eyre!("expected url {url}, found {stored}"));
    }
    Ok(())
}

#[then(
    r#"the task has {count:usize} annotation with comment "{comment}" and type "{kind}""#
)]
fn annotation_recorded(
    world: &SubmissionWorld,
    count: usize,
    comment: String,
    kind: String,
) -> Result<(), eyre::Report> {
    let annotations = stored_field(world, "annotations")?;
    let entries = annotations
        .as_array()
        .ok_or_else(|| eyre::eyre!("expected annotations array, found {annotations}"))?;
    if entries.len() != count {
        return Err(eyre::eyre!(
            "expected {count} annotations, found {}",
            entries.len()
        ));
    }
    let last = entries
        .last()
        .ok_or_else(|| eyre::eyre!("no annotation recorded"))?;
    if last.get("comment") != Some(&json!(comment)) || last.get("type") != Some(&json!(kind)) {
        return Err(eyre::eyre!("unexpected annotation {last}"));
    }
    Ok(())
}

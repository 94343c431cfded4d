//! When steps for task submission BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::{Value, json};
use sightline::task::{
    domain::TaskId,
    services::{CreateTaskRequest, EditTaskRequest},
};

fn submit_edit(world: &mut SubmissionWorld, body: Value) -> Result<(), eyre::Report> {
    let id = world.task()?.id().to_string();
    let result = run_async(
        world
            .service
            .submit_edit(&id, EditTaskRequest::from_body(body)),
    );
    world.last_edit_result = Some(result);
    Ok(())
}

#[when("the task is submitted for creation")]
fn submit_create(world: &mut SubmissionWorld) -> Result<(), eyre::Report> {
    let body = world
        .pending_body
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;

    let result = run_async(world.service.submit_create(CreateTaskRequest::new(body)));
    if let Ok(task) = &result {
        world.task = Some(task.clone());
    }
    world.last_create_result = Some(result);
    Ok(())
}

#[when("the task is edited with numeric runners")]
fn edit_numeric_runners(world: &mut SubmissionWorld) -> Result<(), eyre::Report> {
    submit_edit(world, json!({"runners": [1, 2]}))
}

#[when(r#"the task is renamed to "{name}" with comment "{comment}""#)]
fn rename_with_comment(
    world: &mut SubmissionWorld,
    name: String,
    comment: String,
) -> Result<(), eyre::Report> {
    submit_edit(world, json!({"name": name, "comment": comment}))
}

#[when(r#"the task url is edited to "{url}""#)]
fn edit_url(world: &mut SubmissionWorld, url: String) -> Result<(), eyre::Report> {
    submit_edit(world, json!({"url": url, "name": "foo"}))
}

#[when(r#"an unknown task is renamed to "{name}""#)]
fn rename_unknown(world: &mut SubmissionWorld, name: String) {
    let id = TaskId::new().to_string();
    let result = run_async(
        world
            .service
            .submit_edit(&id, EditTaskRequest::new(json!({"name": name}))),
    );
    world.last_edit_result = Some(result);
}

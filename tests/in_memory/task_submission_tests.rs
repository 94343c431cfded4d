//! In-memory integration tests for task creation and editing.

use rstest::rstest;
use serde_json::{Value, json};
use sightline::task::services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleError};

use super::helpers::{TestService, create_npg_home, npg_home, service, stored_json};

fn npg_home_with(key: &str, value: Value) -> Value {
    let mut body = npg_home();
    if let Some(map) = body.as_object_mut() {
        map.insert(key.to_owned(), value);
    }
    body
}

fn npg_home_without(key: &str) -> Value {
    let mut body = npg_home();
    if let Some(map) = body.as_object_mut() {
        map.remove(key);
    }
    body
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_fills_defaults(service: TestService) -> Result<(), eyre::Report> {
    let task = create_npg_home(&service).await?;
    let stored = stored_json(&service, &task).await?;

    eyre::ensure!(stored["id"].is_string(), "id should be assigned");
    eyre::ensure!(stored["ignore"] == json!([]), "ignore should default to []");
    eyre::ensure!(
        stored["runners"] == json!(["htmlcs"]),
        "runners should default to htmlcs"
    );
    eyre::ensure!(stored["annotations"] == json!([]), "no annotations yet");
    Ok(())
}

#[rstest]
#[case(json!("{\"foo\":\"bar\"}"))]
#[case(json!({"foo": "bar"}))]
#[tokio::test(flavor = "multi_thread")]
async fn headers_are_stored_as_a_mapping(
    service: TestService,
    #[case] headers: Value,
) -> Result<(), eyre::Report> {
    let task = service
        .submit_create(CreateTaskRequest::new(npg_home_with("headers", headers)))
        .await?;
    let stored = stored_json(&service, &task).await?;

    eyre::ensure!(
        stored["headers"] == json!({"foo": "bar"}),
        "headers stored as {}",
        stored["headers"]
    );
    Ok(())
}

#[rstest]
#[case::missing_name(npg_home_without("name"))]
#[case::missing_url(npg_home_without("url"))]
#[case::unknown_standard(npg_home_with("standard", json!("WCAG3")))]
#[case::bad_headers(npg_home_with("headers", json!("{oops")))]
#[case::bad_actions(npg_home_with("actions", json!(["foo"])))]
#[case::actions_not_array(npg_home_with("actions", json!("click element body")))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_persists_nothing(
    service: TestService,
    #[case] body: Value,
) -> Result<(), eyre::Report> {
    let result = service.submit_create(CreateTaskRequest::new(body)).await;

    eyre::ensure!(
        result.as_ref().is_err_and(TaskLifecycleError::is_rejection),
        "expected rejection, got {result:?}"
    );
    eyre::ensure!(service.list().await?.is_empty(), "no task should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_with_comment_records_annotation(service: TestService) -> Result<(), eyre::Report> {
    let task = create_npg_home(&service).await?;

    service
        .submit_edit(
            &task.id().to_string(),
            EditTaskRequest::from_body(json!({"name": "New Name", "comment": "fix"})),
        )
        .await?;
    let stored = stored_json(&service, &task).await?;

    eyre::ensure!(stored["name"] == json!("New Name"), "name should change");
    let annotations = stored["annotations"]
        .as_array()
        .ok_or_else(|| eyre::eyre!("annotations should be an array"))?;
    eyre::ensure!(annotations.len() == 1, "expected one annotation");
    let annotation = annotations
        .first()
        .ok_or_else(|| eyre::eyre!("missing annotation"))?;
    eyre::ensure!(annotation["type"] == json!("edit"), "type should be edit");
    eyre::ensure!(annotation["comment"] == json!("fix"), "comment should be kept");
    eyre::ensure!(annotation["date"].is_i64(), "date should be numeric");
    Ok(())
}

#[rstest]
#[case::url(json!({"url": "http://example.com/", "name": "foo"}))]
#[case::numeric_runners(json!({"runners": [1, 2]}))]
#[case::unknown_runner(json!({"runners": ["run", "sprint"]}))]
#[case::bad_action(json!({"actions": ["foo", "bar"]}))]
#[case::actions_not_array(json!({"actions": "click element body"}))]
#[case::null_name(json!({"name": null}))]
#[case::unknown_field(json!({"annotations": []}))]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_edit_leaves_stored_task_unchanged(
    service: TestService,
    #[case] body: Value,
) -> Result<(), eyre::Report> {
    let task = create_npg_home(&service).await?;
    let before = stored_json(&service, &task).await?;

    let result = service
        .submit_edit(&task.id().to_string(), EditTaskRequest::from_body(body))
        .await;

    eyre::ensure!(
        result.as_ref().is_err_and(TaskLifecycleError::is_rejection),
        "expected rejection, got {result:?}"
    );
    let after = stored_json(&service, &task).await?;
    eyre::ensure!(before == after, "stored task changed: {before} -> {after}");
    eyre::ensure!(after["runners"] == json!(["htmlcs"]), "runners changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_edit_appends_one_annotation(service: TestService) -> Result<(), eyre::Report> {
    let task = create_npg_home(&service).await?;
    let id = task.id().to_string();

    service
        .submit_edit(&id, EditTaskRequest::new(json!({"timeout": "1000"})))
        .await?;
    service
        .submit_edit(
            &id,
            EditTaskRequest::new(json!({"runners": ["axe"]})).with_comment("switch runner"),
        )
        .await?;
    let stored = stored_json(&service, &task).await?;

    eyre::ensure!(stored["timeout"] == json!(1000), "timeout should be coerced");
    eyre::ensure!(stored["runners"] == json!(["axe"]), "runners should change");
    let comments: Vec<&Value> = stored["annotations"]
        .as_array()
        .map(|entries| entries.iter().map(|entry| &entry["comment"]).collect())
        .unwrap_or_default();
    eyre::ensure!(
        comments == [&json!(""), &json!("switch runner")],
        "unexpected annotations {comments:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_of_unknown_task_is_not_found(service: TestService) -> Result<(), eyre::Report> {
    let result = service
        .submit_edit("-abc-", EditTaskRequest::new(json!({"name": "foo"})))
        .await;

    eyre::ensure!(
        result.as_ref().is_err_and(TaskLifecycleError::is_not_found),
        "expected not found, got {result:?}"
    );
    Ok(())
}

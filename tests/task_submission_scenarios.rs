//! Behaviour tests for task creation and editing.

mod task_submission_steps;

use rstest_bdd_macros::scenario;
use task_submission_steps::world::{SubmissionWorld, world};

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Create a task with default runners and ignore list"
)]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_defaults(world: SubmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Headers given as JSON text are stored as a mapping"
)]
#[tokio::test(flavor = "multi_thread")]
async fn headers_text_stored_as_mapping(world: SubmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Reject an edit with non-string runners"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_numeric_runners(world: SubmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Record an annotation for an edit with a comment"
)]
#[tokio::test(flavor = "multi_thread")]
async fn annotate_commented_edit(world: SubmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Reject an edit that changes the url"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_url_edit(world: SubmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_submission.feature",
    name = "Report an edit of an unknown task as not found"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_not_found(world: SubmissionWorld) {
    let _ = world;
}

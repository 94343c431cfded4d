//! Concurrent edits against the in-memory repository.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;
use sightline::task::{domain::Annotation, services::EditTaskRequest};

use super::helpers::{TestService, create_npg_home, service};

const WRITERS: u32 = 8;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_edits_each_land_once(service: TestService) -> Result<(), eyre::Report> {
    let shared = Arc::new(service.with_max_edit_attempts(WRITERS));
    let task = create_npg_home(&shared).await?;
    let id = task.id().to_string();

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let writer_service = Arc::clone(&shared);
            let task_id = id.clone();
            tokio::spawn(async move {
                let request = EditTaskRequest::new(json!({"timeout": 1000 + writer}))
                    .with_comment(format!("writer {writer}"));
                writer_service.submit_edit(&task_id, request).await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let stored = shared.get(&id).await?;
    let mut comments: Vec<&str> = stored
        .annotations()
        .iter()
        .map(Annotation::comment)
        .collect();
    comments.sort_unstable();
    let mut expected: Vec<String> = (0..WRITERS)
        .map(|writer| format!("writer {writer}"))
        .collect();
    expected.sort_unstable();

    eyre::ensure!(
        comments == expected.iter().map(String::as_str).collect::<Vec<_>>(),
        "annotations lost or duplicated: {comments:?}"
    );
    let dates: Vec<i64> = stored.annotations().iter().map(Annotation::date).collect();
    eyre::ensure!(
        dates.windows(2).all(|pair| matches!(pair, [earlier, later] if earlier <= later)),
        "annotation dates decreased: {dates:?}"
    );
    Ok(())
}

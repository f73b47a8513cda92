use std::future::Future;

use tokio::task::JoinSet;

/// Runs one task per item and gathers the successful outputs
///
/// Every task is spawned before any is awaited. Outputs are collected in completion
/// order by the calling task only; a task yielding `None` or panicking contributes
/// nothing. Returns once every task has finished.
pub async fn gather<I, F, Fut, R>(stage: &'static str, items: I, task: F) -> Vec<R>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = Option<R>> + Send + 'static,
    R: Send + 'static,
{
    let mut tasks = JoinSet::new();
    for item in items {
        tasks.spawn(task(item));
    }

    let spawned = tasks.len();
    let mut results = Vec::with_capacity(spawned);

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(stage, error = %e, "Task join error");
            }
        }
    }

    if results.len() < spawned {
        tracing::warn!(
            stage,
            success_count = results.len(),
            dropped_count = spawned - results.len(),
            "Partial fan-out failure"
        );
    }

    results
}

//! Drives an async operation while draining its event channel, so frontends
//! can render progress without the pipeline knowing how it is displayed.

use std::future::Future;

use tokio::sync::mpsc;

/// Run `task` to completion, calling `on_event` for every event it sends.
///
/// Events still buffered when the task finishes are delivered before
/// returning, so terminal events are never lost.
pub async fn run_with_events<E, R>(
    task: impl Future<Output = R>,
    mut events: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R {
    tokio::pin!(task);
    let mut result = None;
    while result.is_none() {
        tokio::select! {
            r = &mut task => result = Some(r),
            event = events.recv() => match event {
                Some(event) => on_event(event),
                // Sender dropped early; nothing more to report.
                None => break,
            },
        }
    }

    while let Ok(event) = events.try_recv() {
        on_event(event);
    }

    match result {
        Some(result) => result,
        None => task.await,
    }
}

use std::fmt;

use tracing::error;

/// What a queued body may return. The owner loop reports failures here,
/// since the original caller has long since moved on.
pub trait TaskOutcome {
    fn report(self, task: &str);
}

impl TaskOutcome for () {
    fn report(self, _task: &str) {}
}

impl<E: fmt::Display> TaskOutcome for Result<(), E> {
    fn report(self, task: &str) {
        if let Err(e) = self {
            error!(task, "queued task failed: {e}");
        }
    }
}

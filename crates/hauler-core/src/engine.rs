//! Hand-off boundary to the transfer engine.
//!
//! The assembly layer ends where the engine begins. A finished task moves
//! into the engine, which owns network I/O, persistence, and progress
//! reporting from that point on; this crate never touches the task again.

use anyhow::Result;

use crate::task::DownloadTask;

/// Identifier the engine assigns to an accepted task.
pub type TaskId = i64;

/// Implemented by the transfer engine that executes finished tasks.
pub trait TransferEngine {
    /// Accept a finished task for execution. Takes the task by value: the
    /// configuring caller gives up ownership, and with it any way to keep
    /// mutating the task.
    ///
    /// The engine is expected to honor the descriptor as-is: destination
    /// collision checks are skipped when `force_overwrite` is set, naming
    /// follows [`crate::naming::pick_file_name`], and the registered
    /// callbacks are invoked from the engine's own threads.
    fn submit(&mut self, task: DownloadTask) -> Result<TaskId>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionKey;
    use crate::task::{Protocol, TaskBuilder};

    /// Engine double that just parks submitted tasks.
    #[derive(Default)]
    struct RecordingEngine {
        tasks: Vec<DownloadTask>,
    }

    impl TransferEngine for RecordingEngine {
        fn submit(&mut self, task: DownloadTask) -> Result<TaskId> {
            self.tasks.push(task);
            Ok(self.tasks.len() as TaskId)
        }
    }

    #[test]
    fn submitted_task_arrives_unchanged() {
        let mut builder = TaskBuilder::http("https://example.com/file.iso").unwrap();
        builder.http_options().header("Accept", "*/*").unwrap();
        let task = builder
            .file_path_force("/tmp/file.iso", true)
            .unwrap()
            .finish();

        let mut engine = RecordingEngine::default();
        let id = engine.submit(task).unwrap();
        assert_eq!(id, 1);

        let stored = &engine.tasks[0];
        assert_eq!(stored.protocol(), Protocol::Http);
        assert_eq!(stored.url(), "https://example.com/file.iso");
        assert_eq!(stored.dest_path(), Some("/tmp/file.iso"));
        assert!(stored.force_overwrite());
        assert_eq!(
            stored
                .options()
                .string_map(OptionKey::RequestHeaders)
                .unwrap()
                .get("Accept")
                .map(String::as_str),
            Some("*/*")
        );
    }
}

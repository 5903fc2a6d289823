use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::SessionError;
use crate::explorer::{Entry, list_directory};
use crate::files::{create_empty_file, read_text_file, write_text_file};
use crate::gemini::CompletionClient;

/// What a model call's output is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPurpose {
    Reply,
    Generate { target: PathBuf },
    Modify { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPurpose {
    Modify,
    Display,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Complete { purpose: ModelPurpose, prompt: String },
    ListDirectory(PathBuf),
    ReadFile { path: PathBuf, purpose: ReadPurpose },
    WriteFile { path: PathBuf, contents: String },
    CreateFile(PathBuf),
}

impl Task {
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Complete { .. } => "complete",
            Task::ListDirectory(_) => "list_directory",
            Task::ReadFile { .. } => "read_file",
            Task::WriteFile { .. } => "write_file",
            Task::CreateFile(_) => "create_file",
        }
    }
}

/// Result of a finished [`Task`], carrying the tag it was dispatched with.
#[derive(Debug)]
pub enum Completion {
    Model {
        purpose: ModelPurpose,
        result: Result<String, SessionError>,
    },
    DirectoryListed {
        path: PathBuf,
        result: Result<Vec<Entry>, SessionError>,
    },
    FileRead {
        path: PathBuf,
        purpose: ReadPurpose,
        result: Result<String, SessionError>,
    },
    FileWritten {
        path: PathBuf,
        result: Result<(), SessionError>,
    },
    FileCreated {
        path: PathBuf,
        result: Result<(), SessionError>,
    },
}

pub fn run_task(task: Task, client: &dyn CompletionClient) -> Completion {
    match task {
        Task::Complete { purpose, prompt } => Completion::Model {
            purpose,
            result: client.complete(&prompt),
        },
        Task::ListDirectory(path) => {
            let result = list_directory(&path);
            Completion::DirectoryListed { path, result }
        }
        Task::ReadFile { path, purpose } => {
            let result = read_text_file(&path);
            Completion::FileRead {
                path,
                purpose,
                result,
            }
        }
        Task::WriteFile { path, contents } => {
            let result = write_text_file(&path, &contents);
            Completion::FileWritten { path, result }
        }
        Task::CreateFile(path) => {
            let result = create_empty_file(&path);
            Completion::FileCreated { path, result }
        }
    }
}

/// Runs each task on a detached thread and queues its completion for the event loop.
pub struct TaskRunner {
    client: Arc<dyn CompletionClient>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl TaskRunner {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            client,
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, task: Task) {
        let client = Arc::clone(&self.client);
        let tx = self.completion_tx.clone();
        tracing::debug!(task = task.kind(), "dispatching task");
        thread::spawn(move || {
            let completion = run_task(task, client.as_ref());
            let _ = tx.send(completion);
        });
    }

    pub fn drain_completions_limited(&self, max_completions: usize) -> Vec<Completion> {
        let mut completions = Vec::new();
        while completions.len() < max_completions {
            let Ok(completion) = self.completion_rx.try_recv() else {
                break;
            };
            completions.push(completion);
        }
        completions
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Completion> {
        self.completion_rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
#[path = "../tests/unit/worker_tests.rs"]
mod tests;

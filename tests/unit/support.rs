use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    pub fn new(prefix: &str) -> Self {
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!(
            "anx-agent-{prefix}-{}-{nanos}-{counter}",
            std::process::id()
        ));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Completion client that replays canned replies and records every prompt.
pub struct ScriptedClient {
    replies: std::sync::Mutex<std::collections::VecDeque<Result<String, String>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: std::sync::Mutex::new(
                replies
                    .into_iter()
                    .map(|reply| reply.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl crate::gemini::CompletionClient for ScriptedClient {
    fn complete(&self, prompt: &str) -> Result<String, crate::error::SessionError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        match self.replies.lock().expect("replies lock").pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(crate::error::SessionError::Transport(message)),
            None => Err(crate::error::SessionError::Transport(
                "no scripted reply".to_string(),
            )),
        }
    }
}

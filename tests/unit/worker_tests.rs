use super::*;
use crate::test_support::{ScriptedClient, TempDirGuard};
use std::time::Duration;

#[test]
fn model_task_returns_reply_tagged_with_purpose() {
    let client = ScriptedClient::new(vec![Ok("hi there")]);
    let completion = run_task(
        Task::Complete {
            purpose: ModelPurpose::Reply,
            prompt: "hello".to_string(),
        },
        &client,
    );
    match completion {
        Completion::Model { purpose, result } => {
            assert_eq!(purpose, ModelPurpose::Reply);
            assert_eq!(result.expect("reply"), "hi there");
        }
        other => panic!("unexpected completion: {other:?}"),
    }
    assert_eq!(client.prompts(), vec!["hello".to_string()]);
}

#[test]
fn model_failure_is_reported_as_transport_error() {
    let client = ScriptedClient::new(vec![Err("quota exceeded")]);
    let target = PathBuf::from("out.txt");
    let completion = run_task(
        Task::Complete {
            purpose: ModelPurpose::Generate {
                target: target.clone(),
            },
            prompt: "p".to_string(),
        },
        &client,
    );
    match completion {
        Completion::Model { purpose, result } => {
            assert_eq!(purpose, ModelPurpose::Generate { target });
            assert!(matches!(result, Err(SessionError::Transport(_))));
        }
        other => panic!("unexpected completion: {other:?}"),
    }
}

#[test]
fn file_tasks_touch_the_filesystem() {
    let dir = TempDirGuard::new("worker-files");
    let client = ScriptedClient::new(Vec::new());
    let path = dir.path().join("made.txt");

    let created = run_task(Task::CreateFile(path.clone()), &client);
    assert!(matches!(created, Completion::FileCreated { result: Ok(()), .. }));

    let written = run_task(
        Task::WriteFile {
            path: path.clone(),
            contents: "body".to_string(),
        },
        &client,
    );
    assert!(matches!(written, Completion::FileWritten { result: Ok(()), .. }));

    match run_task(
        Task::ReadFile {
            path: path.clone(),
            purpose: ReadPurpose::Display,
        },
        &client,
    ) {
        Completion::FileRead {
            purpose, result, ..
        } => {
            assert_eq!(purpose, ReadPurpose::Display);
            assert_eq!(result.expect("read"), "body");
        }
        other => panic!("unexpected completion: {other:?}"),
    }

    match run_task(Task::ListDirectory(dir.path().to_path_buf()), &client) {
        Completion::DirectoryListed { result, .. } => {
            let entries = result.expect("listing");
            assert_eq!(entries.len(), 2);
            assert!(entries.iter().any(|e| e.name == "made.txt" && !e.is_dir));
        }
        other => panic!("unexpected completion: {other:?}"),
    }
    assert!(client.prompts().is_empty());
}

#[test]
fn runner_delivers_completion_over_channel() {
    let dir = TempDirGuard::new("worker-runner");
    let runner = TaskRunner::new(Arc::new(ScriptedClient::new(Vec::new())));
    assert!(runner.drain_completions_limited(8).is_empty());

    runner.spawn(Task::ListDirectory(dir.path().to_path_buf()));
    let completion = runner
        .recv_timeout(Duration::from_secs(5))
        .expect("completion should arrive");
    assert!(matches!(completion, Completion::DirectoryListed { result: Ok(_), .. }));
    assert!(runner.drain_completions_limited(8).is_empty());
}

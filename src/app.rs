use std::mem;
use std::path::{Path, PathBuf};

use crate::commands::{CommandAction, CommandRegistry, parse_command_line};
use crate::error::SessionError;
use crate::events::AppEvent;
use crate::explorer::{ExplorerState, entry_target, join_under};
use crate::prompts::{build_edit_prompt, build_generation_prompt, strip_code_fence};
use crate::transcript::{Role, Transcript};
use crate::worker::{Completion, ModelPurpose, ReadPurpose, Task};

pub const WELCOME_MESSAGE: &str = "Welcome to ANX Agent. Write 'help' to show help.";
pub const MAX_INPUT_CHARS: usize = 1024;
pub const TRANSCRIPT_SCROLL_LINES: u16 = 5;
const EXPLORER_HELP: &str = "In the explorer ('ls'):\n  'enter' to open dir or modify file\n  'c' to create empty file\n  'a' to create file with AI\n  'q'/'esc' to go back";

/// Session mode. Scratch data lives in the variant that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Explorer,
    CreateFileInput,
    AiFilenameInput,
    AiPromptInput { target: PathBuf },
    AiModifyInput { path: PathBuf, original: String },
}

impl Mode {
    pub fn is_input_collection(&self) -> bool {
        matches!(
            self,
            Mode::CreateFileInput
                | Mode::AiFilenameInput
                | Mode::AiPromptInput { .. }
                | Mode::AiModifyInput { .. }
        )
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Mode::Chat | Mode::Explorer => "Write a message or command ('help' to show help)...",
            Mode::CreateFileInput => "New file name (empty)...",
            Mode::AiFilenameInput => "File name to generate by AI...",
            Mode::AiPromptInput { .. } => "Describe what the file should do...",
            Mode::AiModifyInput { .. } => "E.g. 'Add a comment to the main function'...",
        }
    }

    pub fn status_hint(&self) -> &'static str {
        match self {
            Mode::Chat => "MODE: Chat | 'ls' to explore | 'exit' to exit",
            Mode::Explorer => {
                "MODE: Explorer | enter open/modify | c create empty | a create with AI | q/esc back"
            }
            Mode::CreateFileInput => "MODE: Create File | 'Enter' to confirm | 'Esc' to cancel",
            Mode::AiFilenameInput => "MODE: File Name (AI) | 'Enter' to continue | 'Esc' to cancel",
            Mode::AiPromptInput { .. } => {
                "MODE: Description (AI) | 'Enter' to generate | 'Esc' to cancel"
            }
            Mode::AiModifyInput { .. } => "MODE: Modify with AI | 'Enter' to send | 'Esc' to cancel",
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub ticks: u64,
    mode: Mode,
    current_path: PathBuf,
    transcript: Transcript,
    pending: bool,
    input: String,
    cursor: usize,
    explorer: ExplorerState,
    commands: CommandRegistry,
    scroll_back: u16,
}

impl Default for App {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl App {
    pub fn new(current_path: PathBuf) -> Self {
        let mut transcript = Transcript::default();
        transcript.append(Role::Info, WELCOME_MESSAGE);
        Self {
            running: true,
            ticks: 0,
            mode: Mode::Chat,
            current_path,
            transcript,
            pending: false,
            input: String::new(),
            cursor: 0,
            explorer: ExplorerState::default(),
            commands: CommandRegistry::default(),
            scroll_back: 0,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Applies one input event. Returns the task to dispatch, if any.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Task> {
        match event {
            AppEvent::Tick => {
                self.ticks = self.ticks.saturating_add(1);
                None
            }
            AppEvent::Quit => {
                self.quit();
                None
            }
            AppEvent::Resize | AppEvent::ScrollUp | AppEvent::ScrollDown => None,
            _ if self.mode == Mode::Explorer => self.handle_explorer_event(event),
            AppEvent::Escape => {
                self.cancel_input();
                None
            }
            AppEvent::Submit => self.submit(),
            AppEvent::InputChar(c) => {
                self.input_char(c);
                None
            }
            AppEvent::Backspace => {
                self.backspace_input();
                None
            }
            AppEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            AppEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
                None
            }
            AppEvent::MoveUp | AppEvent::MoveDown => None,
        }
    }

    /// Applies the outcome of a finished task. Returns a follow-up task, if any.
    pub fn on_completion(&mut self, completion: Completion) -> Option<Task> {
        self.pending = false;
        match completion {
            Completion::Model { purpose, result } => match (purpose, result) {
                (_, Err(err)) => self.fail(err),
                (ModelPurpose::Reply, Ok(text)) => {
                    self.push(Role::Assistant, text);
                    None
                }
                (ModelPurpose::Generate { target }, Ok(text)) => {
                    self.push(Role::Info, "Content generated by AI. Writing to file...");
                    self.start(Task::WriteFile {
                        path: target,
                        contents: strip_code_fence(&text),
                    })
                }
                (ModelPurpose::Modify { path }, Ok(text)) => {
                    self.push(Role::Info, "Content modified by AI. Writing changes...");
                    self.start(Task::WriteFile {
                        path,
                        contents: strip_code_fence(&text),
                    })
                }
            },
            Completion::DirectoryListed { path, result } => match result {
                Ok(entries) => {
                    tracing::debug!(path = %path.display(), entries = entries.len(), "directory listed");
                    self.current_path = path;
                    self.explorer.replace_entries(entries);
                    self.mode = Mode::Explorer;
                    None
                }
                Err(err) => self.fail(err),
            },
            Completion::FileRead {
                path,
                purpose,
                result,
            } => match (purpose, result) {
                (_, Err(err)) => self.fail(err),
                (ReadPurpose::Modify, Ok(original)) => {
                    self.push(
                        Role::Info,
                        format!(
                            "File '{}' read. How do you want to modify it?",
                            display_name(&path)
                        ),
                    );
                    self.clear_input();
                    self.mode = Mode::AiModifyInput { path, original };
                    None
                }
                (ReadPurpose::Display, Ok(text)) => {
                    self.push(Role::Info, format!("{}:\n{text}", path.display()));
                    None
                }
            },
            Completion::FileWritten { path, result } => match result {
                Ok(()) => self.file_saved(&path),
                Err(err) => self.fail(err),
            },
            Completion::FileCreated { path, result } => match result {
                Ok(()) => self.file_saved(&path),
                Err(err) if err.is_already_exists() => {
                    tracing::info!(path = %path.display(), "create target already exists");
                    self.push(Role::Error, err.to_string());
                    None
                }
                Err(err) => self.fail(err),
            },
        }
    }

    pub fn scroll_transcript_up(&mut self, max_scroll: u16) {
        self.scroll_back = self
            .scroll_back
            .saturating_add(TRANSCRIPT_SCROLL_LINES)
            .min(max_scroll);
    }

    pub fn scroll_transcript_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(TRANSCRIPT_SCROLL_LINES);
    }

    fn handle_explorer_event(&mut self, event: AppEvent) -> Option<Task> {
        match event {
            AppEvent::MoveUp => {
                self.explorer.move_up();
                None
            }
            AppEvent::MoveDown => {
                self.explorer.move_down();
                None
            }
            _ if self.pending => None,
            AppEvent::Escape | AppEvent::InputChar('q') => {
                self.mode = Mode::Chat;
                None
            }
            AppEvent::InputChar('c') => {
                self.clear_input();
                self.mode = Mode::CreateFileInput;
                None
            }
            AppEvent::InputChar('a') => {
                self.clear_input();
                self.mode = Mode::AiFilenameInput;
                None
            }
            AppEvent::Submit => self.open_selected_entry(),
            _ => None,
        }
    }

    fn open_selected_entry(&mut self) -> Option<Task> {
        let entry = self.explorer.selected()?.clone();
        let target = entry_target(&self.current_path, &entry);
        if entry.is_dir {
            return self.start(Task::ListDirectory(target));
        }
        self.push(
            Role::Info,
            format!("Reading file {} to modify...", target.display()),
        );
        self.start(Task::ReadFile {
            path: target,
            purpose: ReadPurpose::Modify,
        })
    }

    fn cancel_input(&mut self) {
        if !self.mode.is_input_collection() {
            return;
        }
        self.clear_input();
        self.mode = Mode::Explorer;
    }

    fn submit(&mut self) -> Option<Task> {
        if self.pending {
            return None;
        }
        let input = self.take_input();
        match mem::replace(&mut self.mode, Mode::Chat) {
            Mode::Chat | Mode::Explorer => self.submit_chat(input),
            Mode::CreateFileInput => {
                self.mode = Mode::CreateFileInput;
                if input.is_empty() {
                    return None;
                }
                self.start(Task::CreateFile(join_under(&self.current_path, &input)))
            }
            Mode::AiFilenameInput => {
                if input.is_empty() {
                    self.mode = Mode::AiFilenameInput;
                    return None;
                }
                let target = join_under(&self.current_path, &input);
                self.push(
                    Role::Info,
                    format!("File to create: {}", target.display()),
                );
                self.mode = Mode::AiPromptInput { target };
                None
            }
            Mode::AiPromptInput { target } => {
                if input.is_empty() {
                    self.mode = Mode::AiPromptInput { target };
                    return None;
                }
                let prompt = build_generation_prompt(&target, &input);
                self.push(Role::User, input);
                self.start(Task::Complete {
                    purpose: ModelPurpose::Generate { target },
                    prompt,
                })
            }
            Mode::AiModifyInput { path, original } => {
                if input.is_empty() {
                    self.mode = Mode::AiModifyInput { path, original };
                    return None;
                }
                let prompt = build_edit_prompt(&original, &input);
                self.push(Role::User, input);
                self.start(Task::Complete {
                    purpose: ModelPurpose::Modify { path },
                    prompt,
                })
            }
        }
    }

    fn submit_chat(&mut self, input: String) -> Option<Task> {
        if input.is_empty() {
            return None;
        }
        self.push(Role::User, input.clone());
        if let Some((name, args)) = parse_command_line(&input)
            && let Some(command) = self.commands.lookup(name)
        {
            tracing::info!(command = command.name, "running command");
            return self.run_command(command.action, &args);
        }
        self.start(Task::Complete {
            purpose: ModelPurpose::Reply,
            prompt: input,
        })
    }

    fn run_command(&mut self, action: CommandAction, args: &[&str]) -> Option<Task> {
        match action {
            CommandAction::Help => {
                let mut help = String::from("Available commands:");
                for command in self.commands.commands() {
                    help.push_str(&format!("\n  {:<15} {}", command.name, command.description));
                }
                self.push(Role::Info, help);
                self.push(Role::Info, EXPLORER_HELP);
                None
            }
            CommandAction::List => {
                let path = match args.first() {
                    Some(arg) => self.current_path.join(arg),
                    None => self.current_path.clone(),
                };
                self.start(Task::ListDirectory(path))
            }
            CommandAction::Read => {
                if args.is_empty() {
                    self.push(Role::Error, "usage: read <path>");
                    return None;
                }
                let path = self.current_path.join(args.join(" "));
                self.start(Task::ReadFile {
                    path,
                    purpose: ReadPurpose::Display,
                })
            }
            CommandAction::Exit => {
                self.push(Role::Info, "Goodbye!");
                self.quit();
                None
            }
        }
    }

    fn file_saved(&mut self, path: &Path) -> Option<Task> {
        tracing::info!(path = %path.display(), "file saved");
        self.push(
            Role::Info,
            format!("File created/modified: {}", path.display()),
        );
        self.clear_input();
        self.mode = Mode::Explorer;
        self.start(Task::ListDirectory(self.current_path.clone()))
    }

    fn fail(&mut self, err: SessionError) -> Option<Task> {
        tracing::warn!(error = %err, "task failed");
        self.push(Role::Error, err.to_string());
        self.mode = Mode::Chat;
        None
    }

    /// Marks `task` outstanding. Refuses while another task is pending.
    fn start(&mut self, task: Task) -> Option<Task> {
        if self.pending {
            tracing::warn!(task = task.kind(), "refusing to start a second task");
            return None;
        }
        self.pending = true;
        Some(task)
    }

    fn push(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.append(role, text);
        self.scroll_back = 0;
    }

    fn input_char(&mut self, c: char) {
        if self.input.chars().count() >= MAX_INPUT_CHARS {
            return;
        }
        let byte_idx = char_to_byte_idx(&self.input, self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor = self.cursor.saturating_add(1);
    }

    fn backspace_input(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_idx(&self.input, self.cursor - 1);
        let end = char_to_byte_idx(&self.input, self.cursor);
        self.input.drain(start..end);
        self.cursor -= 1;
    }

    fn take_input(&mut self) -> String {
        let input = self.input.trim().to_string();
        self.clear_input();
        input
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "../tests/unit/app_tests.rs"]
mod tests;

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::SessionError;

pub const PARENT_ENTRY: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn parent() -> Self {
        Self {
            name: PARENT_ENTRY.to_string(),
            is_dir: true,
        }
    }

    pub fn is_parent(&self) -> bool {
        self.name == PARENT_ENTRY
    }
}

/// Lists `path` in enumeration order, with a synthetic `..` entry first.
pub fn list_directory(path: &Path) -> Result<Vec<Entry>, SessionError> {
    let read_dir = fs::read_dir(path).map_err(|err| SessionError::io(path, err))?;
    let mut entries = vec![Entry::parent()];
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|err| SessionError::io(path, err))?;
        let is_dir = dir_entry
            .file_type()
            .map(|file_type| file_type.is_dir())
            .unwrap_or(false);
        entries.push(Entry {
            name: dir_entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    Ok(entries)
}

/// Path an entry of the listing at `current` points to.
pub fn entry_target(current: &Path, entry: &Entry) -> PathBuf {
    if entry.is_parent() {
        parent_of(current)
    } else {
        current.join(&entry.name)
    }
}

/// Lexical parent when the path ends in a normal component, `path/..` otherwise.
pub fn parent_of(path: &Path) -> PathBuf {
    if path.file_name().is_none() {
        return path.join(PARENT_ENTRY);
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Joins a typed name under `base`. Root and prefix components are dropped,
/// so `/notes.txt` lands at `base/notes.txt`.
pub fn join_under(base: &Path, name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::ParentDir => path.push(PARENT_ENTRY),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    path
}

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    entries: Vec<Entry>,
    selected: usize,
}

impl ExplorerState {
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.selected = 0;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/explorer_tests.rs"]
mod tests;

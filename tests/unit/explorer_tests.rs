use super::*;
use crate::test_support::TempDirGuard;

fn names(entries: &[Entry]) -> Vec<String> {
    let mut names = entries
        .iter()
        .map(|entry| entry.name.clone())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn listing_starts_with_parent_entry() {
    let dir = TempDirGuard::new("explorer-parent");
    dir.write("a.txt", "a");
    std::fs::create_dir(dir.path().join("sub")).expect("create sub dir");

    let entries = list_directory(dir.path()).expect("listing should succeed");
    assert_eq!(entries[0], Entry::parent());
    assert_eq!(entries.len(), 3);
    assert!(entries.contains(&Entry {
        name: "a.txt".to_string(),
        is_dir: false,
    }));
    assert!(entries.contains(&Entry {
        name: "sub".to_string(),
        is_dir: true,
    }));
}

#[test]
fn empty_directory_lists_only_parent() {
    let dir = TempDirGuard::new("explorer-empty");
    let entries = list_directory(dir.path()).expect("listing should succeed");
    assert_eq!(entries, vec![Entry::parent()]);
}

#[test]
fn relisting_unchanged_directory_yields_same_entries() {
    let dir = TempDirGuard::new("explorer-relist");
    dir.write("one.rs", "");
    dir.write("two.rs", "");

    let first = list_directory(dir.path()).expect("first listing");
    let second = list_directory(dir.path()).expect("second listing");
    assert_eq!(names(&first), names(&second));
}

#[test]
fn listing_missing_directory_reports_io_failure() {
    let dir = TempDirGuard::new("explorer-missing");
    let missing = dir.path().join("nope");
    let err = list_directory(&missing).expect_err("listing should fail");
    assert!(matches!(err, SessionError::Io { .. }));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn parent_of_normal_path_is_lexical_parent() {
    assert_eq!(parent_of(Path::new("/home/user")), PathBuf::from("/home"));
    assert_eq!(parent_of(Path::new("src/app")), PathBuf::from("src"));
    assert_eq!(parent_of(Path::new("src")), PathBuf::from("."));
}

#[test]
fn parent_of_dot_and_root_appends_parent_component() {
    assert_eq!(parent_of(Path::new(".")), PathBuf::from("./.."));
    assert_eq!(parent_of(Path::new("./..")), PathBuf::from("./../.."));
    assert_eq!(parent_of(Path::new("/")), PathBuf::from("/.."));
}

#[test]
fn entry_target_joins_names_and_resolves_parent() {
    let file = Entry {
        name: "notes.txt".to_string(),
        is_dir: false,
    };
    assert_eq!(
        entry_target(Path::new("docs"), &file),
        PathBuf::from("docs/notes.txt")
    );
    assert_eq!(
        entry_target(Path::new("docs"), &Entry::parent()),
        PathBuf::from(".")
    );
}

#[test]
fn selection_is_bounded_and_resets_on_refresh() {
    let mut state = ExplorerState::default();
    assert!(state.selected().is_none());
    state.replace_entries(vec![
        Entry::parent(),
        Entry {
            name: "a".to_string(),
            is_dir: false,
        },
    ]);
    state.move_up();
    assert_eq!(state.selected_index(), 0);
    state.move_down();
    state.move_down();
    assert_eq!(state.selected_index(), 1);
    assert_eq!(state.selected().map(|e| e.name.as_str()), Some("a"));

    state.replace_entries(vec![Entry::parent()]);
    assert_eq!(state.selected_index(), 0);
}

#[test]
fn join_under_keeps_typed_names_below_the_base() {
    let base = Path::new("/work/project");
    assert_eq!(
        join_under(base, "notes.txt"),
        PathBuf::from("/work/project/notes.txt")
    );
    assert_eq!(
        join_under(base, "/tmp/x"),
        PathBuf::from("/work/project/tmp/x")
    );
    assert_eq!(
        join_under(base, "./src/./lib.rs"),
        PathBuf::from("/work/project/src/lib.rs")
    );
    assert_eq!(
        join_under(base, "../sibling.txt"),
        PathBuf::from("/work/project/../sibling.txt")
    );
}

//! File IO for the dispatcher and the binary.
//!
//! The engine never reads or writes files itself. Text is read here with
//! CRLF line endings folded to LF and written back with LF.

use core_state::{EditorState, Locator, StatusMsg};
use std::io;
use std::path::Path;

/// Result of attempting to open a file.
#[derive(Debug, PartialEq, Eq)]
pub enum OpenFileResult {
    Success,
    Error, // logged; the status line already says why
}

/// Result of a write attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteFileResult {
    Success,
    NoFilename,
    Error,
}

/// Read a document by name, normalizing line endings. Usable directly as a
/// timeline loader.
pub fn read_document(name: &str) -> io::Result<String> {
    let content = std::fs::read_to_string(name)?;
    Ok(normalize_line_endings(&content))
}

fn normalize_line_endings(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text.to_string()
    }
}

/// Load `path` into the editor with the cursor at the start of the document.
pub fn open_file(state: &mut EditorState, path: &Path) -> OpenFileResult {
    let name = path.to_string_lossy();
    match read_document(&name) {
        Ok(text) => {
            state.load_document(&name, &text, &Locator::Position(0));
            OpenFileResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_open_error");
            state.set_status_msg(StatusMsg::error(format!("Could not open {name}: {e}")));
            OpenFileResult::Error
        }
    }
}

/// Write the document to `target`, or to the file it was loaded from. Only
/// a write to the document's own file marks it saved.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> WriteFileResult {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None if state.document_name().is_empty() => return WriteFileResult::NoFilename,
        None => Path::new(state.document_name()).to_path_buf(),
    };
    match std::fs::write(&path, state.buffer().text()) {
        Ok(()) => {
            if target.is_none() {
                state.mark_saved();
            }
            tracing::info!(target: "io", "file_written");
            WriteFileResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_write_error");
            WriteFileResult::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Settings;
    use pretty_assertions::assert_eq;

    #[test]
    fn open_file_normalizes_line_endings() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "line1\r\nline2\nline3\r\n").unwrap();
        }
        let mut state = EditorState::new(Settings::default());
        assert_eq!(open_file(&mut state, &path), OpenFileResult::Success);
        assert_eq!(state.buffer().text(), "line1\nline2\nline3\n");
        assert_eq!(state.document_name(), path.to_string_lossy());
        assert!(!state.buffer().has_unsaved_changes());
    }

    #[test]
    fn open_missing_file_sets_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = EditorState::new(Settings::default());
        let res = open_file(&mut state, &dir.path().join("missing.txt"));
        assert_eq!(res, OpenFileResult::Error);
        assert!(state.status_msg().is_some());
    }

    #[test]
    fn write_file_marks_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "a\nb\n").unwrap();
        let mut state = EditorState::new(Settings::default());
        open_file(&mut state, &path);
        state.insert_text("x");
        assert!(state.buffer().has_unsaved_changes());

        assert_eq!(write_file(&mut state, None), WriteFileResult::Success);
        assert!(!state.buffer().has_unsaved_changes());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xa\nb\n");
    }

    #[test]
    fn write_elsewhere_keeps_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = EditorState::new(Settings::default());
        state.load_document("doc.txt", "", &Locator::Position(0));
        state.insert_text("x");
        let other = dir.path().join("copy.txt");
        assert_eq!(write_file(&mut state, Some(&other)), WriteFileResult::Success);
        assert!(state.buffer().has_unsaved_changes());
        assert_eq!(std::fs::read_to_string(&other).unwrap(), "x");
    }

    #[test]
    fn write_file_no_filename() {
        let mut state = EditorState::new(Settings::default());
        state.insert_text("x");
        assert_eq!(write_file(&mut state, None), WriteFileResult::NoFilename);
        assert!(state.buffer().has_unsaved_changes());
    }
}

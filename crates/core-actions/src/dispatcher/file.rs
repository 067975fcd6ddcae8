//! Saving and moving through the document timeline.

use super::DispatchResult;
use crate::Action;
use crate::io_ops::{self, WriteFileResult};
use core_state::{EditorState, StatusMsg};
use tracing::debug;

pub(crate) fn handle_file_action(action: &Action, state: &mut EditorState) -> DispatchResult {
    match action {
        Action::SaveDocument => {
            let msg = match io_ops::write_file(state, None) {
                WriteFileResult::Success => {
                    StatusMsg::success(format!("Saved {}", state.document_name()))
                }
                WriteFileResult::NoFilename => StatusMsg::error("No file name to save to"),
                WriteFileResult::Error => {
                    StatusMsg::error(format!("Could not save {}", state.document_name()))
                }
            };
            state.set_status_msg(msg);
        }
        Action::OpenPrevDocument => state.load_prev_document(io_ops::read_document),
        Action::OpenNextDocument => state.load_next_document(io_ops::read_document),
        _ => return DispatchResult::clean(),
    }
    debug!(target: "actions.dispatch", ?action, "file_action");
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch, io_ops};
    use core_state::{EditorState, Settings, StatusMsg};
    use pretty_assertions::assert_eq;

    #[test]
    fn save_reports_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abc").unwrap();
        let mut st = EditorState::new(Settings::default());
        io_ops::open_file(&mut st, &path);
        dispatch(&mut st, &Action::JoinLines);
        dispatch(&mut st, &Action::SaveDocument);
        assert_eq!(
            st.status_msg(),
            Some(&StatusMsg::success(format!("Saved {}", path.display())))
        );
    }

    #[test]
    fn timeline_moves_between_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "one\ntwo").unwrap();
        std::fs::write(&second, "three").unwrap();

        let mut st = EditorState::new(Settings::default());
        io_ops::open_file(&mut st, &first);
        dispatch(&mut st, &Action::CursorDown { count: 1 });
        io_ops::open_file(&mut st, &second);
        assert_eq!(st.buffer().text(), "three");

        dispatch(&mut st, &Action::OpenPrevDocument);
        assert_eq!(st.buffer().text(), "one\ntwo");
        assert_eq!(st.buffer().cursor_position(), 4);
        dispatch(&mut st, &Action::OpenNextDocument);
        assert_eq!(st.buffer().text(), "three");
    }

    #[test]
    fn no_next_document_is_an_error() {
        let mut st = EditorState::new(Settings::default());
        dispatch(&mut st, &Action::OpenNextDocument);
        assert_eq!(
            st.status_msg(),
            Some(&StatusMsg::error("No next document to open"))
        );
    }
}

//! Incremental search keystrokes.
//!
//! Query editing reaches only the user macro; starting a search and jumping
//! between matches are recorded like any normal mode command.

use super::Recording;
use crate::Action;
use core_state::Command;

pub(crate) fn command_for(action: &Action) -> Option<(Command, Recording)> {
    const JUMP: Recording = Recording::NormalOrVisual { last_action: false };

    let planned = match *action {
        Action::StartSearch {
            direction,
            complete_action,
        } => (
            Command::StartSearch {
                direction,
                complete_action,
            },
            JUMP,
        ),
        Action::FindNextMatch => (Command::FindNextMatch { reverse: false }, JUMP),
        Action::FindPrevMatch => (Command::FindNextMatch { reverse: true }, JUMP),
        Action::SearchWordUnderCursor {
            direction,
            complete_action,
            count,
        } => (
            Command::SearchWordUnderCursor {
                direction,
                complete_action,
                count,
            },
            JUMP,
        ),
        Action::AppendRuneToSearchQuery(c) => {
            (Command::AppendRuneToSearchQuery(c), Recording::Search)
        }
        Action::DeleteRuneFromSearchQuery => (Command::DeleteRuneFromSearchQuery, Recording::Search),
        Action::CommitSearch => (Command::CompleteSearch { commit: true }, Recording::Search),
        Action::AbortSearch => (Command::CompleteSearch { commit: false }, Recording::Search),
        Action::SearchHistoryPrev => (Command::SetSearchQueryToPrevInHistory, Recording::Search),
        Action::SearchHistoryNext => (Command::SetSearchQueryToNextInHistory, Recording::Search),
        _ => return None,
    };
    Some(planned)
}

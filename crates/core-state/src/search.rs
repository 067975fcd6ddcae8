//! Incremental text search.
//!
//! Every change to the query reruns it from the cursor so the match tracks
//! each keystroke. The match is a cache of `(query, direction, cursor)` and
//! is dropped when the search completes.

use crate::EditorState;
use crate::clipboard::ClipboardPage;
use crate::command::Command;
use crate::cursor::CursorState;
use crate::locator::{Locator, RangeLocator};
use crate::mode::InputMode;
use core_text::locate;
use core_text::search::{parse_query, search_backward, search_forward};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    pub fn reverse(self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Backward,
            SearchDirection::Backward => SearchDirection::Forward,
        }
    }
}

/// What a committed search does with its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCompleteAction {
    #[default]
    MoveCursorToMatch,
    DeleteToMatch {
        page: ClipboardPage,
    },
    /// Delete to the match, then continue in insert mode.
    ChangeToMatch {
        page: ClipboardPage,
    },
    CopyToMatch {
        page: ClipboardPage,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

impl SearchMatch {
    pub fn contains_position(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SearchState {
    pub(crate) query: String,
    pub(crate) direction: SearchDirection,
    pub(crate) complete_action: SearchCompleteAction,
    pub(crate) prev_query: String,
    pub(crate) prev_direction: SearchDirection,
    pub(crate) history: Vec<String>,
    pub(crate) history_idx: usize,
    pub(crate) current_match: Option<SearchMatch>,
}

impl SearchState {
    // Appends a query unless it repeats the newest entry; drops the oldest
    // entries beyond `limit`.
    fn push_history(&mut self, query: &str, limit: usize) {
        if query.is_empty() || self.history.last().is_some_and(|q| q == query) {
            return;
        }
        self.history.push(query.to_string());
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }
}

impl EditorState {
    pub fn start_search(&mut self, direction: SearchDirection, complete_action: SearchCompleteAction) {
        let search = &mut self.buffer.search;
        let history = std::mem::take(&mut search.history);
        *search = SearchState {
            direction,
            complete_action,
            prev_query: std::mem::take(&mut search.query),
            prev_direction: search.direction,
            history_idx: history.len(),
            history,
            ..SearchState::default()
        };
        self.set_input_mode(InputMode::Search);
    }

    /// Leave search mode. A commit runs the complete action on the current
    /// match and records the query in history; an abort restores the query
    /// that was active before the search started.
    pub fn complete_search(&mut self, commit: bool) {
        let limit = self.settings.search_history_limit;
        let search = &mut self.buffer.search;
        if commit {
            let query = search.query.clone();
            search.push_history(&query, limit);
        }

        // Before the complete action, which may switch to insert mode.
        self.set_input_mode(InputMode::Normal);

        let search = &mut self.buffer.search;
        if commit {
            if let Some(m) = search.current_match {
                let (query, direction, action) =
                    (search.query.clone(), search.direction, search.complete_action);
                self.run_search_complete_action(action, &query, direction, m);
            }
        } else {
            let history = std::mem::take(&mut search.history);
            *search = SearchState {
                query: std::mem::take(&mut search.prev_query),
                direction: search.prev_direction,
                history_idx: history.len(),
                history,
                ..SearchState::default()
            };
        }
        debug!(target: "state.search", commit, "search_completed");

        self.buffer.search.current_match = None;
        self.scroll_view_to_cursor();
    }

    pub fn append_rune_to_search_query(&mut self, c: char) {
        let mut query = self.buffer.search.query.clone();
        query.push(c);
        self.run_search_query(query);
        self.buffer.search.history_idx = self.buffer.search.history.len();
    }

    /// Remove the last char of the query. On an empty query this aborts the
    /// search.
    pub fn delete_rune_from_search_query(&mut self) {
        let mut query = self.buffer.search.query.clone();
        if query.pop().is_none() {
            self.complete_search(false);
            return;
        }
        self.run_search_query(query);
        self.buffer.search.history_idx = self.buffer.search.history.len();
    }

    pub fn set_search_query_to_prev_in_history(&mut self) {
        let search = &mut self.buffer.search;
        if search.history_idx == 0 {
            return;
        }
        search.history_idx -= 1;
        let query = search.history[search.history_idx].clone();
        self.run_search_query(query);
    }

    pub fn set_search_query_to_next_in_history(&mut self) {
        let search = &mut self.buffer.search;
        if search.history_idx + 1 >= search.history.len() {
            return;
        }
        search.history_idx += 1;
        let query = search.history[search.history_idx].clone();
        self.run_search_query(query);
    }

    /// Search for the word object under the cursor, case-sensitively, and
    /// commit at once. On whitespace this is the word after it; `count`
    /// extends the query over that many words. Does nothing when there is no
    /// word to search for.
    pub fn search_word_under_cursor(
        &mut self,
        direction: SearchDirection,
        complete_action: SearchCompleteAction,
        count: usize,
    ) {
        let doc = &self.buffer.document;
        let (start, end) = locate::word_object(doc, self.buffer.cursor.position, count);
        let text = doc.slice_to_string(start, end);
        let word = text.trim();
        if word.is_empty() {
            debug!(target: "state.search", "no_word_under_cursor");
            return;
        }
        let query = format!("{word}\\C");
        self.start_search(direction, complete_action);
        self.run_search_query(query);
        self.complete_search(true);
    }

    fn run_search_query(&mut self, query: String) {
        let parsed = parse_query(&query);
        let buffer = &mut self.buffer;
        let cursor = buffer.cursor.position;
        let found = match buffer.search.direction {
            SearchDirection::Forward => search_forward(&buffer.document, &parsed, cursor),
            SearchDirection::Backward => search_backward(&buffer.document, &parsed, cursor),
        };
        buffer.search.query = query;
        match found {
            Some(start) => {
                buffer.search.current_match = Some(SearchMatch {
                    start,
                    end: start + parsed.match_len(),
                });
                self.scroll_view_to_position(start);
            }
            None => {
                buffer.search.current_match = None;
                self.scroll_view_to_cursor();
            }
        }
    }

    /// Jump to the next match of the current query. `reverse` searches
    /// against the query's direction.
    pub fn find_next_match(&mut self, reverse: bool) {
        let buffer = &mut self.buffer;
        let parsed = parse_query(&buffer.search.query);
        let direction = if reverse {
            buffer.search.direction.reverse()
        } else {
            buffer.search.direction
        };
        let cursor = buffer.cursor.position;
        let found = match direction {
            SearchDirection::Forward => search_forward(&buffer.document, &parsed, cursor),
            SearchDirection::Backward => search_backward(&buffer.document, &parsed, cursor),
        };
        if let Some(pos) = found {
            buffer.cursor = CursorState::at(pos);
        }
    }

    fn run_search_complete_action(
        &mut self,
        action: SearchCompleteAction,
        query: &str,
        direction: SearchDirection,
        m: SearchMatch,
    ) {
        match action {
            SearchCompleteAction::MoveCursorToMatch => {
                self.buffer.cursor = CursorState::at(m.start);
            }
            SearchCompleteAction::DeleteToMatch { page } => {
                self.delete_to_search_match(direction, m, page);
                self.replay_search_in_last_action_macro(query, direction, action);
            }
            SearchCompleteAction::ChangeToMatch { page } => {
                self.delete_to_search_match(direction, m, page);
                self.set_input_mode(InputMode::Insert);
                self.replay_search_in_last_action_macro(query, direction, action);
            }
            SearchCompleteAction::CopyToMatch { page } => {
                // A wrapped search yields an empty range, which copies nothing.
                let cursor = self.buffer.cursor.position;
                let (start, end) = match direction {
                    SearchDirection::Forward => (cursor, m.start),
                    SearchDirection::Backward => (m.end, cursor),
                };
                self.copy_range(page, &RangeLocator::Span { start, end });
            }
        }
    }

    fn delete_to_search_match(&mut self, direction: SearchDirection, m: SearchMatch, page: ClipboardPage) {
        let loc = Locator::SearchMatchBoundary {
            direction,
            start: m.start,
            end: m.end,
        };
        self.delete_to_pos(&loc, page);
    }

    // Repeating the action reruns the original query, even if the user has
    // searched for something else since.
    fn replay_search_in_last_action_macro(
        &mut self,
        query: &str,
        direction: SearchDirection,
        complete_action: SearchCompleteAction,
    ) {
        if self.macros.is_replaying_last {
            return;
        }
        self.clear_last_action_macro();
        self.add_to_last_action_macro(Command::StartSearch {
            direction,
            complete_action,
        });
        for c in query.chars() {
            self.add_to_last_action_macro(Command::AppendRuneToSearchQuery(c));
        }
        self.add_to_last_action_macro(Command::CompleteSearch { commit: true });
    }
}

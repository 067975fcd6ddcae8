//! History of documents loaded into the editor.
//!
//! Loading a document pushes the location being left onto the past stack
//! and forgets any future. Moving backward or forward swaps the current
//! location between the two stacks, like browser navigation.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineState {
    pub name: String,
    pub line: usize,
    pub col: usize,
}

impl TimelineState {
    /// An unnamed location marks either end of the timeline.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileTimeline {
    past: Vec<TimelineState>,
    future: Vec<TimelineState>,
}

impl FileTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transition_from(&mut self, from: TimelineState) {
        self.future.clear();
        self.past.push(from);
    }

    pub fn transition_backward_from(&mut self, from: TimelineState) {
        if self.past.pop().is_some() {
            self.future.push(from);
        }
    }

    pub fn transition_forward_from(&mut self, from: TimelineState) {
        if self.future.pop().is_some() {
            self.past.push(from);
        }
    }

    pub fn peek_backward(&self) -> Option<&TimelineState> {
        self.past.last()
    }

    pub fn peek_forward(&self) -> Option<&TimelineState> {
        self.future.last()
    }
}

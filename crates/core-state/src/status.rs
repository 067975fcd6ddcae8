//! Status bar messages.

use crate::EditorState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMsg {
    pub style: StatusStyle,
    pub text: String,
}

impl StatusMsg {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Error,
            text: text.into(),
        }
    }
}

impl EditorState {
    pub fn set_status_msg(&mut self, msg: StatusMsg) {
        self.status = Some(msg);
    }

    pub fn clear_status_msg(&mut self) {
        self.status = None;
    }
}

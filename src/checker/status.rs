//! Check outcome types

use serde::{Deserialize, Serialize};

/// Result status of a check execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    /// The check passed
    Ok,
    /// The check found a problem
    Ko,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Ko => "KO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(CheckStatus::Ok),
            "KO" => Some(CheckStatus::Ko),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one check execution.
///
/// The message is empty exactly when the status is OK.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckOutcome {
    /// A passing outcome with an empty message
    pub fn ok() -> Self {
        Self {
            status: CheckStatus::Ok,
            message: String::new(),
        }
    }

    /// A failing outcome with a diagnostic message
    pub fn ko(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ko,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

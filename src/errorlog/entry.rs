//! Error log entry structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single error log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// When the error was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    /// The component that reported it (e.g. "rollover", "cli")
    pub component: String,

    /// The error text as surfaced to the caller
    pub message: String,
}

impl ErrorEntry {
    /// Create an entry stamped with the current time
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let entry = ErrorEntry::new("rollover", "something failed");
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: ErrorEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.component, "rollover");
        assert_eq!(parsed.message, "something failed");
    }
}

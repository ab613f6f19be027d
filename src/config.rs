//! Engine configuration.
//!
//! Settings that shape the output but are not part of a single request:
//! the status stamped on generated slots, how slot labels are built, and
//! the concurrency cap used when slots are staggered.
//!
//! Every field has a default, so a partial document deserializes:
//!
//! ```
//! use exam_slots::config::EngineConfig;
//!
//! let cfg: EngineConfig = serde_json::from_str(r#"{ "label_separator": " #" }"#).unwrap();
//! assert_eq!(cfg.label_separator, " #");
//! assert_eq!(cfg.label_start_index, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::SlotStatus;

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Status stamped on every generated slot.
    pub default_status: SlotStatus,
    /// Text between the slot-name prefix and the sequence index.
    pub label_separator: String,
    /// Index of the first slot in labels.
    pub label_start_index: usize,
    /// Rooms per slot when slots are staggered. `None` = `ceil(sqrt(rooms))`.
    pub max_rooms_per_slot: Option<usize>,
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            default_status: SlotStatus::Scheduled,
            label_separator: " - ".to_string(),
            label_start_index: 1,
            max_rooms_per_slot: None,
        }
    }

    /// Sets the status of generated slots.
    pub fn with_status(mut self, status: SlotStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Sets the label separator.
    pub fn with_label_separator(mut self, separator: impl Into<String>) -> Self {
        self.label_separator = separator.into();
        self
    }

    /// Sets the first label index.
    pub fn with_label_start_index(mut self, index: usize) -> Self {
        self.label_start_index = index;
        self
    }

    /// Caps the rooms per staggered slot. Zero is treated as one.
    pub fn with_max_rooms_per_slot(mut self, rooms: usize) -> Self {
        self.max_rooms_per_slot = Some(rooms.max(1));
        self
    }

    /// Label of the `seq`-th slot (0-based).
    pub fn slot_label(&self, prefix: &str, seq: usize) -> String {
        format!(
            "{prefix}{}{}",
            self.label_separator,
            self.label_start_index + seq
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

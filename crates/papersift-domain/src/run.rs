//! Batch run identifiers

use std::fmt;

/// Identifier for one batch run of the pipeline, based on UUIDv7
///
/// Stamped on log spans and saved output files so a result file can be traced
/// back to the log lines of the run that produced it. UUIDv7 sorts by creation
/// time, so run ids of successive runs are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(uuid::Uuid);

impl RunId {
    /// Generate a new run id
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_are_ordered() {
        let first = RunId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = RunId::new();
        assert!(first < second);
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = RunId::new().to_string();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }
}

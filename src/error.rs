use thiserror::Error;

/// Rejected user input. Reported back to the user, nothing is mutated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("section name must not be empty")]
    EmptySectionName,
    #[error("timer name must not be empty")]
    EmptyTimerName,
    #[error("duration must be at least one minute")]
    ZeroDuration,
}

/// Errors raised by the timer record store.
///
/// Lookup failures (`SectionNotFound`, `SectionIndex`, `TimerIndex`) mean the
/// caller is holding a stale view of the collection and should be surfaced
/// as-is rather than retried.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("section '{0}' not found")]
    SectionNotFound(String),

    #[error("section index {index} out of bounds ({len} sections)")]
    SectionIndex { index: usize, len: usize },

    #[error("timer index {index} out of bounds ({len} timers in section {section})")]
    TimerIndex {
        section: usize,
        index: usize,
        len: usize,
    },

    #[error("no section id left to assign (largest id is {})", u32::MAX)]
    SectionIdExhausted,

    #[error(transparent)]
    Gateway(#[from] anyhow::Error),
}

impl TimerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TimerError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_passes_through() {
        let err = TimerError::from(ValidationError::ZeroDuration);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "duration must be at least one minute");
    }

    #[test]
    fn test_index_message() {
        let err = TimerError::TimerIndex {
            section: 1,
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "timer index 4 out of bounds (2 timers in section 1)"
        );
    }
}

//! The catalogue of patterns that ship a runnable demo.

use crate::PatternError;
use core::fmt;
use std::str::FromStr;

/// Patterns with a runnable demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Composite,
    Visitor,
    Iterator,
    Singleton,
    Memento,
    State,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Composite,
        Pattern::Visitor,
        Pattern::Iterator,
        Pattern::Singleton,
        Pattern::Memento,
        Pattern::State,
    ];

    /// Lower-case names, in the order of [Pattern::ALL]
    pub const NAMES: [&'static str; 6] = ["composite", "visitor", "iterator", "singleton", "memento", "state"];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Composite => "composite",
            Pattern::Visitor => "visitor",
            Pattern::Iterator => "iterator",
            Pattern::Singleton => "singleton",
            Pattern::Memento => "memento",
            Pattern::State => "state",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PatternError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_names_parse_back() {
        for (pattern, name) in Pattern::ALL.into_iter().zip(Pattern::NAMES) {
            assert_eq!(pattern.to_string(), name);
            assert_eq!(name.parse::<Pattern>(), Ok(pattern));
        }
        assert_eq!("State".parse::<Pattern>(), Ok(Pattern::State));
        assert_eq!(
            "adapter".parse::<Pattern>(),
            Err(PatternError::UnknownPattern("adapter".to_string()))
        );
    }
}

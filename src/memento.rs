//! # Memento
//!
//! Saves and restores the state of an [Originator] without exposing it. A
//! [Memento] is a closed sum type; [Originator::restore] matches it exhaustively,
//! so there is no runtime type check that could silently ignore an unknown kind.
//!
//! The [Caretaker] only ever sees memento names. It borrows the originator for
//! each backup or undo instead of holding on to it.

use crate::PatternError;
use core::fmt;
use itertools::Itertools;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::VecDeque;
use tracing::{debug, info};
use tracing_attributes::instrument;

/// Length of the states generated by [Originator::do_something]
const STATE_LENGTH: usize = 30;

/// Snapshot of a non-empty originator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteMemento {
    state: String,
    revision: u64,
}

/// The closed set of snapshot kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memento {
    /// Full copy of the originator's state
    Snapshot(ConcreteMemento),
    /// Taken before the originator held any state
    Empty { revision: u64 },
}

impl Memento {
    pub fn revision(&self) -> u64 {
        match self {
            Memento::Snapshot(memento) => memento.revision,
            Memento::Empty { revision } => *revision,
        }
    }

    /// Metadata shown by the caretaker. Reveals only the beginning of the state.
    pub fn name(&self) -> String {
        match self {
            Memento::Snapshot(memento) => {
                let prefix: String = memento.state.chars().take(9).collect();
                format!("r{} / ({prefix}...)", memento.revision)
            }
            Memento::Empty { revision } => format!("r{revision} / (empty)"),
        }
    }
}

impl fmt::Display for Memento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Holds the state that is worth saving
#[derive(Debug, Default)]
pub struct Originator {
    state: Option<String>,
    /// Incremented on every state change
    revision: u64,
}

impl Originator {
    pub fn new(state: impl Into<String>) -> Self {
        Originator {
            state: Some(state.into()),
            revision: 0,
        }
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = Some(state.into());
        self.revision += 1;
    }

    /// Changes the state to a random string and returns it
    pub fn do_something(&mut self) -> &str {
        let state: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect();
        debug!("Originator: my state has changed to {state}");
        self.set_state(state);
        self.state.as_deref().unwrap_or_default()
    }

    pub fn save(&self) -> Memento {
        match &self.state {
            Some(state) => Memento::Snapshot(ConcreteMemento {
                state: state.clone(),
                revision: self.revision,
            }),
            None => Memento::Empty {
                revision: self.revision,
            },
        }
    }

    pub fn restore(&mut self, memento: Memento) {
        match memento {
            Memento::Snapshot(ConcreteMemento { state, revision }) => {
                self.state = Some(state);
                self.revision = revision;
            }
            Memento::Empty { revision } => {
                self.state = None;
                self.revision = revision;
            }
        }
        debug!("Originator: my state has changed to {:?}", self.state);
    }
}

/// Keeps the history of an originator's mementos, optionally bounded
#[derive(Debug, Default)]
pub struct Caretaker {
    history: VecDeque<Memento>,
    /// Oldest snapshots are dropped once the limit is reached
    limit: Option<usize>,
}

impl Caretaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` snapshots
    pub fn with_limit(limit: usize) -> Self {
        Caretaker {
            history: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Stores a snapshot of `originator`. Returns `false` if the caretaker keeps
    /// no history at all (a limit of zero).
    pub fn backup(&mut self, originator: &Originator) -> bool {
        if self.limit == Some(0) {
            debug!("Caretaker: history disabled, snapshot discarded");
            return false;
        }
        info!("Caretaker: Saving Originator's state...");
        if self.limit.is_some_and(|limit| self.history.len() >= limit) {
            if let Some(dropped) = self.history.pop_front() {
                debug!("Caretaker: dropping oldest snapshot {dropped}");
            }
        }
        self.history.push_back(originator.save());
        true
    }

    /// Restores the most recent snapshot and drops it from the history
    #[instrument(skip_all, level = "debug")]
    pub fn undo(&mut self, originator: &mut Originator) -> Result<(), PatternError> {
        let memento = self.history.pop_back().ok_or(PatternError::EmptyHistory)?;
        info!("Caretaker: Restoring state to: {}", memento.name());
        originator.restore(memento);
        Ok(())
    }

    /// Names of the stored mementos, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.iter().map(Memento::name).collect_vec()
    }
}

/// Runs the memento example and returns the lines to print
pub fn demo() -> Result<Vec<String>, PatternError> {
    let mut lines = vec![];
    let mut originator = Originator::new("Super-duper-super-puper-super.");
    let mut caretaker = Caretaker::new();

    for _ in 0..3 {
        caretaker.backup(&originator);
        let state = originator.do_something();
        lines.push(format!("Originator: My state has changed to: {state}"));
    }

    lines.push("Caretaker: Here's the list of mementos:".to_string());
    lines.extend(caretaker.history());

    lines.push("Client: Now, let's rollback!".to_string());
    caretaker.undo(&mut originator)?;
    lines.push(format!("Originator: My state is now: {}", originator.state().unwrap_or_default()));

    lines.push("Client: Once more!".to_string());
    caretaker.undo(&mut originator)?;
    lines.push(format!("Originator: My state is now: {}", originator.state().unwrap_or_default()));
    Ok(lines)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_undo_restores_previous_states() {
        let mut originator = Originator::new("initial");
        let mut caretaker = Caretaker::new();

        caretaker.backup(&originator);
        originator.set_state("second");
        caretaker.backup(&originator);
        let random = originator.do_something().to_string();
        assert_eq!(random.len(), STATE_LENGTH);
        assert_eq!(originator.revision(), 2);

        caretaker.undo(&mut originator).unwrap();
        assert_eq!(originator.state(), Some("second"));
        assert_eq!(originator.revision(), 1);

        caretaker.undo(&mut originator).unwrap();
        assert_eq!(originator.state(), Some("initial"));
        assert_eq!(originator.revision(), 0);

        assert_eq!(caretaker.undo(&mut originator), Err(PatternError::EmptyHistory));
        assert_eq!(originator.state(), Some("initial"));
    }

    #[test_log::test]
    fn test_empty_memento() {
        let mut originator = Originator::default();
        let mut caretaker = Caretaker::new();
        caretaker.backup(&originator);
        originator.set_state("something");

        assert_eq!(caretaker.history(), &["r0 / (empty)"]);
        caretaker.undo(&mut originator).unwrap();
        assert_eq!(originator.state(), None);
    }

    #[test_log::test]
    fn test_history_limit() {
        let mut originator = Originator::new("state-zero");
        let mut caretaker = Caretaker::with_limit(2);
        for state in ["state-one", "state-two", "state-three"] {
            caretaker.backup(&originator);
            originator.set_state(state);
        }

        assert_eq!(caretaker.len(), 2);
        assert_eq!(caretaker.history(), &["r1 / (state-one...)", "r2 / (state-two...)"]);
    }

    #[test_log::test]
    fn test_zero_limit_keeps_nothing() {
        let mut originator = Originator::new("kept");
        let mut caretaker = Caretaker::with_limit(0);

        assert!(!caretaker.backup(&originator));
        originator.set_state("changed");
        assert!(!caretaker.backup(&originator));

        assert!(caretaker.is_empty());
        assert_eq!(caretaker.undo(&mut originator), Err(PatternError::EmptyHistory));
        assert_eq!(originator.state(), Some("changed"));

        assert!(Caretaker::with_limit(1).backup(&originator));
    }

    #[test_log::test]
    fn test_demo() {
        let lines = demo().unwrap();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[4], "r0 / (Super-dup...)");
        assert_eq!(lines[8].len(), "Originator: My state is now: ".len() + STATE_LENGTH);
        // The first undo goes back to the state after the second change
        let second = lines[1].trim_start_matches("Originator: My state has changed to: ");
        assert_eq!(lines[8], format!("Originator: My state is now: {second}"));
    }
}

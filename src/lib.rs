//! ## About
//!
//! This crate contains textbook implementations of object patterns from the
//! "Gang of Four" catalogue. Each pattern lives in its own module, together with a
//! small client routine (`demo`) that builds the pattern's objects, exercises them,
//! and returns the lines it would print. The `patterns` binary runs these demos.
//!
//! * [composite] – part-whole hierarchies in an arena, with tree visitors
//! * [visitor] – double dispatch over a closed set of element variants
//! * [iterator] – single-use forward/reverse cursors over a collection
//! * [singleton] – exactly one, lazily created, process-wide instance
//! * [memento] – snapshots restored through a closed sum type
//! * [state] – behavior that changes with the context's state
//!
//! ## Naming conventions
//! * Traits – adjectives that indicate capability (`Visitable`) or the role in the pattern (`Visitor`, `State`)
//! * Structs – substantives that indicate entities implementing a behavior
//! * Methods – imperative forms with the exception of getters and factories, which
//!             use substantives (i.e., omit a `get_` prefix) much like the standard library.

pub mod composite;
pub mod errors;
pub mod iterator;
pub mod memento;
pub mod pattern;
pub mod singleton;
pub mod state;
pub mod visitor;

pub use composite::{Component, ComponentTree, NodeId, TreeVisitor};
pub use errors::PatternError;
pub use iterator::{Collection, Cursor, Direction};
pub use memento::{Caretaker, Memento, Originator};
pub use pattern::Pattern;
pub use singleton::Singleton;
pub use state::{Context, State, Transition};
pub use visitor::{apply_to, Element, Visitable, Visitor};

use tracing::info;

/// Runs the demo of a single pattern and returns its output lines. `reverse` flips
/// the direction of the iterator demo's first traversal.
pub fn demo(pattern: Pattern, reverse: bool) -> Result<Vec<String>, PatternError> {
    info!("Running the {pattern} demo");
    match pattern {
        Pattern::Composite => composite::demo(),
        Pattern::Visitor => Ok(visitor::demo()),
        Pattern::Iterator => Ok(iterator::demo(reverse)),
        Pattern::Singleton => Ok(singleton::demo()),
        Pattern::Memento => memento::demo(),
        Pattern::State => Ok(state::demo()),
    }
}

/// Runs the selected demos and returns the full output, one header per pattern
pub fn run(patterns: &[Pattern], reverse: bool) -> Result<Vec<String>, PatternError> {
    let mut lines = vec![];
    for &pattern in patterns {
        lines.push(format!("== {pattern} =="));
        lines.extend(demo(pattern, reverse)?);
    }
    Ok(lines)
}

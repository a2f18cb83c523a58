//! # State
//!
//! A [Context] changes its behavior when its internal state changes. States never
//! point back to the context that owns them. A request returns a [Transition] and
//! the context applies it.

use core::fmt;
use tracing::debug;

/// What a state asks its context to do after handling a request
pub enum Transition {
    Stay,
    To(Box<dyn State>),
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => f.write_str("Stay"),
            Transition::To(state) => write!(f, "To({})", state.name()),
        }
    }
}

pub trait State {
    fn name(&self) -> &'static str;

    fn handle1(&self) -> Transition;

    fn handle2(&self) -> Transition;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteStateA;

impl State for ConcreteStateA {
    fn name(&self) -> &'static str {
        "ConcreteStateA"
    }

    fn handle1(&self) -> Transition {
        debug!("ConcreteStateA handles request1 and wants to change the state of the context");
        Transition::To(Box::new(ConcreteStateB))
    }

    fn handle2(&self) -> Transition {
        debug!("ConcreteStateA handles request2");
        Transition::Stay
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteStateB;

impl State for ConcreteStateB {
    fn name(&self) -> &'static str {
        "ConcreteStateB"
    }

    fn handle1(&self) -> Transition {
        debug!("ConcreteStateB handles request1");
        Transition::Stay
    }

    fn handle2(&self) -> Transition {
        debug!("ConcreteStateB handles request2 and wants to change the state of the context");
        Transition::To(Box::new(ConcreteStateA))
    }
}

/// Owns the current state and delegates requests to it
pub struct Context {
    state: Box<dyn State>,
    /// Names of the visited states, starting with the initial one
    transitions: Vec<&'static str>,
}

impl Context {
    pub fn new(state: Box<dyn State>) -> Self {
        debug!("Context: Transition to {}", state.name());
        Context {
            transitions: vec![state.name()],
            state,
        }
    }

    pub fn transition_to(&mut self, state: Box<dyn State>) {
        debug!("Context: Transition to {}", state.name());
        self.transitions.push(state.name());
        self.state = state;
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::To(state) => self.transition_to(state),
        }
    }

    pub fn request1(&mut self) {
        let transition = self.state.handle1();
        self.apply(transition);
    }

    pub fn request2(&mut self) {
        let transition = self.state.handle2();
        self.apply(transition);
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn transitions(&self) -> &[&'static str] {
        &self.transitions
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state.name())
            .field("transitions", &self.transitions)
            .finish()
    }
}

/// Runs the state example and returns the lines to print
pub fn demo() -> Vec<String> {
    let mut context = Context::new(Box::new(ConcreteStateA));
    context.request1();
    context.request2();
    context.request2();

    let mut lines = vec![format!("Context: currently in {}", context.state_name())];
    lines.push(format!("Context: went through {}", context.transitions().join(" -> ")));
    lines
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_transitions() {
        let mut context = Context::new(Box::new(ConcreteStateA));

        context.request2();
        assert_eq!(context.state_name(), "ConcreteStateA");
        context.request1();
        assert_eq!(context.state_name(), "ConcreteStateB");
        context.request1();
        assert_eq!(context.state_name(), "ConcreteStateB");
        context.request2();
        assert_eq!(context.state_name(), "ConcreteStateA");

        assert_eq!(
            context.transitions(),
            &["ConcreteStateA", "ConcreteStateB", "ConcreteStateA"]
        );
    }

    #[test_log::test]
    fn test_demo() {
        assert_eq!(
            demo(),
            &[
                "Context: currently in ConcreteStateA",
                "Context: went through ConcreteStateA -> ConcreteStateB -> ConcreteStateA"
            ]
        );
    }
}

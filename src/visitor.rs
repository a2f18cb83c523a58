//! # Visitor
//!
//! Double dispatch over a closed set of element variants. [Visitable::accept] calls
//! the [Visitor] method that belongs to the concrete variant, so a visitor can rely
//! on the variant's exclusive methods.
//!
//! The trade-off is intentional: new operations are new [Visitor] implementations
//! and never touch the elements, but a new element variant changes the [Visitor]
//! trait and therefore every implementor.

use itertools::Itertools;
use tracing::trace;

/// First element variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentA;

impl ComponentA {
    /// Only available on this variant. Visitors can call it because they know the
    /// concrete type.
    pub fn exclusive_method(&self) -> &'static str {
        "A"
    }
}

/// Second element variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentB;

impl ComponentB {
    pub fn special_method(&self) -> &'static str {
        "B"
    }
}

/// The closed set of variants a visitor must handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    A(ComponentA),
    B(ComponentB),
}

/// One visit method per element variant.
pub trait Visitor {
    type Output;

    fn visit_component_a(&mut self, element: &ComponentA) -> Self::Output;
    fn visit_component_b(&mut self, element: &ComponentB) -> Self::Output;
}

/// Implemented by every element variant
pub trait Visitable {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output;
}

impl Visitable for ComponentA {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_component_a(self)
    }
}

impl Visitable for ComponentB {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_component_b(self)
    }
}

impl Visitable for Element {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Element::A(a) => a.accept(visitor),
            Element::B(b) => b.accept(visitor),
        }
    }
}

/// Applies `visitor` to each element in order. Returns one output per element.
pub fn apply_to<V, E>(visitor: &mut V, elements: &[E]) -> Vec<V::Output>
where
    V: Visitor,
    E: Visitable,
{
    elements
        .iter()
        .map(|element| {
            trace!("Accepting visitor at {}", std::any::type_name::<E>());
            element.accept(visitor)
        })
        .collect_vec()
}

/// Tags every element with its own name
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteVisitor1;

impl Visitor for ConcreteVisitor1 {
    type Output = String;

    fn visit_component_a(&mut self, element: &ComponentA) -> String {
        format!("{} + ConcreteVisitor1", element.exclusive_method())
    }

    fn visit_component_b(&mut self, element: &ComponentB) -> String {
        format!("{} + ConcreteVisitor1", element.special_method())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteVisitor2;

impl Visitor for ConcreteVisitor2 {
    type Output = String;

    fn visit_component_a(&mut self, element: &ComponentA) -> String {
        format!("{} + ConcreteVisitor2", element.exclusive_method())
    }

    fn visit_component_b(&mut self, element: &ComponentB) -> String {
        format!("{} + ConcreteVisitor2", element.special_method())
    }
}

/// Stateful visitor. Counts visits per variant. The counts belong to the instance,
/// create a new one to start over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VisitCounter {
    pub component_a: usize,
    pub component_b: usize,
}

impl VisitCounter {
    pub fn total(&self) -> usize {
        self.component_a + self.component_b
    }
}

impl Visitor for VisitCounter {
    type Output = usize;

    /// Returns the running count of the variant
    fn visit_component_a(&mut self, _element: &ComponentA) -> usize {
        self.component_a += 1;
        self.component_a
    }

    fn visit_component_b(&mut self, _element: &ComponentB) -> usize {
        self.component_b += 1;
        self.component_b
    }
}

/// Runs the visitor example and returns the lines to print
pub fn demo() -> Vec<String> {
    let components = vec![Element::A(ComponentA), Element::B(ComponentB)];

    let mut lines = vec!["The client code works with all visitors via the base Visitor interface:".to_string()];
    lines.extend(apply_to(&mut ConcreteVisitor1, &components));

    lines.push("It allows the same client code to work with different types of visitors:".to_string());
    lines.extend(apply_to(&mut ConcreteVisitor2, &components));

    let mut counter = VisitCounter::default();
    apply_to(&mut counter, &components);
    lines.push(format!("VisitCounter saw {} element(s)", counter.total()));
    lines
}

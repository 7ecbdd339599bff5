use std::time::Duration;

use super::graph::GraphModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    Link,
}

/// Presentation boundary. Drawn primitives are keyed by `(EntityKind, index)`
/// within one model generation; what the toggles visually do is up to the
/// implementation.
pub trait Renderer {
    /// Replaces the drawn primitives with the given model generation.
    fn rebuild(&mut self, model: &GraphModel);

    /// Hover emphasis toggle, applied immediately.
    fn set_view(&mut self, kind: EntityKind, index: usize, on: bool);

    /// Path-highlight toggle, applied after the given transition delay.
    fn set_selected(&mut self, kind: EntityKind, index: usize, on: bool, delay: Duration);
}

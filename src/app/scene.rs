use std::time::{Duration, Instant};

use crate::engine::{EntityKind, GraphModel, Renderer};

#[derive(Clone, Copy, Debug)]
struct PendingFlip {
    on: bool,
    at: Instant,
}

#[derive(Clone, Copy, Debug, Default)]
struct EntityFlags {
    view: bool,
    selected: bool,
    pending: Option<PendingFlip>,
}

/// Retained render flags per `(EntityKind, index)` for the current model
/// generation. Selection toggles carry a transition delay; each entity holds
/// a single pending flip, so a later schedule for the same entity overrides
/// an earlier one, matching how overlapping selection updates interleave.
#[derive(Default)]
pub struct Scene {
    nodes: Vec<EntityFlags>,
    links: Vec<EntityFlags>,
    generation: u64,
}

impl Scene {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_viewed(&self, kind: EntityKind, index: usize) -> bool {
        self.flags(kind, index).is_some_and(|flags| flags.view)
    }

    pub fn is_selected(&self, kind: EntityKind, index: usize) -> bool {
        self.flags(kind, index).is_some_and(|flags| flags.selected)
    }

    /// Applies every pending flip that has come due; returns whether any
    /// flips are still outstanding (the caller keeps repainting until none
    /// are).
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut outstanding = false;
        for flags in self.nodes.iter_mut().chain(self.links.iter_mut()) {
            if let Some(pending) = flags.pending {
                if pending.at <= now {
                    flags.selected = pending.on;
                    flags.pending = None;
                } else {
                    outstanding = true;
                }
            }
        }
        outstanding
    }

    fn flags(&self, kind: EntityKind, index: usize) -> Option<&EntityFlags> {
        match kind {
            EntityKind::Node => self.nodes.get(index),
            EntityKind::Link => self.links.get(index),
        }
    }

    fn flags_mut(&mut self, kind: EntityKind, index: usize) -> Option<&mut EntityFlags> {
        match kind {
            EntityKind::Node => self.nodes.get_mut(index),
            EntityKind::Link => self.links.get_mut(index),
        }
    }
}

impl Renderer for Scene {
    fn rebuild(&mut self, model: &GraphModel) {
        self.nodes.clear();
        self.nodes.resize(model.nodes.len(), EntityFlags::default());
        self.links.clear();
        self.links.resize(model.links.len(), EntityFlags::default());
        self.generation = self.generation.wrapping_add(1);
    }

    fn set_view(&mut self, kind: EntityKind, index: usize, on: bool) {
        if let Some(flags) = self.flags_mut(kind, index) {
            flags.view = on;
        }
    }

    fn set_selected(&mut self, kind: EntityKind, index: usize, on: bool, delay: Duration) {
        if let Some(flags) = self.flags_mut(kind, index) {
            flags.pending = Some(PendingFlip {
                on,
                at: Instant::now() + delay,
            });
        }
    }
}

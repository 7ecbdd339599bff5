use std::time::Duration;

use super::Engine;
use super::graph::GraphModel;
use super::renderer::{EntityKind, Renderer};

impl Engine {
    /// Applies a path query result: resolves the id pairs against the current
    /// link collection, staggers a deselect pass over the previous selection
    /// and a select pass over the new one, then replaces the query state
    /// wholesale.
    ///
    /// Pairs without a matching link are skipped (logged, never fatal). The
    /// two transition passes compute delays from their own positions, so they
    /// run concurrently rather than back to back.
    pub fn update_path(
        &mut self,
        expr: &str,
        path: &[(String, String)],
        renderer: &mut dyn Renderer,
    ) {
        let mut selected = Vec::with_capacity(path.len());
        for (a, b) in path {
            match self.model.find_link(a, b) {
                Some(index) => selected.push(index),
                None => log::warn!("no link matches path segment {a} - {b}; skipping"),
            }
        }

        let delay = self.config.transition_delay;
        toggle_selection(&self.model, &self.query.selected, false, delay, renderer);
        toggle_selection(&self.model, &selected, true, delay, renderer);

        self.query.expr = expr.to_owned();
        self.query.selected = selected;
    }
}

fn toggle_selection(
    model: &GraphModel,
    links: &[usize],
    on: bool,
    step: Duration,
    renderer: &mut dyn Renderer,
) {
    for (position, &link_index) in links.iter().enumerate() {
        let Some(link) = model.links.get(link_index) else {
            continue;
        };

        let delay = step * (position as u32 + 1);
        renderer.set_selected(EntityKind::Node, link.source, on, delay);
        renderer.set_selected(EntityKind::Node, link.target, on, delay);
        renderer.set_selected(EntityKind::Link, link_index, on, delay);
    }
}

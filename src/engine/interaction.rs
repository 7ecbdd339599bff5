use super::Engine;
use super::renderer::{EntityKind, Renderer};

impl Engine {
    pub fn hover_node(&mut self, index: usize, renderer: &mut dyn Renderer) {
        let Some(node) = self.model.nodes.get(index) else {
            return;
        };

        self.tooltip.show(node, &self.config);
        renderer.set_view(EntityKind::Node, index, true);
    }

    pub fn leave_node(&mut self, index: usize, renderer: &mut dyn Renderer) {
        self.tooltip.hide();
        renderer.set_view(EntityKind::Node, index, false);
    }

    /// Hovering a link emphasizes the link and both of its endpoints.
    pub fn hover_link(&mut self, index: usize, renderer: &mut dyn Renderer) {
        let Some(link) = self.model.links.get(index) else {
            return;
        };

        let (source, target) = (link.source, link.target);
        self.tooltip.show(link, &self.config);

        renderer.set_view(EntityKind::Link, index, true);
        renderer.set_view(EntityKind::Node, source, true);
        renderer.set_view(EntityKind::Node, target, true);
    }

    pub fn leave_link(&mut self, index: usize, renderer: &mut dyn Renderer) {
        self.tooltip.hide();

        let Some(link) = self.model.links.get(index) else {
            renderer.set_view(EntityKind::Link, index, false);
            return;
        };

        renderer.set_view(EntityKind::Link, index, false);
        renderer.set_view(EntityKind::Node, link.source, false);
        renderer.set_view(EntityKind::Node, link.target, false);
    }
}

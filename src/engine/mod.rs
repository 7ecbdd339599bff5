use std::time::Duration;

use anyhow::Result;

use crate::backend::RawTopology;

mod dispatch;
mod graph;
mod interaction;
mod renderer;
mod scale;
mod selection;
mod tooltip;

pub use self::graph::{Detail, GraphModel, Link, Node};
pub use self::renderer::{EntityKind, Renderer};
pub use self::scale::Range;
pub use self::tooltip::{AnchorSide, Tooltip, TooltipRow, TooltipView};

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub margin: f32,
    pub width: f32,
    pub height: f32,
    pub radius_range: Range,
    pub transition_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin: 15.0,
            width: 640.0,
            height: 640.0,
            radius_range: Range::new(5.0, 15.0),
            transition_delay: Duration::from_millis(250),
        }
    }
}

/// Last applied query text and the link indices of the highlighted path.
/// Replaced wholesale by `update_path`, never patched.
#[derive(Clone, Debug, Default)]
pub struct QueryState {
    pub expr: String,
    pub selected: Vec<usize>,
}

/// Graph state and interaction engine. Owns the current model generation and
/// the query selection; presentation happens behind the `Renderer` boundary.
pub struct Engine {
    pub config: EngineConfig,
    pub model: GraphModel,
    pub query: QueryState,
    pub tooltip: Tooltip,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            model: GraphModel::default(),
            query: QueryState::default(),
            tooltip: Tooltip::default(),
        }
    }

    /// Replaces the displayed topology wholesale. Indices from the previous
    /// generation become meaningless, so the query selection and tooltip are
    /// cleared rather than carried across.
    pub fn initialize_graph(
        &mut self,
        raw: RawTopology,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let model = GraphModel::build(raw, &self.config)?;

        self.model = model;
        self.query = QueryState::default();
        self.tooltip.hide();
        renderer.rebuild(&self.model);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::graph::tests::sample_topology;
    use crate::engine::renderer::recording::RecordingRenderer;
    use crate::backend::RawTopology;

    use super::*;

    #[test]
    fn initialize_graph_rebuilds_and_resets_interaction_state() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();

        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();
        engine.update_path(
            "P1",
            &[("A".to_owned(), "B".to_owned())],
            &mut renderer,
        );
        engine.hover_node(0, &mut renderer);
        assert!(!engine.query.selected.is_empty());
        assert!(engine.tooltip.view().is_some());

        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        assert_eq!(engine.query.expr, "");
        assert!(engine.query.selected.is_empty());
        assert!(engine.tooltip.view().is_none());
        assert_eq!(renderer.rebuilds.len(), 2);
    }

    #[test]
    fn failed_build_leaves_the_previous_generation_in_place() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        let mut broken = sample_topology();
        broken.links[0].target = 42;
        assert!(engine.initialize_graph(broken, &mut renderer).is_err());

        assert_eq!(engine.model.nodes.len(), 3);
        assert_eq!(renderer.rebuilds.len(), 1);
    }

    #[test]
    fn empty_topology_builds_an_empty_generation() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();

        engine
            .initialize_graph(RawTopology::default(), &mut renderer)
            .unwrap();

        assert!(engine.model.nodes.is_empty());
        assert!(engine.model.links.is_empty());
    }
}

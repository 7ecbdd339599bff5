use anyhow::Result;

use crate::backend::QueryResult;

use super::Engine;
use super::renderer::Renderer;

impl Engine {
    /// Routes backend query results: path results drive the selection, a
    /// topology result swaps the displayed graph. Entries are applied
    /// independently, in sequence order; a topology entry that fails to build
    /// does not block the entries after it, and the first failure is reported
    /// once the whole batch has been applied.
    pub fn dispatch(&mut self, results: Vec<QueryResult>, renderer: &mut dyn Renderer) -> Result<()> {
        let mut first_error = None;

        for result in results {
            match result {
                QueryResult::Path { expr, path } => self.update_path(&expr, &path, renderer),
                QueryResult::Topology { topology } => {
                    if let Err(error) = self.initialize_graph(topology, renderer) {
                        log::warn!("skipping unusable topology result: {error:#}");
                        first_error.get_or_insert(error);
                    }
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::EngineConfig;
    use crate::engine::graph::tests::{raw_link, raw_node, sample_topology};
    use crate::engine::renderer::recording::RecordingRenderer;
    use crate::backend::RawTopology;

    use super::*;

    #[test]
    fn path_result_updates_query_state() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        engine
            .dispatch(
                vec![QueryResult::Path {
                    expr: "P1".to_owned(),
                    path: vec![("A".to_owned(), "B".to_owned())],
                }],
                &mut renderer,
            )
            .unwrap();

        assert_eq!(engine.query.expr, "P1");
        assert_eq!(engine.query.selected, vec![0]);
    }

    #[test]
    fn topology_result_swaps_the_model_and_rebuilds_the_renderer() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        let replacement = RawTopology {
            nodes: vec![raw_node("X", 0.0, 0.0, 1.0), raw_node("Y", 1.0, 1.0, 2.0)],
            links: vec![raw_link(0, 1)],
        };

        engine
            .dispatch(
                vec![QueryResult::Topology {
                    topology: replacement,
                }],
                &mut renderer,
            )
            .unwrap();

        assert_eq!(engine.model.nodes.len(), 2);
        assert_eq!(engine.model.nodes[0].id, "X");
        assert_eq!(renderer.rebuilds.last(), Some(&(2, 1)));
    }

    #[test]
    fn results_apply_in_sequence_order() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        // A topology swap followed by a path over the new topology.
        let replacement = RawTopology {
            nodes: vec![raw_node("X", 0.0, 0.0, 1.0), raw_node("Y", 1.0, 1.0, 2.0)],
            links: vec![raw_link(0, 1)],
        };

        engine
            .dispatch(
                vec![
                    QueryResult::Topology {
                        topology: replacement,
                    },
                    QueryResult::Path {
                        expr: "P3".to_owned(),
                        path: vec![("Y".to_owned(), "X".to_owned())],
                    },
                ],
                &mut renderer,
            )
            .unwrap();

        assert_eq!(engine.query.expr, "P3");
        assert_eq!(engine.query.selected, vec![0]);
    }

    #[test]
    fn unusable_topology_entry_does_not_block_later_entries() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        engine
            .initialize_graph(sample_topology(), &mut renderer)
            .unwrap();

        let broken = RawTopology {
            nodes: vec![raw_node("X", 0.0, 0.0, 1.0)],
            links: vec![raw_link(0, 5)],
        };

        let result = engine.dispatch(
            vec![
                QueryResult::Topology { topology: broken },
                QueryResult::Path {
                    expr: "P4".to_owned(),
                    path: vec![("A".to_owned(), "B".to_owned())],
                },
            ],
            &mut renderer,
        );

        assert!(result.is_err());
        // The model the broken entry failed to replace is still the one the
        // path result selects against.
        assert_eq!(engine.model.nodes.len(), 3);
        assert_eq!(engine.query.expr, "P4");
        assert_eq!(engine.query.selected, vec![0]);
    }
}

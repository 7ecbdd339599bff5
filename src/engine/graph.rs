use std::collections::HashMap;

use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::backend::{RawNode, RawTopology};

use super::EngineConfig;
use super::scale::{Range, fit};

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub properties: HashMap<String, Value>,
    pub proplist: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub index: usize,
}

/// Link endpoints are stored as node indices of the generation that built
/// them; `GraphModel::source_of`/`target_of` resolve them back to nodes.
#[derive(Clone, Debug)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub label: String,
    pub properties: HashMap<String, Value>,
    pub proplist: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub index: usize,
}

/// Uniform detail access for the tooltip; both nodes and links expose it.
pub trait Detail {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn r(&self) -> f32;
    fn label(&self) -> &str;
    fn proplist(&self) -> &[String];
    fn property(&self, name: &str) -> Option<&Value>;
}

macro_rules! impl_detail {
    ($entity:ty) => {
        impl Detail for $entity {
            fn x(&self) -> f32 {
                self.x
            }

            fn y(&self) -> f32 {
                self.y
            }

            fn r(&self) -> f32 {
                self.r
            }

            fn label(&self) -> &str {
                &self.label
            }

            fn proplist(&self) -> &[String] {
                &self.proplist
            }

            fn property(&self, name: &str) -> Option<&Value> {
                self.properties.get(name)
            }
        }
    };
}

impl_detail!(Node);
impl_detail!(Link);

#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphModel {
    /// Builds one model generation from a raw topology payload: dense node
    /// indices in input order, a scaled layout, and links resolved from
    /// positional references into node indices with midpoints derived from
    /// the scaled endpoints.
    pub fn build(raw: RawTopology, config: &EngineConfig) -> Result<Self> {
        let mut nodes = raw
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| make_node(node, index))
            .collect::<Vec<_>>();

        scale_layout(&mut nodes, config);

        let mut links = Vec::with_capacity(raw.links.len());
        for (index, link) in raw.links.into_iter().enumerate() {
            for endpoint in [link.source, link.target] {
                if endpoint >= nodes.len() {
                    return Err(anyhow!(
                        "link {index} references node {endpoint} but the topology has {} nodes",
                        nodes.len()
                    ));
                }
            }

            let source = &nodes[link.source];
            let target = &nodes[link.target];

            links.push(Link {
                source: link.source,
                target: link.target,
                label: link.label,
                properties: link.properties,
                proplist: link.proplist,
                x: (source.x + target.x) / 2.0,
                y: (source.y + target.y) / 2.0,
                r: 0.0,
                index,
            });
        }

        Ok(Self { nodes, links })
    }

    pub fn source_of(&self, link: &Link) -> &Node {
        &self.nodes[link.source]
    }

    pub fn target_of(&self, link: &Link) -> &Node {
        &self.nodes[link.target]
    }

    /// First link whose endpoint ids match `(a, b)` in either direction.
    pub fn find_link(&self, a: &str, b: &str) -> Option<usize> {
        self.links
            .iter()
            .position(|link| self.link_matches(link, a, b))
    }

    pub fn link_matches(&self, link: &Link, a: &str, b: &str) -> bool {
        let source = self.source_of(link).id.as_str();
        let target = self.target_of(link).id.as_str();
        (source == a && target == b) || (source == b && target == a)
    }
}

fn make_node(raw: RawNode, index: usize) -> Node {
    let label = if raw.label.is_empty() {
        raw.id.clone()
    } else {
        raw.label
    };

    Node {
        id: raw.id,
        label,
        properties: raw.properties,
        proplist: raw.proplist,
        x: raw.x,
        y: raw.y,
        r: raw.r,
        index,
    }
}

fn scale_layout(nodes: &mut [Node], config: &EngineConfig) {
    let width_range = Range::new(config.margin, config.width - config.margin);
    let height_range = Range::new(config.margin, config.height - config.margin);
    let radius_range = config.radius_range;

    fit(nodes, |n| n.x, |n, x| n.x = x, width_range);
    fit(nodes, |n| n.y, |n, y| n.y = y, height_range);
    fit(nodes, |n| n.r, |n, r| n.r = r, radius_range);
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::backend::RawLink;

    use super::*;

    pub(crate) fn raw_node(id: &str, x: f32, y: f32, r: f32) -> RawNode {
        RawNode {
            id: id.to_owned(),
            x,
            y,
            r,
            ..RawNode::default()
        }
    }

    pub(crate) fn raw_link(source: usize, target: usize) -> RawLink {
        RawLink {
            source,
            target,
            label: String::new(),
            properties: HashMap::new(),
            proplist: Vec::new(),
        }
    }

    pub(crate) fn sample_topology() -> RawTopology {
        RawTopology {
            nodes: vec![
                raw_node("A", 0.0, 0.0, 1.0),
                raw_node("B", 10.0, 5.0, 2.0),
                raw_node("C", 20.0, 10.0, 4.0),
            ],
            links: vec![raw_link(0, 1), raw_link(1, 2)],
        }
    }

    #[test]
    fn build_assigns_dense_indices_and_resolves_endpoints() {
        let config = EngineConfig::default();
        let model = GraphModel::build(sample_topology(), &config).unwrap();

        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.links.len(), 2);
        for (expected, node) in model.nodes.iter().enumerate() {
            assert_eq!(node.index, expected);
        }
        for (expected, link) in model.links.iter().enumerate() {
            assert_eq!(link.index, expected);
            assert!(link.source < model.nodes.len());
            assert!(link.target < model.nodes.len());
        }

        let first = &model.links[0];
        assert_eq!(model.source_of(first).id, "A");
        assert_eq!(model.target_of(first).id, "B");
        assert_eq!(first.r, 0.0);
    }

    #[test]
    fn build_scales_layout_into_configured_ranges() {
        let config = EngineConfig::default();
        let model = GraphModel::build(sample_topology(), &config).unwrap();

        assert_eq!(model.nodes[0].x, config.margin);
        assert_eq!(model.nodes[2].x, config.width - config.margin);
        assert_eq!(model.nodes[0].y, config.margin);
        assert_eq!(model.nodes[2].y, config.height - config.margin);
        assert_eq!(model.nodes[0].r, config.radius_range.min);
        assert_eq!(model.nodes[2].r, config.radius_range.max);
    }

    #[test]
    fn link_midpoints_derive_from_scaled_endpoints() {
        let config = EngineConfig::default();
        let model = GraphModel::build(sample_topology(), &config).unwrap();

        let link = &model.links[0];
        let source = model.source_of(link);
        let target = model.target_of(link);
        assert_eq!(link.x, (source.x + target.x) / 2.0);
        assert_eq!(link.y, (source.y + target.y) / 2.0);
        // Midpoints land inside the scaled canvas, not on raw input coords.
        assert!(link.x >= config.margin);
    }

    #[test]
    fn out_of_range_link_reference_fails_fast() {
        let raw = RawTopology {
            nodes: vec![raw_node("A", 0.0, 0.0, 1.0)],
            links: vec![raw_link(0, 7)],
        };

        let error = GraphModel::build(raw, &EngineConfig::default()).unwrap_err();
        assert!(error.to_string().contains("references node 7"));
    }

    #[test]
    fn find_link_matches_either_direction_first_match_wins() {
        let config = EngineConfig::default();
        let model = GraphModel::build(sample_topology(), &config).unwrap();

        assert_eq!(model.find_link("A", "B"), Some(0));
        assert_eq!(model.find_link("B", "A"), Some(0));
        assert_eq!(model.find_link("C", "B"), Some(1));
        assert_eq!(model.find_link("A", "C"), None);
    }

    #[test]
    fn empty_label_falls_back_to_id() {
        let config = EngineConfig::default();
        let model = GraphModel::build(sample_topology(), &config).unwrap();
        assert_eq!(model.nodes[0].label, "A");
    }
}

use crate::util::format_value;

use super::EngineConfig;
use super::graph::Detail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorSide {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    /// 1-based display position, mirroring the proplist order.
    pub position: usize,
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct TooltipView {
    pub caption: String,
    pub side: AnchorSide,
    /// Distance from the anchor-side canvas edge.
    pub offset_x: f32,
    /// Offset from the canvas bottom edge; negative values sit above it.
    pub offset_y: f32,
    pub rows: Vec<TooltipRow>,
}

/// Single detail popup shown on hover. At most one tooltip exists at a time;
/// showing a new one replaces the old.
#[derive(Debug, Default)]
pub struct Tooltip {
    current: Option<TooltipView>,
}

impl Tooltip {
    pub fn show(&mut self, entity: &dyn Detail, config: &EngineConfig) {
        let mut side = AnchorSide::Left;
        let mut offset_x = entity.x() + entity.r();
        if offset_x > config.width / 2.0 {
            side = AnchorSide::Right;
            offset_x = config.width - offset_x;
        }

        let mut offset_y = entity.y() + entity.r() - config.height;
        if offset_y > -config.height / 2.0 {
            offset_y -= config.height / 3.0;
        }

        let rows = entity
            .proplist()
            .iter()
            .enumerate()
            .map(|(index, name)| TooltipRow {
                position: index + 1,
                name: name.clone(),
                value: entity
                    .property(name)
                    .map(format_value)
                    .unwrap_or_default(),
            })
            .collect();

        self.current = Some(TooltipView {
            caption: entity.label().to_owned(),
            side,
            offset_x,
            offset_y,
            rows,
        });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn view(&self) -> Option<&TooltipView> {
        self.current.as_ref()
    }
}

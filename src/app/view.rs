use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};

use crate::engine::{AnchorSide, EntityKind};

use super::Workspace;

const LINK_HOVER_DISTANCE: f32 = 4.0;
const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const NODE_BASE: Color32 = Color32::from_rgb(86, 156, 214);
const NODE_HOVER: Color32 = Color32::from_rgb(255, 164, 101);
const LINK_BASE: Color32 = Color32::from_rgb(110, 110, 110);
const LINK_HOVER: Color32 = Color32::from_rgb(241, 146, 94);
const SELECTED: Color32 = Color32::from_rgb(245, 206, 93);

fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

fn point_segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return (point - start).length();
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    (point - (start + segment * t)).length()
}

impl Workspace {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.canvas_size = rect.size();

        if self.engine.model.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Pick a topology to display",
                FontId::proportional(14.0),
                Color32::from_gray(180),
            );
            return;
        }

        if self.scene.tick(Instant::now()) {
            ui.ctx().request_repaint();
        }

        let origin = rect.left_top();
        let pointer = if response.hovered() {
            ui.input(|input| input.pointer.hover_pos())
        } else {
            None
        };
        let hovered = pointer.and_then(|pointer| self.hit_test(pointer, origin));

        if hovered != self.hovered {
            if let Some((kind, index)) = self.hovered.take() {
                match kind {
                    EntityKind::Node => self.engine.leave_node(index, &mut self.scene),
                    EntityKind::Link => self.engine.leave_link(index, &mut self.scene),
                }
            }
            if let Some((kind, index)) = hovered {
                match kind {
                    EntityKind::Node => self.engine.hover_node(index, &mut self.scene),
                    EntityKind::Link => self.engine.hover_link(index, &mut self.scene),
                }
            }
            self.hovered = hovered;
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let generation = self.scene.generation();
        let mut selection_animating = false;

        for link in &self.engine.model.links {
            let source = self.engine.model.source_of(link);
            let target = self.engine.model.target_of(link);
            let start = origin + vec2(source.x, source.y);
            let end = origin + vec2(target.x, target.y);

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("link-selected", generation, link.index)),
                self.scene.is_selected(EntityKind::Link, link.index),
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }

            let viewed = self.scene.is_viewed(EntityKind::Link, link.index);
            let base = if viewed { LINK_HOVER } else { LINK_BASE };
            let color = blend_color(base, SELECTED, selection_mix);
            let width = 1.4 + (selection_mix * 1.8) + if viewed { 0.8 } else { 0.0 };

            painter.line_segment([start, end], Stroke::new(width, color));
        }

        for node in &self.engine.model.nodes {
            let position = origin + vec2(node.x, node.y);

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-selected", generation, node.index)),
                self.scene.is_selected(EntityKind::Node, node.index),
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }

            let viewed = self.scene.is_viewed(EntityKind::Node, node.index);
            let base = if viewed { NODE_HOVER } else { NODE_BASE };
            let color = blend_color(base, SELECTED, selection_mix);

            painter.circle_filled(position, node.r, color);
            painter.circle_stroke(
                position,
                node.r,
                Stroke::new(
                    1.0 + (selection_mix * 1.2),
                    Color32::from_rgba_unmultiplied(15, 15, 15, 190),
                ),
            );

            if viewed || selection_mix > 0.5 {
                painter.text(
                    position + vec2(node.r + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    &node.label,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if selection_animating {
            ui.ctx().request_repaint();
        }

        self.draw_tooltip(ui, rect);
    }

    /// Nodes take hit priority over links; among candidates of one kind the
    /// closest to the pointer wins.
    fn hit_test(&self, pointer: Pos2, origin: Pos2) -> Option<(EntityKind, usize)> {
        let local = pointer - origin;

        let node_hit = self
            .engine
            .model
            .nodes
            .iter()
            .filter_map(|node| {
                let distance = (vec2(node.x, node.y) - local).length();
                (distance <= node.r.max(3.0)).then_some((node.index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((index, _)) = node_hit {
            return Some((EntityKind::Node, index));
        }

        let local_pos = Pos2::new(local.x, local.y);
        let link_hit = self
            .engine
            .model
            .links
            .iter()
            .filter_map(|link| {
                let source = self.engine.model.source_of(link);
                let target = self.engine.model.target_of(link);
                let distance = point_segment_distance(
                    local_pos,
                    Pos2::new(source.x, source.y),
                    Pos2::new(target.x, target.y),
                );
                (distance <= LINK_HOVER_DISTANCE).then_some((link.index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        link_hit.map(|(index, _)| (EntityKind::Link, index))
    }

    fn draw_tooltip(&self, ui: &Ui, rect: Rect) {
        let Some(view) = self.engine.tooltip.view() else {
            return;
        };

        let y = rect.bottom() + view.offset_y;
        let (position, pivot) = match view.side {
            AnchorSide::Left => (Pos2::new(rect.left() + view.offset_x, y), Align2::LEFT_TOP),
            AnchorSide::Right => (
                Pos2::new(rect.right() - view.offset_x, y),
                Align2::RIGHT_TOP,
            ),
        };

        egui::Area::new(ui.make_persistent_id("entity_tooltip"))
            .fixed_pos(position)
            .pivot(pivot)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if !view.caption.is_empty() {
                        ui.strong(&view.caption);
                    }

                    if !view.rows.is_empty() {
                        egui::Grid::new("entity_tooltip_rows")
                            .striped(true)
                            .min_col_width(24.0)
                            .show(ui, |ui| {
                                ui.strong("#");
                                ui.strong("Property");
                                ui.strong("Value");
                                ui.end_row();

                                for row in &view.rows {
                                    ui.label(row.position.to_string());
                                    ui.label(&row.name);
                                    ui.label(&row.value);
                                    ui.end_row();
                                }
                            });
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance_handles_interior_and_endpoints() {
        let start = Pos2::new(0.0, 0.0);
        let end = Pos2::new(10.0, 0.0);

        assert_eq!(point_segment_distance(Pos2::new(5.0, 3.0), start, end), 3.0);
        assert_eq!(
            point_segment_distance(Pos2::new(-4.0, 0.0), start, end),
            4.0
        );
        assert_eq!(
            point_segment_distance(Pos2::new(13.0, 4.0), start, end),
            5.0
        );
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        let point = Pos2::new(3.0, 4.0);
        let anchor = Pos2::new(0.0, 0.0);
        assert_eq!(point_segment_distance(point, anchor, anchor), 5.0);
    }

    #[test]
    fn blend_color_interpolates_endpoints() {
        let a = Color32::from_rgb(0, 100, 200);
        let b = Color32::from_rgb(200, 100, 0);
        assert_eq!(blend_color(a, b, 0.0), a);
        assert_eq!(blend_color(a, b, 1.0), b);
        let mid = blend_color(a, b, 0.5);
        assert_eq!(mid.r(), 100);
        assert_eq!(mid.b(), 100);
    }
}

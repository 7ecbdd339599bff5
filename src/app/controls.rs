use std::sync::Arc;

use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::backend::Backend;

use super::Workspace;

impl Workspace {
    pub(in crate::app) fn draw_top_bar(&mut self, ui: &mut Ui, backend: &Arc<dyn Backend>) {
        ui.horizontal(|ui| {
            ui.heading("topolens");
            ui.separator();

            let mut pending_topology = None;
            egui::ComboBox::from_label("topology")
                .selected_text(
                    self.selected_topology
                        .as_deref()
                        .unwrap_or("select a topology"),
                )
                .show_ui(ui, |ui| {
                    for name in &self.topologies {
                        let is_current = self.selected_topology.as_deref() == Some(name.as_str());
                        if ui.selectable_label(is_current, name).clicked() && !is_current {
                            pending_topology = Some(name.clone());
                        }
                    }
                });
            if let Some(name) = pending_topology {
                self.set_topology(name, backend);
            }

            ui.label(format!("nodes: {}", self.engine.model.nodes.len()));
            ui.label(format!("links: {}", self.engine.model.links.len()));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.request_rx.is_some() {
                    ui.spinner();
                    ui.label("waiting for backend");
                }
            });
        });
    }

    pub(in crate::app) fn draw_query_panel(&mut self, ui: &mut Ui, backend: &Arc<dyn Backend>) {
        ui.heading("Query");
        ui.add_space(6.0);

        let editor = egui::TextEdit::multiline(&mut self.query_text)
            .hint_text("path query expression")
            .desired_rows(4)
            .desired_width(f32::INFINITY);
        ui.add(editor);

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let can_run = !self.query_text.trim().is_empty() && self.request_rx.is_none();
            if ui.add_enabled(can_run, egui::Button::new("Run query")).clicked() {
                self.submit_query(backend);
            }
            if ui.button("Clear selection").clicked() {
                let path: Vec<(String, String)> = Vec::new();
                self.engine.update_path("", &path, &mut self.scene);
            }
        });

        ui.separator();
        ui.label(RichText::new("Applied query").strong());
        if self.engine.query.expr.is_empty() {
            ui.label("none");
        } else {
            ui.monospace(&self.engine.query.expr);
        }
        ui.label(format!(
            "highlighted links: {}",
            self.engine.query.selected.len()
        ));

        if let Some(error) = &self.last_error {
            ui.separator();
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    }
}

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::backend::{Backend, QueryResult, RawTopology};
use crate::engine::{Engine, EngineConfig, EntityKind};

mod controls;
mod scene;
mod view;

use self::scene::Scene;

pub struct TopolensApp {
    backend: Arc<dyn Backend>,
    initial_topology: Option<String>,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<String>, String>>,
    },
    Ready(Box<Workspace>),
    Error(String),
}

enum BackendEvent {
    Topology(Result<RawTopology, String>),
    QueryResults(Result<Vec<QueryResult>, String>),
}

struct Workspace {
    engine: Engine,
    scene: Scene,
    topologies: Vec<String>,
    selected_topology: Option<String>,
    query_text: String,
    last_error: Option<String>,
    hovered: Option<(EntityKind, usize)>,
    canvas_size: Vec2,
    /// Single in-flight backend request; issuing a new one drops the old
    /// receiver, so the latest request wins and stale responses are ignored.
    request_rx: Option<Receiver<BackendEvent>>,
}

impl TopolensApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        backend: Arc<dyn Backend>,
        initial_topology: Option<String>,
    ) -> Self {
        let state = Self::start_list_load(&backend);
        Self {
            backend,
            initial_topology,
            state,
        }
    }

    fn start_list_load(backend: &Arc<dyn Backend>) -> AppState {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(backend);

        thread::spawn(move || {
            let result = backend
                .list_topologies()
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }
}

impl eframe::App for TopolensApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(topologies)) => {
                        let mut workspace = Box::new(Workspace::new(topologies));
                        if let Some(name) = self.initial_topology.take() {
                            workspace.set_topology(name, &self.backend);
                        }
                        transition = Some(AppState::Ready(workspace));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Topology list worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Fetching topology list...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to reach the topology backend");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_list_load(&self.backend));
                    }
                });
            }
            AppState::Ready(workspace) => {
                workspace.poll_request();
                workspace.show(ctx, &self.backend);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl Workspace {
    fn new(topologies: Vec<String>) -> Self {
        Self {
            engine: Engine::new(EngineConfig::default()),
            scene: Scene::default(),
            topologies,
            selected_topology: None,
            query_text: String::new(),
            last_error: None,
            hovered: None,
            canvas_size: Vec2::ZERO,
            request_rx: None,
        }
    }

    fn set_topology(&mut self, name: String, backend: &Arc<dyn Backend>) {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(backend);
        let request_name = name.clone();

        thread::spawn(move || {
            let result = backend
                .load_topology(&request_name)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(BackendEvent::Topology(result));
        });

        self.selected_topology = Some(name);
        self.request_rx = Some(rx);
    }

    fn submit_query(&mut self, backend: &Arc<dyn Backend>) {
        let expr = self.query_text.clone();
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(backend);

        thread::spawn(move || {
            let result = backend
                .submit_query(&expr)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(BackendEvent::QueryResults(result));
        });

        self.request_rx = Some(rx);
    }

    fn poll_request(&mut self) {
        let Some(rx) = self.request_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(event) => self.apply_event(event),
            Err(TryRecvError::Empty) => self.request_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.last_error = Some("Backend request worker disconnected".to_owned());
            }
        }
    }

    fn apply_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Topology(Ok(raw)) => {
                self.fit_config_to_canvas();
                self.hovered = None;
                self.last_error = None;
                if let Err(error) = self.engine.initialize_graph(raw, &mut self.scene) {
                    self.last_error = Some(format!("{error:#}"));
                }
            }
            BackendEvent::QueryResults(Ok(results)) => {
                self.fit_config_to_canvas();
                self.last_error = None;
                let generation = self.scene.generation();
                if let Err(error) = self.engine.dispatch(results, &mut self.scene) {
                    self.last_error = Some(format!("{error:#}"));
                }
                // A topology result in the batch swapped the generation, so a
                // retained hover handle would point into the old one.
                if self.scene.generation() != generation {
                    self.hovered = None;
                }
            }
            BackendEvent::Topology(Err(error)) | BackendEvent::QueryResults(Err(error)) => {
                self.last_error = Some(error);
            }
        }
    }

    /// Layout targets the measured canvas, falling back to the configured
    /// defaults until the first frame has been drawn.
    fn fit_config_to_canvas(&mut self) {
        if self.canvas_size.x > 0.0 && self.canvas_size.y > 0.0 {
            self.engine.config.width = self.canvas_size.x;
            self.engine.config.height = self.canvas_size.y;
        }
    }

    fn show(&mut self, ctx: &Context, backend: &Arc<dyn Backend>) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui, backend));

        egui::SidePanel::left("query")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_query_panel(ui, backend));

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.request_rx.is_some() {
                ctx.request_repaint();
            }
            self.draw_graph(ui);
        });
    }
}

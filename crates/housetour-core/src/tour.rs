//! The tour controller — owns the graph and the navigation state, and is
//! the only thing that mutates the state.
//!
//! Hosts either drive it directly (`press`, `tick`, `view`) from their own
//! loop, as the TUI does, or spawn `run()` on a tokio task and talk to it
//! through `TourInput` messages, as the web server does. Either way input
//! only touches the held-key set and exactly one command is applied per
//! tick.

use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::discovery::SlotSource;
use crate::error::GraphError;
use crate::events::TourEvent;
use crate::graph::LocationGraph;
use crate::input::{ArrowLayout, HeldInputs, HitTest, InputMapper, KeyBindings, PointerTracker};
use crate::state::NavigationState;
use crate::transition;
use crate::types::{Command, MoveData, ViewData};

/// Messages that can be sent TO a running tour (from API/TUI)
#[derive(Debug, Clone, PartialEq)]
pub enum TourInput {
    KeyDown(String),
    KeyUp(String),
    PointerDown { x: f32, y: f32 },
    PointerUp,
    Stop,
}

pub struct Tour {
    graph: LocationGraph,
    state: NavigationState,
    held: HeldInputs,
    mapper: InputMapper,
    pointer: PointerTracker,
    layout: ArrowLayout,
    tick_interval: Duration,
    tick_count: u64,

    event_tx: broadcast::Sender<TourEvent>,
    input_tx: mpsc::Sender<TourInput>,
    input_rx: Option<mpsc::Receiver<TourInput>>,
    view_tx: watch::Sender<ViewData>,
    trail_tx: watch::Sender<Vec<String>>,
}

impl Tour {
    pub fn new(graph: LocationGraph, config: &Config) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let (input_tx, input_rx) = mpsc::channel(64);

        let state = NavigationState::new(&graph);
        let (view_tx, _) = watch::channel(transition::view(&state, &graph));
        let (trail_tx, _) = watch::channel(owned_trail(&state));

        Self {
            graph,
            state,
            held: HeldInputs::new(),
            mapper: InputMapper::new(&config.key_bindings),
            pointer: PointerTracker::default(),
            layout: ArrowLayout::for_canvas(config.canvas_width, config.canvas_height),
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            tick_count: 0,
            event_tx,
            input_tx,
            input_rx: Some(input_rx),
            view_tx,
            trail_tx,
        }
    }

    /// Discover slot counts, build the graph and start at the entry.
    pub fn from_config(config: &Config, slots: &dyn SlotSource) -> Result<Self, GraphError> {
        let graph = LocationGraph::from_config(config, slots)?;
        info!(
            "Loaded {} location(s), entering at {}",
            graph.len(),
            graph.entry()
        );
        Ok(Self::new(graph, config))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TourEvent> {
        self.event_tx.subscribe()
    }

    /// For hosts that hand out subscriptions after `run()` took the tour.
    pub fn event_sender(&self) -> broadcast::Sender<TourEvent> {
        self.event_tx.clone()
    }

    pub fn input_sender(&self) -> mpsc::Sender<TourInput> {
        self.input_tx.clone()
    }

    /// Latest frame, updated after every tick that changed something.
    pub fn watch_view(&self) -> watch::Receiver<ViewData> {
        self.view_tx.subscribe()
    }

    /// History breadcrumb, oldest first, ending at the current location.
    pub fn watch_trail(&self) -> watch::Receiver<Vec<String>> {
        self.trail_tx.subscribe()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn bindings(&self) -> &KeyBindings {
        self.mapper.bindings()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn layout(&self) -> ArrowLayout {
        self.layout
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn view(&self) -> ViewData {
        transition::view(&self.state, &self.graph)
    }

    fn broadcast(&self, event: TourEvent) {
        let _ = self.event_tx.send(event);
    }

    // ── Input side ──

    /// Hold `key`. Keys with no binding are dropped so they never pile up
    /// in the held set.
    pub fn press(&mut self, key: &str) {
        if self.mapper.bindings().command_for(key).is_none() {
            debug!("Unbound key {:?}", key);
            return;
        }
        self.held.press(key);
    }

    pub fn release(&mut self, key: &str) {
        self.held.release(key);
    }

    /// Pointer press in canvas coordinates, hit-tested against the arrows.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<Command> {
        let layout = self.layout;
        self.pointer_down_on(&layout, x, y)
    }

    /// Pointer press hit-tested against a host-specific layout.
    pub fn pointer_down_on(&mut self, hit_test: &dyn HitTest, x: f32, y: f32) -> Option<Command> {
        let command = self.pointer.press(hit_test, x, y)?;
        self.mapper.inject(&mut self.held, command);
        Some(command)
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// Apply one queued input. Returns false on `Stop`.
    pub fn handle_input(&mut self, input: TourInput) -> bool {
        match input {
            TourInput::KeyDown(key) => self.press(&key),
            TourInput::KeyUp(key) => self.release(&key),
            TourInput::PointerDown { x, y } => {
                self.pointer_down(x, y);
            }
            TourInput::PointerUp => self.pointer_up(),
            TourInput::Stop => return false,
        }
        true
    }

    // ── Tick side ──

    /// Consume at most one command and apply it. Returns the command taken
    /// from the held set, whether or not it moved anything.
    pub fn tick(&mut self) -> Option<Command> {
        self.tick_count += 1;
        let command = self.mapper.next_command(&mut self.held)?;

        let next = transition::apply_command(&self.state, &self.graph, command);
        if next == self.state {
            debug!("{} ignored at {}", command, self.state.current_location);
            return Some(command);
        }

        let previous = std::mem::replace(&mut self.state, next);
        // An exit may lead back into the same location, so the history is
        // what tells a move apart from a turn or a step.
        if previous.current_location != self.state.current_location
            || previous.history != self.state.history
        {
            info!(
                "{} -> {} ({}, history {})",
                previous.current_location,
                self.state.current_location,
                command,
                self.state.history_depth()
            );
            self.broadcast(TourEvent::Moved(MoveData {
                from: previous.current_location,
                to: self.state.current_location.clone(),
                command,
                timestamp: chrono::Utc::now().to_rfc3339(),
            }));
            self.trail_tx.send_replace(owned_trail(&self.state));
        }

        let view = self.view();
        self.view_tx.send_replace(view.clone());
        self.broadcast(TourEvent::View(view));
        Some(command)
    }

    /// Tick on a fixed interval until `Stop` arrives.
    pub async fn run(&mut self) {
        let Some(mut input_rx) = self.input_rx.take() else {
            warn!("Tour is already running");
            return;
        };

        info!(
            "Tour started at {} ({}ms ticks)",
            self.state.current_location,
            self.tick_interval.as_millis()
        );

        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut running = true;

        while running {
            interval.tick().await;

            // Inputs only touch the held set; the tick below is the sole
            // mutator of the navigation state.
            loop {
                match input_rx.try_recv() {
                    Ok(input) => {
                        if !self.handle_input(input) {
                            running = false;
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        running = false;
                        break;
                    }
                }
            }

            if running {
                self.tick();
            }
        }

        self.input_rx = Some(input_rx);
        info!("Tour stopped after {} tick(s)", self.tick_count);
    }
}

fn owned_trail(state: &NavigationState) -> Vec<String> {
    state.trail().into_iter().map(String::from).collect()
}

//! housetour-core — Pure navigation logic, no UI.
//!
//! This crate contains the location graph, the navigation state, the
//! transition rules and the input mapper for the house tour viewer. It is
//! completely UI-agnostic — frontends (TUI, Web) drive a `Tour` and
//! subscribe to its events via tokio::broadcast.

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod graph;
pub mod input;
pub mod state;
pub mod tour;
pub mod transition;
pub mod types;

//! Terminal front end for famsim: an HTTP [`famsim_game::Engine`], a line
//! console that drives the orchestrator and a colored renderer.

pub mod console;
pub mod http;
pub mod render;

pub use console::Console;
pub use http::HttpEngine;

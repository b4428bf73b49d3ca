//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, input, scene, and the frame orchestrator.

mod commands;
mod core;
mod event_handler;
mod init;
mod render;
mod shutdown;
mod title;

pub use core::HorizonApp;

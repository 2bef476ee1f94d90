//! Chalk - persona-driven teacher chatbot for the terminal
//!
//! This library provides the conversation core: a bounded message history,
//! request assembly (persona + history + new turn), a Gemini transport
//! client, and the reply formatter for terminal display.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod render;
pub mod ui;

pub use error::{Error, Result};

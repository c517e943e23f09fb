//! Event handling for FinStock.
//!
//! Terminal input is polled by [`EventHandler`] and turned into store
//! actions; key matching lives in [`input`].

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};

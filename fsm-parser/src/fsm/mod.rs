//! Main module for fsm-parser library functionality

pub mod chunking;
pub mod elements;
pub mod engine;
pub mod formats;
pub mod grammars;
pub mod loader;
pub mod testing;

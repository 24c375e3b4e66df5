//! # plait-std
//!
//! Standard plugin implementations for the Plait composition engine, plus
//! test doubles for exercising hosts and plugins.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod key_bindings;
pub mod testing;

pub use key_bindings::KeyBindingsPlugin;

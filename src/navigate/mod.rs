//! Query facade over the board used by strategies.

mod navigator;

pub use navigator::{NavigateError, Navigator};

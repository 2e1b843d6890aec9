//! State store for Motivation Widget
//!
//! - `io`: permissive load, default merge and full-document save
//! - `state_store`: the store bound to the widget's state file

pub mod io;
pub mod state_store;

pub use state_store::StateStore;

// LedSlot - lib.rs
//
// Library entry point, exposing every layer for the `ledslot` binary,
// integration tests, and programmatic use.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;

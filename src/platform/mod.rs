// LedSlot - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: util, core value types, directories crate.
// Must NOT depend on: app, ui.

pub mod config;

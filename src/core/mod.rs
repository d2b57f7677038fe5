// LedSlot - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, serde data formats, chrono, regex.
// Must NOT depend on: ui, platform, app, or the filesystem.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod export;
pub mod filter;
pub mod forms;
pub mod model;
pub mod offer;
pub mod proof;
pub mod region;

// LedSlot - app/mod.rs
//
// Application layer: catalog selection and session state.
// Dependencies: core, util.
// Must NOT depend on: ui, platform specifics.

pub mod catalog_mgr;
pub mod state;

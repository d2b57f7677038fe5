// LedSlot - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models).
// Must NOT depend on: platform, direct I/O.

pub mod cards;

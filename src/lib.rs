//! Match Madness: a pairs memory game for one timed player or two taking turns.
//!
//! The [`engine`] module holds everything that decides what happens on a click
//! or a timer tick. Widgets live in the binary and only talk to the engine
//! through [`engine::Session`].

pub mod engine;

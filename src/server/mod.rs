//! Listening socket and per-connection task spawning.

pub mod listener;

//! Core types and definitions for the CAVECRAWL simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, host events, state snapshots, notifications, rules and
//! constants. It has no dependency on any rendering or audio framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod level;
pub mod rules;
pub mod state;
pub mod types;

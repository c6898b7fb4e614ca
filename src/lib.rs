//! Shadow Dungeon: a top-down room-clearing shooter simulated in fixed
//! frame-synchronous steps.
//!
//! The library holds the whole simulation and no I/O beyond reading the
//! configuration file; the binary adds a crossterm front end.

pub mod compute;
pub mod config;
pub mod enemies;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod interactables;
pub mod player;
pub mod projectiles;
pub mod rooms;

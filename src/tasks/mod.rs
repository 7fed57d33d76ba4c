//! Background Tasks Module
//!
//! Long-running maintenance tasks spawned at startup.

mod cleanup;

pub use cleanup::spawn_sweep_task;

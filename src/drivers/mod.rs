//! Hardware initialisation, software timer and task plumbing.

pub mod hw_init;
pub mod hw_timer;
pub mod soft_timer;
pub mod task_pin;

//! Embassy async tasks

pub mod abort_watch;

pub use abort_watch::abort_watch_task;

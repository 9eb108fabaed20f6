pub mod config;
pub mod list;
pub mod timers;
pub mod watch;

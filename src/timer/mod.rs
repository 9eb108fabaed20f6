//! Timer data model and the pure operations on it.

pub mod duration;
pub mod models;
pub mod progress;
pub mod store;

pub use duration::{DurationParts, decode, encode};
pub use models::{Collection, NotificationId, Section, Timer};
pub use progress::{Progress, compute_progress, timer_progress};

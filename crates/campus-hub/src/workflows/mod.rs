pub mod clock;
pub mod events;
pub mod format;
pub mod lottery;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::RepositoryError;

use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing the current time. Allows the default report
/// start to be tested.
pub trait Clock: Sync + Send {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

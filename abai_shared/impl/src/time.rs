use abai_di::Build;
use abai_shared_contracts::time::TimeService;
use abai_utils::trace_instrument;
use chrono::{DateTime, Utc};

/// System clock.
#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let before = Utc::now();
        let now = TimeServiceImpl.now();
        assert!(before <= now && now <= Utc::now());
    }
}

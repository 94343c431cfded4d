//! Shared helpers for task unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Mutex;

/// Clock returning a settable instant.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn at_millis(millis: i64) -> Self {
        let now = Utc
            .timestamp_millis_opt(millis)
            .single()
            .expect("valid test timestamp");
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set_millis(&self, millis: i64) {
        let now = Utc
            .timestamp_millis_opt(millis)
            .single()
            .expect("valid test timestamp");
        *self.now.lock().expect("clock lock") = now;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// A minimal valid create body.
pub fn valid_create_body() -> Value {
    json!({
        "name": "NPG Home",
        "url": "nature.com",
        "standard": "WCAG2AA",
    })
}

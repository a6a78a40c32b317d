use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("palaver.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("palaver.client.request_errors");
pub(crate) static CLIENT_EMPTY_MESSAGES: Counter = Counter::new("palaver.client.empty_messages");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("palaver.client.request_duration_seconds");

pub(crate) static STORE_WRITES: Counter = Counter::new("palaver.store.writes");
pub(crate) static STORE_WRITE_ERRORS: Counter = Counter::new("palaver.store.write_errors");
pub(crate) static STORE_CORRUPT_LOADS: Counter = Counter::new("palaver.store.corrupt_loads");

pub(crate) static SLOT_WRITES: Counter = Counter::new("palaver.slot.writes");
pub(crate) static SLOT_WRITE_ERRORS: Counter = Counter::new("palaver.slot.write_errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_EMPTY_MESSAGES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&STORE_WRITES);
    collector.register_counter(&STORE_WRITE_ERRORS);
    collector.register_counter(&STORE_CORRUPT_LOADS);

    collector.register_counter(&SLOT_WRITES);
    collector.register_counter(&SLOT_WRITE_ERRORS);
}

use std::time::Duration;

pub const SEND_INTERVAL: Duration = Duration::from_secs(2);

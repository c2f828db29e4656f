use std::time::Duration;

pub const TIME_TO_MOVE_AFTER_DOORS_CLOSE: Duration = Duration::from_millis(2000);
pub const TIME_REACH_FLOOR_BEFORE_DOORS_OPEN: Duration = Duration::from_millis(1000);
pub const TIME_DOORS_OPEN: Duration = Duration::from_millis(3000);

pub const STARTING_FLOOR: u8 = 1;

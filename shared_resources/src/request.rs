use std::hash::{Hash, Hasher};

use super::direction::Direction;

/// A pickup request raised at a floor: where it was pressed, which way the
/// passenger wants to go, and the car button they will press inside.
/// Two requests are the same request if they agree on those three fields;
/// the timestamp is carried for narration only.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct FloorRequest {
    pub origin: u8,
    pub direction: Direction,
    pub destination: u8,
    pub timestamp: String,
}

impl FloorRequest {
    pub fn new(origin: u8, direction: Direction, destination: u8, timestamp: &str) -> Self {
        FloorRequest {
            origin,
            direction,
            destination,
            timestamp: timestamp.to_string(),
        }
    }
}

impl PartialEq for FloorRequest {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.direction == other.direction
            && self.destination == other.destination
    }
}

impl Eq for FloorRequest {}

impl Hash for FloorRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.direction.hash(state);
        self.destination.hash(state);
    }
}

/// Poll message an elevator sends to ask the scheduler for work relevant to
/// its position. `Stop` marks an idle elevator asking for its next trip;
/// `Up`/`Down` marks a mid-trip poll from a newly reached floor.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ElevatorRequest {
    pub floor: u8,
    pub direction: Direction,
}

/// Completion notice an elevator sends back after servicing a floor.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ElevatorResponse {
    pub floor: u8,
    pub message: String,
    pub completed: Vec<FloorRequest>,
}

impl ElevatorResponse {
    pub fn new(floor: u8, completed: Vec<FloorRequest>) -> Self {
        ElevatorResponse {
            floor,
            message: format!("elevator has arrived at floor {} and passengers have exited", floor),
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_ignores_timestamp() {
        let a = FloorRequest::new(2, Direction::Up, 5, "10:00:01.0");
        let b = FloorRequest::new(2, Direction::Up, 5, "10:00:02.5");
        assert_eq!(a, b);
    }

    #[test]
    fn duplicates_merge_in_a_set() {
        let mut requests = HashSet::new();
        requests.insert(FloorRequest::new(2, Direction::Up, 5, "10:00:01.0"));
        requests.insert(FloorRequest::new(2, Direction::Up, 5, "10:00:02.5"));
        requests.insert(FloorRequest::new(2, Direction::Up, 4, "10:00:03.0"));
        assert_eq!(requests.len(), 2);
    }

    #[test]
    fn response_message_names_the_floor() {
        let response = ElevatorResponse::new(5, Vec::new());
        assert!(response.message.contains("floor 5"));
    }
}

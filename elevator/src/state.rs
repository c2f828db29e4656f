use shared_resources::direction::{Direction, DirectionError};

/// Behavioural state of the elevator, named after the direction of travel.
/// A fresh value is constructed for every transition; the elevator swaps
/// the stored state and never mutates one in place.
#[derive(Debug, Clone)]
pub struct ElevatorState {
    name: String,
    should_sleep: bool,
}

impl ElevatorState {
    pub fn new(name: &str) -> Self {
        ElevatorState::with_sleep(name, true)
    }

    pub fn with_sleep(name: &str, should_sleep: bool) -> Self {
        ElevatorState {
            name: name.to_string(),
            should_sleep,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the timing delays of the simulation are honoured while this
    /// state is current. Disabled in tests.
    pub fn should_sleep(&self) -> bool {
        self.should_sleep
    }

    /// Derives the travel direction from the state name. An unrecognized
    /// name is an error, never a default.
    pub fn direction(&self) -> Result<Direction, DirectionError> {
        self.name.parse()
    }
}

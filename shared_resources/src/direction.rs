use std::str::FromStr;

use thiserror::Error;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Stop,
    Up,
}

#[derive(Debug, Error, PartialEq)]
pub enum DirectionError {
    #[error("unknown direction token {0:?}")]
    UnknownToken(String),
}

impl Direction {
    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Stop => String::from("stop"),
            Direction::Up => String::from("up"),
        }
    }

    /// Signed floor offset of one movement step in this direction.
    pub fn step(self) -> i8 {
        match self {
            Direction::Down => -1,
            Direction::Stop => 0,
            Direction::Up => 1,
        }
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "stop" | "stopped" => Ok(Direction::Stop),
            _ => Err(DirectionError::UnknownToken(token.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_case_insensitively() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("stop".parse::<Direction>().unwrap(), Direction::Stop);
        assert_eq!("STOPPED".parse::<Direction>().unwrap(), Direction::Stop);
    }

    #[test]
    fn rejects_unknown_token() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(err, DirectionError::UnknownToken(String::from("sideways")));
    }

    #[test]
    fn step_offsets() {
        assert_eq!(Direction::Up.step(), 1);
        assert_eq!(Direction::Down.step(), -1);
        assert_eq!(Direction::Stop.step(), 0);
    }
}

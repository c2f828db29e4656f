use std::fs;
use std::io;

use thiserror::Error;

use shared_resources::direction::Direction;
use shared_resources::request::FloorRequest;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("line {0:?} does not have the form \"HH:MM:SS.m origin direction destination\"")]
    MalformedLine(String),
    #[error("bad floor number in line {0:?}")]
    BadFloor(String),
    #[error("bad direction in line {0:?}")]
    BadDirection(String),
}

pub fn parse_request_line(line: &str) -> Result<FloorRequest, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(ParseError::MalformedLine(line.to_string()));
    }
    let origin = fields[1]
        .parse::<u8>()
        .map_err(|_| ParseError::BadFloor(line.to_string()))?;
    let direction = fields[2]
        .parse::<Direction>()
        .map_err(|_| ParseError::BadDirection(line.to_string()))?;
    let destination = fields[3]
        .parse::<u8>()
        .map_err(|_| ParseError::BadFloor(line.to_string()))?;
    Ok(FloorRequest::new(origin, direction, destination, fields[0]))
}

/// Reads the timestamped request file, skipping lines that do not parse.
pub fn load_requests(path: &str) -> io::Result<Vec<FloorRequest>> {
    let contents = fs::read_to_string(path)?;
    let mut requests = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_request_line(line) {
            Ok(request) => requests.push(request),
            Err(e) => log::warn!("skipping request line: {}", e),
        }
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_timestamped_line() {
        let request = parse_request_line("14:05:15.0 1 Up 5").unwrap();
        assert_eq!(request, FloorRequest::new(1, Direction::Up, 5, "14:05:15.0"));
        assert_eq!(request.timestamp, "14:05:15.0");
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        assert_eq!(
            parse_request_line("14:05:15.0 1 Up"),
            Err(ParseError::MalformedLine(String::from("14:05:15.0 1 Up")))
        );
    }

    #[test]
    fn bad_direction_is_rejected() {
        assert_eq!(
            parse_request_line("14:05:15.0 1 Sideways 5"),
            Err(ParseError::BadDirection(String::from("14:05:15.0 1 Sideways 5")))
        );
    }

    #[test]
    fn bad_floor_is_rejected() {
        assert_eq!(
            parse_request_line("14:05:15.0 ground Up 5"),
            Err(ParseError::BadFloor(String::from("14:05:15.0 ground Up 5")))
        );
    }
}

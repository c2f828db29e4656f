/// ----- STATE MACHINE MODULE -----
/// Owns the elevator's floor position and behavioural state, and drives
/// trips: close doors, step one floor per travel tick, poll the dispatcher
/// from every floor reached, service whatever targets the floor, and
/// report completions back. New compatible requests discovered mid-trip
/// are merged into the working set instead of re-planning the route.

use std::collections::HashSet;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::info;

use shared_resources::config::ElevatorSettings;
use shared_resources::direction::Direction;
use shared_resources::request::{ElevatorRequest, ElevatorResponse, FloorRequest};

use crate::config;
use crate::state::ElevatorState;

pub struct Elevator {
    current_floor: u8,
    state: ElevatorState,
}

impl Elevator {
    pub fn new(starting_floor: u8, timing_enabled: bool) -> Self {
        Elevator {
            current_floor: starting_floor,
            state: ElevatorState::with_sleep(&Direction::Stop.as_string(), timing_enabled),
        }
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn set_current_floor(&mut self, floor: u8) {
        self.current_floor = floor;
    }

    pub fn state(&self) -> &ElevatorState {
        &self.state
    }

    pub fn set_state(&mut self, state: ElevatorState) {
        self.state = state;
    }
}

/// Channel seam between the state machine and the network module. The
/// state machine never touches a socket.
pub struct SchedulerLink {
    pub poll_tx: Sender<ElevatorRequest>,
    pub reply_rx: Receiver<Vec<FloorRequest>>,
    pub response_tx: Sender<ElevatorResponse>,
}

impl SchedulerLink {
    /// Round trip to the dispatcher: report the floor just reached and
    /// take whatever new work comes back.
    pub fn poll(&self, floor: u8, direction: Direction) -> Vec<FloorRequest> {
        self.poll_tx.send(ElevatorRequest { floor, direction }).unwrap();
        self.reply_rx.recv().unwrap()
    }

    pub fn submit(&self, response: ElevatorResponse) {
        self.response_tx.send(response).unwrap();
    }
}

pub fn main(settings: ElevatorSettings, link: SchedulerLink) {
    let mut elevator = Elevator::new(config::STARTING_FLOOR, true);
    info!(
        "{}: elevator serving {} floors, starting at floor {} in state {}",
        thread_name(),
        settings.num_floors,
        elevator.current_floor(),
        elevator.state().name()
    );
    loop {
        let seed = link.poll(elevator.current_floor(), Direction::Stop);
        let requests: HashSet<FloorRequest> = seed.into_iter().collect();
        if requests.is_empty() {
            continue;
        }
        handle_request(&mut elevator, requests, &link);
    }
}

/// Starts a trip for a batch of requests sharing a direction: doors close,
/// the state takes the batch's direction, and, when timing is enabled, the
/// elevator sets off.
pub fn handle_request(elevator: &mut Elevator, requests: HashSet<FloorRequest>, link: &SchedulerLink) {
    let direction = match requests.iter().next() {
        Some(request) => request.direction,
        None => return,
    };
    info!("{}: elevator doors closing", thread_name());
    set_new_state(elevator, &direction.as_string());
    if elevator.state().should_sleep() {
        move_between_floors(elevator, requests, link);
    }
}

/// The trip loop. Terminates exactly when the working request set is
/// empty; every request leaves the set only by being serviced.
pub fn move_between_floors(
    elevator: &mut Elevator,
    mut requests: HashSet<FloorRequest>,
    link: &SchedulerLink,
) {
    let direction = match requests.iter().next() {
        Some(request) => request.direction,
        None => return,
    };

    while !requests.is_empty() {
        if elevator.state().should_sleep() {
            thread::sleep(config::TIME_TO_MOVE_AFTER_DOORS_CLOSE);
        }
        let next_floor = match direction {
            Direction::Up => elevator.current_floor() + 1,
            // floor 1 is the lowest; a down trip cannot leave the building
            Direction::Down => elevator.current_floor().saturating_sub(1),
            Direction::Stop => return,
        };
        elevator.set_current_floor(next_floor);

        let discovered = link.poll(next_floor, direction);
        requests.extend(discovered);

        let arrived: Vec<FloorRequest> = requests
            .iter()
            .filter(|request| request.destination == next_floor)
            .cloned()
            .collect();
        for request in &arrived {
            requests.remove(request);
        }

        if !arrived.is_empty() {
            handle_reached_destination(elevator, next_floor, true);
            link.submit(ElevatorResponse::new(next_floor, arrived));
            if !requests.is_empty() {
                info!("{}: elevator doors closing", thread_name());
                set_new_state(elevator, &direction.as_string());
            }
        }
    }
}

/// Single-destination dispatch with no mid-trip merging.
pub fn go_to_floor(elevator: &mut Elevator, direction: Direction, target_floor: u8) {
    info!("{}: elevator doors closing", thread_name());
    set_new_state(elevator, &direction.as_string());
    while elevator.current_floor() != target_floor {
        if elevator.state().should_sleep() {
            thread::sleep(config::TIME_TO_MOVE_AFTER_DOORS_CLOSE);
        }
        let next_floor = match direction {
            Direction::Up => elevator.current_floor() + 1,
            Direction::Down => elevator.current_floor().saturating_sub(1),
            Direction::Stop => break,
        };
        elevator.set_current_floor(next_floor);
    }
    handle_reached_destination(elevator, target_floor, false);
}

/// Two-phase dwell at a serviced floor: stop, wait for the doors, let
/// passengers out, hold the doors open.
pub fn handle_reached_destination(elevator: &mut Elevator, floor_num: u8, people_exiting: bool) {
    info!("{}: elevator reached floor {}", thread_name(), elevator.current_floor());
    set_new_state(elevator, &Direction::Stop.as_string());
    if elevator.state().should_sleep() {
        thread::sleep(config::TIME_REACH_FLOOR_BEFORE_DOORS_OPEN);
    }
    info!("{}: elevator doors opening", thread_name());
    if people_exiting {
        info!("{}: floor {} button light is off", thread_name(), floor_num);
        info!("{}: people have exited from the elevator", thread_name());
    }
    if elevator.state().should_sleep() {
        thread::sleep(config::TIME_DOORS_OPEN);
    }
}

fn set_new_state(elevator: &mut Elevator, name: &str) {
    let should_sleep = elevator.state().should_sleep();
    elevator.set_state(ElevatorState::with_sleep(name, should_sleep));
    info!(
        "{}: elevator currently in state {}",
        thread_name(),
        elevator.state().name()
    );
}

fn thread_name() -> String {
    match std::thread::current().name() {
        Some(name) => name.to_string(),
        None => String::from("unnamed"),
    }
}

/// ----- QUEUE MODULE -----
/// The two independently guarded FIFO queues at the heart of the
/// dispatcher: pending floor requests on one side, pending elevator
/// responses on the other. Each queue is its own channel, so request
/// intake and response delivery never contend with each other.

use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;

use shared_resources::direction::Direction;
use shared_resources::request::{ElevatorResponse, FloorRequest};

use crate::state::SchedulerState;

#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    #[error("floor request rejected: {0}")]
    InvalidRequest(String),
    #[error("elevator response rejected: {0}")]
    InvalidResponse(String),
    #[error("queue has been shut down")]
    Disconnected,
}

pub struct Scheduler {
    num_floors: u8,
    request_tx: Mutex<Option<Sender<FloorRequest>>>,
    request_rx: Receiver<FloorRequest>,
    response_tx: Mutex<Option<Sender<ElevatorResponse>>>,
    response_rx: Receiver<ElevatorResponse>,
    state: Mutex<SchedulerState>,
}

impl Scheduler {
    pub fn new(num_floors: u8) -> Self {
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();
        Scheduler {
            num_floors,
            request_tx: Mutex::new(Some(request_tx)),
            request_rx,
            response_tx: Mutex::new(Some(response_tx)),
            response_rx,
            state: Mutex::new(SchedulerState::Receiving),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock().unwrap()
    }

    /// Validates and enqueues a pickup request, waking any worker blocked in
    /// `get_next_request`. Rejection leaves the queue untouched.
    pub fn add_floor_request(&self, request: FloorRequest) -> Result<(), QueueError> {
        if request.direction == Direction::Stop {
            return Err(QueueError::InvalidRequest(String::from(
                "direction must be up or down",
            )));
        }
        if !self.floor_in_building(request.origin) || !self.floor_in_building(request.destination) {
            return Err(QueueError::InvalidRequest(format!(
                "floors must be between 1 and {}",
                self.num_floors
            )));
        }
        match self.request_tx.lock().unwrap().as_ref() {
            Some(tx) => {
                tx.send(request).unwrap();
                Ok(())
            }
            None => Err(QueueError::Disconnected),
        }
    }

    /// Blocks until a request is queued, then dequeues the oldest one.
    /// Returns `Disconnected` once the scheduler has been shut down.
    pub fn get_next_request(&self) -> Result<FloorRequest, QueueError> {
        self.request_rx.recv().map_err(|_| QueueError::Disconnected)
    }

    /// Drains the queued requests an elevator at `floor` travelling in
    /// `direction` can still service without reversing. Requests that do
    /// not fit go back into circulation at the tail of the queue.
    pub fn take_compatible_requests(&self, floor: u8, direction: Direction) -> Vec<FloorRequest> {
        let mut compatible = Vec::new();
        let mut recirculate = Vec::new();
        while let Ok(request) = self.request_rx.try_recv() {
            if is_compatible(&request, floor, direction) {
                compatible.push(request);
            } else {
                recirculate.push(request);
            }
        }
        if let Some(tx) = self.request_tx.lock().unwrap().as_ref() {
            for request in recirculate {
                tx.send(request).unwrap();
            }
        }
        compatible
    }

    /// Validates and enqueues a completion notice, then runs the
    /// response-received hook of the state machine.
    pub fn add_elevator_response(&self, response: ElevatorResponse) -> Result<(), QueueError> {
        if response.message.is_empty() {
            return Err(QueueError::InvalidResponse(String::from(
                "message text must not be empty",
            )));
        }
        match self.response_tx.lock().unwrap().as_ref() {
            Some(tx) => tx.send(response).unwrap(),
            None => return Err(QueueError::Disconnected),
        }
        let mut state = self.state.lock().unwrap();
        *state = state.handle_response_received();
        Ok(())
    }

    /// Blocks until a response is queued, then dequeues the oldest one.
    pub fn get_elevator_response(&self) -> Result<ElevatorResponse, QueueError> {
        self.response_rx.recv().map_err(|_| QueueError::Disconnected)
    }

    pub fn is_request_in_queue(&self) -> bool {
        !self.request_rx.is_empty()
    }

    pub fn is_response_in_queue(&self) -> bool {
        !self.response_rx.is_empty()
    }

    /// Runs the response-processed hook after a delivery to the floor.
    pub fn response_processed(&self) {
        let mut state = self.state.lock().unwrap();
        *state = state.handle_response_processed();
    }

    /// Drops both queue producers. Blocked workers observe `Disconnected`
    /// once the remaining entries are drained; further enqueues fail.
    pub fn shutdown(&self) {
        self.request_tx.lock().unwrap().take();
        self.response_tx.lock().unwrap().take();
    }

    fn floor_in_building(&self, floor: u8) -> bool {
        floor >= 1 && floor <= self.num_floors
    }
}

fn is_compatible(request: &FloorRequest, floor: u8, direction: Direction) -> bool {
    if request.direction != direction {
        return false;
    }
    match direction {
        Direction::Up => request.destination >= floor,
        Direction::Down => request.destination <= floor,
        Direction::Stop => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;

    fn request(origin: u8, direction: Direction, destination: u8) -> FloorRequest {
        FloorRequest::new(origin, direction, destination, "14:05:15.0")
    }

    #[test]
    fn add_then_get_returns_the_same_request() {
        let scheduler = Scheduler::new(10);
        let r = request(1, Direction::Up, 5);
        scheduler.add_floor_request(r.clone()).unwrap();
        assert_eq!(scheduler.get_next_request().unwrap(), r);
    }

    #[test]
    fn requests_come_back_in_fifo_order() {
        let scheduler = Scheduler::new(10);
        let requests: Vec<FloorRequest> =
            (1..=5).map(|floor| request(floor, Direction::Up, floor + 1)).collect();
        for r in &requests {
            scheduler.add_floor_request(r.clone()).unwrap();
        }
        for r in &requests {
            assert_eq!(&scheduler.get_next_request().unwrap(), r);
        }
    }

    #[test]
    fn invalid_requests_leave_the_queue_unchanged() {
        let scheduler = Scheduler::new(10);
        assert!(matches!(
            scheduler.add_floor_request(request(1, Direction::Stop, 5)),
            Err(QueueError::InvalidRequest(_))
        ));
        assert!(matches!(
            scheduler.add_floor_request(request(0, Direction::Up, 5)),
            Err(QueueError::InvalidRequest(_))
        ));
        assert!(matches!(
            scheduler.add_floor_request(request(1, Direction::Up, 99)),
            Err(QueueError::InvalidRequest(_))
        ));
        assert!(!scheduler.is_request_in_queue());
    }

    #[test]
    fn get_blocks_until_a_producer_arrives() {
        let scheduler = Arc::new(Scheduler::new(10));
        let producer = scheduler.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            producer.add_floor_request(request(2, Direction::Down, 1)).unwrap();
        });

        let started = Instant::now();
        let r = scheduler.get_next_request().unwrap();
        assert_eq!(r, request(2, Direction::Down, 1));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn empty_message_response_is_rejected() {
        let scheduler = Scheduler::new(10);
        let response = ElevatorResponse {
            floor: 5,
            message: String::new(),
            completed: Vec::new(),
        };
        assert!(matches!(
            scheduler.add_elevator_response(response),
            Err(QueueError::InvalidResponse(_))
        ));
        assert!(!scheduler.is_response_in_queue());
    }

    #[test]
    fn response_peek_does_not_dequeue() {
        let scheduler = Scheduler::new(10);
        scheduler.add_elevator_response(ElevatorResponse::new(3, Vec::new())).unwrap();
        scheduler.add_elevator_response(ElevatorResponse::new(7, Vec::new())).unwrap();
        assert!(scheduler.is_response_in_queue());
        assert_eq!(scheduler.get_elevator_response().unwrap().floor, 3);
        assert_eq!(scheduler.get_elevator_response().unwrap().floor, 7);
        assert!(!scheduler.is_response_in_queue());
    }

    #[test]
    fn response_hooks_drive_the_state_machine() {
        let scheduler = Scheduler::new(10);
        assert_eq!(scheduler.state(), SchedulerState::Receiving);
        scheduler.add_elevator_response(ElevatorResponse::new(5, Vec::new())).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Responding);
        scheduler.get_elevator_response().unwrap();
        scheduler.response_processed();
        assert_eq!(scheduler.state(), SchedulerState::Receiving);
    }

    #[test]
    fn compatible_requests_are_drained_and_the_rest_recirculated() {
        let scheduler = Scheduler::new(10);
        scheduler.add_floor_request(request(1, Direction::Up, 5)).unwrap();
        scheduler.add_floor_request(request(4, Direction::Down, 2)).unwrap();
        scheduler.add_floor_request(request(2, Direction::Up, 3)).unwrap();

        let compatible = scheduler.take_compatible_requests(3, Direction::Up);
        assert_eq!(compatible, vec![request(1, Direction::Up, 5), request(2, Direction::Up, 3)]);

        // the down request went back into circulation
        assert_eq!(scheduler.get_next_request().unwrap(), request(4, Direction::Down, 2));
        assert!(!scheduler.is_request_in_queue());
    }

    #[test]
    fn shutdown_releases_blocked_workers() {
        let scheduler = Arc::new(Scheduler::new(10));
        let consumer = scheduler.clone();
        let handle = thread::spawn(move || consumer.get_next_request());

        thread::sleep(Duration::from_millis(50));
        scheduler.shutdown();
        assert_eq!(handle.join().unwrap(), Err(QueueError::Disconnected));
        assert_eq!(
            scheduler.add_floor_request(request(1, Direction::Up, 5)),
            Err(QueueError::Disconnected)
        );
    }
}

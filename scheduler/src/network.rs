/// ----- NETWORK MODULE -----
/// Bridges the scheduler queues to the datagram channels: floor requests
/// in, elevator polls answered in place, elevator responses in, and
/// completed responses delivered to the floor subsystem as plain text.
/// Each bridge runs as its own named worker thread.

use std::io;
use std::net;
use std::sync::Arc;
use std::thread;

use log::{info, warn};
use socket2::Socket;

use shared_resources::config::NetworkConfig;
use shared_resources::direction::Direction;
use shared_resources::message::{Envelope, Message};
use shared_resources::request::FloorRequest;
use udpnet::p2p::{self, RecvError};
use udpnet::sock;

use crate::queues::{QueueError, Scheduler};
use crate::state::thread_name;

/// The three sockets the scheduler owns, bound together at startup and
/// closed together when the process goes down.
pub struct Endpoints {
    pub floor_requests: Socket,
    pub elevator_polls: Socket,
    pub elevator_responses: Socket,
}

impl Endpoints {
    pub fn bind(network: &NetworkConfig) -> io::Result<Endpoints> {
        Ok(Endpoints {
            floor_requests: sock::new_rx(network.floor_request_port)?,
            elevator_polls: sock::new_rx(network.elevator_poll_port)?,
            elevator_responses: sock::new_rx(network.elevator_response_port)?,
        })
    }
}

pub fn init(scheduler: Arc<Scheduler>, network: NetworkConfig) -> Vec<thread::JoinHandle<()>> {
    let endpoints = match Endpoints::bind(&network) {
        Ok(endpoints) => endpoints,
        Err(e) => panic!(
            "could not bind scheduler sockets on ports {}, {} and {}: {}. Already in use?",
            network.floor_request_port,
            network.elevator_poll_port,
            network.elevator_response_port,
            e
        ),
    };
    let Endpoints {
        floor_requests,
        elevator_polls,
        elevator_responses,
    } = endpoints;
    let delivery_addr = network.floor_delivery_addr();

    let mut workers = Vec::new();
    {
        let scheduler = scheduler.clone();
        workers.push(
            thread::Builder::new()
                .name("scheduler_floor_requests".to_string())
                .spawn(move || floor_request_intake(&scheduler, floor_requests))
                .unwrap(),
        );
    }
    {
        let scheduler = scheduler.clone();
        workers.push(
            thread::Builder::new()
                .name("scheduler_elevator_polls".to_string())
                .spawn(move || elevator_poll_loop(&scheduler, elevator_polls))
                .unwrap(),
        );
    }
    {
        let scheduler = scheduler.clone();
        workers.push(
            thread::Builder::new()
                .name("scheduler_elevator_responses".to_string())
                .spawn(move || elevator_response_intake(&scheduler, elevator_responses))
                .unwrap(),
        );
    }
    workers.push(
        thread::Builder::new()
            .name("scheduler_floor_delivery".to_string())
            .spawn(move || floor_delivery(&scheduler, delivery_addr))
            .unwrap(),
    );
    workers
}

fn floor_request_intake(scheduler: &Scheduler, sock: Socket) {
    let mut buf = [0; p2p::RECV_BUFFER_SIZE];
    loop {
        let envelope: Envelope = match p2p::recv(&sock, &mut buf) {
            Ok((envelope, _)) => envelope,
            Err(RecvError::IOError(e)) => panic!("floor request socket failed: {}", e),
            Err(RecvError::BadPacket(e)) => {
                warn!("discarding bad floor request datagram: {}", e);
                continue;
            }
        };
        match envelope.open() {
            Ok(Message::FloorRequest(request)) => {
                info!("{}: received floor request {:?}", thread_name(), request);
                match scheduler.add_floor_request(request) {
                    Ok(()) => (),
                    Err(QueueError::Disconnected) => return,
                    Err(e) => warn!("{}", e),
                }
            }
            Ok(other) => warn!("unexpected {} on the floor request channel", other.variant_name()),
            Err(e) => warn!("discarding floor request datagram: {}", e),
        }
    }
}

fn elevator_poll_loop(scheduler: &Scheduler, sock: Socket) {
    let mut buf = [0; p2p::RECV_BUFFER_SIZE];
    loop {
        let (envelope, reply_addr): (Envelope, _) = match p2p::recv(&sock, &mut buf) {
            Ok(received) => received,
            Err(RecvError::IOError(e)) => panic!("elevator poll socket failed: {}", e),
            Err(RecvError::BadPacket(e)) => {
                warn!("discarding bad poll datagram: {}", e);
                continue;
            }
        };
        let poll = match envelope.open() {
            Ok(Message::ElevatorRequest(poll)) => poll,
            Ok(other) => {
                warn!("unexpected {} on the poll channel", other.variant_name());
                continue;
            }
            Err(e) => {
                warn!("discarding poll datagram: {}", e);
                continue;
            }
        };
        // An idle elevator waits for its next trip; a moving one only takes
        // what it can service without reversing.
        let reply: Vec<FloorRequest> = match poll.direction {
            Direction::Stop => match scheduler.get_next_request() {
                Ok(request) => vec![request],
                Err(_) => return,
            },
            direction => scheduler.take_compatible_requests(poll.floor, direction),
        };
        info!(
            "{}: answering poll from floor {} with {} request(s)",
            thread_name(),
            poll.floor,
            reply.len()
        );
        let envelope = Envelope::new(Message::RequestSet(reply));
        if let Err(e) = p2p::send(&sock, &envelope, &reply_addr) {
            warn!("could not answer elevator poll: {}", e);
        }
    }
}

fn elevator_response_intake(scheduler: &Scheduler, sock: Socket) {
    let mut buf = [0; p2p::RECV_BUFFER_SIZE];
    loop {
        let envelope: Envelope = match p2p::recv(&sock, &mut buf) {
            Ok((envelope, _)) => envelope,
            Err(RecvError::IOError(e)) => panic!("elevator response socket failed: {}", e),
            Err(RecvError::BadPacket(e)) => {
                warn!("discarding bad response datagram: {}", e);
                continue;
            }
        };
        match envelope.open() {
            Ok(Message::ElevatorResponse(response)) => {
                info!(
                    "{}: received completion for floor {} from the elevator",
                    thread_name(),
                    response.floor
                );
                match scheduler.add_elevator_response(response) {
                    Ok(()) => (),
                    Err(QueueError::Disconnected) => return,
                    Err(e) => warn!("{}", e),
                }
            }
            Ok(other) => warn!("unexpected {} on the response channel", other.variant_name()),
            Err(e) => warn!("discarding response datagram: {}", e),
        }
    }
}

fn floor_delivery(scheduler: &Scheduler, delivery_addr: net::SocketAddr) {
    loop {
        let response = match scheduler.get_elevator_response() {
            Ok(response) => response,
            Err(_) => return,
        };
        info!(
            "{}: delivering \"{}\" to the floor subsystem",
            thread_name(),
            response.message
        );
        if let Err(e) = p2p::send_text(&response.message, &delivery_addr) {
            warn!("could not deliver response to floor: {}", e);
        }
        scheduler.response_processed();
    }
}

/// ----- NETWORK MODULE -----
/// Owns the elevator's view of the dispatcher: polls go out as blocking
/// request/reply round trips, completion notices as one-shot sends. The
/// state machine stays off the sockets and talks to this module over
/// channels.

use std::process;

use crossbeam_channel::{select, Receiver, Sender};
use log::warn;

use shared_resources::config::NetworkConfig;
use shared_resources::message::{Envelope, Message};
use shared_resources::request::{ElevatorRequest, ElevatorResponse, FloorRequest};
use udpnet::p2p;

pub fn main(
    network: NetworkConfig,
    poll_rx: Receiver<ElevatorRequest>,
    reply_tx: Sender<Vec<FloorRequest>>,
    response_rx: Receiver<ElevatorResponse>,
) {
    let poll_addr = network.elevator_poll_addr();
    let response_addr = network.elevator_response_addr();

    loop {
        select! {
            recv(poll_rx) -> msg => {
                let poll = msg.unwrap();
                let envelope = Envelope::new(Message::ElevatorRequest(poll));
                let reply: Envelope = match p2p::call(&poll_addr, &envelope) {
                    Ok(reply) => reply,
                    Err(e) => {
                        warn!("poll to the scheduler failed: {:?}", e);
                        process::exit(1);
                    }
                };
                match reply.open() {
                    Ok(Message::RequestSet(requests)) => reply_tx.send(requests).unwrap(),
                    Ok(other) => {
                        warn!("unexpected {} in poll reply", other.variant_name());
                        process::exit(1);
                    }
                    Err(e) => {
                        warn!("bad poll reply: {}", e);
                        process::exit(1);
                    }
                }
            },
            recv(response_rx) -> msg => {
                let response = msg.unwrap();
                let envelope = Envelope::new(Message::ElevatorResponse(response));
                if let Err(e) = p2p::send_once(&envelope, &response_addr) {
                    warn!("could not submit response to the scheduler: {}", e);
                }
            },
        }
    }
}

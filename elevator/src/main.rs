use std::thread;

use crossbeam_channel::unbounded;

use shared_resources::config::ElevatorConfig;

pub mod config;
pub mod fsm;
pub mod network;
pub mod state;

fn main() {
    env_logger::init();

    // READ CONFIGURATION
    let config = ElevatorConfig::get();

    // INITIALIZE CHANNELS
    let (poll_tx, poll_rx) = unbounded();
    let (reply_tx, reply_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();

    // INITIALIZE NETWORK MODULE
    {
        let network = config.network.clone();
        thread::Builder::new()
            .name("elevator_network".to_string())
            .spawn(move || network::main(network, poll_rx, reply_tx, response_rx))
            .unwrap();
    }

    // RUN THE STATE MACHINE
    let link = fsm::SchedulerLink {
        poll_tx,
        reply_rx,
        response_tx,
    };
    fsm::main(config.elevator, link);
}

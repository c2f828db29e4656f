use std::process;
use std::thread;

use crossbeam_channel::{select, unbounded};

use shared_resources::config::FloorConfig;
use shared_resources::message::{Envelope, Message};
use udpnet::p2p;

pub mod config;
pub mod input;

fn main() {
    env_logger::init();

    // READ CONFIGURATION AND THE REQUEST FILE
    let floor_config = FloorConfig::get();
    let requests = match input::load_requests(&floor_config.request_file) {
        Ok(requests) => requests,
        Err(e) => {
            log::error!("could not read {}: {}", floor_config.request_file, e);
            process::exit(1);
        }
    };

    // INITIALIZE DELIVERY LISTENER
    let (delivery_tx, delivery_rx) = unbounded();
    {
        let port = floor_config.network.floor_delivery_port;
        thread::Builder::new()
            .name("floor_deliveries".to_string())
            .spawn(move || {
                if p2p::rx_text(port, delivery_tx).is_err() {
                    process::exit(1);
                }
            })
            .unwrap();
    }

    // SEND THE REQUEST FILE TO THE SCHEDULER
    {
        let request_addr = floor_config.network.floor_request_addr();
        thread::Builder::new()
            .name("floor_requests".to_string())
            .spawn(move || {
                for request in requests {
                    log::info!("floor_requests: sending {:?}", request);
                    let envelope = Envelope::new(Message::FloorRequest(request));
                    if let Err(e) = p2p::send_once(&envelope, &request_addr) {
                        log::warn!("could not send floor request: {}", e);
                    }
                    thread::sleep(config::SEND_INTERVAL);
                }
            })
            .unwrap();
    }

    // NARRATE COMPLETIONS
    loop {
        select! {
            recv(delivery_rx) -> msg => {
                log::info!("floor received: {}", msg.unwrap());
            }
        }
    }
}

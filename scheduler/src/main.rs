use std::sync::Arc;

use shared_resources::config::SchedulerConfig;

pub mod network;
pub mod queues;
pub mod state;

fn main() {
    env_logger::init();

    // READ CONFIGURATION
    let config = SchedulerConfig::get();

    // INITIALIZE QUEUES AND STATE
    let scheduler = Arc::new(queues::Scheduler::new(config.elevator.num_floors));
    log::info!(
        "{}: scheduler starting in state {}",
        state::thread_name(),
        scheduler.state().as_string()
    );

    // INITIALIZE NETWORK WORKERS
    let workers = network::init(scheduler, config.network);
    for worker in workers {
        worker.join().unwrap();
    }
}

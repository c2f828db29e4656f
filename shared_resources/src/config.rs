use std::collections::HashMap;
use std::env;
use std::fs;
use std::net;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub network: HashMap<String, u16>,
    pub elevator: HashMap<String, u8>,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub floor_request_port: u16,
    pub elevator_poll_port: u16,
    pub elevator_response_port: u16,
    pub floor_delivery_port: u16,
}

impl NetworkConfig {
    pub fn floor_request_addr(&self) -> net::SocketAddr {
        net::SocketAddr::from(([127, 0, 0, 1], self.floor_request_port))
    }

    pub fn elevator_poll_addr(&self) -> net::SocketAddr {
        net::SocketAddr::from(([127, 0, 0, 1], self.elevator_poll_port))
    }

    pub fn elevator_response_addr(&self) -> net::SocketAddr {
        net::SocketAddr::from(([127, 0, 0, 1], self.elevator_response_port))
    }

    pub fn floor_delivery_addr(&self) -> net::SocketAddr {
        net::SocketAddr::from(([127, 0, 0, 1], self.floor_delivery_port))
    }
}

#[derive(Debug, Clone)]
pub struct ElevatorSettings {
    pub num_floors: u8,
}

fn default_config() -> ConfigFile {
    ConfigFile {
        network: HashMap::from([
            (String::from("floor_request_port"), 4999),
            (String::from("elevator_poll_port"), 5555),
            (String::from("elevator_response_port"), 5556),
            (String::from("floor_delivery_port"), 4998),
        ]),
        elevator: HashMap::from([(String::from("num_floors"), 10)]),
    }
}

fn read_config_file() -> ConfigFile {
    let file_path = "config.json";
    match fs::read_to_string(file_path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("could not parse {}: {}, using default settings", file_path, e);
                default_config()
            }
        },
        Err(_) => {
            log::warn!("no configuration file provided, using default settings");
            default_config()
        }
    }
}

fn network_config(config_file: &ConfigFile) -> NetworkConfig {
    let defaults = default_config();
    let port = |name: &str| match config_file.network.get(name) {
        Some(port) => *port,
        None => defaults.network[name],
    };
    NetworkConfig {
        floor_request_port: port("floor_request_port"),
        elevator_poll_port: port("elevator_poll_port"),
        elevator_response_port: port("elevator_response_port"),
        floor_delivery_port: port("floor_delivery_port"),
    }
}

fn elevator_settings(config_file: &ConfigFile) -> ElevatorSettings {
    ElevatorSettings {
        num_floors: match config_file.elevator.get("num_floors") {
            Some(n) => *n,
            None => default_config().elevator["num_floors"],
        },
    }
}

/// Returns the value following `--<name>` on the command line, if present
/// and parseable.
pub fn parse_env_arg(name: &str) -> Option<String> {
    let flag = "--".to_owned() + name;
    let args: Vec<String> = env::args().collect();
    for arg_pair in args.windows(2) {
        if arg_pair[0] == flag {
            return Some(arg_pair[1].clone());
        }
    }
    None
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub network: NetworkConfig,
    pub elevator: ElevatorSettings,
}

impl SchedulerConfig {
    pub fn get() -> Self {
        let config_file = read_config_file();
        SchedulerConfig {
            network: network_config(&config_file),
            elevator: elevator_settings(&config_file),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElevatorConfig {
    pub network: NetworkConfig,
    pub elevator: ElevatorSettings,
}

impl ElevatorConfig {
    pub fn get() -> Self {
        let config_file = read_config_file();
        ElevatorConfig {
            network: network_config(&config_file),
            elevator: elevator_settings(&config_file),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FloorConfig {
    pub network: NetworkConfig,
    pub request_file: String,
}

impl FloorConfig {
    pub fn get() -> Self {
        let config_file = read_config_file();
        let request_file = match parse_env_arg("file") {
            Some(path) => path,
            None => String::from("floor/requests.txt"),
        };
        FloorConfig {
            network: network_config(&config_file),
            request_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config_file = ConfigFile {
            network: HashMap::from([(String::from("floor_request_port"), 6000)]),
            elevator: HashMap::new(),
        };
        let network = network_config(&config_file);
        assert_eq!(network.floor_request_port, 6000);
        assert_eq!(network.elevator_poll_port, 5555);
        assert_eq!(elevator_settings(&config_file).num_floors, 10);
    }

    #[test]
    fn addrs_are_local() {
        let network = network_config(&default_config());
        assert_eq!(
            network.floor_request_addr(),
            net::SocketAddr::from(([127, 0, 0, 1], 4999))
        );
    }
}

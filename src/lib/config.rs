use thiserror::Error;

/// Environment variable naming the serial device of the servo bus.
pub const PORT_ENV: &str = "ST3215_DEV";

/// ST3215 factory baud rate.
pub const DEFAULT_BAUDRATE: u32 = 1_000_000;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error(
        "ST3215_DEV environment variable not set.\n\
         Set it to the serial device of the servo bus, e.g.: export ST3215_DEV=/dev/ttyACM0"
    )]
    MissingPort,
}

/// Connection parameters, resolved once at start-up and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: String,
    pub baudrate: u32,
}

/// Lookup in the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Config {
    pub fn resolve<F>(lookup: F, baudrate: u32) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(PORT_ENV) {
            Some(port) if !port.trim().is_empty() => Ok(Config {
                port: port.trim().to_string(),
                baudrate,
            }),
            _ => Err(ConfigError::MissingPort),
        }
    }
}

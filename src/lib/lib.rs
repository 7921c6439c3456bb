pub mod commands;
pub mod config;
pub mod driver;
pub mod ids;
pub mod port;
pub mod prompt;
pub mod protocol;
pub mod regs;
pub mod report;
pub mod telemetry;
pub mod workflow;

/// Set up `env_logger` the same way for every binary.
pub fn init_logging(debug: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if debug {
        "debug"
    } else {
        "info"
    }))
    .format_timestamp(None)
    .format_target(false)
    .init();
}

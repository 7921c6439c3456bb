use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells::Bash};
use std::io;
use std::process;

use st3215_utils::commands::change_id;
use st3215_utils::config::{self, DEFAULT_BAUDRATE};
use st3215_utils::driver::SerialConnector;

/// Change the ID of a Waveshare ST3215 servo.
///
/// Connect only ONE servo at a time when changing IDs. The new ID is
/// stored in the servo's EEPROM.
#[derive(Parser, Debug)]
#[clap(author, version, about, allow_negative_numbers = true)]
struct Cli {
    /// Skip sanity checks
    #[clap(long, short)]
    force: bool,

    /// enable debug output
    #[clap(long, short)]
    debug: bool,

    /// UART baud rate
    #[clap(long, short, default_value_t = DEFAULT_BAUDRATE)]
    baudrate: u32,

    /// current_id new_id, or nothing for interactive mode
    ids: Vec<String>,
}

fn main() {
    if std::env::var("GENERATE_COMPLETION").is_ok() {
        generate(
            Bash,
            &mut Cli::command(),
            "st3215-change-id",
            &mut io::stdout(),
        );
        return;
    }

    let cli = Cli::parse();
    st3215_utils::init_logging(cli.debug);

    let mut connector = SerialConnector { force: cli.force };
    let stdin = io::stdin();

    let code = change_id::run(
        &cli.ids,
        &config::process_env,
        cli.baudrate,
        &mut connector,
        &mut stdin.lock(),
        &mut io::stdout(),
    );
    process::exit(code);
}

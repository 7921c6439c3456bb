use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells::Bash};
use std::io;
use std::process;

use st3215_utils::commands::list::{self, ListOptions};
use st3215_utils::config::{self, DEFAULT_BAUDRATE};
use st3215_utils::driver::SerialConnector;
use st3215_utils::ids::IdRange;
use st3215_utils::report::OutputFormat;

/// List ST3215 servos on the bus named by ST3215_DEV, with position,
/// voltage, temperature, mode and load.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
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

    /// Use json-formatted output
    #[clap(long, short)]
    json: bool,

    /// Only report these ids, e.g. 1-5,9
    #[clap(long, short)]
    ids: Option<IdRange>,
}

fn main() {
    if std::env::var("GENERATE_COMPLETION").is_ok() {
        generate(Bash, &mut Cli::command(), "st3215-list", &mut io::stdout());
        return;
    }

    let cli = Cli::parse();
    st3215_utils::init_logging(cli.debug);

    let options = ListOptions {
        baudrate: cli.baudrate,
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        },
        ids: cli.ids,
    };
    let mut connector = SerialConnector { force: cli.force };

    let code = list::run(
        &config::process_env,
        &mut connector,
        &options,
        &mut io::stdout(),
    );
    process::exit(code);
}

use clap::Parser;
use jotter::cli::{handle_serve, normalize_args, Cli, ServeConfig};
use jotter::logging::{init_logging, Verbosity};

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Err(e) = handle_serve(ServeConfig::from(&cli)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser as ClapParser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use plus_drv::{run, Cli};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = run(&cli, &mut stdout.lock(), &mut stderr.lock());
    std::process::exit(code);
}

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod models;

use clap::Parser;

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    if let Err(e) = cli::execute(&cli, stdin.lock(), &mut stdout) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

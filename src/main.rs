use simple_logger::SimpleLogger;
use std::{io, process};

fn main() {
    // RUST_LOG overrides the default level
    if let Err(err) = SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("logger setup failed: {}", err);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(err) = amortization::run(&mut input, &mut output) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

#![forbid(unsafe_code)]

//! `sniff` binary entry point.

use std::io::{self, Write};
use std::process;

use sniff::{cli, logging};
use tracing::warn;

fn main() {
    let opts = cli::Opts::parse();
    logging::init(opts.log_format);
    for err in &opts.env_warnings {
        warn!(field = err.field, value = %err.value, "ignoring environment override: {}", err.message);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = sniff::run(&opts.file, &opts.config, opts.format, &mut out).and_then(|()| {
        out.flush()?;
        Ok(())
    });
    if let Err(err) = result {
        eprintln!("sniff: {err}");
        process::exit(1);
    }
}

mod args;
mod decode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use std::io::{self, IsTerminal};
use std::process;

use crate::args::Args;
use crate::decode::config_reader::Settings;
use crate::decode::io_lines::resolve_input;
use crate::decode::run_decoder;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    debug!("args: {:?}", args);

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    debug!("settings: {:?}", settings);

    let stdin = io::stdin();
    let input = resolve_input(args.input.as_deref(), stdin.is_terminal());
    let res = run_decoder(
        input,
        &settings,
        stdin.lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    if let Err(e) = res {
        eprintln!("{}", e);
        process::exit(1);
    }
}

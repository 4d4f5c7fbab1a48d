use accident_processor::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand, show help
    let Some(command) = args.get_command() else {
        if Args::command().print_help().is_err() {
            process::exit(1);
        }
        println!();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

//! Migration scaffolding CLI for quarry.

mod cli;
mod new_cmd;

pub use cli::{Command, HelpTopic, NewArgs, parse_args};

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    match cli::parse_args(&args)? {
        Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        Command::New(args) => new_cmd::run(args),
    }
}

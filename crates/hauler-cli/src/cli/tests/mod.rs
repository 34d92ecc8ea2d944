//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}


#[test]
fn cli_parse_config() {
    assert!(matches!(
        parse(&["hauler", "config"]),
        CliCommand::Config
    ));
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["hauler", "frobnicate"]).is_err());
}

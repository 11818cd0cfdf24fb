//! CLI help output specs
//!
//! Verify help text displays for both subcommands.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_fails() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("deploy")
        .stdout_has("pull");
}

#[test]
fn deploy_help_shows_flags() {
    cli()
        .args(&["deploy", "--help"])
        .passes()
        .stdout_has("--containers")
        .stdout_has("--image")
        .stdout_has("--settle-ms");
}

#[test]
fn pull_help_shows_flags() {
    cli().args(&["pull", "--help"]).passes().stdout_has("--image").stdout_has("--host");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("redock");
}

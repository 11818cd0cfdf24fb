// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn plain_args_render_bare() {
    let line = CommandLine::new(vec![ShellArg::plain("docker"), ShellArg::plain("ps")]);
    assert_eq!(line.render(), "docker ps");
}

#[test]
fn double_quoted_arg_keeps_embedded_whitespace() {
    let line = CommandLine::new(vec![
        ShellArg::plain("-e"),
        ShellArg::double_quoted("GREETING=hello world"),
    ]);
    assert_eq!(line.render(), "-e \"GREETING=hello world\"");
}

#[test]
fn single_quoted_arg_renders_with_single_quotes() {
    assert_eq!(ShellArg::single_quoted("{{.Names}}").to_string(), "'{{.Names}}'");
}

#[test]
fn empty_command_line_renders_empty() {
    assert_eq!(CommandLine::new(vec![]).render(), "");
}

#[yare::parameterized(
    inspect = { docker::inspect("web"), "docker inspect web" },
    rename = { docker::rename("web", "web_old"), "docker rename web web_old" },
    remove = { docker::remove("web_old"), "docker rm web_old" },
    remove_force = { docker::remove_force("web_old"), "docker rm -f web_old" },
    pull = { docker::pull("registry/app:2.0"), "docker pull registry/app:2.0" },
    prune = { docker::image_prune(), "docker image prune -a -f" },
)]
fn docker_catalog_renders(line: CommandLine, expected: &str) {
    assert_eq!(line.render(), expected);
}

#[test]
fn list_names_format_is_single_quoted() {
    assert_eq!(docker::list_names().render(), "docker ps -a --format '{{.Names}}'");
}

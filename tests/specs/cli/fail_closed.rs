//! Fail-closed configuration specs
//!
//! Missing mandatory inputs abort the run before any connection
//! attempt.

use crate::prelude::*;

#[test]
fn deploy_without_any_configuration_names_the_first_missing_input() {
    cli().args(&["deploy"]).fails().stderr_has("SERVER_ADDRESS");
}

#[test]
fn deploy_without_container_names_fails() {
    cli()
        .args(&["deploy"])
        .env("SERVER_ADDRESS", "deploy.example.com")
        .env("USERNAME", "deployer")
        .env("PRIVATE_KEY", "key-material")
        .env("IMAGE_URL", "registry/app:2.0")
        .fails()
        .stderr_has("CONTAINER_NAMES");
}

#[test]
fn deploy_with_unparseable_port_fails() {
    cli()
        .args(&["deploy"])
        .env("SERVER_ADDRESS", "deploy.example.com")
        .env("USERNAME", "deployer")
        .env("PORT", "not-a-port")
        .env("PRIVATE_KEY", "key-material")
        .env("CONTAINER_NAMES", "web&worker")
        .env("IMAGE_URL", "registry/app:2.0")
        .fails()
        .stderr_has("invalid port");
}

#[test]
fn deploy_without_image_or_resolver_fails() {
    cli()
        .args(&["deploy"])
        .env("SERVER_ADDRESS", "deploy.example.com")
        .env("USERNAME", "deployer")
        .env("PRIVATE_KEY", "key-material")
        .env("CONTAINER_NAMES", "web")
        .fails()
        .stderr_has("IMAGE_URL");
}

#[test]
fn pull_without_image_fails() {
    cli()
        .args(&["pull"])
        .env("SERVER_ADDRESS", "deploy.example.com")
        .env("USERNAME", "deployer")
        .env("PRIVATE_KEY", "key-material")
        .fails()
        .stderr_has("IMAGE_URL");
}

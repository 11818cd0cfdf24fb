// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::descriptor::{ContainerDescriptor, PortBinding, RestartPolicy};
use std::collections::{BTreeMap, BTreeSet};

fn bare_descriptor(name: &str) -> ContainerDescriptor {
    ContainerDescriptor {
        name: name.to_string(),
        env: Vec::new(),
        port_bindings: BTreeMap::new(),
        volumes: BTreeSet::new(),
        networks: BTreeSet::new(),
        restart_policy: RestartPolicy::default(),
    }
}

fn full_descriptor() -> ContainerDescriptor {
    let mut descriptor = bare_descriptor("web");
    descriptor.env = vec!["APP_MODE=production".into(), "GREETING=hello world".into()];
    descriptor.port_bindings.insert(
        "8080/tcp".into(),
        vec![PortBinding { host_ip: "0.0.0.0".into(), host_port: "9090".into() }],
    );
    descriptor.port_bindings.insert(
        "53/udp".into(),
        vec![PortBinding { host_ip: "127.0.0.1".into(), host_port: "5353".into() }],
    );
    descriptor.volumes.insert("/data".into());
    descriptor.networks.insert("app-net".into());
    descriptor.restart_policy = RestartPolicy { name: "on-failure".into(), maximum_retry_count: 3 };
    descriptor
}

#[test]
fn minimal_plan_is_name_and_image() {
    let plan = RecreatePlan::build(&bare_descriptor("web"), "registry/app:2.0");
    assert_eq!(plan.command_line().render(), "docker run -d --name web registry/app:2.0");
}

#[test]
fn full_plan_renders_in_fixed_order() {
    let plan = RecreatePlan::build(&full_descriptor(), "registry/app:2.0");
    assert_eq!(
        plan.command_line().render(),
        "docker run -d --name web \
         -e \"APP_MODE=production\" -e \"GREETING=hello world\" \
         -p 127.0.0.1:5353:53 -p 0.0.0.0:9090:8080 \
         -v /data:/data \
         --network app-net \
         --restart on-failure --restart-max-retries 3 \
         registry/app:2.0"
    );
}

#[test]
fn identical_inputs_yield_byte_identical_output() {
    let descriptor = full_descriptor();
    let first = RecreatePlan::build(&descriptor, "registry/app:2.0");
    let second = RecreatePlan::build(&descriptor, "registry/app:2.0");
    assert_eq!(first, second);
    assert_eq!(first.command_line().render(), second.command_line().render());
}

#[test]
fn port_binding_strips_protocol_suffix() {
    let mut descriptor = bare_descriptor("web");
    descriptor.port_bindings.insert(
        "8080/tcp".into(),
        vec![PortBinding { host_ip: "0.0.0.0".into(), host_port: "9090".into() }],
    );
    let rendered = RecreatePlan::build(&descriptor, "img:1").command_line().render();
    assert!(rendered.contains("-p 0.0.0.0:9090:8080"));
    assert!(!rendered.contains("tcp"));
}

#[test]
fn every_binding_of_a_port_is_published() {
    let mut descriptor = bare_descriptor("web");
    descriptor.port_bindings.insert(
        "80/tcp".into(),
        vec![
            PortBinding { host_ip: "0.0.0.0".into(), host_port: "8080".into() },
            PortBinding { host_ip: "10.0.0.1".into(), host_port: "8081".into() },
        ],
    );
    let rendered = RecreatePlan::build(&descriptor, "img:1").command_line().render();
    assert!(rendered.contains("-p 0.0.0.0:8080:80 -p 10.0.0.1:8081:80"));
}

#[test]
fn volume_mounts_target_onto_itself() {
    let mut descriptor = bare_descriptor("web");
    descriptor.volumes.insert("/app/logs".into());
    let rendered = RecreatePlan::build(&descriptor, "img:1").command_line().render();
    assert!(rendered.contains("-v /app/logs:/app/logs"));
}

#[yare::parameterized(
    no_policy = { "", 0, 0 },
    policy_without_retries = { "always", 0, 1 },
    policy_with_retries = { "on-failure", 5, 2 },
    retries_ignored_without_name = { "", 5, 0 },
)]
fn restart_flags_follow_policy_rule(name: &str, retries: i64, expected_flags: usize) {
    let mut descriptor = bare_descriptor("web");
    descriptor.restart_policy = RestartPolicy { name: name.into(), maximum_retry_count: retries };
    let plan = RecreatePlan::build(&descriptor, "img:1");
    let restart_flags = plan
        .args()
        .iter()
        .filter(|arg| matches!(arg, ShellArg::Plain(v) if v.starts_with("--restart")))
        .count();
    assert_eq!(restart_flags, expected_flags);
}

#[test]
fn flag_counts_match_descriptor_shape() {
    let descriptor = full_descriptor();
    let plan = RecreatePlan::build(&descriptor, "img:1");
    let count = |flag: &str| {
        plan.args().iter().filter(|arg| matches!(arg, ShellArg::Plain(v) if v == flag)).count()
    };
    assert_eq!(count("-e"), descriptor.env.len());
    assert_eq!(count("-p"), descriptor.port_bindings.values().map(Vec::len).sum::<usize>());
    assert_eq!(count("-v"), descriptor.volumes.len());
    assert_eq!(count("--network"), descriptor.networks.len());
    assert_eq!(count("--restart"), 1);
}

#[test]
fn image_reference_is_final_argument() {
    let plan = RecreatePlan::build(&full_descriptor(), "registry/app:2.0");
    assert_eq!(plan.args().last(), Some(&ShellArg::plain("registry/app:2.0")));
}

#[test]
fn env_order_is_preserved_not_sorted() {
    let mut descriptor = bare_descriptor("web");
    descriptor.env = vec!["Z=1".into(), "A=2".into(), "Z=3".into()];
    let rendered = RecreatePlan::build(&descriptor, "img:1").command_line().render();
    assert!(rendered.contains("-e \"Z=1\" -e \"A=2\" -e \"Z=3\""));
}

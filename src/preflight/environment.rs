//! Deploy input and target host checks.

use std::path::Path;

use crate::capabilities::Capabilities;
use crate::config::{Config, CONTAINER_DIR_NAME};
use crate::template;
use crate::update::COMPOSE_FILE;

use super::types::{CheckResult, Workflow};

fn check_path(name: &str, path: &Path, is_dir: bool, required: bool) -> CheckResult {
    let found = if is_dir { path.is_dir() } else { path.is_file() };
    let shown = path.display().to_string();
    match (found, required) {
        (true, _) => CheckResult::pass_with(name, &shown),
        (false, true) => CheckResult::fail(name, &format!("Not found: {}", shown)),
        (false, false) => CheckResult::warn(name, &format!("Not found: {}", shown)),
    }
}

/// Check templates, web assets, the WASM crate and certificates.
pub fn check_build_inputs(config: &Config, workflow: Workflow) -> Vec<CheckResult> {
    let mut results = Vec::new();
    if !workflow.builds() {
        return results;
    }

    let templates = config.templates_dir();
    let mut names = vec![template::NGINX_CONF, template::OPEN_SEARCH];
    if workflow.covers(Workflow::Image) {
        names.push(template::DOCKERFILE);
    }
    if workflow.covers(Workflow::Archive) {
        names.push(template::DOCKER_COMPOSE);
    }
    for name in names {
        results.push(check_path(
            &format!("templates/{}", name),
            &templates.join(name),
            false,
            true,
        ));
    }

    results.push(check_path("web assets", &config.www_source, true, true));
    results.push(check_path(
        "WASM crate",
        &config.project_root.join(&config.wasm_crate),
        true,
        true,
    ));

    if workflow.covers(Workflow::Archive) {
        results.push(check_path("webdis config", &config.webdis_config(), false, true));
    }

    // Certificates can be passed on the command line, so only warn
    results.push(check_path(
        "certs/fullchain.pem",
        &config.default_cert_file(),
        false,
        false,
    ));
    results.push(check_path(
        "certs/privkey.pem",
        &config.default_cert_key(),
        false,
        false,
    ));

    results
}

/// Check the updater's preconditions on this host.
pub fn check_update_host(caps: &Capabilities, workflow: Workflow) -> Vec<CheckResult> {
    let mut results = Vec::new();
    if !workflow.covers(Workflow::Update) {
        return results;
    }

    if caps.superuser {
        results.push(CheckResult::fail(
            "unprivileged user",
            "Running as root - the updater refuses to run",
        ));
    } else {
        results.push(CheckResult::pass("unprivileged user"));
    }

    // The default install directory, relative to where the updater runs
    if let Ok(cwd) = std::env::current_dir() {
        let descriptor = cwd.join(CONTAINER_DIR_NAME).join(COMPOSE_FILE);
        results.push(check_path("install directory", &descriptor, false, false));
    }

    results
}

//! Preflight checks for the build and update workflows.
//!
//! Reports host tools and environment readiness without changing anything.
//! Run with `ado-deploy preflight` before a build or an update.

mod environment;
mod host_tools;
mod types;

use tracing::debug;

use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::error::{Error, Result};

pub use types::{CheckResult, CheckStatus, PreflightReport, Workflow};

/// Run all preflight checks relevant to `workflow`.
pub fn run_preflight(config: &Config, caps: &Capabilities, workflow: Workflow) -> PreflightReport {
    let mut checks = Vec::new();

    debug!(?workflow, "running preflight checks");

    // =======================================================================
    // Host Tools
    // =======================================================================
    checks.extend(host_tools::check_host_tools(caps, workflow));

    // =======================================================================
    // Deploy inputs (templates, web assets, certificates)
    // =======================================================================
    checks.extend(environment::check_build_inputs(config, workflow));

    // =======================================================================
    // Target host
    // =======================================================================
    checks.extend(environment::check_update_host(caps, workflow));

    PreflightReport { workflow, checks }
}

/// Run preflight and fail if any check fails.
pub fn run_preflight_or_fail(
    config: &Config,
    caps: &Capabilities,
    workflow: Workflow,
) -> Result<PreflightReport> {
    let report = run_preflight(config, caps, workflow);
    report.print();

    if !report.all_passed() {
        return Err(Error::precondition(format!(
            "Preflight failed: {} check(s) failed. Fix the issues above first.",
            report.fail_count()
        )));
    }

    Ok(report)
}

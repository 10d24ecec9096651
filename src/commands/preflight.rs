//! Preflight command - runs preflight checks.

use anyhow::Result;

use ado_deploy::preflight::{self, Workflow};
use ado_deploy::{Capabilities, Config};

/// Execute the preflight command.
pub fn cmd_preflight(
    config: &Config,
    caps: &Capabilities,
    workflow: Workflow,
    strict: bool,
) -> Result<()> {
    config.print();
    println!();

    if strict {
        preflight::run_preflight_or_fail(config, caps, workflow)?;
        println!("All preflight checks passed!");
    } else {
        let report = preflight::run_preflight(config, caps, workflow);
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail with exit code 1.");
        }
    }
    Ok(())
}

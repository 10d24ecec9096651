//! Host tool availability checks.

use crate::capabilities::{Capabilities, Tool};

use super::types::{CheckResult, Workflow};

/// Workflows that cannot run without `tool`.
fn needed_by(tool: Tool) -> &'static [Workflow] {
    match tool {
        Tool::Docker => &[Workflow::Image],
        Tool::WasmPack => &[Workflow::Image, Workflow::Archive],
        Tool::DockerCompose => &[Workflow::Update],
    }
}

/// Check host tools are installed.
///
/// A missing tool fails only when the checked workflow needs it.
pub fn check_host_tools(caps: &Capabilities, workflow: Workflow) -> Vec<CheckResult> {
    Tool::ALL
        .iter()
        .map(|&tool| {
            let required = needed_by(tool).iter().any(|w| workflow.covers(*w));
            check_tool(caps, tool, required)
        })
        .collect()
}

fn check_tool(caps: &Capabilities, tool: Tool, required: bool) -> CheckResult {
    match caps.path(tool) {
        Some(path) => CheckResult::pass_with(tool.binary(), &path.display().to_string()),
        None => {
            let msg = format!("Not found. {}. {}", tool.install_hint(), tool.purpose());
            if required {
                CheckResult::fail(tool.binary(), &msg)
            } else {
                CheckResult::warn(tool.binary(), &msg)
            }
        }
    }
}

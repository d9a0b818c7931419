// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Skill Install Pipeline: push a skill bundle to a runner either as content
//! (the kernel owns the skill text) or as an installer command (the runner
//! shells out, so the command is checked against an allowlist of known-safe
//! prefixes and a denylist of shell-escape patterns before it's ever sent).

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::{EngineError, EngineResult};
use relay_core::{Channel, Event, KernelError, SkillId, WorkspaceId};
use relay_storage::Store;
use regex::RegexSet;
use std::sync::OnceLock;

const DEFAULT_ALLOWED_PREFIXES: &[&str] = &["buildd skill install "];

/// Patterns that would let a command escape the single program it claims to
/// invoke. Conservative on purpose: a false-positive rejection is cheap, a
/// false-negative is a shell.
const DANGEROUS_PATTERNS: &[&str] =
    &[r"\|", "`", r"\$\(", ";", "&&", r"rm\s+-rf", r"rm\s+-fr"];

fn dangerous_pattern_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| match RegexSet::new(DANGEROUS_PATTERNS) {
        Ok(set) => set,
        Err(_) => unreachable!("DANGEROUS_PATTERNS is a fixed, valid pattern list"),
    })
}

fn is_dangerous(command: &str) -> bool {
    dangerous_pattern_set().is_match(command)
}

fn is_allowed_prefix(command: &str, extra_allowed_prefixes: &[String]) -> bool {
    DEFAULT_ALLOWED_PREFIXES.iter().any(|p| command.starts_with(p))
        || extra_allowed_prefixes.iter().any(|p| command.starts_with(p.as_str()))
}

pub enum InstallSkillRequest {
    /// Content-push: the kernel has the skill text on file and sends it
    /// directly. Dedup on the runner side is by content hash, not here.
    Content { skill_id: SkillId },
    /// Command-push: the runner shells this out itself. Rejected unless it
    /// matches an allowed prefix and contains no dangerous pattern.
    Command { skill_slug: String, installer_command: String },
}

pub async fn install_skill(
    store: &dyn Store,
    bus: &dyn Bus,
    workspace_id: &WorkspaceId,
    request: InstallSkillRequest,
    extra_allowed_prefixes: &[String],
) -> EngineResult<()> {
    let channel = Channel::Workspace(workspace_id.clone());

    match request {
        InstallSkillRequest::Content { skill_id } => {
            let skill = store.get_skill(&skill_id).await?;
            let event = Event::SkillInstall {
                slug: skill.slug,
                name: skill.name,
                description: skill.description,
                content: skill.content,
                content_hash: skill.content_hash,
                reference_files: Vec::new(),
                installer_command: None,
                target_local_ui_url: None,
            };
            publish_best_effort(bus, channel, event).await;
            Ok(())
        }
        InstallSkillRequest::Command { skill_slug, installer_command } => {
            if is_dangerous(&installer_command) {
                return Err(EngineError::Kernel(KernelError::forbidden(
                    "installer command contains a disallowed shell pattern",
                )));
            }
            if !is_allowed_prefix(&installer_command, extra_allowed_prefixes) {
                return Err(EngineError::Kernel(KernelError::forbidden(
                    "installer command does not match an allowed prefix",
                )));
            }
            let event = Event::SkillInstall {
                slug: skill_slug,
                name: String::new(),
                description: String::new(),
                content: String::new(),
                content_hash: String::new(),
                reference_files: Vec::new(),
                installer_command: Some(installer_command),
                target_local_ui_url: None,
            };
            tracing::info!("skill install dispatched via installer command");
            publish_best_effort(bus, channel, event).await;
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod tests;

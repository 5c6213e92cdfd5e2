//! Serial, fail-fast execution of external build tools.
//!
//! Every subcommand resolves to a [`Plan`]: an ordered list of
//! [`Step`]s, each one external tool invocation. A step whose child
//! process exits non-zero aborts the whole run; there are no retries
//! and no partial-failure recovery. Steps already completed are left
//! on disk, which is what makes re-running cheap (a finished clone is
//! skipped instead of repeated).

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use log::info;

/// One external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    /// When this path exists the step is skipped (e.g. an existing
    /// clone).
    pub skip_if: Option<PathBuf>,
}

impl Step {
    pub fn new(label: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            skip_if: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn skip_if(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_if = Some(path.into());
        self
    }

    /// The command line as it will be logged and printed by
    /// `--print-plan`.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }

    fn run(&self) -> Result<()> {
        if let Some(skip) = &self.skip_if {
            if skip.exists() {
                info!("{}: {} exists, skipping", self.label, skip.display());
                return Ok(());
            }
        }
        info!("{}: {}", self.label, self.command_line());
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }
        let status = command
            .status()
            .with_context(|| format!("{}: failed to run {}", self.label, self.program))?;
        if !status.success() {
            bail!("{}: `{}` exited with {status}", self.label, self.command_line());
        }
        Ok(())
    }
}

/// The resolved steps of one subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Prints the resolved command lines without executing anything.
    pub fn print(&self) {
        for step in &self.steps {
            println!("[{}] {}", step.label, step.command_line());
        }
    }

    /// Runs every step in order, aborting on the first failure.
    pub fn run(&self) -> Result<()> {
        for step in &self.steps {
            step.run()?;
        }
        Ok(())
    }
}

/// Recursively copies every file matching `keep` from `src` into
/// `dst`, preserving relative paths.
pub fn copy_tree(src: &Path, dst: &Path, keep: impl Fn(&Path) -> bool) -> Result<usize> {
    let mut copied = 0;
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !keep(path) {
            continue;
        }
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::copy(path, &target)
            .with_context(|| format!("failed to copy {} to {}", path.display(), target.display()))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_command_lines_with_quoted_spaces() {
        let step = Step::new("configure", "cmake").args(["-G", "Unix Makefiles", "-S", "llvm"]);
        assert_eq!(
            step.command_line(),
            "cmake -G \"Unix Makefiles\" -S llvm"
        );
    }

    #[test]
    fn a_failing_step_aborts_the_plan() {
        let mut plan = Plan::default();
        plan.push(Step::new("ok", "true"));
        plan.push(Step::new("boom", "false"));
        plan.push(Step::new("unreached", "true"));
        let err = plan.run().unwrap_err();
        assert!(err.to_string().contains("boom"), "{err}");
    }

    #[test]
    fn a_missing_tool_names_itself() {
        let mut plan = Plan::default();
        plan.push(Step::new("configure", "definitely-not-a-real-tool"));
        let err = plan.run().unwrap_err();
        assert!(
            format!("{err:#}").contains("definitely-not-a-real-tool"),
            "{err:#}"
        );
    }

    #[test]
    fn skip_markers_short_circuit_a_step() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("present");
        std::fs::write(&marker, "").expect("marker");

        let mut plan = Plan::default();
        // Would fail if actually executed.
        plan.push(Step::new("clone", "false").skip_if(&marker));
        plan.run().expect("skipped step should not run");

        let mut unskipped = Plan::default();
        unskipped.push(Step::new("clone", "false").skip_if(dir.path().join("absent")));
        assert!(unskipped.run().is_err());
    }

    #[test]
    fn copies_matching_files_preserving_layout() {
        let src = tempfile::tempdir().expect("src");
        let dst = tempfile::tempdir().expect("dst");
        std::fs::create_dir_all(src.path().join("lib")).expect("mkdir");
        std::fs::write(src.path().join("lib/libclang.a"), "a").expect("write");
        std::fs::write(src.path().join("lib/notes.txt"), "n").expect("write");

        let copied = copy_tree(src.path(), dst.path(), |p| {
            p.extension().is_some_and(|e| e == "a")
        })
        .expect("copy");
        assert_eq!(copied, 1);
        assert!(dst.path().join("lib/libclang.a").exists());
        assert!(!dst.path().join("lib/notes.txt").exists());
    }
}

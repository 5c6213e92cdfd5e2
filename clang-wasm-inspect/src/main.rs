//! Inspection driver for the wasm-packaged compiler front-end.
//!
//! Loads an artifact, mounts a host directory into its virtual
//! filesystem, parses a translation unit and prints diagnostics plus
//! an indented cursor tree. This is the quickest way to check that a
//! freshly built artifact actually works end to end.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;

use clang_wasm_api::{ChildVisitResult, CursorHandle, TranslationUnitFlags};
use clang_wasm_host::{Cursor, LibClang};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the libclang.wasm artifact; falls back to the
    /// CLANG_WASM_ARTIFACT environment variable.
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Guest path of the source file to parse.
    #[arg(short, long, default_value = "/home/web_user/main.c")]
    source: String,

    /// Host directory to mount, as HOST:GUEST
    /// (e.g. ./testSrc:/home/web_user). May be repeated.
    #[arg(long, value_name = "SPEC")]
    mount: Vec<String>,

    /// Extra compiler arguments passed through to the parse.
    #[arg(long = "arg", value_name = "ARG")]
    args: Vec<String>,

    /// Cut the printed tree off below this depth.
    #[arg(long, default_value_t = 6)]
    max_depth: u32,

    /// Only list the mounted directories and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let artifact = match &cli.artifact {
        Some(path) => path.clone(),
        None => std::env::var_os("CLANG_WASM_ARTIFACT")
            .map(PathBuf::from)
            .context("no --artifact given and CLANG_WASM_ARTIFACT is not set")?,
    };

    let mut lc = LibClang::load(&artifact)
        .with_context(|| format!("failed to load artifact {}", artifact.display()))?;
    debug!("artifact loaded from {}", artifact.display());

    let mut mounted = Vec::new();
    for spec in &cli.mount {
        let (host, guest) = parse_mount_spec(spec)?;
        lc.fs_mut()
            .mount(&guest, &host)
            .with_context(|| format!("failed to mount {} at {guest}", host.display()))?;
        mounted.push(guest);
    }

    if cli.list {
        for guest in &mounted {
            let entries = lc.fs().read_dir(guest)?;
            println!("{guest}:");
            for entry in entries {
                println!("  {entry}");
            }
        }
        return Ok(());
    }

    let index = lc.create_index(true, true)?;
    let tu = lc.parse_translation_unit(
        &index,
        &cli.source,
        &cli.args,
        &[],
        TranslationUnitFlags::NONE,
    )?;

    let diagnostics = lc.num_diagnostics(&tu)?;
    if diagnostics > 0 {
        let options = lc.default_diagnostic_display_options()?;
        for i in 0..diagnostics {
            let diagnostic = lc.diagnostic(&tu, i)?;
            println!("{}", lc.format_diagnostic(&diagnostic, options)?);
            lc.dispose_diagnostic(diagnostic)?;
        }
    }

    print_tree(&mut lc, &tu, cli.max_depth)?;

    lc.dispose_translation_unit(tu)?;
    lc.dispose_index(index)?;
    Ok(())
}

/// Walks the whole tree in one guest traversal, then resolves names
/// once the traversal has returned (the visitor itself cannot call
/// back into the runtime).
fn print_tree(
    lc: &mut LibClang,
    tu: &clang_wasm_host::TranslationUnit,
    max_depth: u32,
) -> Result<()> {
    let root = lc.translation_unit_cursor(tu)?;

    let collected: Rc<RefCell<Vec<(Cursor, u32)>>> = Rc::new(RefCell::new(Vec::new()));
    let depths: Rc<RefCell<HashMap<CursorHandle, u32>>> = Rc::new(RefCell::new(HashMap::new()));
    depths.borrow_mut().insert(root.handle(), 0);

    let sink = Rc::clone(&collected);
    let depth_map = Rc::clone(&depths);
    lc.visit_children(&root, move |cursor, parent| {
        let depth = depth_map
            .borrow()
            .get(&parent.handle())
            .copied()
            .unwrap_or(0)
            + 1;
        depth_map.borrow_mut().insert(cursor.handle(), depth);
        sink.borrow_mut().push((cursor, depth));
        if depth >= max_depth {
            ChildVisitResult::Continue
        } else {
            ChildVisitResult::Recurse
        }
    })?;

    let entries = collected.borrow().clone();
    println!("{}", lc.translation_unit_spelling(tu)?);
    for (cursor, depth) in entries {
        let spelling = lc.cursor_spelling(&cursor)?;
        let kind = lc.cursor_kind_spelling(cursor.kind())?;
        let location = lc.cursor_location(&cursor)?;
        let physical = lc.file_location(&location)?;
        let indent = "  ".repeat(depth as usize);
        println!(
            "{indent}{kind} {spelling} <{}:{}>",
            physical.line, physical.column
        );
    }
    Ok(())
}

/// Splits a HOST:GUEST mount specification on its last colon, so host
/// paths containing colons stay intact only when the guest part is
/// well-formed.
fn parse_mount_spec(spec: &str) -> Result<(PathBuf, String)> {
    let Some((host, guest)) = spec.rsplit_once(':') else {
        bail!("mount spec {spec:?} is not HOST:GUEST");
    };
    if host.is_empty() || !guest.starts_with('/') {
        bail!("mount spec {spec:?} needs a host path and an absolute guest path");
    }
    Ok((PathBuf::from(host), guest.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command as TestCommand;
    use predicates::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn parses_mount_specs() {
        let (host, guest) = parse_mount_spec("./testSrc:/home/web_user").expect("spec");
        assert_eq!(host, PathBuf::from("./testSrc"));
        assert_eq!(guest, "/home/web_user");

        assert!(parse_mount_spec("no-separator").is_err());
        assert!(parse_mount_spec(":/guest").is_err());
        assert!(parse_mount_spec("host:relative").is_err());
    }

    #[test]
    fn reports_a_missing_artifact() {
        let dir = tempdir().expect("tempdir");
        TestCommand::cargo_bin("clang-wasm-inspect")
            .expect("binary exists")
            .arg("--artifact")
            .arg(dir.path().join("absent.wasm"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load artifact"));
    }

    #[test]
    fn requires_an_artifact_source() {
        TestCommand::cargo_bin("clang-wasm-inspect")
            .expect("binary exists")
            .env_remove("CLANG_WASM_ARTIFACT")
            .assert()
            .failure()
            .stderr(predicate::str::contains("CLANG_WASM_ARTIFACT"));
    }

    #[test]
    fn rejects_malformed_artifacts() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.wasm");
        std::fs::write(&path, b"not a wasm module").expect("write");
        TestCommand::cargo_bin("clang-wasm-inspect")
            .expect("binary exists")
            .arg("--artifact")
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load artifact"));
    }
}

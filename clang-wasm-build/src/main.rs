//! Build orchestration for the `libclang.wasm` artifact.
//!
//! This binary drives the external toolchain the same way the
//! published artifacts are produced: shallow-clone the pinned upstream
//! release, configure it for the WebAssembly target with emscripten's
//! cmake wrappers, build, stage the static libraries and headers, then
//! build the binding shim against the staged toolchain and rename its
//! outputs into the package layout. Any external command exiting
//! non-zero aborts the run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

mod pipeline;

use pipeline::{copy_tree, Plan, Step};

const LLVM_GIT_URL: &str = "https://github.com/llvm/llvm-project.git";
const DEFAULT_LLVM_REF: &str = "llvmorg-15.0.7";
/// Placeholder output name the shim's cmake project emits under.
const SHIM_OUTPUT_NAME: &str = "LIBCLANG_OUTPUT_NAME";
const ARTIFACT_NAME: &str = "libclang.wasm";

#[derive(Parser, Debug)]
#[command(version, about = "Builds the wrapped compiler toolchain and its wasm artifact")]
struct Cli {
    /// Print the resolved external commands instead of running them.
    #[arg(long, global = true)]
    print_plan: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and build the upstream toolchain for the wasm target.
    Toolchain {
        /// Upstream release tag to clone.
        #[arg(long, default_value = DEFAULT_LLVM_REF)]
        llvm_ref: String,
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,
        /// Where static libraries and headers are staged.
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,
    },
    /// Build the binding shim against a staged toolchain.
    Bindings {
        /// Loader profile to build for.
        #[arg(long, value_enum, default_value_t = Environment::Node)]
        environment: Environment,
        /// Directory holding the shim sources (its cmake project).
        #[arg(long, default_value = "shim")]
        shim_source: PathBuf,
        /// A toolchain staged by the `toolchain` subcommand.
        #[arg(long, default_value = "dist")]
        toolchain_dir: PathBuf,
        #[arg(long, default_value = "build-bindings")]
        build_dir: PathBuf,
        /// Where the loader stubs and the wasm artifact land.
        #[arg(long, default_value = "pkg")]
        dist_dir: PathBuf,
        /// Parallel build jobs; defaults to the number of cores.
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Copy staged artifacts into a distributable layout.
    Package {
        #[arg(long, default_value = "pkg")]
        dist_dir: PathBuf,
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Remove build and stage directories.
    Clean {
        #[arg(
            long,
            default_values = ["build", "build-bindings", "dist", "pkg", "out"]
        )]
        dirs: Vec<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Environment {
    /// Standalone runtimes with host filesystem access.
    Node,
    /// Browser-style runtimes.
    Web,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Node => write!(f, "node"),
            Environment::Web => write!(f, "web"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Toolchain {
            llvm_ref,
            build_dir,
            dist_dir,
        } => {
            let plan = toolchain_plan(&llvm_ref, &build_dir);
            if cli.print_plan {
                plan.print();
                return Ok(());
            }
            fs::create_dir_all(&build_dir)
                .with_context(|| format!("failed to create {}", build_dir.display()))?;
            plan.run()?;
            stage_toolchain(&build_dir, &dist_dir)?;
            info!("toolchain staged into {}", dist_dir.display());
        }
        Command::Bindings {
            environment,
            shim_source,
            toolchain_dir,
            build_dir,
            dist_dir,
            jobs,
        } => {
            let jobs = jobs.unwrap_or_else(default_jobs);
            let plan = bindings_plan(
                environment,
                &shim_source,
                &toolchain_dir,
                &build_dir,
                &dist_dir,
                jobs,
            );
            if cli.print_plan {
                plan.print();
                return Ok(());
            }
            // The shim build is cheap; always configure from scratch.
            if build_dir.exists() {
                fs::remove_dir_all(&build_dir)
                    .with_context(|| format!("failed to remove {}", build_dir.display()))?;
            }
            fs::create_dir_all(&build_dir)
                .with_context(|| format!("failed to create {}", build_dir.display()))?;
            plan.run()?;
            stage_bindings(&dist_dir, environment)?;
            info!("bindings staged into {}", dist_dir.display());
        }
        Command::Package { dist_dir, out_dir } => {
            if cli.print_plan {
                println!("[package] copy artifacts from {} to {}", dist_dir.display(), out_dir.display());
                return Ok(());
            }
            package(&dist_dir, &out_dir)?;
            info!("packaged into {}", out_dir.display());
        }
        Command::Clean { dirs } => {
            if cli.print_plan {
                for dir in &dirs {
                    println!("[clean] remove {}", dir.display());
                }
                return Ok(());
            }
            for dir in dirs {
                if dir.exists() {
                    fs::remove_dir_all(&dir)
                        .with_context(|| format!("failed to remove {}", dir.display()))?;
                    info!("removed {}", dir.display());
                }
            }
        }
    }
    Ok(())
}

fn default_jobs() -> usize {
    thread::available_parallelism().map(usize::from).unwrap_or(1)
}

/// Clone, configure and build the upstream toolchain.
///
/// The cache settings mirror the published artifacts: release build,
/// WebAssembly as the only target, tests off, the front-end project
/// enabled and PIC disabled. `wait4` has no syscall on the portable
/// target and is renamed to the provided shim.
fn toolchain_plan(llvm_ref: &str, build_dir: &Path) -> Plan {
    let mut plan = Plan::default();
    plan.push(
        Step::new("git clone", "git")
            .args([
                "clone",
                "-b",
                llvm_ref,
                "--depth",
                "1",
                LLVM_GIT_URL,
                ".",
            ])
            .cwd(build_dir)
            .skip_if(build_dir.join(".git")),
    );
    plan.push(
        Step::new("configure", "emcmake")
            .args([
                "cmake",
                "-S",
                "llvm",
                "-B",
                "build",
                "-G",
                "Ninja",
                "-DCMAKE_BUILD_TYPE=Release",
                "-DLLVM_TARGETS_TO_BUILD=WebAssembly",
                "-DLLVM_INCLUDE_TESTS=OFF",
                "-DLLVM_ENABLE_PROJECTS=clang",
                "-DLLVM_ENABLE_PIC=OFF",
            ])
            .cwd(build_dir)
            .env("CXXFLAGS", "-Dwait4=__syscall_wait4 -pthread")
            .env("LDFLAGS", "-pthread"),
    );
    plan.push(
        Step::new("build", "cmake")
            .args(["--build", "build"])
            .cwd(build_dir),
    );
    plan
}

/// Configure and build the binding shim against a staged toolchain.
fn bindings_plan(
    environment: Environment,
    shim_source: &Path,
    toolchain_dir: &Path,
    build_dir: &Path,
    dist_dir: &Path,
    jobs: usize,
) -> Plan {
    let mut plan = Plan::default();
    plan.push(
        Step::new("configure", "emcmake")
            .args([
                "cmake".to_string(),
                shim_source.display().to_string(),
                format!("-DENVIRONMENT={environment}"),
                format!("-DCMAKE_RUNTIME_OUTPUT_DIRECTORY={}", dist_dir.display()),
                format!(
                    "-DLLVM_DIR={}",
                    toolchain_dir.join("lib/cmake/llvm").display()
                ),
                format!(
                    "-DClang_DIR={}",
                    toolchain_dir.join("lib/cmake/clang").display()
                ),
            ])
            .cwd(build_dir),
    );
    plan.push(
        Step::new("build", "emmake")
            .args(["make".to_string(), format!("-j{jobs}")])
            .cwd(build_dir),
    );
    plan
}

/// Stages the toolchain build results: every static library plus the
/// front-end headers.
fn stage_toolchain(build_dir: &Path, dist_dir: &Path) -> Result<()> {
    let lib_src = build_dir.join("build/lib");
    let lib_dst = dist_dir.join("lib");
    fs::create_dir_all(&lib_dst)
        .with_context(|| format!("failed to create {}", lib_dst.display()))?;
    let libs = copy_tree(&lib_src, &lib_dst, |path| {
        path.extension().is_some_and(|ext| ext == "a")
    })?;
    info!("staged {libs} static libraries");

    let include_src = build_dir.join("clang/include");
    let include_dst = dist_dir.join("include");
    let headers = copy_tree(&include_src, &include_dst, |_| true)?;
    info!("staged {headers} header files");
    Ok(())
}

/// Renames the shim's placeholder outputs to the packaged names and
/// patches the loader stub to reference them.
fn stage_bindings(dist_dir: &Path, environment: Environment) -> Result<()> {
    let loader = dist_dir.join(format!("{environment}.js"));
    let worker = dist_dir.join(format!("{environment}.worker.js"));

    rename_artifact(dist_dir, &format!("{SHIM_OUTPUT_NAME}.js"), &loader)?;
    rename_artifact(dist_dir, &format!("{SHIM_OUTPUT_NAME}.worker.js"), &worker)?;
    rename_artifact(
        dist_dir,
        &format!("{SHIM_OUTPUT_NAME}.wasm"),
        &dist_dir.join(ARTIFACT_NAME),
    )?;

    let stub = fs::read_to_string(&loader)
        .with_context(|| format!("failed to read {}", loader.display()))?;
    let patched = stub
        .replace(
            &format!("{SHIM_OUTPUT_NAME}.worker.js"),
            &format!("{environment}.worker.js"),
        )
        .replace(&format!("{SHIM_OUTPUT_NAME}.wasm"), ARTIFACT_NAME);
    fs::write(&loader, patched)
        .with_context(|| format!("failed to write {}", loader.display()))?;
    Ok(())
}

fn rename_artifact(dist_dir: &Path, from: &str, to: &Path) -> Result<()> {
    let source = dist_dir.join(from);
    fs::rename(&source, to)
        .with_context(|| format!("expected build output {} is missing", source.display()))
}

/// Copies the staged artifact set into a distributable layout.
fn package(dist_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut copied = 0;
    for name in [
        ARTIFACT_NAME,
        "node.js",
        "node.worker.js",
        "web.js",
        "web.worker.js",
        "README.md",
    ] {
        let source = dist_dir.join(name);
        if !source.exists() {
            continue;
        }
        fs::copy(&source, out_dir.join(name))
            .with_context(|| format!("failed to copy {}", source.display()))?;
        copied += 1;
    }
    if copied == 0 {
        anyhow::bail!("no staged artifacts found in {}", dist_dir.display());
    }
    info!("copied {copied} artifacts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command as TestCommand;
    use predicates::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn toolchain_plan_pins_the_release_and_target() {
        let plan = toolchain_plan(DEFAULT_LLVM_REF, Path::new("build"));
        assert_eq!(plan.steps.len(), 3);

        let clone = &plan.steps[0];
        assert_eq!(clone.program, "git");
        assert!(clone.args.contains(&"llvmorg-15.0.7".to_string()));
        assert!(clone.args.contains(&LLVM_GIT_URL.to_string()));
        assert_eq!(clone.skip_if.as_deref(), Some(Path::new("build/.git")));

        let configure = &plan.steps[1];
        assert_eq!(configure.program, "emcmake");
        assert!(configure
            .args
            .contains(&"-DLLVM_TARGETS_TO_BUILD=WebAssembly".to_string()));
        assert!(configure
            .args
            .contains(&"-DLLVM_ENABLE_PROJECTS=clang".to_string()));
        assert!(configure
            .env
            .iter()
            .any(|(k, v)| k == "CXXFLAGS" && v.contains("-Dwait4=__syscall_wait4")));
    }

    #[test]
    fn bindings_plan_targets_the_requested_environment() {
        let plan = bindings_plan(
            Environment::Node,
            Path::new("shim"),
            Path::new("dist"),
            Path::new("build-bindings"),
            Path::new("pkg"),
            8,
        );
        let configure = &plan.steps[0];
        assert!(configure.args.contains(&"-DENVIRONMENT=node".to_string()));
        assert!(configure
            .args
            .iter()
            .any(|a| a.starts_with("-DClang_DIR=") && a.contains("cmake")));
        let build = &plan.steps[1];
        assert_eq!(build.program, "emmake");
        assert!(build.args.contains(&"-j8".to_string()));
    }

    #[test]
    fn staging_reports_missing_build_outputs() {
        let dir = tempdir().expect("tempdir");
        let err = stage_bindings(dir.path(), Environment::Web).unwrap_err();
        assert!(
            format!("{err:#}").contains("LIBCLANG_OUTPUT_NAME.js"),
            "{err:#}"
        );
    }

    #[test]
    fn staging_renames_and_patches_the_loader() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("LIBCLANG_OUTPUT_NAME.js"),
            "load(\"LIBCLANG_OUTPUT_NAME.wasm\", \"LIBCLANG_OUTPUT_NAME.worker.js\")",
        )
        .expect("loader");
        std::fs::write(dir.path().join("LIBCLANG_OUTPUT_NAME.worker.js"), "")
            .expect("worker");
        std::fs::write(dir.path().join("LIBCLANG_OUTPUT_NAME.wasm"), "\0asm")
            .expect("wasm");

        stage_bindings(dir.path(), Environment::Node).expect("stage");

        assert!(dir.path().join("libclang.wasm").exists());
        let loader = std::fs::read_to_string(dir.path().join("node.js")).expect("read");
        assert_eq!(loader, "load(\"libclang.wasm\", \"node.worker.js\")");
    }

    #[test]
    fn print_plan_resolves_without_touching_anything() {
        TestCommand::cargo_bin("clang-wasm-build")
            .expect("binary exists")
            .args(["toolchain", "--print-plan"])
            .assert()
            .success()
            .stdout(predicate::str::contains("git clone"))
            .stdout(predicate::str::contains("emcmake"));
    }

    #[test]
    fn bindings_print_plan_shows_the_environment() {
        TestCommand::cargo_bin("clang-wasm-build")
            .expect("binary exists")
            .args(["bindings", "--print-plan", "--environment", "web", "--jobs", "4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-DENVIRONMENT=web"))
            .stdout(predicate::str::contains("-j4"));
    }

    #[test]
    fn rejects_unknown_subcommands() {
        TestCommand::cargo_bin("clang-wasm-build")
            .expect("binary exists")
            .arg("frobnicate")
            .assert()
            .failure();
    }

    #[test]
    fn clean_removes_only_existing_directories() {
        let dir = tempdir().expect("tempdir");
        let target = dir.path().join("build");
        std::fs::create_dir_all(target.join("nested")).expect("mkdir");

        let cli = Cli {
            print_plan: false,
            command: Command::Clean {
                dirs: vec![target.clone(), dir.path().join("missing")],
            },
        };
        execute(cli).expect("clean");
        assert!(!target.exists());
    }
}

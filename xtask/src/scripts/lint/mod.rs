use crate::cli::LintArgs;
use color_eyre::eyre::{eyre, Result};
use duct::cmd;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Functional Core
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fmt,
    Clippy,
    Test,
    Machete,
}

impl Step {
    const ALL: [Step; 4] = [Step::Fmt, Step::Clippy, Step::Test, Step::Machete];

    fn skipped_by(self, args: &LintArgs) -> bool {
        match self {
            Step::Fmt => args.no_fmt,
            Step::Clippy => args.no_clippy,
            Step::Test => args.no_test,
            Step::Machete => args.no_machete,
        }
    }

    /// A missing tool skips the step instead of failing the run
    fn optional(self) -> bool {
        matches!(self, Step::Machete)
    }

    /// Cargo arguments, with `--fix` applied to the steps that support it
    fn cargo_args(self, fix: bool) -> Vec<&'static str> {
        match (self, fix) {
            (Step::Fmt, false) => vec!["fmt", "--all", "--check"],
            (Step::Fmt, true) => vec!["fmt", "--all"],
            (Step::Clippy, false) => {
                vec!["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]
            }
            (Step::Clippy, true) => vec![
                "clippy",
                "--workspace",
                "--all-targets",
                "--fix",
                "--allow-dirty",
                "--",
                "-D",
                "warnings",
            ],
            (Step::Test, _) => vec!["test", "--workspace"],
            (Step::Machete, _) => vec!["machete"],
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Passed(String),
    Failed(String),
    Missing,
}

fn missing_tool(output: &str) -> bool {
    let lower = output.to_lowercase();
    ["no such command", "unrecognized subcommand", "not found"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn classify(success: bool, output: String, optional: bool) -> Outcome {
    match success {
        true => Outcome::Passed(output),
        false if optional && missing_tool(&output) => Outcome::Missing,
        false => Outcome::Failed(output),
    }
}

fn log_entry(name: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Missing => format!("### {name}\n(skipped: tool not installed)\n\n"),
        Outcome::Passed(output) | Outcome::Failed(output) => {
            format!("### {name}\n{output}\n")
        }
    }
}

// ---------------------------------------------------------------------------
// Imperative Shell
// ---------------------------------------------------------------------------

/// Run every enabled step in order, stopping at the first failure
pub fn run(args: &LintArgs) -> Result<()> {
    let log_path = log_path()?;
    let mut log = fs::File::create(&log_path)?;

    for step in Step::ALL {
        if step.skipped_by(args) {
            continue;
        }

        let cargo_args = step.cargo_args(args.fix);
        let name = format!("cargo {}", cargo_args.join(" "));

        let output = cmd("cargo", &cargo_args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()?;
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let outcome = classify(output.status.success(), text, step.optional());

        write!(log, "{}", log_entry(&name, &outcome))?;

        match outcome {
            Outcome::Missing => {
                if args.verbose {
                    println!("[skip] {name}");
                }
            }
            Outcome::Passed(text) => {
                if args.verbose {
                    print!("{text}");
                }
                println!("[ok] {name}");
            }
            Outcome::Failed(text) => {
                print!("{text}");
                println!("log: {}", log_path.display());
                return Err(eyre!("lint failed at: {name}"));
            }
        }
    }

    println!("log: {}", log_path.display());
    Ok(())
}

fn log_path() -> Result<PathBuf> {
    let target = std::env::current_dir()?.join("target");
    fs::create_dir_all(&target)?;
    Ok(target.join("xtask-lint.log"))
}

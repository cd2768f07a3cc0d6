//! Runs the same checks as continuous integration: `cargo run -p ci -- [lints|test|doc|compile|format|clippy]`.
//!
//! With no arguments, every check is run.

use bitflags::bitflags;
use itertools::Itertools;
use xshell::{cmd, Shell};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Check: u32 {
        const FORMAT = 0b000001;
        const CLIPPY = 0b000010;
        const TEST = 0b000100;
        const DOC_TEST = 0b001000;
        const DOC_CHECK = 0b010000;
        const COMPILE_CHECK = 0b100000;
    }
}

const CLIPPY_FLAGS: [&str; 3] = [
    "-Dwarnings",
    "-Aclippy::type_complexity",
    "-Aclippy::too_many_arguments",
];

const FEATURE_SETS: [&str; 3] = ["--no-default-features", "", "--all-features"];

fn main() {
    let arguments = [
        ("lints", Check::FORMAT | Check::CLIPPY),
        ("test", Check::TEST),
        ("doc", Check::DOC_TEST | Check::DOC_CHECK),
        ("compile", Check::COMPILE_CHECK),
        ("format", Check::FORMAT),
        ("clippy", Check::CLIPPY),
    ];

    let what_to_run = if let Some(arg) = std::env::args().nth(1).as_deref() {
        if let Some((_, check)) = arguments.iter().find(|(name, _)| *name == arg) {
            *check
        } else {
            println!(
                "Invalid argument: {arg:?}.\nEnter one of: {}.",
                arguments.iter().map(|(name, _)| name).join(", ")
            );
            return;
        }
    } else {
        Check::all()
    };

    let sh = Shell::new().expect("could not open a shell");

    if what_to_run.contains(Check::FORMAT) {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .expect("Please run 'cargo fmt --all' to format your code.");
    }

    if what_to_run.contains(Check::CLIPPY) {
        for features in FEATURE_SETS {
            let features = features.split_whitespace();
            cmd!(
                sh,
                "cargo clippy --workspace --all-targets {features...} -- {CLIPPY_FLAGS...}"
            )
            .run()
            .expect("Please fix clippy errors in output above.");
        }
    }

    if what_to_run.contains(Check::TEST) {
        for features in FEATURE_SETS {
            let features = features.split_whitespace();
            cmd!(sh, "cargo test --workspace --lib --bins --tests {features...}")
                .run()
                .expect("Please fix failing tests in output above.");
        }
    }

    if what_to_run.contains(Check::DOC_TEST) {
        cmd!(sh, "cargo test --workspace --doc --all-features")
            .run()
            .expect("Please fix failing doc-tests in output above.");
    }

    if what_to_run.contains(Check::DOC_CHECK) {
        cmd!(sh, "cargo doc --workspace --all-features --no-deps --document-private-items")
            .env("RUSTDOCFLAGS", "-D warnings")
            .run()
            .expect("Please fix doc warnings in output above.");
    }

    if what_to_run.contains(Check::COMPILE_CHECK) {
        cmd!(sh, "cargo check --workspace --all-targets --all-features")
            .run()
            .expect("Please fix compiler errors in output above.");
    }
}

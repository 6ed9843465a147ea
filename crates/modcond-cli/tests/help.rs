use assert_cmd::Command;

/// Helper to get a Command for the modcond binary.
#[allow(deprecated)]
fn modcond_cmd() -> Command {
    Command::cargo_bin("modcond").unwrap()
}

#[test]
fn help_works() {
    modcond_cmd().arg("--help").assert().success();
}

#[test]
fn subcommand_help_works() {
    for sub in ["note", "user", "entropy", "validate-table", "validate", "explain"] {
        modcond_cmd().args([sub, "--help"]).assert().success();
    }
}

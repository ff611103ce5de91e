use std::process::{Command, Output};

fn revoked(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_revoked"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_prints_one_index_per_line_in_ascending_order() {
    let output = revoked(&[
        "--strat_default",
        "True",
        "--revoked_old",
        "3 2 1",
        "--issued_new",
        "2",
        "--revoked_new",
        "4",
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1\n3\n4\n");
}

#[test]
fn test_empty_result_prints_nothing() {
    let output = revoked(&["--strat_default", "False"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_index_exits_with_one() {
    let output = revoked(&["--strat_default", "True", "--revoked_old", "1", "-2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr).unwrap().starts_with("error: "));
}

#[test]
fn test_unknown_flag_value_exits_with_two() {
    let output = revoked(&["--strat_default", "yes"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

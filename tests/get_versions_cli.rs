use devlookup::versions::{invalid_system_error, usage_error};
use std::process::Command;

fn get_versions(args: &[&str]) -> (Option<i32>, serde_json::Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_get-versions"))
        .args(args)
        .output()
        .unwrap();
    let stdout = serde_json::from_slice(&output.stdout).unwrap();
    (output.status.code(), stdout)
}

#[test]
fn test_missing_arguments_print_usage_json() {
    let (code, stdout) = get_versions(&[]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout, usage_error());

    let (code, stdout) = get_versions(&["npm"]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout, usage_error());
}

#[test]
fn test_rubygems_rejected_for_batch() {
    let (code, stdout) = get_versions(&["rubygems", "rails"]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout, invalid_system_error("rubygems"));
    assert_eq!(stdout["error"], "Invalid system: rubygems");
}

#[test]
fn test_unknown_system_rejected() {
    let (code, stdout) = get_versions(&["cpan", "Moose"]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout["error"], "Invalid system: cpan");
    assert_eq!(stdout["valid_systems"].as_array().map(Vec::len), Some(6));
}

use std::io::Write;
use std::process::{Command, Stdio};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_sha-nums")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_hashes_text_arguments() {
    let output = Command::new(bin()).args(["hash", "abc", ""]).output().expect("run");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad  \"abc\"",
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855  \"\"",
        ]
    );
}

#[test]
fn cli_hashes_stdin() {
    let mut child = Command::new(bin())
        .arg("hash")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"abc")
        .expect("write");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    assert!(stdout_of(&output)
        .starts_with("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad  -"));
}

#[test]
fn cli_hash_json_output() {
    let output = Command::new(bin())
        .args(["hash", "--json", "abc"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        records[0]["digest"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn cli_cracks_builtin_password() {
    // SHA-256("password")
    let target = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
    let output = Command::new(bin())
        .args(["crack", "-t", target])
        .output()
        .expect("run");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), format!("{}  password", target));
    assert!(String::from_utf8_lossy(&output.stderr).contains("never use it to store passwords"));
}

#[test]
fn cli_crack_miss_exits_one() {
    let target = "0".repeat(64);
    let output = Command::new(bin())
        .args(["crack", "-t", target.as_str()])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("(not found)"));
}

#[test]
fn cli_crack_bad_target_exits_two() {
    let output = Command::new(bin())
        .args(["crack", "-t", "xyz"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_prints_constants() {
    let output = Command::new(bin()).arg("constants").output().expect("run");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("0x6a09e667"));
    assert!(stdout.contains("0x428a2f98"));
    assert!(stdout.contains("0xc67178f2"));
}

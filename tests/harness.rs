//! Test harness for listall integration tests

use std::path::Path;
use std::process::Command;

pub use listall::test_utils::TestDir;

/// The three-file project used across the end-to-end tests:
/// `proj/a.txt`, `proj/sub/b.txt`, `proj/sub/c.txt`.
pub fn proj() -> TestDir {
    let dir = TestDir::named("proj");
    dir.add_file("a.txt", "");
    dir.add_file("sub/b.txt", "");
    dir.add_file("sub/c.txt", "");
    dir
}

pub fn run_listall(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_listall");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run listall");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_named_root() {
        let dir = proj();
        assert!(dir.path().ends_with("proj"));
        assert!(dir.path().join("sub/c.txt").exists());
    }
}

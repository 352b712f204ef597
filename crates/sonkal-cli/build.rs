use std::process::Command;

use chrono::Local;

fn main() {
    println!("cargo:rustc-env=BUILD_HASH={}", build_hash());

    // Refresh when the checked-out commit moves; .git sits at the
    // workspace root, two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}

/// Short commit hash for `--version`, with a build timestamp appended
/// when tracked files have local modifications.
fn build_hash() -> String {
    let Some(commit) = git_short_hash() else {
        return "unknown".to_string();
    };
    if working_tree_dirty() {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        format!("{commit}-dirty-{stamp}")
    } else {
        commit
    }
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn working_tree_dirty() -> bool {
    // Untracked files don't affect the binary, so `git diff` against
    // HEAD (tracked files only) is the right check
    Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|status| !status.success())
        .unwrap_or(false)
}

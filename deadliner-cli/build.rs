use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Embed the short commit hash in `deadliner --version`; "unknown" outside git.
fn main() {
    let workspace = env::var_os("CARGO_MANIFEST_DIR")
        .map(|d| PathBuf::from(d).join(".."))
        .unwrap_or_else(|| PathBuf::from(".."));

    let sha = Command::new("git")
        .arg("-C")
        .arg(&workspace)
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty());

    println!(
        "cargo:rustc-env=DEADLINER_BUILD_SHA={}",
        sha.as_deref().unwrap_or("unknown")
    );
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
}

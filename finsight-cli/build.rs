use std::process::Command;

const SHA_ENV: &str = "FINSIGHT_BUILD_SHA";

/// `git describe` of the workspace, with a `-dirty` suffix for uncommitted changes
fn git_describe(workspace: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", workspace, "describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let desc = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!desc.is_empty()).then_some(desc)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = format!("{manifest_dir}/..");

    // Source tarballs have no .git; packagers pass the revision in instead.
    let sha = std::env::var(SHA_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&workspace))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={SHA_ENV}={sha}");
    println!("cargo:rerun-if-env-changed={SHA_ENV}");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}

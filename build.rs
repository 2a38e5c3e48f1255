//! Stamps the binary with the commit and date that `goldcalc --version` prints.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const COMMIT_VAR: &str = "GOLDCALC_COMMIT";
const DATE_VAR: &str = "GOLDCALC_BUILD_DATE";

/// Short hash of HEAD, if this is a git checkout with git on the PATH.
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    let commit = env::var(COMMIT_VAR)
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".into());
    let date = env::var(DATE_VAR)
        .unwrap_or_else(|_| chrono::Utc::now().date_naive().to_string());

    let generated = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit, date
    );
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join("build_info.rs"), generated).expect("writing build_info.rs");

    for var in [COMMIT_VAR, DATE_VAR] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}

use std::process::Command;

/// Exposes `BUILD_DATE` and `GIT_HASH` to the health endpoints via `env!`.
fn main() {
    let stamps = [
        ("BUILD_DATE", chrono::Utc::now().to_rfc3339()),
        (
            "GIT_HASH",
            git_output(&["rev-parse", "--short=10", "HEAD"]).unwrap_or_else(|| "unknown".into()),
        ),
    ];
    for (key, value) in stamps {
        println!("cargo:rustc-env={key}={value}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let describe = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--tags"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    // A bare tag (no `-N-gHASH` suffix, not dirty) is a release build.
    let is_release = !describe.is_empty()
        && !describe.ends_with("-dirty")
        && !describe.contains("-g")
        && describe.starts_with('v');

    println!("cargo:rustc-env=FOLIO_GIT_DESCRIBE={describe}");
    println!("cargo:rustc-env=FOLIO_RELEASE_BUILD={is_release}");
}

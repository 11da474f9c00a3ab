#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_dod-sim");

// Stands in for g++: the generated benchmark reports a larger aos time when
// it receives a component argument, so the calling form is observable.
const FAKE_COMPILER: &str = r##"#!/bin/sh
out=""
baked="none"
while [ $# -gt 0 ]; do
  case "$1" in
    -o) shift; out="$1" ;;
    -DUSE_STATIC=*) baked="${1#-DUSE_STATIC=}" ;;
  esac
  shift
done
cat > "$out" <<EOS
#!/bin/sh
echo "baked=$baked"
echo "soa: 5us"
if [ \$# -eq 2 ]; then echo "aos: 30us"; else echo "aos: 15us"; fi
EOS
chmod +x "$out"
"##;

fn dod_sim(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .current_dir(dir)
        .args(args)
        .args(["--config", "harness.yaml"])
        .output()
        .expect("run dod-sim")
}

#[test]
fn build_then_run_in_both_calling_forms() {
    let dir = tempfile::tempdir().expect("tempdir");
    let compiler = dir.path().join("fake-gxx");
    fs::write(&compiler, FAKE_COMPILER).expect("write compiler");
    fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755)).expect("chmod");
    fs::write(
        dir.path().join("harness.yaml"),
        format!("compiler: {}\nflavor: gnu\n", compiler.display()),
    )
    .expect("write config");

    let built = dod_sim(dir.path(), &["build", "--static", "3"]);
    assert!(built.status.success(), "{}", String::from_utf8_lossy(&built.stderr));
    let stdout = String::from_utf8_lossy(&built.stdout);
    assert!(stdout.starts_with("static(3) "));
    assert!(stdout.trim_end().ends_with("dod.exe"));
    let script = fs::read_to_string(dir.path().join("dod.exe")).expect("artifact");
    assert!(script.contains("baked=3"));

    let static_run = dod_sim(dir.path(), &["run", "--points", "10"]);
    assert!(static_run.status.success(), "{}", String::from_utf8_lossy(&static_run.stderr));
    assert_eq!(
        String::from_utf8_lossy(&static_run.stdout),
        "soa: 5us\naos: 15us\n"
    );

    let built = dod_sim(dir.path(), &["build"]);
    assert!(built.status.success());
    assert!(String::from_utf8_lossy(&built.stdout).starts_with("dynamic "));

    let dynamic_run = dod_sim(dir.path(), &["run", "--points", "10", "--components", "3"]);
    assert!(dynamic_run.status.success());
    assert_eq!(
        String::from_utf8_lossy(&dynamic_run.stdout),
        "soa: 5us\naos: 30us\n"
    );
}

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use dod_exp::{expt, CompilerFlavor, HarnessConfig, SystemLauncher};

// Stands in for g++: writes a shell script to the `-o` target that prints
// fixed timings and echoes the baked component count.
const FAKE_COMPILER: &str = r#"#!/bin/sh
out=""
baked=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) shift; out="$1" ;;
    -DUSE_STATIC=*) baked="${1#-DUSE_STATIC=}" ;;
  esac
  shift
done
printf '#!/bin/sh\necho "baked=%s args=$*"\necho "aos: 20us"\necho "soa: 0us"\n' "$baked" > "$out"
chmod +x "$out"
"#;

#[test]
fn sweep_through_real_processes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let compiler = dir.path().join("fake-gxx");
    fs::write(&compiler, FAKE_COMPILER).expect("write compiler");
    fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755)).expect("chmod");

    let config = HarnessConfig {
        compiler: compiler.display().to_string(),
        flavor: CompilerFlavor::Gnu,
        work_dir: dir.path().to_path_buf(),
        output: dir.path().join("out").join("last_expt.csv"),
        ..HarnessConfig::default()
    };

    let table = expt(&mut SystemLauncher, &config, &[10, 20], &[2]).expect("expt");

    assert_eq!(table.len(), 4);
    assert!(table.rows.iter().all(|row| row.soa_time == 1));
    assert!(table.rows.iter().all(|row| row.aos_soa == 20.0));
    assert!(dir.path().join("dod.exe").exists());
    assert!(config.output.exists());
}

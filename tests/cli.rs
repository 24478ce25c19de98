// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use std::process::Command;

fn rtl_syms() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rtl-syms"))
}

#[test]
fn help_exits_zero() {
    let status = rtl_syms().arg("--help").output().unwrap().status;
    assert_eq!(status.code(), Some(0));
}

#[test]
fn unknown_option_is_usage_error() {
    let status = rtl_syms().args(["--bogus", "kernel.exe"]).output().unwrap().status;
    assert_eq!(status.code(), Some(3));
}

#[test]
fn missing_kernel_is_operational() {
    let out = rtl_syms().args(["-o", "syms.o"]).output().unwrap();
    assert_eq!(out.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: options: no kernel file"), "{stderr}");
}

#[test]
fn missing_output_is_operational() {
    let status = rtl_syms().arg("kernel.exe").output().unwrap().status;
    assert_eq!(status.code(), Some(10));
}

#[test]
fn writes_map() {
    let dir = tempfile::tempdir().unwrap();
    let kernel = common::write_kernel(dir.path());
    let map = dir.path().join("kernel.map");
    let out = rtl_syms()
        .arg("-m")
        .arg(&map)
        .args(["-F", "rtems_task_.*"])
        .arg(&kernel)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let text = std::fs::read_to_string(&map).unwrap();
    assert!(text.contains("rtems_task_create"));
    assert!(!text.contains("rtems_config"));
}

#[test]
fn no_match_fails() {
    let dir = tempfile::tempdir().unwrap();
    let kernel = common::write_kernel(dir.path());
    let out = rtl_syms()
        .arg("-m")
        .arg(dir.path().join("kernel.map"))
        .args(["-F", "nothing"])
        .arg(&kernel)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(10));
    assert!(String::from_utf8_lossy(&out.stderr).contains("filter: no filtered symbols"));
}

#[cfg(unix)]
mod signals {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::process::Stdio;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    fn wait_for(mut ready: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(20);
        while !ready() {
            assert!(Instant::now() < deadline, "timed out");
            sleep(Duration::from_millis(20));
        }
    }

    fn scratch_dirs(tmp: &Path) -> Vec<String> {
        fs::read_dir(tmp)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("rtl-syms-"))
            .collect()
    }

    #[test]
    fn interrupt_removes_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let kernel = common::write_kernel(dir.path());
        let tmp = dir.path().join("tmp");
        fs::create_dir(&tmp).unwrap();

        // A compiler that never finishes on its own.
        let started = dir.path().join("started");
        let cc = dir.path().join("slow-cc");
        fs::write(
            &cc,
            format!("#!/bin/sh\ntouch '{}'\nexec sleep 10\n", started.display()),
        )
        .unwrap();
        fs::set_permissions(&cc, fs::Permissions::from_mode(0o755)).unwrap();

        let mut child = rtl_syms()
            .env("TMPDIR", &tmp)
            .arg("-C")
            .arg(&cc)
            .arg("-o")
            .arg(dir.path().join("syms.o"))
            .arg(&kernel)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        wait_for(|| started.exists());
        assert_eq!(scratch_dirs(&tmp).len(), 1);

        let killed = Command::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()
            .unwrap();
        assert!(killed.success());

        let status = child.wait().unwrap();
        assert_eq!(status.code(), Some(130));
        assert!(scratch_dirs(&tmp).is_empty());
    }
}

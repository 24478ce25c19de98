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

//! Scratch directory for intermediate files of one run.
//!
//! The directory is removed when the [`Scratch`] is dropped or
//! [`Scratch::release`] is called, whichever comes first, unless the run
//! asked to keep temporaries. `release` is what the signal path uses since
//! the process exits without unwinding.

use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub struct Scratch {
    dir: Mutex<Option<TempDir>>,
    path: PathBuf,
    keep: bool,
}

impl Scratch {
    pub fn new(keep: bool) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("rtl-syms-").tempdir()?;
        Ok(Self::from_dir(dir, keep))
    }

    /// Scratch space under `parent` rather than the system temp directory.
    pub fn new_in(parent: &Path, keep: bool) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("rtl-syms-")
            .tempdir_in(parent)?;
        Ok(Self::from_dir(dir, keep))
    }

    fn from_dir(dir: TempDir, keep: bool) -> Self {
        Self {
            path: dir.path().to_path_buf(),
            dir: Mutex::new(Some(dir)),
            keep,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for a scratch file called `name`. The file is not created.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the directory now, or leave it in place when keeping
    /// temporaries. Later calls do nothing.
    pub fn release(&self) {
        let dir = match self.dir.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(dir) = dir else {
            return;
        };
        if self.keep {
            let path = dir.keep();
            info!("keeping temporary files in {}", path.display());
            return;
        }
        if let Err(e) = dir.close() {
            warn!("failed to remove {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.release();
    }
}

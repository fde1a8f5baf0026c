// Copyright 2026 The relic authors
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

use std::{
    fs::{File, OpenOptions},
    io::ErrorKind,
    os::unix::fs::FileExt,
    path::Path,
};

use log::debug;
use relic_ds::{DataStorage, Error, Result};

/// Disk image backed by a regular file.
///
/// One exclusive handle is held for the lifetime of a session. Images
/// opened with [`FileStorage::open`] reject writes before they reach the
/// operating system.
pub struct FileStorage {
    file: File,
    writable: bool,
}

impl FileStorage {
    /// Opens an image for inspection only.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        debug!("Opened {} read-only", path.display());

        Ok(Self {
            file,
            writable: false,
        })
    }

    /// Opens an image for in-place mutation.
    pub fn open_rw(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        debug!("Opened {} read-write", path.display());

        Ok(Self {
            file,
            writable: true,
        })
    }
}

impl DataStorage for FileStorage {
    fn read(&self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        self.file
            .read_exact_at(buffer, offset)
            .map_err(|source| match source.kind() {
                ErrorKind::UnexpectedEof => Error::Truncated {
                    offset,
                    wanted: buffer.len(),
                },
                _ => Error::Io { offset, source },
            })
    }

    fn write(&self, offset: u64, buffer: &[u8]) -> Result<()> {
        if !self.writable {
            return Err(Error::ReadOnly);
        }

        self.file
            .write_all_at(buffer, offset)
            .map_err(|source| Error::Io { offset, source })
    }
}

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

//! Offline FAT12/FAT16 inspection and recovery engine.
//!
//! Works directly on a raw image through a [`DataStorage`] handle, with no
//! mounted filesystem involved. The three consumers of this engine list
//! directory contents, tombstone an entry, and restore a tombstoned entry
//! whose cluster chain is still intact.

pub mod boot_sector;
pub mod dir;
mod recover;
pub mod table;

pub use relic_err::{Error, FatError, Result};

use relic_ds::DataStorage;

use boot_sector::{BootSector, Geometry};
use dir::{ScanMode, ScannedEntry};

/// One open FAT12/FAT16 volume.
///
/// Geometry is derived once from the boot sector and shared read-only by
/// every operation; the storage handle lives as long as the session.
pub struct Volume<DS: DataStorage> {
    storage: DS,
    boot_sector: BootSector,
    geometry: Geometry,
}

impl<DS: DataStorage> Volume<DS> {
    pub fn new(storage: DS) -> Result<Self> {
        let boot_sector = BootSector::read(&storage)?;
        let geometry = Geometry::derive(&boot_sector)?;

        Ok(Self {
            storage,
            boot_sector,
            geometry,
        })
    }

    pub fn boot_sector(&self) -> &BootSector {
        &self.boot_sector
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Scans the root directory and every reachable subdirectory into a
    /// flat entry list. Children come before the directory that holds
    /// them.
    pub fn scan_root(&self, mode: ScanMode) -> Result<Vec<ScannedEntry>> {
        dir::scan_root(&self.storage, &self.geometry, mode)
    }

    /// Marks an entry deleted by writing the tombstone byte over the first
    /// character of its name. The FAT is left untouched, so the entry's
    /// cluster chain stays discoverable for undeletion.
    pub fn delete(&self, entry: &ScannedEntry) -> Result<()> {
        self.storage.write(entry.position, &[dir::DELETED])?;

        Ok(())
    }

    /// Checks that a tombstoned entry's cluster chain still matches its
    /// declared size and collides with no file modified after it.
    ///
    /// `entries` must come from a [`ScanMode::Recovery`] scan of this
    /// volume. No bytes are written.
    pub fn validate_recovery(
        &self,
        candidate: &ScannedEntry,
        entries: &[ScannedEntry],
    ) -> Result<()> {
        recover::validate(&self.storage, &self.geometry, candidate, entries)
    }

    /// Brings a tombstoned entry back by writing `first_letter` over the
    /// tombstone. The FAT entries are assumed to still chain correctly;
    /// callers run [`Volume::validate_recovery`] first.
    pub fn restore(&self, entry: &ScannedEntry, first_letter: u8) -> Result<()> {
        self.storage.write(entry.position, &[first_letter])?;

        Ok(())
    }
}

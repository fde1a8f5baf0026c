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

//! In-memory FAT volumes for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use relic_ds::{DataStorage, Error, Result};

pub const SECTOR: usize = 512;

/// Image held in a byte vector, mutable through a shared handle like a
/// real file.
pub struct MemStorage(RefCell<Vec<u8>>);

impl MemStorage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(RefCell::new(bytes))
    }

    pub fn byte_at(&self, offset: u64) -> u8 {
        self.0.borrow()[offset as usize]
    }

    pub fn range(&self, start: usize, end: usize) -> Vec<u8> {
        self.0.borrow()[start..end].to_vec()
    }
}

impl DataStorage for MemStorage {
    fn read(&self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        let bytes = self.0.borrow();
        let start = offset as usize;
        let end = start + buffer.len();
        if end > bytes.len() {
            return Err(Error::Truncated {
                offset,
                wanted: buffer.len(),
            });
        }
        buffer.copy_from_slice(&bytes[start..end]);

        Ok(())
    }

    fn write(&self, offset: u64, buffer: &[u8]) -> Result<()> {
        let mut bytes = self.0.borrow_mut();
        let start = offset as usize;
        let end = start + buffer.len();
        if end > bytes.len() {
            return Err(Error::Truncated {
                offset,
                wanted: buffer.len(),
            });
        }
        bytes[start..end].copy_from_slice(buffer);

        Ok(())
    }
}

/// Builds a raw FAT12 or FAT16 volume laid out the way the engine
/// addresses it: the root directory extent begins at cluster 2, data
/// clusters follow one sector each.
pub struct ImageBuilder {
    bytes: Vec<u8>,
    fat16: bool,
    fat_start: usize,
    first_data_sector: usize,
}

impl ImageBuilder {
    /// 1.44 MB floppy layout: 2880 sectors, 2 FATs of 9 sectors, 224 root
    /// entries. Root occupies clusters 2..16, file data starts at 16.
    pub fn fat12() -> Self {
        let mut bytes = vec![0u8; 2880 * SECTOR];
        write_boot_sector(&mut bytes, 2880, 2, 9, 224, 0xF0);

        Self {
            bytes,
            fat16: false,
            fat_start: SECTOR,
            first_data_sector: 2 * 9 + 1,
        }
    }

    /// Small hard-disk layout with enough clusters to classify as FAT16:
    /// 8000 sectors, 2 FATs of 32 sectors, 512 root entries. Root occupies
    /// clusters 2..34, file data starts at 34.
    pub fn fat16() -> Self {
        let mut bytes = vec![0u8; 8000 * SECTOR];
        write_boot_sector(&mut bytes, 8000, 2, 32, 512, 0xF8);

        Self {
            bytes,
            fat16: true,
            fat_start: SECTOR,
            first_data_sector: 2 * 32 + 1,
        }
    }

    /// Boot sector classifying as FAT32: 70000 total sectors claimed
    /// through the large-sectors field, no fixed root extent. Only the
    /// boot sector is materialized; a scan of this volume reads nothing
    /// past it.
    pub fn fat32() -> Self {
        let mut bytes = vec![0u8; SECTOR];
        write_boot_sector(&mut bytes, 0, 2, 0, 0, 0xF8);
        bytes[32..36].copy_from_slice(&70000u32.to_le_bytes());

        Self {
            bytes,
            fat16: false,
            fat_start: SECTOR,
            first_data_sector: 1,
        }
    }

    pub fn cluster_byte(&self, cluster: u16) -> usize {
        (cluster as usize - 2 + self.first_data_sector) * SECTOR
    }

    /// Stores a directory entry in `slot` of the sector backing `cluster`
    /// (the root begins at cluster 2) and returns its byte position.
    pub fn entry_at(&mut self, cluster: u16, slot: usize, entry: [u8; 32]) -> u64 {
        let pos = self.cluster_byte(cluster) + slot * 32;
        self.bytes[pos..pos + 32].copy_from_slice(&entry);
        pos as u64
    }

    /// Sets one entry of the first FAT copy.
    pub fn set_fat(&mut self, cluster: u16, value: u16) {
        if self.fat16 {
            let offset = self.fat_start + cluster as usize * 2;
            self.bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        } else {
            let offset = self.fat_start + cluster as usize / 2 * 3;
            if cluster % 2 == 0 {
                self.bytes[offset] = (value & 0xFF) as u8;
                self.bytes[offset + 1] =
                    (self.bytes[offset + 1] & 0xF0) | ((value >> 8) as u8 & 0x0F);
            } else {
                self.bytes[offset + 1] =
                    (self.bytes[offset + 1] & 0x0F) | (((value & 0x0F) as u8) << 4);
                self.bytes[offset + 2] = (value >> 4) as u8;
            }
        }
    }

    /// Snapshot of both FAT copies, for FAT-untouched assertions.
    pub fn fat_region(&self) -> Vec<u8> {
        let sectors = if self.fat16 { 2 * 32 } else { 2 * 9 };
        self.bytes[self.fat_start..self.fat_start + sectors * SECTOR].to_vec()
    }

    pub fn fat_start(&self) -> usize {
        self.fat_start
    }

    pub fn fat_sectors(&self) -> usize {
        if self.fat16 {
            2 * 32
        } else {
            2 * 9
        }
    }

    pub fn build(self) -> MemStorage {
        MemStorage::new(self.bytes)
    }
}

fn write_boot_sector(
    bytes: &mut [u8],
    total_sectors: u16,
    fat_copies: u8,
    sectors_per_fat: u16,
    root_entries: u16,
    media: u8,
) {
    bytes[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    bytes[3..11].copy_from_slice(b"RELIC1.0");
    bytes[11..13].copy_from_slice(&512u16.to_le_bytes());
    bytes[13] = 1;
    bytes[14..16].copy_from_slice(&1u16.to_le_bytes());
    bytes[16] = fat_copies;
    bytes[17..19].copy_from_slice(&root_entries.to_le_bytes());
    bytes[19..21].copy_from_slice(&total_sectors.to_le_bytes());
    bytes[21] = media;
    bytes[22..24].copy_from_slice(&sectors_per_fat.to_le_bytes());
    bytes[24..26].copy_from_slice(&18u16.to_le_bytes());
    bytes[26..28].copy_from_slice(&2u16.to_le_bytes());
    bytes[38] = 0x29;
    bytes[39..43].copy_from_slice(&0xCAFE_F00Du32.to_le_bytes());
    bytes[43..54].copy_from_slice(b"TESTVOLUME ");
    bytes[54..62].copy_from_slice(if sectors_per_fat == 9 {
        b"FAT12   "
    } else {
        b"FAT16   "
    });
    bytes[510] = 0x55;
    bytes[511] = 0xAA;
}

/// 32-byte directory entry with the fields the engine cares about.
pub fn dir_entry(
    name: &[u8; 11],
    attributes: u8,
    cluster: u16,
    size: u32,
    modified: (u16, u16),
) -> [u8; 32] {
    let (date, time) = modified;
    let mut entry = [0u8; 32];
    entry[..11].copy_from_slice(name);
    entry[11] = attributes;
    entry[22..24].copy_from_slice(&time.to_le_bytes());
    entry[24..26].copy_from_slice(&date.to_le_bytes());
    entry[26..28].copy_from_slice(&cluster.to_le_bytes());
    entry[28..32].copy_from_slice(&size.to_le_bytes());
    entry
}

/// Same entry with the tombstone already applied.
pub fn deleted_entry(
    name: &[u8; 11],
    attributes: u8,
    cluster: u16,
    size: u32,
    modified: (u16, u16),
) -> [u8; 32] {
    let mut entry = dir_entry(name, attributes, cluster, size, modified);
    entry[0] = 0xE5;
    entry
}

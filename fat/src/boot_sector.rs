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

//! Boot sector layout and the volume geometry derived from it.

use log::{error, warn};
use relic_ds::DataStorage;
use relic_err::{FatError, Result};
use zerocopy::{
    little_endian::{U16, U32},
    FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout,
};

use crate::dir::ENTRY_SIZE;
use crate::table::FatType;

/// On-disk layout of the first sector of a FAT12/FAT16 volume.
#[repr(C)]
#[derive(Debug, FromBytes, IntoBytes, KnownLayout, Immutable)]
struct RawBootSector {
    /// Jump instruction to the bootstrap routine.
    bs_jmpboot: [u8; 3],
    /// OEM Name Identifier. Typically some indication of what system
    /// formatted the volume.
    bs_oemname: [u8; 8],

    /// Count of bytes per sector. This value may take on only the values
    /// 512, 1024, 2048 or 4096.
    bpb_bytspersec: U16,
    /// Number of sectors per allocation unit. Must be a power of 2 that is
    /// greater than 0.
    bpb_secperclus: u8,
    /// Number of reserved sectors in the reserved region of the volume
    /// starting at the first sector of the volume.
    bpb_rsvdseccnt: U16,
    /// The count of file allocation tables on the volume. A value of 2 is
    /// recommended although a value of 1 is acceptable.
    bpb_numfats: u8,
    /// Count of 32-byte directory entries in the root directory. For
    /// maximum compatibility, FAT16 volumes should use the value 512.
    bpb_rootentcnt: U16,
    /// The old 16-bit total count of sectors on the volume. This field can
    /// be 0; if it is 0, then BPB_TotSec32 must be non-zero.
    bpb_totsec16: U16,
    /// 0xF8 is the standard value for fixed (non-removable) media. For
    /// removable media, 0xF0 is frequently used.
    bpb_media: u8,
    /// The FAT12/FAT16 16-bit count of sectors occupied by one FAT.
    bpb_fatsz16: U16,

    /// Sectors per track for interrupt 0x13. Only relevant for media that
    /// have a geometry.
    bpb_secpertrk: U16,
    /// Number of heads for interrupt 0x13. For example, on a 1.44 MB
    /// 3.5-inch floppy drive this value is 2.
    bpb_numheads: U16,
    /// Count of hidden sectors preceding the partition that contains this
    /// FAT volume. Must always be zero on media that are not partitioned.
    bpb_hiddsec: U32,
    /// The new 32-bit total count of sectors on the volume, used when the
    /// count does not fit in BPB_TotSec16.
    bpb_totsec32: U32,

    /// Interrupt 0x13 drive number. 0x80 or 0x00.
    bs_drvnum: u8,
    /// Reserved (used by Windows NT).
    bs_reserved1: u8,
    /// Extended boot signature, 0x29 if the following three fields are
    /// present.
    bs_bootsig: u8,
    /// Volume serial number, generated by combining the format date and
    /// time into a 32-bit value.
    bs_volid: U32,
    /// Volume label. Matches the 11-byte volume label recorded in the root
    /// directory, or "NO NAME    " when there is none.
    bs_vollab: [u8; 11],
    /// One of the strings "FAT12   ", "FAT16   ", or "FAT     ".
    /// Informational only; does not determine the FAT type.
    bs_filsystype: [u8; 8],

    bs_boot: [u8; 448],
    /// 0x55 (at byte offset 510) and 0xAA (at byte offset 511).
    signature_word: [u8; 2],
}

/// Boot sector fields decoded into native integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSector {
    pub oem_name: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fat_copies: u8,
    pub root_entries: u16,
    pub total_sectors: u16,
    pub media_descriptor: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub heads: u16,
    pub hidden_sectors: u32,
    pub large_sectors: u32,
    pub drive_number: u8,
    pub boot_signature: u8,
    pub volume_serial: u32,
    pub volume_label: [u8; 11],
    pub format_tag: [u8; 8],
}

impl BootSector {
    /// Reads and decodes the first sector of the image.
    ///
    /// A missing 55 AA signature word is reported but not fatal: the tool
    /// must still be able to inspect malformed images.
    pub fn read<DS: DataStorage>(storage: &DS) -> Result<Self> {
        let mut raw = RawBootSector::new_zeroed();
        storage.read(0, raw.as_mut_bytes())?;

        Ok(Self::from_raw(&raw))
    }

    fn from_raw(raw: &RawBootSector) -> Self {
        if raw.signature_word != [0x55, 0xAA] {
            warn!(
                "Boot sector signature is {:02X} {:02X}, expected 55 AA",
                raw.signature_word[0], raw.signature_word[1]
            );
        }

        Self {
            oem_name: raw.bs_oemname,
            bytes_per_sector: raw.bpb_bytspersec.get(),
            sectors_per_cluster: raw.bpb_secperclus,
            reserved_sectors: raw.bpb_rsvdseccnt.get(),
            fat_copies: raw.bpb_numfats,
            root_entries: raw.bpb_rootentcnt.get(),
            total_sectors: raw.bpb_totsec16.get(),
            media_descriptor: raw.bpb_media,
            sectors_per_fat: raw.bpb_fatsz16.get(),
            sectors_per_track: raw.bpb_secpertrk.get(),
            heads: raw.bpb_numheads.get(),
            hidden_sectors: raw.bpb_hiddsec.get(),
            large_sectors: raw.bpb_totsec32.get(),
            drive_number: raw.bs_drvnum,
            boot_signature: raw.bs_bootsig,
            volume_serial: raw.bs_volid.get(),
            volume_label: raw.bs_vollab,
            format_tag: raw.bs_filsystype,
        }
    }
}

/// Derived addressing facts, immutable for the lifetime of a session.
///
/// The disk model matches the recovery tools this engine descends from:
/// the data region is addressed one sector per cluster, starting right
/// after the FAT copies, with the root directory occupying the first
/// `root_sectors` cluster numbers from cluster 2 on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub fat_type: FatType,
    pub sector_size: u32,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u32,
    pub fat_copies: u32,
    pub sectors_per_fat: u32,
    pub root_entries: u32,
    /// Sectors of the fixed root directory extent.
    pub root_sectors: u32,
    /// Sector bias applied when translating a cluster number to its data
    /// sector: `sector = cluster - 2 + first_data_sector`.
    pub first_data_sector: u32,
    pub total_clusters: u32,
}

impl Geometry {
    pub fn derive(boot: &BootSector) -> Result<Self> {
        if boot.bytes_per_sector == 0 || boot.sectors_per_cluster == 0 {
            error!(
                "Bytes per sector ({}) and sectors per cluster ({}) shall be non-zero",
                boot.bytes_per_sector, boot.sectors_per_cluster
            );
            return Err(FatError::Inconsistent.into());
        }

        let sector_size = boot.bytes_per_sector as u32;
        let fat_copies = boot.fat_copies as u32;
        let sectors_per_fat = boot.sectors_per_fat as u32;
        let root_entries = boot.root_entries as u32;

        // The FAT type is keyed off the data-region cluster count; the
        // format tag string is informational only.
        let root_dir_sectors =
            (root_entries * ENTRY_SIZE as u32 + sector_size - 1) / sector_size;
        let total_sectors = if boot.total_sectors != 0 {
            boot.total_sectors as u32
        } else {
            boot.large_sectors
        };
        let overhead =
            boot.reserved_sectors as u32 + fat_copies * sectors_per_fat + root_dir_sectors;
        let data_sectors = total_sectors.saturating_sub(overhead);
        let total_clusters = data_sectors / boot.sectors_per_cluster as u32;

        Ok(Self {
            fat_type: FatType::from_cluster_count(total_clusters),
            sector_size,
            sectors_per_cluster: boot.sectors_per_cluster,
            reserved_sectors: boot.reserved_sectors as u32,
            fat_copies,
            sectors_per_fat,
            root_entries,
            root_sectors: root_entries * ENTRY_SIZE as u32 / sector_size,
            first_data_sector: fat_copies * sectors_per_fat + 1,
            total_clusters,
        })
    }

    /// Byte offset of the first FAT copy.
    pub fn fat_start_byte(&self) -> u64 {
        self.sector_size as u64 * self.reserved_sectors as u64
    }

    /// Byte offset of the data sector backing `cluster`.
    pub fn data_sector_byte(&self, cluster: u16) -> u64 {
        self.sector_size as u64 * (cluster as u64 - 2 + self.first_data_sector as u64)
    }
}

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

//! Undelete safety analysis.
//!
//! MS-DOS leaves the FAT entries of a deleted file in place, so the chain
//! reachable from a tombstoned entry's start cluster is usually the file's
//! original data. It stops being trustworthy once any part of it was
//! handed to a file written later; the checks here decide that.

use log::debug;
use relic_ds::DataStorage;
use relic_err::{FatError, Result};

use crate::boot_sector::Geometry;
use crate::dir::ScannedEntry;
use crate::table::ClusterChain;

/// Rebuilds the presumed cluster chain of a file.
///
/// The walk runs until the FAT ends the chain or the chain has produced
/// strictly more than one sector of slack past the declared size, so an
/// over-long chain shows up in the result instead of being clipped.
pub(crate) fn collect_chain<DS: DataStorage>(
    storage: &DS,
    geometry: &Geometry,
    start: u16,
    size: u32,
) -> Result<Vec<u16>> {
    let sector_size = geometry.sector_size as i64;
    let mut remaining = size as i64;
    let mut clusters = Vec::new();

    let mut chain = ClusterChain::new(storage, geometry, start);
    while let Some(cluster) = chain.next() {
        if remaining < -sector_size {
            break;
        }
        remaining -= sector_size;
        clusters.push(cluster?);
    }

    Ok(clusters)
}

/// Decides whether a tombstoned entry's data survived intact.
///
/// `entries` must hold every entry of the volume (a recovery-mode scan);
/// the candidate is recognized in it by its byte position.
pub(crate) fn validate<DS: DataStorage>(
    storage: &DS,
    geometry: &Geometry,
    candidate: &ScannedEntry,
    entries: &[ScannedEntry],
) -> Result<()> {
    let chain = collect_chain(storage, geometry, candidate.start_cluster, candidate.size)?;

    // A chain inconsistent with the declared size means the file was
    // already partially reclaimed.
    let estimated = chain.len() as u64 * geometry.sector_size as u64;
    if estimated < candidate.size as u64
        || estimated > candidate.size as u64 + geometry.sector_size as u64
    {
        return Err(FatError::SizeMismatch {
            estimated,
            declared: candidate.size,
        }
        .into());
    }

    // Entries modified at or before the candidate cannot have overwritten
    // it; anything newer that shares a cluster has.
    for other in entries {
        if other.position == candidate.position {
            continue;
        }
        if other.modified_key() <= candidate.modified_key() {
            continue;
        }

        let other_chain = collect_chain(storage, geometry, other.start_cluster, other.size)?;
        if let Some(&cluster) = other_chain.iter().find(|cluster| chain.contains(cluster)) {
            debug!(
                "Cluster {cluster} of {} was reused by {}",
                candidate.display_name(),
                other.display_name()
            );
            return Err(FatError::Overwritten { cluster }.into());
        }
    }

    Ok(())
}

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

//! Restores a deleted file on a FAT12/FAT16 image, provided its cluster
//! chain has not been overwritten.

use anyhow::Context;
use clap::Parser;
use log::info;
use relic_cli::Args;
use relic_ds_file::FileStorage;
use relic_fat::dir::{ScanMode, ScannedEntry};
use relic_fat::{Error, FatError, Volume};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    relic_cli::init_logging(args.verbose);

    let storage = FileStorage::open_rw(&args.image)
        .with_context(|| format!("Could not open image {}", args.image.display()))?;
    let volume = Volume::new(storage)?;

    let entries = volume.scan_root(ScanMode::Recovery)?;
    let deleted: Vec<&ScannedEntry> = entries.iter().filter(|entry| entry.deleted).collect();
    if deleted.is_empty() {
        println!("No deleted files found.");
        return Ok(());
    }

    relic_cli::print_menu(deleted.iter().copied());
    let n = relic_cli::select("restore", deleted.len())?;
    if n == 0 {
        return Ok(());
    }

    let entry = deleted[n - 1];
    if !relic_cli::confirm(&format!("Restore {}?", entry.display_name()))? {
        return Ok(());
    }

    match volume.validate_recovery(entry, &entries) {
        Ok(()) => {
            let letter = relic_cli::first_letter()?;
            println!("Restoring {}", entry.display_name());
            volume.restore(entry, letter)?;
        }
        Err(Error::Fat(
            reason @ (FatError::SizeMismatch { .. } | FatError::Overwritten { .. }),
        )) => {
            info!("{}: {reason}", entry.display_name());
            println!("Unfortunately, this file cannot be restored.");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

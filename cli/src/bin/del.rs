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

//! Marks a file on a FAT12/FAT16 image as deleted.

use anyhow::Context;
use clap::Parser;
use relic_cli::Args;
use relic_ds_file::FileStorage;
use relic_fat::dir::ScanMode;
use relic_fat::Volume;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    relic_cli::init_logging(args.verbose);

    let storage = FileStorage::open_rw(&args.image)
        .with_context(|| format!("Could not open image {}", args.image.display()))?;
    let volume = Volume::new(storage)?;

    let entries = volume.scan_root(ScanMode::Listing)?;
    if entries.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    relic_cli::print_menu(&entries);
    let n = relic_cli::select("delete", entries.len())?;
    if n == 0 {
        return Ok(());
    }

    let entry = &entries[n - 1];
    if relic_cli::confirm(&format!("Delete {}?", entry.display_name()))? {
        println!("Deleting {}", entry.display_name());
        volume.delete(entry)?;
    }

    Ok(())
}

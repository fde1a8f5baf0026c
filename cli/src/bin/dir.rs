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

//! Lists the contents of a FAT12/FAT16 image.

use anyhow::Context;
use clap::Parser;
use relic_cli::Args;
use relic_ds_file::FileStorage;
use relic_fat::dir::ScanMode;
use relic_fat::Volume;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    relic_cli::init_logging(args.verbose);

    let storage = FileStorage::open(&args.image)
        .with_context(|| format!("Could not open image {}", args.image.display()))?;
    let volume = Volume::new(storage)?;

    relic_cli::print_boot_sector(volume.boot_sector(), volume.geometry());

    let entries = volume.scan_root(ScanMode::Listing)?;
    println!();
    relic_cli::print_listing(&entries);

    Ok(())
}

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

//! Shared plumbing for the relic command-line tools: argument parsing,
//! logging setup, report formatting, and the interactive prompts.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use relic_fat::boot_sector::{BootSector, Geometry};
use relic_fat::dir::ScannedEntry;

/// Arguments shared by all three tools.
#[derive(Parser, Debug)]
pub struct Args {
    /// Raw FAT12/FAT16 image to operate on.
    pub image: PathBuf,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Routes engine logs to stderr so they never interleave with the
/// interactive protocol on stdout. Warnings are on by default.
pub fn init_logging(verbose: u8) {
    let _ = stderrlog::new().verbosity(verbose as usize + 1).init();
}

/// Renders a fixed-width on-disk text field, one character per byte.
fn field(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (0x20..0x7F).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

pub fn print_boot_sector(boot: &BootSector, geometry: &Geometry) {
    println!("OEM:                 {}", field(&boot.oem_name));
    println!("Bytes Per Sector:    {}", boot.bytes_per_sector);
    println!("Sectors Per Cluster: {}", boot.sectors_per_cluster);
    println!("Reserved Sectors:    {}", boot.reserved_sectors);
    println!("FATs:                {}", boot.fat_copies);
    println!("Entries in Root:     {}", boot.root_entries);
    println!("Sectors:             {}", boot.total_sectors);
    println!("Media:               0x{:02x}", boot.media_descriptor);
    println!("FAT Sectors:         {}", boot.sectors_per_fat);
    println!("Sectors Per Track:   {}", boot.sectors_per_track);
    println!("Sides:               {}", boot.heads);
    println!("Hidden Sectors:      {}", boot.hidden_sectors);
    println!("Large Sectors:       {}", boot.large_sectors);
    println!("Disk Number:         {}", boot.drive_number);
    println!("Signature:           0x{:02x}", boot.boot_signature);
    println!("Volume SN:           0x{:08x}", boot.volume_serial);
    println!("Volume Label:        {}", field(&boot.volume_label));
    println!("Format Type:         {}", field(&boot.format_tag));
    println!(
        "FAT Type is FAT{}, disk has {} clusters",
        geometry.fat_type.bits(),
        geometry.total_clusters
    );
}

/// One row per entry: name, extension, size, then the created, accessed,
/// and modified stamps, closed out by the classic count/bytes footer.
pub fn print_listing(entries: &[ScannedEntry]) {
    println!("FILENAME EXT          SIZE  CREATED              ACCESSED     MODIFIED");

    let mut total_bytes: u64 = 0;
    for entry in entries {
        println!(
            "{} {} {:13}  {} {}  {}   {} {}",
            field(&entry.short_name[..8]),
            field(&entry.short_name[8..]),
            entry.size,
            entry.created_date,
            entry.created_time,
            entry.accessed_date,
            entry.modified_date,
            entry.modified_time
        );
        total_bytes += entry.size as u64;
    }

    println!("        {} File(s)   {} bytes", entries.len(), total_bytes);
}

/// Numbered menu of entry names, 1-based.
pub fn print_menu<'e>(entries: impl IntoIterator<Item = &'e ScannedEntry>) {
    for (index, entry) in entries.into_iter().enumerate() {
        println!("{}) {}", index + 1, entry.display_name());
    }
}

/// Prompts until the user supplies a number in `0..=max`; 0 means quit.
/// Anything unparsable asks again. End of input quits.
pub fn select(action: &str, max: usize) -> io::Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("Which file do you want to {action}? [1 - {max}, 0 to quit] ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(0);
        }
        match line.trim().parse::<usize>() {
            Ok(n) if n <= max => return Ok(n),
            _ => continue,
        }
    }
}

/// Asks a yes/no question; only `y`/`Y` confirms.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/n] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(matches!(line.trim().chars().next(), Some('y' | 'Y')))
}

/// Prompts until the user supplies an ASCII letter.
pub fn first_letter() -> io::Result<u8> {
    let stdin = io::stdin();
    loop {
        print!("Enter the first letter of the file name: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no replacement letter supplied",
            ));
        }
        if let Some(c) = line.trim().chars().next() {
            if c.is_ascii_alphabetic() {
                return Ok(c as u8);
            }
        }
    }
}

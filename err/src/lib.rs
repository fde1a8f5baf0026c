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

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Storage: {0}")]
    Storage(#[from] relic_ds::Error),
    #[error("FAT: {0}")]
    Fat(#[from] FatError),
}

#[derive(thiserror::Error, Debug)]
pub enum FatError {
    #[error("Unsupported FAT type FAT{0}")]
    UnsupportedFatType(u8),
    #[error("Inconsistent boot sector")]
    Inconsistent,
    #[error("Cluster chain spans {estimated} bytes for a {declared}-byte file")]
    SizeMismatch { estimated: u64, declared: u32 },
    #[error("Cluster {cluster} was reclaimed by a newer file")]
    Overwritten { cluster: u16 },
}

pub type Result<T> = core::result::Result<T, Error>;

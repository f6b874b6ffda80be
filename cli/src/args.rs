#![deny(missing_docs)]

//! # Load Arguments
//!
//! Options shared by every subcommand that performs a load.

use std::fs::{self, File};
use std::path::PathBuf;

use apigen_core::schemas::parse_patches;
use apigen_core::{Fetcher, LoadOptions, LoadSession, LoadedApis};

use crate::error::CliResult;

/// Where to find the manifest and how to correct upstream schemas.
#[derive(clap::Args, Debug, Clone)]
pub struct LoadArgs {
    /// Manifest location: a local path or an `http(s)://` URL.
    #[clap(long, env = "APIGEN_MANIFEST")]
    pub manifest: String,

    /// JSON file holding extra `{url, path, value}` schema patches.
    #[clap(long, env = "APIGEN_PATCHES")]
    pub patches: Option<PathBuf>,

    /// Skip the built-in corrections for known upstream schema defects.
    #[clap(long)]
    pub no_builtin_patches: bool,
}

impl LoadArgs {
    /// Builds load options from the patch flags.
    pub fn options(&self) -> CliResult<LoadOptions> {
        let mut options = if self.no_builtin_patches {
            LoadOptions::default()
        } else {
            LoadOptions::builtin()
        };
        if let Some(path) = &self.patches {
            let body = fs::read_to_string(path)?;
            let patches = parse_patches(&path.to_string_lossy(), &body)?;
            tracing::debug!(count = patches.len(), path = %path.display(), "loaded patch file");
            options = options.with_patches(patches);
        }
        Ok(options)
    }

    /// True when the manifest must be retrieved through the fetcher.
    pub fn is_remote(&self) -> bool {
        self.manifest.starts_with("http://") || self.manifest.starts_with("https://")
    }

    /// Runs a complete load using `fetcher` for every remote document.
    pub fn load<F: Fetcher>(&self, fetcher: F) -> CliResult<LoadedApis> {
        let session = LoadSession::new(fetcher).with_options(self.options()?);
        let loaded = if self.is_remote() {
            session.load_remote_manifest(&self.manifest)?
        } else {
            let file = File::open(&self.manifest)?;
            session.load_manifest_reader(&self.manifest, file)?
        };
        Ok(loaded)
    }
}

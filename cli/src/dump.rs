#![deny(missing_docs)]

//! # Dump Command
//!
//! Writes the static model dump of a load.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use apigen_core::{model_data, Fetcher};

use crate::args::LoadArgs;
use crate::error::CliResult;

/// Arguments for the dump command.
#[derive(clap::Args, Debug, Clone)]
pub struct DumpArgs {
    /// Manifest and patch options.
    #[clap(flatten)]
    pub load: LoadArgs,

    /// Output file; stdout when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

/// Loads the manifest and writes the dump.
pub fn execute<F: Fetcher>(args: &DumpArgs, fetcher: F) -> CliResult<()> {
    let loaded = args.load.load(fetcher)?;
    let data = model_data(&loaded);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, data)?;
            tracing::info!(path = %path.display(), "model data written");
        }
        None => std::io::stdout().lock().write_all(data.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::tests::{args, fetcher, write_manifest, API_URL};
    use tempfile::tempdir;

    #[test]
    fn test_dump_written_to_nested_path() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("gen").join("model-data.txt");
        let dump = DumpArgs {
            load: args(write_manifest(dir.path())),
            output: Some(output.clone()),
        };

        execute(&dump, fetcher()).unwrap();

        let written = fs::read_to_string(output).unwrap();
        assert!(written.contains(&format!("{}\n{}\n", API_URL, "=".repeat(API_URL.len()))));
        assert!(written.contains("Type Name     = 'TaskDefinition'"));
    }
}

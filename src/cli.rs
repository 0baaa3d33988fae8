//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `silt`.
#[derive(Debug, Parser)]
#[command(name = "silt", version, about = "Developer toolbox for the silt simulation framework")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a subset of a framework module into a new standalone module.
    ///
    /// Run this one level above MODULE_DIR. At least one subfolder must
    /// contain a *.cc source of an executable; the new module receives
    /// those subfolders plus every header of MODULE_DIR they require.
    Extract {
        /// Module directory to extract from.
        module_dir: String,
        /// Subfolders of the module to extract.
        #[arg(required = true)]
        subfolders: Vec<String>,
    },
    /// Download and build external packages.
    ///
    /// Accepts package names, group names (framework, grid,
    /// optimization, others), or `all`.
    Install {
        /// Packages or groups to install.
        #[arg(required = true)]
        packages: Vec<String>,
        /// Only download the packages; skip unpack and build steps.
        #[arg(long)]
        download: bool,
        /// Delete the installed files for the given packages.
        #[arg(long)]
        clean: bool,
    },
    /// Regenerate the CO2 property table from the NIST database.
    Co2Table {
        /// Output file for the generated table.
        #[arg(long, default_value = "co2values.inc")]
        output: PathBuf,
    },
}

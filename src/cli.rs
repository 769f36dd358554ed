use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "zones.json";

#[derive(Parser, Debug)]
#[command(name = "waymark", version, about = "Zone-catalog walkthrough merger")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CATALOG_PATH,
        help = "Path to the zone-catalog document"
    )]
    pub catalog: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Merge {
        #[arg(required = true, help = "Annotation files (JSON, zone name -> annotation)")]
        annotations: Vec<PathBuf>,
        #[arg(long, conflicts_with = "write", help = "Write the merged catalog to a new path")]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false, help = "Rewrite the catalog in place")]
        write: bool,
        #[arg(
            long,
            default_value_t = false,
            help = "Reject annotations that name zones missing from the catalog"
        )]
        no_create: bool,
    },
    Validate,
    Show {
        zone: String,
    },
    List,
}

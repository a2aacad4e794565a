use clap::Parser;
use gcedit::{logging, statics};
use std::path::PathBuf;

/// Galactic Conquest Editor
#[derive(Parser, Debug)]
#[clap(name = "gcedit", version, about = "View and assemble Galactic Conquests from mod galaxy data")]
struct CliArgs {
    /// Game or mod folder containing Data/XML (falls back to $GCEDIT_DATA_DIR, then ".")
    #[clap(long = "data-folder", short = 'd')]
    data_folder: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> eframe::Result {
    let args = CliArgs::parse();
    logging::init_logger(args.verbose);

    let data_folder = args
        .data_folder
        .or_else(|| std::env::var_os(statics::ENV_DATA_DIR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    tracing::info!(folder = %data_folder.display(), "starting");

    gcedit::run_gui(data_folder)
}

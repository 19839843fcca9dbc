//! Orbital scene viewer.
//!
//! ```text
//! orbital [ASSET_DIR] [--options FILE]
//! ```
//!
//! `ASSET_DIR` holds the moon textures and the three `.glb` bundles
//! (default `assets/scene`). `--options` loads a TOML options file; its
//! asset root is overridden by `ASSET_DIR` when both are given.

use std::path::PathBuf;

use clap::Parser;
use orbital::{options::Options, OrbitalError, Viewer};

/// Orbital scene viewer command-line arguments.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "orbital", about = "Animated orbital scene viewer")]
struct Args {
    /// Directory holding the moon textures and model bundles.
    asset_dir: Option<PathBuf>,

    /// TOML options file.
    #[arg(long)]
    options: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), OrbitalError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let mut builder = Viewer::builder().with_options(options);
    if let Some(dir) = args.asset_dir {
        builder = builder.with_asset_root(dir);
    }
    builder.build().run()
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

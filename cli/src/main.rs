//! Batch tools for the truck parking map, bundled as a single executable:
//! turn coarse parking-area polygons into estimated individual spaces, and
//! reclassify already-mapped spaces by their measured size.

#[macro_use]
extern crate log;

mod estimate_spaces;
mod reclassify;

use anyhow::Result;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "parking-cli", about = "The truck parking data multi-tool")]
enum Command {
    /// Estimate and fit parking spaces into parking areas where individual
    /// spaces aren't mapped, writing a GeoJSON overlay.
    EstimateSpaces {
        /// The path to a facility analysis JSON file
        #[structopt(long)]
        input: String,
        /// The GeoJSON file to write
        #[structopt(long)]
        output: String,
        /// A directory of pre-fetched aerial photos, one `<osm_id>.png` per
        /// parking area, used to detect space orientation
        #[structopt(long)]
        imagery_dir: Option<String>,
    },
    /// Reclassify parking spaces based on their actual dimensions
    Reclassify {
        /// The path to a GeoJSON file of parking spaces
        #[structopt(long)]
        input: String,
        /// The GeoJSON file to write
        #[structopt(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Command::from_args() {
        Command::EstimateSpaces {
            input,
            output,
            imagery_dir,
        } => estimate_spaces::run(input, output, imagery_dir),
        Command::Reclassify { input, output } => reclassify::run(input, output),
    }
}

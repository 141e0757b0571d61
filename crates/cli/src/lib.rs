use anyhow::{Context, Result};
use clap::Parser;
use lithview_core::read_volume_bbox;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "lithview-cli", version)]
#[command(about = "Report the bounding box of an H5J volumetric image container")]
pub struct Cli {
    /// Path to the input H5J file.
    #[arg(long, short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    log::debug!("lithview-cli {}", env!("CARGO_PKG_VERSION"));

    let Some(input) = cli.input else {
        anyhow::bail!("Please specify an input H5J file with the .h5j extension");
    };

    ensure_h5j_extension(&input)?;

    println!("Using input file: {}", input.display());

    let bbox = read_volume_bbox(&input)
        .with_context(|| format!("failed to read container metadata from {}", input.display()))?;

    println!(
        "H5J dimensions: {}, {}, {}",
        bbox.width, bbox.height, bbox.frames
    );

    Ok(())
}

/// The extension gate runs before any attempt to open the file.
fn ensure_h5j_extension(path: &Path) -> Result<()> {
    if path.extension().and_then(|extension| extension.to_str()) != Some("h5j") {
        anyhow::bail!(
            "Input file '{}' does not have the '.h5j' extension.",
            path.display()
        );
    }

    Ok(())
}

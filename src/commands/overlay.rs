//! # Overlay Command
//!
//! Layers a customized bundle on top of a freshly generated one: the
//! descriptor sections and Bnd instructions of the customized copy win,
//! while the generated coordinates, module list and toolchain plugins stay.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pax_construct::bnd::{bnd_file, BndFile};
use pax_construct::config::Settings;
use pax_construct::pom::Pom;

/// Layer a customized project over a generated one
#[derive(Args, Debug)]
pub struct OverlayArgs {
    /// Directory holding the customized descriptor and instructions
    #[arg(value_name = "FROM")]
    pub from: PathBuf,

    /// Generated project directory that receives the overlay
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

/// Execute the `overlay` command.
pub fn execute(args: OverlayArgs, settings: &Settings) -> Result<()> {
    let toolchain = settings.toolchain_keys()?;

    let customized = Pom::read(&args.from)?;
    let mut pom = Pom::read(&args.project)?;
    pom.overlay_details_with(&customized, &toolchain)?;
    pom.write()?;

    if bnd_file(&args.from).is_file() {
        let customized = BndFile::read(&args.from)?;
        let mut bnd =
            BndFile::read(&args.project)?.with_wrap_width(settings.instruction_wrap_width);
        bnd.overlay_instructions(&customized);
        if bnd.is_modified() {
            bnd.write()?;
        }
    }

    println!("✅ Overlaid {} onto {}", args.from.display(), pom.id());
    Ok(())
}

//! Print the next free directory-scan serial.
//!
//! ```bash
//! autosave-render probe ./renders --project shot
//! autosave-render probe ./renders --project shot --ext png --ext exr
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::constants::IMAGE_EXTENSIONS;
use crate::probe::next_free_serial;

#[derive(Args)]
pub struct ProbeCommand {
    /// Directory holding previously saved images
    dir: PathBuf,

    /// Project name the images start with
    #[arg(long)]
    project: String,

    /// Extensions to consider, without dot (defaults to all image formats)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,
}

impl ProbeCommand {
    pub async fn execute(self) -> Result<()> {
        let extensions: Vec<&str> = if self.extensions.is_empty() {
            IMAGE_EXTENSIONS.to_vec()
        } else {
            self.extensions.iter().map(|ext| ext.trim_start_matches('.')).collect()
        };

        let serial = next_free_serial(&self.dir, &self.project, &extensions)?;
        println!("{serial}");
        Ok(())
    }
}

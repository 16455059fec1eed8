//! Read-only views that need no session state.

use clap::Args;
use rejection_core::{initialize, Config};

use super::session::write_challenges;

#[derive(Args)]
pub struct CatalogArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Print the seeded challenge catalog.
pub fn run(args: CatalogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = initialize();
    if args.json || Config::load()?.display.json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        write_challenges(&mut std::io::stdout().lock(), &records)?;
    }
    Ok(())
}

/// Print the categories suggested by the upload form.
pub fn categories() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    for category in &config.categories.suggested {
        println!("{category}");
    }
    Ok(())
}

//! Filters command - list the filters templates can use

use color_eyre::eyre::Result;
use inkpress_template::FilterRegistry;

/// Run the filters command.
pub fn run() -> Result<()> {
    let registry = FilterRegistry::new();
    tracing::debug!(count = registry.names().len(), "Listing filters");

    for name in registry.names() {
        println!("{name}");
    }

    Ok(())
}

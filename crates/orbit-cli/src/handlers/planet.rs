//! Planet facts.

use anyhow::Result;
use orbit_core::domain::planets;

use crate::error::CliError;
use crate::presentation::{format_planet, format_planet_list};

/// Show one planet, or list them all when no name is given.
pub fn execute(name: Option<&str>) -> Result<()> {
    println!("{}", render(name)?);
    Ok(())
}

/// Text for `planet [name]`, shared with the chat `/planet` command.
pub fn render(name: Option<&str>) -> Result<String, CliError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(format!("Planets:\n{}", format_planet_list(planets::all()))),
        Some(name) => planets::lookup(name).map(format_planet).ok_or_else(|| {
            let known: Vec<_> = planets::all().iter().map(|p| p.name).collect();
            CliError::Arguments(format!(
                "unknown planet '{name}'. Try one of: {}",
                known.join(", ")
            ))
        }),
    }
}

//! Print the GraphQL schema definition to stdout.

use std::io::Write;

use color_eyre::eyre::{Result, WrapErr};

use registrar::inbound::graphql::schema_sdl;

fn main() -> Result<()> {
    color_eyre::install()?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(schema_sdl().as_bytes())
        .wrap_err("failed to write schema")?;
    Ok(())
}

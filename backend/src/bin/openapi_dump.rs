//! Print the OpenAPI document for the HTTP adapter as JSON.

use std::io::Write;

use color_eyre::eyre::Result;
use notes_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi().to_pretty_json()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

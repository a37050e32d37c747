//! Print the OpenAPI document for jobtracker-server.

use anyhow::Result;
use jobtracker_server::docs::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}

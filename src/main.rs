use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use costdeck::fixtures;
use costdeck::loader;
use costdeck::report::build_dashboard;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let loaded = match std::env::args().nth(1) {
        Some(path) => loader::from_json_file(Path::new(&path))?,
        None => fixtures::demo_project()?,
    };
    let dashboard = build_dashboard(&loaded.project, &loaded.findings);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

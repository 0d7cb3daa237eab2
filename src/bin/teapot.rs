use std::path::Path;

use anyhow::Context;

use orbit_viewer::cli::{self, TeapotArgs};
use orbit_viewer::config::ViewerConfig;
use orbit_viewer::logging::{init_logging, LoggingConfig};
use orbit_viewer::process::obj::load_obj;
use orbit_viewer::SimpleState;

const MESH_PATH: &str = "Objects/cube.obj";

fn run() -> anyhow::Result<()> {
    let config = ViewerConfig::default();
    let path = Path::new(MESH_PATH);
    let mesh = load_obj(path)
        .with_context(|| format!("Failed to load OBJ file: {}", path.display()))?;

    orbit_viewer::run("Teapot", &config, |gpu| SimpleState::new(gpu, &config, &mesh))
        .context("Failed to start renderer")
}

fn main() {
    let _: TeapotArgs = cli::parse_or_exit();
    init_logging(LoggingConfig::default());

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(cli::FAILURE_EXIT_CODE);
    }
}

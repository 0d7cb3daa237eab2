use anyhow::Context;

use orbit_viewer::cli::{self, ViewerArgs};
use orbit_viewer::config::ViewerConfig;
use orbit_viewer::logging::{init_logging, LoggingConfig};
use orbit_viewer::process::obj::load_obj;
use orbit_viewer::CompositeState;

fn run(args: ViewerArgs) -> anyhow::Result<()> {
    let config = ViewerConfig::default();

    // Load before opening a window so a bad path fails fast.
    let mesh = load_obj(&args.obj)
        .with_context(|| format!("Failed to load OBJ file: {}", args.obj.display()))?;

    orbit_viewer::run("Orbit Viewer", &config, |gpu| {
        CompositeState::new(gpu, &config, &mesh)
    })
    .context("Failed to start renderer")
}

fn main() {
    let args: ViewerArgs = cli::parse_or_exit();
    init_logging(LoggingConfig::default());

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(cli::FAILURE_EXIT_CODE);
    }
}

use std::path::PathBuf;

/// Exit status for usage and start-up failures.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Renders an OBJ mesh into an off-screen texture and composites it onto a
/// screen-aligned plane.
///
/// Drag with the left mouse button to orbit, the right button to zoom. Hold
/// Alt when pressing a button to drive the plane camera instead.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct ViewerArgs {
    /// OBJ file to load. Its diffuse texture is looked up in `Objects/`.
    pub obj: PathBuf,
}

/// Renders the bundled mesh with an orbiting camera.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct TeapotArgs {}

/// Parses arguments, printing usage and exiting with
/// [`FAILURE_EXIT_CODE`] when they are invalid. `--help` and `--version`
/// exit normally.
pub fn parse_or_exit<P: clap::Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => {
                // Printing to stderr can only fail if stderr is gone.
                let _ = err.print();
                std::process::exit(FAILURE_EXIT_CODE);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn viewer_requires_exactly_one_path() {
        assert!(ViewerArgs::try_parse_from(["orbit-viewer"]).is_err());
        assert!(ViewerArgs::try_parse_from(["orbit-viewer", "a.obj", "b.obj"]).is_err());

        let args = ViewerArgs::try_parse_from(["orbit-viewer", "Objects/cube.obj"]).unwrap();
        assert_eq!(args.obj, PathBuf::from("Objects/cube.obj"));
    }

    #[test]
    fn teapot_takes_no_arguments() {
        assert!(TeapotArgs::try_parse_from(["teapot"]).is_ok());
        assert!(TeapotArgs::try_parse_from(["teapot", "extra.obj"]).is_err());
    }

    #[test]
    fn missing_argument_reports_usage() {
        let err = ViewerArgs::try_parse_from(["orbit-viewer"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("Usage"));
    }
}

/// soft3d - terminal software renderer
///
/// Renders an OBJ mesh (or a unit cube) with world and object axes.
/// Controls:
///   - W/S, A/D, Q/E: Move forward/back, left/right, up/down
///   - Arrow Keys: Yaw and pitch
///   - Esc / Ctrl-C: Quit
///
/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise; redirect
/// stderr (`2>soft3d.log`) to keep them off the rendered frame.
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use soft3d_terminal::cli::{build_scene, Args};
use soft3d_terminal::{AppError, TerminalApp};
use std::process::ExitCode;

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let config = args.load_config()?;
    let mesh = args.load_mesh()?;
    log::info!(
        "starting: {} vertices, {} faces, {}x{} @ {} fps",
        mesh.vertices.len(),
        mesh.faces.len(),
        config.width,
        config.height,
        config.fps
    );

    let scene = build_scene(&config, mesh)?;
    let mut app = TerminalApp::new(scene, config.viewport(), config.frame_time())?;
    app.run()?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("soft3d: logger unavailable: {e}");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("soft3d: {e}");
            ExitCode::FAILURE
        }
    }
}

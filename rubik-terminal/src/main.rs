/// Rubik Terminal - Interactive 3x3x3 puzzle
///
/// Controls:
///   - l/m/r, d/e/u, b/s/f: Turn a slice (Shift reverses)
///   - Arrow Keys: Orbit the camera
///   - z: Undo, 0: Reset
///   - Left click: Pick a cubie
///   - Q/ESC: Quit
use clap::Parser;
use rubik_core::Wiring;
use rubik_terminal::{AppConfig, TerminalApp};
use std::io;

/// Command-line options
#[derive(Parser, Debug)]
#[command(version, about = "Interactive 3x3x3 puzzle in the terminal")]
struct Args {
    /// Which slices can be turned (`full` or `classic`)
    #[arg(long, default_value = "full")]
    wiring: Wiring,
    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Start with an orthographic camera
    #[arg(long)]
    orthographic: bool,
    /// Camera distance from the puzzle center
    #[arg(long, default_value_t = 7.0)]
    distance: f32,
}

fn main() -> io::Result<()> {
    // Initialize logging. Output goes to stderr, so redirect it to keep the
    // picture clean: `RUST_LOG=debug rubik-terminal 2> rubik.log`
    env_logger::builder().init();

    let args = Args::parse();
    let config = AppConfig {
        wiring: args.wiring,
        fps: args.fps,
        orthographic: args.orthographic,
        distance: args.distance,
    };
    log::info!("starting with {config:?}");

    let (width, height) = crossterm::terminal::size()?;
    let mut app = TerminalApp::new(config, width, height);
    app.run()?;

    let puzzle = app.surface().puzzle();
    println!(
        "Made {} turns{}.",
        puzzle.history().len(),
        if puzzle.is_solved() { ", puzzle solved" } else { "" }
    );
    Ok(())
}

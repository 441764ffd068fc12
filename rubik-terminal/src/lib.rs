/// Terminal front end for the 3x3x3 puzzle
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use rubik_core::{
    face_labels, Camera, CubeConfig, InteractionSurface, Mesh, Orbit, ProjectionMode, Puzzle,
    Wiring,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Width of a terminal cell relative to its height.
const CELL_ASPECT: f32 = 0.5;
/// Orbit step per arrow key press (in radians)
const ORBIT_STEP: f32 = 0.1;

/// Settings for the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub wiring: Wiring,
    pub fps: u32,
    pub orthographic: bool,
    /// Camera distance from the puzzle center.
    pub distance: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wiring: Wiring::Full,
            fps: 30,
            orthographic: false,
            distance: 7.0,
        }
    }
}

/// Owns the terminal while the app is running.
///
/// `init` switches to raw mode and the alternate screen; `teardown` (or
/// dropping the session) puts the terminal back.
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self { active: true })
    }

    pub fn teardown(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

/// Main application struct for the terminal puzzle
pub struct TerminalApp {
    surface: InteractionSurface,
    mesh: Mesh,
    orbit: Orbit,
    camera: Camera,
    renderer: AsciiRenderer,
    config: AppConfig,
    status: String,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        let puzzle = Puzzle::new(CubeConfig::with_wiring(config.wiring));
        let mesh = Mesh::cubie(puzzle.config().cubie_size);
        let mut camera = Camera::new(1, 1);
        if config.orthographic {
            camera.mode = ProjectionMode::Orthographic;
        }
        let mut app = Self {
            surface: InteractionSurface::new(puzzle),
            mesh,
            orbit: Orbit::new(0.6, 0.5, config.distance),
            camera,
            renderer: AsciiRenderer::new(1, 1),
            config,
            status: String::new(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.resize(width, height);
        app.camera.set_orbit(&app.orbit);
        app
    }

    pub fn surface(&self) -> &InteractionSurface {
        &self.surface
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::init()?;
        let result = self.main_loop();
        session.teardown()?;
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.fps.max(1)));
        execute!(stdout(), terminal::Clear(ClearType::All))?;

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// The drawing area excludes the status line.
    fn resize(&mut self, width: u16, height: u16) {
        let width = usize::from(width.max(1));
        let height = usize::from(height.saturating_sub(1).max(1));
        self.renderer.resize(width, height);
        self.camera.aspect = width as f32 * CELL_ASPECT / height as f32;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up => self.orbit_by(0.0, ORBIT_STEP),
            KeyCode::Down => self.orbit_by(0.0, -ORBIT_STEP),
            KeyCode::Left => self.orbit_by(-ORBIT_STEP, 0.0),
            KeyCode::Right => self.orbit_by(ORBIT_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_by(0.9),
            KeyCode::Char('-') => self.zoom_by(1.1),
            KeyCode::Char('o') => {
                self.camera.mode = match self.camera.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
            }
            KeyCode::Char('z') => {
                self.status = if self.surface.undo() {
                    "undo".to_string()
                } else {
                    "nothing to undo".to_string()
                };
            }
            KeyCode::Char('0') => {
                self.surface.reset();
                self.status = "reset".to_string();
            }
            KeyCode::Char(c) => {
                let Some(command) = self.surface.commands().by_key(c) else {
                    return;
                };
                self.status = if self.surface.trigger_command(command) {
                    command.label()
                } else {
                    format!("{} failed", command.label())
                };
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        self.status = match self.pick_at(mouse.column, mouse.row) {
            Some(hit) => format!("picked cubie {} at {}", hit.id, hit.coord),
            None => "picked nothing".to_string(),
        };
    }

    /// Cubie under a terminal cell, if any.
    pub fn pick_at(&self, column: u16, row: u16) -> Option<rubik_core::PickHit> {
        let ray = self.camera.ray_through(
            f32::from(column) + 0.5,
            f32::from(row) + 0.5,
            self.renderer.width() as u32,
            self.renderer.height() as u32,
        )?;
        self.surface.pick(&ray)
    }

    fn orbit_by(&mut self, d_yaw: f32, d_pitch: f32) {
        self.orbit.rotate(d_yaw, d_pitch);
        self.camera.set_orbit(&self.orbit);
    }

    fn zoom_by(&mut self, factor: f32) {
        self.orbit.zoom(factor);
        self.camera.set_orbit(&self.orbit);
    }

    /// Rasterizes the current puzzle state into the renderer's buffers.
    pub fn draw_frame(&mut self) {
        self.renderer.clear();
        let renderer = &mut self.renderer;
        let (mesh, camera) = (&self.mesh, &self.camera);
        self.surface.puzzle().for_each_cubie(|_, transform, colors| {
            renderer.render_cubie(mesh, &transform.to_homogeneous(), colors, camera);
        });
        for label in &face_labels() {
            self.renderer.render_label(label, &self.camera);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_frame();

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let puzzle = self.surface.puzzle();
        let solved = if puzzle.is_solved() { "solved" } else { "" };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Rubik | FPS: {:.1} | l/m/r d/e/u b/s/f=Turn (Shift=reverse) Arrows=Orbit +/-=Zoom o=Ortho z=Undo 0=Reset Q=Quit",
                self.fps
            )),
            cursor::MoveTo(0, self.renderer.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "[{}] turns: {} {} | {}",
                puzzle.wiring(),
                puzzle.history().len(),
                solved,
                self.status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

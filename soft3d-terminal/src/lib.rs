/// Terminal front end: crossterm surface, key input and the frame loop
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use soft3d_core::{ConfigError, FrameReport, Intent, MeshError, Scene, Viewport};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

pub mod cli;
pub mod input;
pub mod surface;

pub use surface::TerminalSurface;

/// Anything that stops the binary before or during the frame loop
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    surface: TerminalSurface,
    frame_time: Duration,
    running: bool,
    last_report: FrameReport,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, viewport: Viewport, frame_time: Duration) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            scene,
            surface: TerminalSurface::new(
                viewport,
                cols as usize,
                rows as usize,
                soft3d_core::Color::DARK_SLATE_GRAY,
            ),
            frame_time,
            running: true,
            last_report: FrameReport::default(),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start - previous;
            previous = frame_start;

            // Handle input
            let intents = self.poll_input()?;
            if !self.scene.apply(&intents) {
                self.running = false;
                break;
            }

            // Render
            self.surface.clear();
            self.last_report = self.scene.render(&mut self.surface, dt);
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                log::trace!("{:.1} fps", self.fps);
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    /// Drain every pending event without blocking
    fn poll_input(&mut self) -> io::Result<Vec<Intent>> {
        let mut intents = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => intents.extend(input::intent_for(&key)),
                Event::Resize(cols, rows) => self.surface.resize(cols as usize, rows as usize),
                _ => {}
            }
        }
        Ok(intents)
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.present(&mut stdout)?;

        // Draw UI overlay
        let report = &self.last_report;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "soft3d | FPS: {:.1} | faces {} culled {} failed {} | WASD/QE=Move Arrows=Look Esc=Quit",
                self.fps, report.stats.faces_drawn, report.stats.faces_culled, report.failed
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

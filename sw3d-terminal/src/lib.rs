/// Terminal front-end for the SW3D software renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use sw3d_core::{Color as FaceColor, FrameStats, Mesh, Movement, Pipeline, Scene};

pub mod config;
pub mod logging;
pub mod renderer;

pub use config::AppConfig;
pub use renderer::AsciiRenderer;

/// Edge color for outlines
pub const OUTLINE_COLOR: FaceColor = FaceColor::WHITE;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    pipeline: Pipeline,
    renderer: AsciiRenderer,
    cell_aspect: f32,
    target_frame_time: Duration,
    spin_rate: f32,
    movement: Movement,
    running: bool,
    last_frame: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(config: &AppConfig, mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height as usize);
        let cell_aspect = config.display.cell_aspect;
        let scene = config.build_scene(mesh, renderer.viewport().aspect_ratio(cell_aspect));

        let mut pipeline = Pipeline::new();
        if config.display.outline {
            pipeline = pipeline.with_outline(OUTLINE_COLOR);
        }

        let fps = config.display.target_fps.max(1);
        let now = Instant::now();

        Ok(Self {
            spin_rate: scene.model.spin_rate,
            scene,
            pipeline,
            renderer,
            cell_aspect,
            target_frame_time: Duration::from_secs_f64(1.0 / fps as f64),
            movement: Movement::empty(),
            running: true,
            last_frame: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
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
        log::info!(
            "starting render loop: {} triangles, {:?} per frame",
            self.scene.mesh.len(),
            self.target_frame_time
        );

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            self.movement = Movement::empty();
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }

            // Update
            let dt = (frame_start - self.last_frame).as_secs_f32();
            self.last_frame = frame_start;
            self.scene.advance(dt, self.movement);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        log::info!("render loop stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.running = false;
                    }
                    KeyCode::Char('o') => {
                        self.pipeline.outline = match self.pipeline.outline {
                            Some(_) => None,
                            None => Some(OUTLINE_COLOR),
                        };
                    }
                    KeyCode::Char('p') => {
                        self.scene.model.spin_rate = if self.scene.model.spin_rate == 0.0 {
                            self.spin_rate
                        } else {
                            0.0
                        };
                    }
                    code => {
                        if let Some(movement) = movement_for_key(code) {
                            self.movement |= movement;
                        }
                    }
                }
            }
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {}x{}", width, height);
                self.renderer.resize(width as usize, height as usize);
                self.scene
                    .set_aspect_ratio(self.renderer.viewport().aspect_ratio(self.cell_aspect));
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let viewport = self.renderer.viewport();
        self.stats = self.pipeline.render(&self.scene, &viewport, &mut self.renderer);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SW3D | FPS: {:.1} | tris {}/{} | Arrows=Move W/S=Fwd/Back A/D=Turn O=Outline P=Spin Q=Quit",
                self.fps, self.stats.drawn, self.stats.source
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Camera intent bound to a key, if any
pub fn movement_for_key(code: KeyCode) -> Option<Movement> {
    match code {
        KeyCode::Up => Some(Movement::UP),
        KeyCode::Down => Some(Movement::DOWN),
        KeyCode::Left => Some(Movement::LEFT),
        KeyCode::Right => Some(Movement::RIGHT),
        KeyCode::Char('w') => Some(Movement::FORWARD),
        KeyCode::Char('s') => Some(Movement::BACK),
        KeyCode::Char('a') => Some(Movement::TURN_LEFT),
        KeyCode::Char('d') => Some(Movement::TURN_RIGHT),
        _ => None,
    }
}

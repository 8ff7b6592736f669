use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use tracing::{debug, info, warn};

use drunk_cats::{Session, SimError};

use crate::animation::{AnimationLoop, TickPacer};
use crate::input::{InputEvent, InputHandler};
use crate::render::{
    detect_unicode, inner_area, mood_colors_for_mode, Camera, CatsWidget, ColorMode, DisplayMode,
    EmptyStateWidget, FieldWidget, HelpOverlay, MoodColors, RadiusRings, StatusBar,
};

/// Viewer settings that are not part of the simulation itself
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Simulation ticks per second at speed factor 1
    pub tick_rate: f64,
    pub display_mode: DisplayMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: 10.0,
            display_mode: DisplayMode::default(),
        }
    }
}

/// Largest population the viewer will grow to with `n`
const MAX_VIEWER_CATS: usize = 100_000;

pub fn to_io_error(err: SimError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Main application state
pub struct App {
    session: Session,
    camera: Camera,
    animation_loop: AnimationLoop,
    pacer: TickPacer,
    input_handler: InputHandler,
    display_mode: DisplayMode,
    colors: &'static MoodColors,
    use_unicode: bool,
    show_help: bool,
    paused: bool,

    // Last known field area for click hit detection
    last_field_area: Option<Rect>,

    running: bool,
}

impl App {
    pub fn new(session: Session, config: AppConfig) -> Self {
        let camera = Camera::new(session.config().map_width, session.config().map_height);
        Self {
            session,
            camera,
            animation_loop: AnimationLoop::new(),
            pacer: TickPacer::new(config.tick_rate),
            input_handler: InputHandler::new(),
            display_mode: config.display_mode,
            colors: mood_colors_for_mode(ColorMode::detect()),
            use_unicode: detect_unicode(),
            show_help: false,
            paused: false,
            last_field_area: None,
            running: true,
        }
    }

    /// Hand the session back once the viewer has closed
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run the application
    pub async fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        info!(cats = self.session.cats().len(), "Viewer started");

        while self.running {
            self.handle_input()?;

            if self.animation_loop.should_render() {
                let dt = self.animation_loop.delta_time();
                self.step(dt)?;
                self.camera.update(self.session.cats());

                terminal.draw(|frame| {
                    let area = frame.area();
                    self.last_field_area = Some(self.field_area(area));
                    self.render(area, frame.buffer_mut());
                })?;

                self.animation_loop.frame_rendered();
            }

            tokio::time::sleep(self.animation_loop.time_until_next_frame()).await;
        }

        info!(ticks = self.session.tick_count(), "Viewer stopped");
        Ok(())
    }

    /// Run whatever simulation ticks are due for this frame
    fn step(&mut self, dt: f64) -> io::Result<()> {
        if self.paused {
            return Ok(());
        }
        for _ in 0..self.pacer.advance(dt) {
            self.session.tick().map_err(to_io_error)?;
        }
        Ok(())
    }

    fn field_area(&self, area: Rect) -> Rect {
        let status_height = if self.display_mode.shows_status_bar() { 1 } else { 0 };
        Rect::new(
            area.x,
            area.y,
            area.width,
            area.height.saturating_sub(status_height),
        )
    }

    /// Handle keyboard and mouse input
    fn handle_input(&mut self) -> io::Result<()> {
        while let Some(event) = self.input_handler.poll(std::time::Duration::ZERO) {
            match event {
                InputEvent::Quit => self.running = false,

                InputEvent::TogglePause => {
                    self.paused = !self.paused;
                    self.pacer.reset();
                }

                InputEvent::SpeedUp => self.pacer.speed_up(),
                InputEvent::SpeedDown => self.pacer.slow_down(),

                InputEvent::Pan { dx, dy } => self.camera.pan(dx, dy),
                InputEvent::ZoomIn => self.camera.zoom_in(),
                InputEvent::ZoomOut => self.camera.zoom_out(),
                InputEvent::FollowNext => self.camera.follow_next(self.session.cats().len()),
                InputEvent::Unfollow => self.camera.unfollow(),
                InputEvent::ResetCamera => self.camera.reset(),

                InputEvent::MoreCats => {
                    let count = (self.session.cats().len().max(1) * 2).min(MAX_VIEWER_CATS);
                    self.resize_population(count)?;
                }
                InputEvent::FewerCats => {
                    let count = self.session.cats().len() / 2;
                    self.resize_population(count)?;
                }

                InputEvent::ToggleHelp => {
                    self.show_help = !self.show_help;
                    self.input_handler.set_help_visible(self.show_help);
                }
                InputEvent::CloseHelp => {
                    self.show_help = false;
                    self.input_handler.set_help_visible(false);
                }

                InputEvent::CycleDisplayMode => self.display_mode = self.display_mode.cycle(),
                InputEvent::SetModeMinimal => self.display_mode = DisplayMode::Minimal,
                InputEvent::SetModeStandard => self.display_mode = DisplayMode::Standard,
                InputEvent::SetModeDebug => self.display_mode = DisplayMode::Debug,

                InputEvent::MouseClick { x, y } => self.follow_at(x, y),

                InputEvent::Resize { width, height } => {
                    debug!(width, height, "Terminal resized");
                }

                InputEvent::None => {}
            }
        }
        Ok(())
    }

    fn resize_population(&mut self, count: usize) -> io::Result<()> {
        if count == self.session.cats().len() {
            return Ok(());
        }
        match self.session.resize(count) {
            Ok(()) => {
                self.camera.unfollow();
                Ok(())
            }
            Err(err @ SimError::ResourceExhausted { .. }) => {
                // Keep running with the old population
                warn!(error = %err, "Could not resize population");
                Ok(())
            }
            Err(err) => Err(to_io_error(err)),
        }
    }

    /// Follow the cat under a click, or stop following on empty space
    fn follow_at(&mut self, x: u16, y: u16) {
        let Some(field_area) = self.last_field_area else {
            return;
        };
        let inner = inner_area(field_area);
        if !inner.contains(ratatui::layout::Position::new(x, y)) {
            return;
        }

        match self.camera.pick(self.session.cats(), x, y, inner) {
            Some(id) => self.camera.follow(id),
            None => self.camera.unfollow(),
        }
    }

    /// Render the whole UI.
    ///
    /// Order: field border and map edges, cats, debug rings, status bar,
    /// help overlay.
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let field_area = self.field_area(area);
        let inner = inner_area(field_area);
        let config = self.session.config();

        FieldWidget::new(&self.camera, (config.map_width, config.map_height))
            .show_map_edges(self.display_mode != DisplayMode::Minimal)
            .use_unicode(self.use_unicode)
            .render(field_area, buf);

        let cats = self.session.cats();
        if cats.is_empty() {
            EmptyStateWidget.render(inner, buf);
        } else {
            CatsWidget::new(cats, &self.camera)
                .colors(self.colors)
                .use_unicode(self.use_unicode)
                .render(inner, buf);
        }

        if self.display_mode.shows_rings() {
            if let Some(cat) = self.camera.followed().and_then(|id| cats.get(id)) {
                RadiusRings::new(cat.position, config.fight_radius, config.hiss_radius, &self.camera)
                    .colors(self.colors)
                    .use_unicode(self.use_unicode)
                    .render(inner, buf);
            }
        }

        if self.display_mode.shows_status_bar() && area.height > 0 {
            let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            StatusBar::new(self.session.counts(), self.session.tick_count())
                .paused(self.paused)
                .speed_factor(self.pacer.speed_factor())
                .fps(self.animation_loop.fps())
                .display_mode(self.display_mode)
                .followed(self.camera.followed())
                .index(config.index, config.index.effective(cats.len()))
                .colors(self.colors)
                .render(status_area, buf);
        }

        if self.show_help {
            HelpOverlay.render(area, buf);
        }
    }
}

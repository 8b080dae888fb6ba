use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use nightsky_background::{AnimatorContext, BackgroundAnimator, DrawList, SkyCanvas};
use nightsky_config::{Config, FileStore, MemoryStore, PreferenceStore, ThemePreference};
use nightsky_core::{Viewport, Visibility};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{DefaultTerminal, Frame, style::Style, widgets::Block};

use crate::clipboard::{CopyButton, SystemClipboard};
use crate::frame_clock::FrameClock;
use crate::nav::NavMenu;
use crate::page::SectionLayout;
use crate::reveal::RevealObserver;

mod clipboard;
mod frame_clock;
mod nav;
mod page;
mod reveal;
mod viewport;

/// A personal homepage for the terminal with an animated night sky.
#[derive(Debug, Parser)]
#[command(name = "nightsky", version, about)]
struct Cli {
    /// Disable the animated background and reveal effects.
    #[arg(long, env = "NIGHTSKY_REDUCED_MOTION")]
    reduced_motion: bool,
    /// Device pixel ratio for the background surface (capped at 2).
    #[arg(long, value_name = "RATIO")]
    density: Option<f64>,
    /// Background frame rate.
    #[arg(long)]
    fps: Option<u32>,
    /// Seed for a reproducible background.
    #[arg(long)]
    seed: Option<u64>,
    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags override the config file.
    fn apply(&self, config: &mut Config) {
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        if let Some(density) = self.density {
            config.pixel_density = Some(density);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    let store = open_preferences();

    let terminal = ratatui::init();
    let result = crossterm::execute!(stdout(), EnableFocusChange)
        .map_err(color_eyre::Report::from)
        .and_then(|()| {
            let size = terminal.size()?;
            App::new(config, store, cli.seed, size.width, size.height).run(terminal)
        });
    let _ = crossterm::execute!(stdout(), DisableFocusChange);
    ratatui::restore();
    result
}

/// Log to a file in the cache directory; the terminal is busy drawing.
fn init_logging() {
    let Some(path) = nightsky_config::log_file() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

/// File-backed preferences, or memory only if the file is unusable.
fn open_preferences() -> Box<dyn PreferenceStore> {
    match nightsky_config::preferences_file().map(FileStore::open) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(err)) => {
            log::warn!("preferences unavailable, theme will not persist: {err:#}");
            Box::new(MemoryStore::new())
        }
        None => Box::new(MemoryStore::new()),
    }
}

type Sky = BackgroundAnimator<DrawList, FrameClock, StdRng>;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    theme: ThemePreference<Box<dyn PreferenceStore>>,
    nav: NavMenu,
    copy: CopyButton,
    clipboard: SystemClipboard,
    reveal: RevealObserver,
    /// Animated background; `None` when there is nothing to draw on.
    sky: Option<Sky>,
    layout: SectionLayout,
    layout_width: u16,
    /// First body row shown.
    scroll: u16,
    body_height: u16,
    /// One-line message shown in the footer.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`] for a `columns` x `rows` terminal.
    pub fn new(
        config: Config,
        store: Box<dyn PreferenceStore>,
        seed: Option<u64>,
        columns: u16,
        rows: u16,
    ) -> Self {
        let viewport = viewport::current(columns, rows);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sky = BackgroundAnimator::init(AnimatorContext {
            viewport,
            device_pixel_ratio: config.pixel_density,
            reduced_motion: config.reduced_motion,
            surface: (columns > 0 && rows > 0).then(DrawList::new),
            scheduler: Some(FrameClock::new(config.frame_interval(), Instant::now())),
            rng,
        });
        let reveal = RevealObserver::new(config.sections.len(), config.reduced_motion);
        let layout = SectionLayout::new(&config.sections, 1);
        Self {
            running: false,
            theme: ThemePreference::load(store),
            nav: NavMenu::default(),
            copy: CopyButton::new("copy email"),
            clipboard: SystemClipboard::default(),
            reveal,
            sky,
            layout,
            layout_width: 0,
            scroll: 0,
            body_height: 0,
            status: None,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.advance(Instant::now());
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.theme.theme();
        let [header, body, footer] = page::split(area);

        let width = page::body_width(body);
        if width != self.layout_width {
            self.layout = SectionLayout::new(&self.config.sections, width);
            self.layout_width = width;
        }
        self.body_height = body.height;
        self.scroll = self.scroll.min(self.max_scroll());
        self.reveal
            .observe(&self.layout.extents, self.scroll, self.body_height);

        match &self.sky {
            Some(sky) => {
                let vp = sky.viewport();
                frame.render_widget(
                    SkyCanvas::new(sky.surface(), theme.background_rgb(), vp.width, vp.height),
                    area,
                );
            }
            None => frame.render_widget(Block::new().style(Style::new().bg(theme.background())), area),
        }

        page::render_header(frame, header, theme, &self.config.profile, self.nav, &self.copy);
        page::render_body(frame, body, theme, &self.layout, &self.reveal, self.scroll);
        page::render_footer(
            frame,
            footer,
            theme,
            &self.config.profile,
            self.status.as_deref(),
        );
        if self.nav.is_expanded() {
            page::render_menu(frame, body, theme, &self.config.sections);
        }
        if let Some(email) = self.copy.prompt() {
            page::render_prompt(frame, area, theme, email);
        }
    }

    /// Waits for the next terminal event or the next due frame, whichever
    /// comes first. Blocks indefinitely when nothing is scheduled.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let ready = match self.next_timeout(Instant::now()) {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };
        if ready {
            let event = event::read()?;
            self.on_event(event);
        }
        Ok(())
    }

    fn next_timeout(&self, now: Instant) -> Option<Duration> {
        let frame = self
            .sky
            .as_ref()
            .and_then(|sky| sky.scheduler().timeout(now));
        let copy = self
            .copy
            .deadline()
            .map(|at| at.saturating_duration_since(now));
        match (frame, copy) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Deliver due frames and expire timed feedback.
    fn advance(&mut self, now: Instant) {
        self.copy.tick(now);
        if let Some(sky) = self.sky.as_mut() {
            for (handle, timestamp) in sky.scheduler_mut().take_due(now) {
                sky.on_frame(handle, Some(timestamp));
            }
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(columns, rows) => self.on_resize(viewport::current(columns, rows)),
            Event::FocusLost => self.set_visibility(Visibility::Hidden),
            Event::FocusGained => self.set_visibility(Visibility::Visible),
            _ => {}
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if let Some(sky) = self.sky.as_mut() {
            sky.resize(viewport);
        }
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if let Some(sky) = self.sky.as_mut() {
            sky.set_visibility(visibility);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if self.copy.prompt().is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.copy.dismiss_prompt();
            }
            return;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Esc) if self.nav.is_expanded() => self.nav.toggle(),
            (_, KeyCode::Esc | KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('m')) => self.nav.toggle(),
            (_, KeyCode::Char('y')) => self.copy_email(),
            (_, KeyCode::Char(c @ '1'..='9')) => self.follow_link(c as usize - '1' as usize),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_by(-1),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_by(1),
            (_, KeyCode::PageUp) => self.scroll_by(-(self.body_height.max(1) as i32)),
            (_, KeyCode::PageDown) => self.scroll_by(self.body_height.max(1) as i32),
            (_, KeyCode::Home) => self.scroll = 0,
            (_, KeyCode::End) => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    /// Flip the theme; a failed save is reported but the theme still changes.
    fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(_) => self.status = None,
            Err(err) => {
                log::warn!("could not save theme preference: {err:#}");
                self.status = Some("theme not saved".to_string());
            }
        }
    }

    fn copy_email(&mut self) {
        self.copy
            .press(&self.config.profile.email, &mut self.clipboard, Instant::now());
    }

    /// Jump to a section from the menu.
    fn follow_link(&mut self, index: usize) {
        if let Some(index) = self.nav.follow(index, self.config.sections.len()) {
            if let Some(top) = self.layout.top_of(index) {
                self.scroll = top.min(self.max_scroll());
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = next as u16;
    }

    fn max_scroll(&self) -> u16 {
        self.layout.height().saturating_sub(self.body_height)
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use nightsky_core::Theme;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(config: Config) -> App {
        App::new(config, Box::new(MemoryStore::new()), Some(42), 100, 40)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["nightsky", "--reduced-motion", "--fps", "30", "--density", "3"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(config.reduced_motion);
        assert_eq!(config.fps, 30);
        assert_eq!(config.pixel_density, Some(3.0));
    }

    #[test]
    fn test_background_starts_running() {
        let app = app(Config::default());
        let sky = app.sky.as_ref().expect("sky");
        assert!(!sky.is_suspended());
        assert!(!sky.state().particles.is_empty());
    }

    #[test]
    fn test_reduced_motion_reveals_everything() {
        let app = app(Config {
            reduced_motion: true,
            ..Config::default()
        });
        let sky = app.sky.as_ref().expect("sky");
        assert!(sky.state().particles.is_empty());
        assert!(sky.state().stars.is_empty());
        assert!(!app.reveal.is_observing());
    }

    #[test]
    fn test_zero_sized_terminal_has_no_sky() {
        let app = App::new(Config::default(), Box::new(MemoryStore::new()), Some(1), 0, 0);
        assert!(app.sky.is_none());
        assert_eq!(app.next_timeout(Instant::now()), None);
    }

    #[test]
    fn test_focus_suspends_background() {
        let mut app = app(Config::default());
        app.on_event(Event::FocusLost);
        assert!(app.sky.as_ref().unwrap().is_suspended());
        assert_eq!(app.next_timeout(Instant::now()), None);

        app.on_event(Event::FocusGained);
        assert!(!app.sky.as_ref().unwrap().is_suspended());
        assert!(app.next_timeout(Instant::now()).is_some());
    }

    #[test]
    fn test_frames_advance() {
        let mut app = app(Config::default());
        let before = app.sky.as_ref().unwrap().state().particles.clone();
        app.advance(Instant::now() + Duration::from_secs(1));
        let sky = app.sky.as_ref().unwrap();
        assert_eq!(sky.surface().clear_count(), 1);
        assert_ne!(sky.state().particles, before);
    }

    #[test]
    fn test_resize_keeps_entity_counts() {
        let mut app = app(Config::default());
        let count = app.sky.as_ref().unwrap().state().particles.len();
        app.on_resize(Viewport::new(3000.0, 2000.0));
        let sky = app.sky.as_ref().unwrap();
        assert_eq!(sky.state().particles.len(), count);
        assert_eq!(sky.viewport(), Viewport::new(3000.0, 2000.0));
    }

    #[test]
    fn test_theme_toggle_key() {
        let mut app = app(Config::default());
        assert_eq!(app.theme.theme(), Theme::Dark);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.theme(), Theme::Light);
        assert_eq!(
            app.theme.store().get(nightsky_config::THEME_KEY).as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_menu_and_links() {
        let mut app = app(Config::default());
        draw(&mut app);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.nav.is_expanded());
        press(&mut app, KeyCode::Esc);
        assert!(!app.nav.is_expanded());

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('2'));
        assert!(!app.nav.is_expanded());
        let expected = app.layout.top_of(1).unwrap().min(app.max_scroll());
        assert_eq!(app.scroll, expected);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(Config::default());
        app.running = true;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_copy_empty_email_is_noop() {
        let mut config = Config::default();
        config.profile.email.clear();
        let mut app = app(config);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.copy.label(), "copy email");
        assert!(app.copy.prompt().is_none());
    }

    #[test]
    fn test_render_shows_profile_and_footer_year() {
        let mut app = app(Config::default());
        let terminal = draw(&mut app);
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Ada Example"));
        let year = chrono::Datelike::year(&chrono::Local::now()).to_string();
        assert!(text.contains(&year));
        // first section scrolls into view on the first draw
        assert!(app.reveal.is_revealed(0));
        assert!(text.contains("About"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = app(Config::default());
        draw(&mut app);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll, app.max_scroll());
        press(&mut app, KeyCode::Down);
        assert_eq!(app.scroll, app.max_scroll());
    }
}

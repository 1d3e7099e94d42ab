//! Main application state and TUI event loop for Music Timeline.
//!
//! [`App`] owns the theme, the [`TimelineSession`] and the transient UI
//! state (scroll offset, notification). Key presses are translated by
//! [`App::handle_key`] so the loop itself stays thin.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use timeline_core::models::Granularity;
use timeline_data::reader;
use timeline_data::session::TimelineSession;

use crate::themes::Theme;
use crate::timeline_view::{self, Notification, TimelineView};

// ── Action ────────────────────────────────────────────────────────────────────

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// State already updated (or key ignored); just redraw.
    Redraw,
    /// Re-read the source file.
    Reload,
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Music Timeline TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    pub session: TimelineSession,
    /// File the export was read from; `r` re-reads it.
    pub source: Option<PathBuf>,
    pub notification: Option<Notification>,
    /// Chart scroll offset in lines.
    pub scroll: u16,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, session: TimelineSession, source: Option<PathBuf>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            session,
            source,
            notification: None,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Show `notification` on the next frame.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the terminal is
    /// restored whether the loop ends normally or with an I/O error.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result: io::Result<()> = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => break Err(e),
            }

            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(e) => break Err(e),
            };

            match self.handle_key(key.code, key.modifiers) {
                Action::Quit => break Ok(()),
                Action::Reload => self.reload().await,
                Action::Redraw => {}
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply a key press to the session and UI state.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('p') | KeyCode::Tab => {
                self.session.next_playlist();
                self.scroll = 0;
                Action::Redraw
            }
            KeyCode::Char('c') => {
                self.session.cycle_filter();
                self.scroll = 0;
                Action::Redraw
            }
            KeyCode::Char('y') => {
                self.session.set_granularity(Granularity::Year);
                self.scroll = 0;
                Action::Redraw
            }
            KeyCode::Char('m') => {
                self.session.set_granularity(Granularity::Month);
                self.scroll = 0;
                Action::Redraw
            }
            KeyCode::Char('v') => {
                self.session.toggle_granularity();
                self.scroll = 0;
                Action::Redraw
            }
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::Redraw
            }
            KeyCode::Down => {
                // The last period stays on screen.
                let rows = self.session.result().timeline_data.len();
                let max = u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX);
                self.scroll = self.scroll.saturating_add(1).min(max);
                Action::Redraw
            }
            _ => Action::Redraw,
        }
    }

    /// Re-read [`Self::source`]. A failed read or parse leaves the loaded
    /// data untouched and surfaces the error as a notification.
    pub async fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            self.notify(Notification::warning("No file to reload"));
            return;
        };

        match reader::read_export(&path).await {
            Ok(export) => {
                self.session.adopt(export);
                self.scroll = 0;
                self.notify(Notification::success(format!("Reloaded {}", path.display())));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "reload failed");
                self.notify(Notification::error(e.to_string()));
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let options: Vec<String> = self
            .session
            .playlist_options()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        let Some(playlist) = self.session.selected_playlist().map(str::to_string) else {
            timeline_view::render_no_data(frame, area, self.notification.as_ref(), &self.theme);
            return;
        };
        if options.is_empty() {
            timeline_view::render_no_data(frame, area, self.notification.as_ref(), &self.theme);
            return;
        }

        let position = options
            .iter()
            .position(|name| *name == playlist)
            .map_or(0, |i| i + 1);
        let filter = self.session.filter();
        let granularity = self.session.granularity();
        let result = self.session.result();

        let view = TimelineView {
            playlist: &playlist,
            playlist_position: (position, options.len()),
            filter,
            granularity,
            result,
            notification: self.notification.as_ref(),
            scroll: self.scroll,
        };
        timeline_view::render_timeline_view(frame, area, &view, &self.theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_view::NotificationLevel;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;
    use timeline_core::models::{CategoryFilter, CategoryLabel};

    const EXPORT: &str = r#"{"playlists":[
        {"name":"2015 Mix","items":[
            {"track":{"artistName":"Big Time Rush"},"addedDate":"2015-03-01"},
            {"track":{"artistName":"Drake"},"addedDate":"2015-03-02"},
            {"track":{"artistName":"ImDontai"},"addedDate":"2016-01-01"}
        ]},
        {"name":"Road Trip","items":[
            {"track":{"artistName":"Drake"},"addedDate":"2018-07-04"}
        ]}
    ]}"#;

    fn loaded_app(source: Option<PathBuf>) -> App {
        let mut session = TimelineSession::default();
        session.upload(EXPORT).expect("upload");
        App::new("dark", session, source)
    }

    fn press(app: &mut App, c: char) -> Action {
        app.handle_key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = loaded_app(None);
        assert_eq!(press(&mut app, 'q'), Action::Quit);
        assert!(app.should_quit);

        let mut app = loaded_app(None);
        assert_eq!(app.handle_key(KeyCode::Esc, KeyModifiers::NONE), Action::Quit);

        let mut app = loaded_app(None);
        assert_eq!(
            app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        );
    }

    #[test]
    fn test_playlist_and_filter_keys() {
        let mut app = loaded_app(None);
        assert_eq!(app.session.selected_playlist(), Some("2015 Mix"));

        press(&mut app, 'p');
        assert_eq!(app.session.selected_playlist(), Some("Road Trip"));
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.session.selected_playlist(), Some("2015 Mix"));

        press(&mut app, 'c');
        assert_eq!(
            app.session.filter(),
            CategoryFilter::Only(CategoryLabel::TvSoundtrack)
        );
        assert!(!app.should_quit);
    }

    #[test]
    fn test_granularity_keys() {
        let mut app = loaded_app(None);
        press(&mut app, 'm');
        assert_eq!(app.session.granularity(), Granularity::Month);
        press(&mut app, 'y');
        assert_eq!(app.session.granularity(), Granularity::Year);
        press(&mut app, 'v');
        assert_eq!(app.session.granularity(), Granularity::Month);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut app = loaded_app(None);
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.scroll, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        }
        assert_eq!(app.scroll, 1);
        press(&mut app, 'p');
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_scroll_keeps_last_period_visible() {
        let mut app = loaded_app(None);
        press(&mut app, 'p');
        // "Road Trip" has a single period: nothing to scroll.
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.scroll, 0);

        // Back on "2015 Mix" (two periods); a stale offset cannot overflow.
        press(&mut app, 'p');
        app.scroll = u16::MAX;
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn test_scroll_without_data_stays_at_top() {
        let mut app = App::new("dark", TimelineSession::default(), None);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_reload_key_requests_reload() {
        let mut app = loaded_app(None);
        assert_eq!(press(&mut app, 'r'), Action::Reload);
    }

    #[tokio::test]
    async fn test_reload_without_source_notifies() {
        let mut app = loaded_app(None);
        app.reload().await;
        let n = app.notification.expect("notification");
        assert_eq!(n.level, NotificationLevel::Warning);
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"{"playlists":[{"name":"Fresh","items":[
                {"track":{"artistName":"Drake"},"addedDate":"2020-01-01"}]}]}"#,
        )
        .unwrap();

        let mut app = loaded_app(Some(path));
        app.reload().await;
        assert_eq!(app.session.selected_playlist(), Some("Fresh"));
        assert_eq!(app.session.result().stats.total, 1);
        assert_eq!(
            app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Success)
        );
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut app = loaded_app(Some(path));
        app.reload().await;
        assert_eq!(app.session.selected_playlist(), Some("2015 Mix"));
        assert_eq!(app.session.result().stats.total, 3);
        let n = app.notification.expect("notification");
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.message.contains("Error parsing JSON file"));
    }

    #[test]
    fn test_render_with_and_without_data() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let mut empty = App::new("classic", TimelineSession::default(), None);
        terminal.draw(|frame| empty.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("LOAD YOUR PLAYLIST!"));

        let mut app = loaded_app(None);
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Playlist 1/2"));
        assert!(text.contains("2015 Mix"));
    }
}

//! Dashboard view: header, stat tiles, top artists, stacked timeline chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use timeline_core::formatting::{format_count, songs_label};
use timeline_core::models::{CategoryFilter, Granularity};
use timeline_data::aggregator::{AggregationResult, ArtistCount};

use crate::components::header::Header;
use crate::components::stacked_bar::{legend_line, StackedBar};
use crate::components::stat_tiles::StatTiles;
use crate::components::truncate_to_width;
use crate::themes::Theme;

/// Columns reserved for the period label in front of each bar.
const PERIOD_LABEL_WIDTH: usize = 10;

/// Columns reserved after each bar for the period total.
const TOTAL_SUFFIX_WIDTH: u16 = 7;

// ── Notifications ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A one-line message shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    fn to_line<'a>(&'a self, theme: &Theme) -> Line<'a> {
        let style = match self.level {
            NotificationLevel::Success => theme.success,
            NotificationLevel::Warning => theme.warning,
            NotificationLevel::Error => theme.error,
        };
        Line::from(Span::styled(self.message.as_str(), style))
    }
}

// ── View data ─────────────────────────────────────────────────────────────────

/// Everything needed to draw one dashboard frame.
pub struct TimelineView<'a> {
    pub playlist: &'a str,
    /// 1-based position of the playlist among those with items, and their count.
    pub playlist_position: (usize, usize),
    pub filter: CategoryFilter,
    pub granularity: Granularity,
    pub result: &'a AggregationResult,
    pub notification: Option<&'a Notification>,
    /// Lines scrolled off the top of the chart.
    pub scroll: u16,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the full dashboard into `area`.
pub fn render_timeline_view(frame: &mut Frame, area: Rect, view: &TimelineView, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .split(area);

    let header = Header::new(view.playlist, view.filter, view.granularity, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    let summary = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let tiles = StatTiles::new(&view.result.stats, theme);
    frame.render_widget(
        Paragraph::new(Text::from(tiles.to_lines())).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    " Playlist {}/{} ",
                    view.playlist_position.0, view.playlist_position.1
                )),
        ),
        summary[0],
    );

    render_top_artists(frame, summary[1], &view.result.stats.top_artists, theme);
    render_chart(frame, chunks[2], view, theme);
    render_footer(frame, chunks[3], view.notification, theme);
}

/// Stacked bar chart, one bar per period, preceded by a colour legend.
pub fn render_chart(frame: &mut Frame, area: Rect, view: &TimelineView, theme: &Theme) {
    let result = view.result;
    let scale_max = result.max_period_total();
    let bar_width = area
        .width
        .saturating_sub(2 + PERIOD_LABEL_WIDTH as u16 + 1 + TOTAL_SUFFIX_WIDTH)
        .max(1);

    let mut lines = vec![legend_line(theme), Line::from("")];
    if result.timeline_data.is_empty() {
        lines.push(Line::from(Span::styled(
            "No songs match the current filter",
            theme.dim,
        )));
    } else {
        lines.extend(result.timeline_data.iter().map(|row| {
            let mut bar = StackedBar::new(row, scale_max, theme).with_width(bar_width);
            bar.label_width = PERIOD_LABEL_WIDTH;
            bar.to_line()
        }));
    }

    let title = format!(
        " Your Music Journey · by {} · {} ",
        view.granularity.label(),
        songs_label(result.stats.total)
    );
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((view.scroll, 0))
            .style(theme.text),
        area,
    );
}

/// Ranked table of the most frequent artists.
pub fn render_top_artists(frame: &mut Frame, area: Rect, artists: &[ArtistCount], theme: &Theme) {
    let header = Row::new(
        ["#", "Artist", "Songs"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let name_width = area.width.saturating_sub(2 + 4 + 8) as usize;
    let rows: Vec<Row> = artists
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let style = match i {
                0 => theme.table_highlight,
                i if i % 2 == 0 => theme.table_row,
                _ => theme.table_row_alt,
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate_to_width(&a.artist, name_width)),
                Cell::from(format_count(a.count)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(7),
    ];

    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(" Top Artists "))
            .style(theme.text),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, notification: Option<&Notification>, theme: &Theme) {
    let keys = [
        ("p", "playlist"),
        ("c", "category"),
        ("y/m/v", "year/month"),
        ("r", "reload"),
        ("↑/↓", "scroll"),
        ("q", "quit"),
    ];
    let mut help = Vec::with_capacity(keys.len() * 2);
    for (key, action) in keys {
        help.push(Span::styled(format!("[{}]", key), theme.info));
        help.push(Span::styled(format!(" {}  ", action), theme.dim));
    }
    let mut lines = vec![Line::from(help)];
    if let Some(n) = notification {
        lines.push(n.to_line(theme));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Load prompt shown when no export is loaded or no playlist has items.
pub fn render_no_data(
    frame: &mut Frame,
    area: Rect,
    notification: Option<&Notification>,
    theme: &Theme,
) {
    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled("LOAD YOUR PLAYLIST!", theme.header)),
        Line::from(""),
        Line::from(Span::styled(
            "Run `music-timeline <export.json>` with a playlist export,",
            theme.text,
        )),
        Line::from(Span::styled(
            "or press 'r' to reload the file after fixing it.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    if let Some(n) = notification {
        text.push(Line::from(""));
        text.push(n.to_line(theme));
    }
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Music Timeline "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

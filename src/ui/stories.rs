//! Story card rendering.
//!
//! Displays each story as a topic heading followed by one row block per
//! article: source badge, headline, summary, date and a vertical bias slider.

use crate::app::{App, LoadState};
use crate::bias::{bias_color, bias_label, slider_row};
use crate::news::Article;
use crate::sources::source_badge;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Lines per article block (last line carries the bias label).
pub const ARTICLE_HEIGHT: u16 = 4;
/// Lines per topic heading (topic + rule).
pub const TOPIC_HEIGHT: u16 = 2;

const SLIDER_WIDTH: usize = 14;
const TRACK_HEIGHT: u16 = ARTICLE_HEIGHT - 1;
const GUTTER_WIDTH: usize = 2;

const MUTED: Color = Color::Rgb(161, 161, 170);
const DIM: Color = Color::Rgb(113, 113, 122);
const TRACK: Color = Color::Rgb(82, 82, 91);

/// One entry of the scrollable story list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Heading of a story
    Topic { story: usize },
    /// Article block; `index` is the flat selection index
    Article {
        index: usize,
        story: usize,
        article: usize,
    },
}

impl Row {
    fn height(self) -> u16 {
        match self {
            Row::Topic { .. } => TOPIC_HEIGHT,
            Row::Article { .. } => ARTICLE_HEIGHT,
        }
    }
}

fn rows(app: &App) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut index = 0;
    for (story_idx, story) in app.stories.iter().enumerate() {
        rows.push(Row::Topic { story: story_idx });
        for article_idx in 0..story.articles.len() {
            rows.push(Row::Article {
                index,
                story: story_idx,
                article: article_idx,
            });
            index += 1;
        }
    }
    rows
}

/// Rows visible in a viewport, with their top line offset.
///
/// # Arguments
/// * `app` - Application state
/// * `height` - Viewport height in lines
///
/// # Returns
/// * `Vec<(Row, u16)>` - Visible rows in display order
///
/// # Details
/// Keeps the selected article near the middle of the viewport without
/// leaving blank space below the last story.
pub fn visible_rows(app: &App, height: u16) -> Vec<(Row, u16)> {
    let rows = rows(app);
    if rows.is_empty() || height == 0 {
        return Vec::new();
    }

    let selected_row = rows
        .iter()
        .position(|row| matches!(row, Row::Article { index, .. } if *index == app.selected_index))
        .unwrap_or(0);

    let budget = height / 2;
    let mut start = selected_row;
    let mut above = 0u16;
    while start > 0 && above + rows[start - 1].height() <= budget {
        start -= 1;
        above += rows[start].height();
    }

    let mut tail_start = rows.len();
    let mut tail = 0u16;
    while tail_start > 0 && tail + rows[tail_start - 1].height() <= height {
        tail_start -= 1;
        tail += rows[tail_start].height();
    }
    let start = start.min(tail_start);

    let mut visible = Vec::new();
    let mut y = 0u16;
    for row in &rows[start..] {
        if y >= height {
            break;
        }
        visible.push((*row, y));
        y = y.saturating_add(row.height());
    }
    visible
}

/// Find the article under a line of the story list.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area the story list was rendered in (including borders)
/// * `column` - Terminal column of the click
/// * `row` - Terminal row of the click
///
/// # Returns
/// * `Option<usize>` - Flat index of the article, if the click hit one
pub fn article_at(app: &App, area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    let line = row - inner.y;
    visible_rows(app, inner.height)
        .into_iter()
        .find_map(|(entry, top)| match entry {
            Row::Article { index, .. } if line >= top && line < top + ARTICLE_HEIGHT => Some(index),
            _ => None,
        })
}

/// Render the story list widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Before the first result arrives, or when a fetch fails with nothing
/// to show, a centred message replaces the list.
pub fn render_stories(app: &App, area: Rect, buf: &mut Buffer) {
    let title = format!("Stories ({}/{})", app.stories.len(), app.fetched_count);
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    block.render(area, buf);

    if app.stories.is_empty() {
        let lines = placeholder_lines(&app.load_state);
        let top = inner.height.saturating_sub(lines.len() as u16) / 2;
        let message_area = Rect {
            y: inner.y + top,
            height: inner.height - top,
            ..inner
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(message_area, buf);
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (row, _) in visible_rows(app, inner.height) {
        match row {
            Row::Topic { story } => {
                let topic = &app.stories[story].topic;
                lines.push(Line::from(Span::styled(
                    fit(topic, width),
                    Style::default()
                        .fg(Color::Rgb(228, 228, 231))
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Row::Article {
                index,
                story,
                article,
            } => {
                let article = &app.stories[story].articles[article];
                lines.extend(article_lines(article, index == app.selected_index, width));
            }
        }
    }

    Paragraph::new(lines).render(inner, buf);
}

fn placeholder_lines(state: &LoadState) -> Vec<Line<'static>> {
    match state {
        LoadState::Loading => vec![Line::from(Span::styled(
            "Loading stories…",
            Style::default().fg(MUTED),
        ))],
        LoadState::Loaded => vec![Line::from(Span::styled(
            "No stories are covered by more than one source yet.",
            Style::default().fg(MUTED),
        ))],
        LoadState::Failed {
            message,
            backend_healthy,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Could not load stories",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(message.clone(), Style::default().fg(MUTED))),
            ];
            match backend_healthy {
                Some(true) => lines.push(Line::from(Span::styled(
                    "The backend is up, but its stories endpoint failed.",
                    Style::default().fg(DIM),
                ))),
                Some(false) => lines.push(Line::from(Span::styled(
                    "The backend is not responding.",
                    Style::default().fg(DIM),
                ))),
                None => {}
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press 'r' to retry",
                Style::default().fg(Color::Yellow),
            )));
            lines
        }
    }
}

/// Build the lines of one article block.
///
/// Line 1: badge and headline. Line 2: summary. Line 3: date.
/// Line 4: blank text column. The right column holds the slider track
/// on lines 1-3 and the bias label on line 4.
fn article_lines(article: &Article, is_selected: bool, width: usize) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(SLIDER_WIDTH + GUTTER_WIDTH);
    let badge = source_badge(&article.source);
    let badge_text = format!(" {} ", badge.label);
    let badge_width = badge_text.chars().count();
    let indent = " ".repeat(badge_width + 1);
    let body_width = text_width.saturating_sub(badge_width + 1);

    let gutter = if is_selected {
        Span::styled("▌ ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("  ")
    };
    let headline_style = Style::default()
        .fg(if is_selected {
            Color::Yellow
        } else {
            Color::White
        })
        .add_modifier(Modifier::BOLD);

    let summary = article.display_summary().unwrap_or_default();
    let slider = slider_column(article.bias_score);

    let mut lines = Vec::with_capacity(ARTICLE_HEIGHT as usize);
    let mut headline_spans = vec![gutter.clone()];
    if badge_width < text_width {
        headline_spans.push(Span::styled(badge_text, badge.style()));
        headline_spans.push(Span::raw(" "));
        headline_spans.push(Span::styled(fit(&article.headline, body_width), headline_style));
    } else {
        headline_spans.push(Span::styled(fit(&article.headline, text_width), headline_style));
    }
    headline_spans.push(slider[0].clone());
    lines.push(Line::from(headline_spans));

    let body = [
        (summary, Style::default().fg(MUTED)),
        (article.format_published(), Style::default().fg(DIM)),
        (String::new(), Style::default()),
    ];
    for (i, (text, style)) in body.into_iter().enumerate() {
        let text = if badge_width < text_width {
            format!("{}{}", indent, fit(&text, body_width))
        } else {
            fit(&text, text_width)
        };
        lines.push(Line::from(vec![
            gutter.clone(),
            Span::styled(fit(&text, text_width), style),
            slider[i + 1].clone(),
        ]));
    }

    let base_style = if is_selected {
        Style::default().bg(Color::Rgb(39, 39, 42))
    } else {
        Style::default()
    };
    lines.into_iter().map(|line| line.style(base_style)).collect()
}

/// Right column spans: track rows with the marker, then the label.
fn slider_column(score: f64) -> Vec<Span<'static>> {
    let marker_row = slider_row(score, TRACK_HEIGHT);
    let mut column: Vec<Span> = (0..TRACK_HEIGHT)
        .map(|row| {
            if Some(row) == marker_row {
                Span::styled(
                    centre("▬", SLIDER_WIDTH),
                    Style::default().fg(bias_color(score)),
                )
            } else {
                Span::styled(centre("│", SLIDER_WIDTH), Style::default().fg(TRACK))
            }
        })
        .collect();
    column.push(Span::styled(
        centre(bias_label(score), SLIDER_WIDTH),
        Style::default().fg(MUTED),
    ));
    column
}

/// Truncate or pad text to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{}{}", text, " ".repeat(width - count));
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn centre(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        return fit(text, width);
    }
    let left = (width - count) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - count - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::models::{test_article, test_story};
    use crate::news::Story;
    use crate::sources::FALLBACK_BG;

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        render_stories(app, area, &mut buf);
        buf
    }

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn find_text(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let chars: Vec<char> = needle.chars().collect();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width.saturating_sub(chars.len() as u16 - 1) {
                let matches = chars.iter().enumerate().all(|(i, c)| {
                    buf[(x + i as u16, y)].symbol() == c.to_string()
                });
                if matches {
                    return Some((x, y));
                }
            }
        }
        None
    }

    fn text(buf: &Buffer) -> String {
        buffer_lines(buf).join("\n")
    }

    #[test]
    fn test_fit_and_centre() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(centre("│", 5), "  │  ");
    }

    #[test]
    fn test_loading_shows_indicator_only() {
        let app = App::new();
        let buf = render(&app, 80, 20);
        let screen = text(&buf);
        assert!(screen.contains("Loading stories…"));
        assert!(!screen.contains("Topic"));
    }

    #[test]
    fn test_loaded_empty_hides_indicator() {
        let mut app = App::new();
        app.set_stories(vec![test_story("solo", 1)]);
        let buf = render(&app, 80, 20);
        let screen = text(&buf);
        assert!(!screen.contains("Loading stories"));
        assert!(!screen.contains("Topic solo"));
        assert!(screen.contains("Stories (0/1)"));
    }

    #[test]
    fn test_failure_shows_retry_hint() {
        let mut app = App::new();
        app.load_state = LoadState::Failed {
            message: "network error: connection refused".to_string(),
            backend_healthy: Some(false),
        };
        let screen = text(&render(&app, 80, 20));
        assert!(screen.contains("Could not load stories"));
        assert!(screen.contains("Press 'r' to retry"));
        assert!(screen.contains("not responding"));
        assert!(!screen.contains("Loading stories"));
    }

    #[test]
    fn test_only_comparable_story_rendered() {
        let mut app = App::new();
        app.set_stories(vec![test_story("solo", 1), test_story("pair", 2)]);
        let screen = text(&render(&app, 100, 30));
        assert!(screen.contains("Topic pair"));
        assert!(!screen.contains("Topic solo"));
        assert!(screen.contains("Headline pair-0"));
        assert!(screen.contains("Headline pair-1"));
    }

    #[test]
    fn test_unknown_source_badge() {
        let mut story = test_story("s", 2);
        story.articles[1] = test_article("wire", "unknownwire", 0.0);
        let mut app = App::new();
        app.set_stories(vec![story]);
        let buf = render(&app, 100, 30);
        let (x, y) = find_text(&buf, "unknownwire").expect("badge rendered");
        assert_eq!(buf[(x, y)].bg, FALLBACK_BG);
        let (bx, by) = find_text(&buf, "BBC").expect("known badge rendered");
        assert_ne!(buf[(bx, by)].bg, FALLBACK_BG);
    }

    #[test]
    fn test_summary_markup_stripped() {
        let mut story = test_story("s", 2);
        story.articles[0].summary = "<b>Breaking</b> news".to_string();
        let mut app = App::new();
        app.set_stories(vec![story]);
        let screen = text(&render(&app, 100, 30));
        assert!(screen.contains("Breaking news"));
        assert!(!screen.contains('<'));
    }

    #[test]
    fn test_bias_label_and_marker() {
        let story = Story {
            story_id: "s".to_string(),
            topic: "Spectrum".to_string(),
            articles: vec![test_article("l", "guardian", -1.0), test_article("r", "metro", 1.0)],
        };
        let mut app = App::new();
        app.set_stories(vec![story]);
        let buf = render(&app, 100, 30);
        let screen = text(&buf);
        assert!(screen.contains("Left"));
        assert!(screen.contains("Right"));

        // Rightmost score puts the marker on the top track row of its block
        let (_, headline_y) = find_text(&buf, "Headline r").unwrap();
        let (_, marker_y) = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() == "▬" && y >= headline_y)
            .min_by_key(|&(_, y)| y)
            .unwrap();
        assert_eq!(marker_y, headline_y);
    }

    #[test]
    fn test_visible_rows_follow_selection() {
        let mut app = App::new();
        app.set_stories((0..10).map(|i| test_story(&format!("s{}", i), 2)).collect());
        app.select_last();
        let visible = visible_rows(&app, 20);
        assert!(visible.iter().any(|(row, _)| matches!(
            row,
            Row::Article { index, .. } if *index == 19
        )));
        assert!(visible.iter().all(|(_, top)| *top < 20));
    }

    #[test]
    fn test_article_at_maps_click() {
        let mut app = App::new();
        app.set_stories(vec![test_story("a", 2)]);
        let area = Rect::new(0, 0, 80, 30);
        // border (1) + topic heading (2) puts the first article on rows 3..7
        assert_eq!(article_at(&app, area, 5, 3), Some(0));
        assert_eq!(article_at(&app, area, 5, 6), Some(0));
        assert_eq!(article_at(&app, area, 5, 7), Some(1));
        assert_eq!(article_at(&app, area, 5, 1), None);
        assert_eq!(article_at(&app, area, 0, 3), None);
    }
}

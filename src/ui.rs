use std::ops::Range;

use ratatui::prelude::*;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::app::{App, Mode};
use crate::text_layout::{cursor_line_col, wrap_text};
use crate::theme::Theme;
use crate::transcript::{Role, TranscriptLine};

const MAX_INPUT_TEXT_LINES: u16 = 5;
const TEXT_PADDING: u16 = 1;
const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

struct ScreenAreas {
    header: Rect,
    body: Rect,
    input: Option<Rect>,
    input_scroll: u16,
    status: Rect,
}

fn screen_areas(screen: Rect, app: &App) -> ScreenAreas {
    let [header, middle, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(screen);

    if *app.mode() == Mode::Explorer || middle.height < 2 {
        return ScreenAreas {
            header,
            body: middle,
            input: None,
            input_scroll: 0,
            status,
        };
    }

    let text_width = middle.width.saturating_sub(TEXT_PADDING * 2).max(1);
    let input_lines = wrap_text(app.input(), text_width).len() as u16;
    let (cursor_line, _) = cursor_line_col(app.input(), app.cursor(), text_width);
    let max_input_height = middle.height.saturating_sub(1).max(1);
    let (input_height, input_scroll) =
        input_box_metrics(input_lines, cursor_line, max_input_height);
    let [body, input] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(input_height)]).areas(middle);
    ScreenAreas {
        header,
        body,
        input: Some(input),
        input_scroll,
        status,
    }
}

/// Largest scroll-back offset that still leaves the transcript area full.
pub fn transcript_max_scroll(screen: Rect, app: &App) -> u16 {
    let areas = screen_areas(screen, app);
    let width = areas.body.width.saturating_sub(TEXT_PADDING * 2).max(1);
    let visible = usize::from(areas.body.height.saturating_sub(TEXT_PADDING * 2));
    let total = app.transcript().lines(width).len();
    to_u16(total.saturating_sub(visible))
}

/// Rows of the wrapped transcript to show when `scroll_back` rows above the bottom.
fn transcript_window(total: usize, visible: usize, scroll_back: u16) -> Range<usize> {
    let max_scroll = total.saturating_sub(visible);
    let end = total - usize::from(scroll_back).min(max_scroll);
    end.saturating_sub(visible)..end
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let screen = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        screen,
    );
    let areas = screen_areas(screen, app);

    render_header(frame, areas.header, app, theme);
    if *app.mode() == Mode::Explorer {
        render_explorer(frame, areas.body, app, theme);
    } else {
        render_transcript(frame, areas.body, app, theme);
    }
    if let Some(input_area) = areas.input {
        render_input(frame, input_area, areas.input_scroll, app, theme);
    }
    frame.render_widget(
        Paragraph::new(status_line(app, theme)).style(Style::default().bg(theme.background)),
        areas.status,
    );
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = if *app.mode() == Mode::Explorer {
        Line::from(vec![
            Span::styled(
                "File Explorer",
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                app.current_path().display().to_string(),
                Style::default().fg(theme.border_fg),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "ANX Agent",
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ))
    };
    frame.render_widget(Paragraph::new(title), area);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let width = area.width.saturating_sub(TEXT_PADDING * 2).max(1);
    let visible = usize::from(area.height.saturating_sub(TEXT_PADDING * 2));
    let lines = app.transcript().lines(width);
    let window = transcript_window(lines.len(), visible, app.scroll_back());
    frame.render_widget(
        Paragraph::new(transcript_text(&lines[window], theme))
            .style(Style::default().fg(theme.text_fg))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.background))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        area,
    );
}

fn transcript_text(lines: &[TranscriptLine], theme: &Theme) -> Text<'static> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_spacer {
            out.push(Line::default());
            continue;
        }
        let color = role_color(line.role, theme);
        let body_style = match line.role {
            Role::Info | Role::Error => Style::default().fg(color),
            Role::User | Role::Assistant => Style::default().fg(theme.text_fg),
        };
        match line.label {
            Some(label) => out.push(Line::from(vec![
                Span::styled(
                    label.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(line.body.clone(), body_style),
            ])),
            None => out.push(Line::from(Span::styled(line.body.clone(), body_style))),
        }
    }
    Text::from(out)
}

fn role_color(role: Role, theme: &Theme) -> Color {
    match role {
        Role::User => theme.user_fg,
        Role::Assistant => theme.assistant_fg,
        Role::Info => theme.info_fg,
        Role::Error => theme.error_fg,
    }
}

fn render_explorer(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let explorer = app.explorer();
    let visible = area.height.saturating_sub(TEXT_PADDING * 2).max(1) as usize;
    let offset = explorer.selected_index().saturating_sub(visible - 1);

    let lines = explorer
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, entry)| {
            let selected = idx == explorer.selected_index();
            let marker = if selected { "> " } else { "  " };
            let name = if entry.is_dir && !entry.is_parent() {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let style = if selected {
                Style::default()
                    .fg(theme.selection_fg)
                    .add_modifier(Modifier::BOLD)
            } else if entry.is_dir {
                Style::default().fg(theme.user_fg)
            } else {
                Style::default().fg(theme.text_fg)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.selection_fg)),
                Span::styled(name, style),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .style(Style::default().bg(theme.background))
                .padding(Padding::uniform(TEXT_PADDING)),
        ),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, input_scroll: u16, app: &App, theme: &Theme) {
    let text_width = area.width.saturating_sub(TEXT_PADDING * 2).max(1);
    let block = Block::default()
        .style(Style::default().bg(theme.input_bg))
        .padding(Padding::uniform(TEXT_PADDING));

    let paragraph = if app.input().is_empty() {
        Paragraph::new(Span::styled(
            app.mode().placeholder(),
            Style::default()
                .fg(theme.status_fg)
                .add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(wrap_text(app.input(), text_width).join("\n"))
            .style(Style::default().fg(theme.text_fg))
            .scroll((input_scroll, 0))
    };
    frame.render_widget(paragraph.block(block), area);

    if app.is_pending() {
        return;
    }
    let inner = area.inner(Margin {
        horizontal: TEXT_PADDING,
        vertical: TEXT_PADDING,
    });
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let (cursor_line, cursor_col) = cursor_line_col(app.input(), app.cursor(), text_width);
    let visible_line = cursor_line.saturating_sub(input_scroll);
    if visible_line < inner.height {
        frame.set_cursor_position((
            inner
                .x
                .saturating_add(cursor_col.min(inner.width.saturating_sub(1))),
            inner.y.saturating_add(visible_line),
        ));
    }
}

fn status_line(app: &App, theme: &Theme) -> Line<'static> {
    if app.is_pending() {
        return Line::from(vec![
            Span::styled(
                spinner_frame(app.ticks).to_string(),
                Style::default().fg(theme.spinner_fg),
            ),
            Span::styled(" Processing...", Style::default().fg(theme.status_fg)),
        ]);
    }
    Line::from(Span::styled(
        app.mode().status_hint(),
        Style::default().fg(theme.status_fg),
    ))
}

fn spinner_frame(ticks: u64) -> &'static str {
    SPINNER_FRAMES[(ticks as usize) % SPINNER_FRAMES.len()]
}

fn input_box_metrics(input_text_lines: u16, cursor_line: u16, max_input_height: u16) -> (u16, u16) {
    let capped_text_lines = input_text_lines.clamp(1, MAX_INPUT_TEXT_LINES);
    let desired_height = capped_text_lines.saturating_add(TEXT_PADDING * 2);
    let input_height = desired_height.clamp(1, max_input_height.max(1));
    let visible_text_lines = input_height.saturating_sub(TEXT_PADDING * 2).max(1);
    let max_scroll = input_text_lines.saturating_sub(visible_text_lines);
    let input_scroll = cursor_line
        .saturating_sub(visible_text_lines.saturating_sub(1))
        .min(max_scroll);
    (input_height, input_scroll)
}

#[cfg(test)]
#[path = "../tests/unit/ui_tests.rs"]
mod tests;

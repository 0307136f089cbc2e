//! Rendering of the cheatsheet.
//!
//! [`draw`] paints the interactive screen with ratatui; [`render_text`]
//! produces the plain-text form used by `--print`. Both lay sections out the
//! same way, so [`section_offsets`] is valid for either.
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::dataset::Command;
use crate::filter::{match_count, FilteredCategory};
use crate::theme::{accent_color, Palette, Theme};

pub const TITLE: &str = "Git Commands Cheatsheet";
pub const SUBTITLE: &str = "Fast, searchable, dark terminal style";
pub const PLACEHOLDER: &str = "Search (/, cmd, desc, or category)";

const HEADER_HEIGHT: u16 = 4;
const SEARCH_HEIGHT: u16 = 3;
const NAV_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;
const SEARCH_PREFIX: &str = "⌕ ";

/// Rows left for the results pane's content on a terminal `rows` tall.
pub fn results_height(rows: u16, show_footer: bool) -> usize {
    let footer = if show_footer { FOOTER_HEIGHT } else { 0 };
    // The results block has a top and a bottom border.
    let chrome = HEADER_HEIGHT + SEARCH_HEIGHT + NAV_HEIGHT + footer + 2;
    rows.saturating_sub(chrome) as usize
}

/// The slice of the search text that fits in `width` columns, and the cursor
/// column inside it. The text scrolls sideways so the cursor stays visible.
pub fn search_window(raw: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<(char, usize)> = raw
        .chars()
        .map(|c| (c, UnicodeWidthChar::width(c).unwrap_or(0)))
        .collect();
    let cursor_col: usize = chars.iter().take(cursor).map(|(_, w)| w).sum();

    // The cursor cell itself must fit, hence the last column is reserved.
    let mut start = 0;
    let mut skipped = 0;
    while cursor_col - skipped >= width && start < chars.len() {
        skipped += chars[start].1;
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for (c, w) in &chars[start..] {
        if used + w > width {
            break;
        }
        visible.push(*c);
        used += w;
    }
    (visible, cursor_col - skipped)
}

/// The message shown when a non-empty query matches nothing.
pub fn no_matches_message(query: &str) -> String {
    format!("No commands match \"{}\"", query)
}

fn command_lines(command: &Command) -> usize {
    if command.example.is_some() {
        2
    } else {
        1
    }
}

fn section_len(category: &FilteredCategory<'_>) -> usize {
    // header + commands + blank separator
    1 + category.commands.iter().map(|c| command_lines(c)).sum::<usize>() + 1
}

/// First line of every visible section, keyed by category name.
pub fn section_offsets<'a>(view: &[FilteredCategory<'a>]) -> Vec<(&'a str, usize)> {
    let mut offset = 0;
    view.iter()
        .map(|category| {
            let start = offset;
            offset += section_len(category);
            (category.name(), start)
        })
        .collect()
}

/// Total number of lines the results take.
pub fn line_count(view: &[FilteredCategory<'_>]) -> usize {
    view.iter().map(section_len).sum()
}

fn cmd_width(category: &FilteredCategory<'_>) -> usize {
    category
        .commands
        .iter()
        .map(|c| c.cmd.chars().count())
        .max()
        .unwrap_or(0)
}

/// Plain-text rendering of a view.
pub fn render_text(view: &[FilteredCategory<'_>], query: &str) -> String {
    if view.is_empty() {
        return format!("{}\n", no_matches_message(query));
    }

    let mut output = String::new();
    for category in view {
        let width = cmd_width(category);
        output.push_str(&format!("{} #{}\n", category.name(), category.category.anchor()));
        for command in &category.commands {
            output.push_str(&format!("  {:<width$}  {}\n", command.cmd, command.desc, width = width));
            if let Some(example) = &command.example {
                output.push_str(&format!("    $ {}\n", example));
            }
        }
        output.push('\n');
    }
    output
}

fn result_lines(view: &[FilteredCategory<'_>], palette: &Palette) -> Vec<Spans<'static>> {
    let mut lines = Vec::with_capacity(line_count(view));
    for category in view {
        let width = cmd_width(category);
        lines.push(Spans::from(vec![
            Span::styled("● ", Style::default().fg(accent_color(category.category.accent))),
            Span::styled(
                category.name().to_string(),
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  #{}", category.category.anchor()),
                Style::default().fg(palette.muted),
            ),
        ]));
        for command in &category.commands {
            lines.push(Spans::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{:<width$}", command.cmd, width = width),
                    Style::default().fg(palette.primary),
                ),
                Span::raw("  "),
                Span::styled(command.desc.clone(), Style::default().fg(palette.muted)),
            ]));
            if let Some(example) = &command.example {
                lines.push(Spans::from(Span::styled(
                    format!("    $ {}", example),
                    Style::default().fg(palette.foreground),
                )));
            }
        }
        lines.push(Spans::from(""));
    }
    lines
}

/// Draws the whole screen.
pub fn draw<B: Backend>(f: &mut Frame<B>, app: &App<'_>) {
    let palette = app.theme().palette();
    let area = f.size();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    let mut constraints = vec![
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(SEARCH_HEIGHT),
        Constraint::Length(NAV_HEIGHT),
        Constraint::Min(3),
    ];
    if app.show_footer() {
        constraints.push(Constraint::Length(FOOTER_HEIGHT));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let view = app.visible();
    draw_header(f, chunks[0], app, &view, &palette);
    draw_search(f, chunks[1], app, &palette);
    draw_nav(f, chunks[2], app, &view, &palette);
    draw_results(f, chunks[3], app, &view, &palette);
    if app.show_footer() {
        draw_footer(f, chunks[4], app, &palette);
    }
}

fn draw_header<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    app: &App<'_>,
    view: &[FilteredCategory<'_>],
    palette: &Palette,
) {
    // The toggle label names the mode it switches to.
    let mode = match app.theme().theme() {
        Theme::Dark => "☀ Light mode",
        Theme::Light => "☾ Dark mode",
    };
    let toggle = format!("[{}] {}  [{}] quit", app.toggle_hint(), mode, app.quit_hint());
    let mut subtitle = vec![Span::styled(SUBTITLE, Style::default().fg(palette.muted))];
    if !app.search().query().trim().is_empty() {
        subtitle.push(Span::styled(
            format!(" · {} matches", match_count(view)),
            Style::default().fg(palette.highlight),
        ));
    }
    let text = vec![
        Spans::from(vec![
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled(toggle, Style::default().fg(palette.muted)),
        ]),
        Spans::from(subtitle),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_search<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App<'_>, palette: &Palette) {
    let search = app.search();
    let border = if search.is_focused() {
        palette.highlight
    } else {
        palette.border
    };
    let prefix_width = UnicodeWidthStr::width(SEARCH_PREFIX);
    let text_width = usize::from(area.width.saturating_sub(2)).saturating_sub(prefix_width);
    let (visible, cursor_col) = search_window(search.raw(), search.cursor(), text_width);
    let content = if search.raw().is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(palette.muted))
    } else {
        Span::styled(visible, Style::default().fg(palette.foreground))
    };
    let line = Spans::from(vec![
        Span::styled(SEARCH_PREFIX, Style::default().fg(palette.muted)),
        content,
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(Style::default().fg(border));
    f.render_widget(Paragraph::new(line).block(block), area);

    if search.is_focused() {
        let offset = u16::try_from(prefix_width + cursor_col).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        f.set_cursor(x, area.y.saturating_add(1));
    }
}

fn draw_nav<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    app: &App<'_>,
    view: &[FilteredCategory<'_>],
    palette: &Palette,
) {
    let mut spans = vec![Span::raw(" ")];
    for (index, category) in app.dataset().iter().enumerate() {
        let shown = view.iter().any(|c| c.name() == category.name);
        let color = if shown { palette.foreground } else { palette.muted };
        if index < 9 {
            spans.push(Span::styled(
                format!("{} ", index + 1),
                Style::default().fg(palette.muted),
            ));
        }
        spans.push(Span::styled(category.name.clone(), Style::default().fg(color)));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Spans::from(spans)), area);
}

fn draw_results<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    app: &App<'_>,
    view: &[FilteredCategory<'_>],
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.card));

    if view.is_empty() {
        let message = Paragraph::new(no_matches_message(app.search().query()))
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(message, area);
        return;
    }

    let scroll = u16::try_from(app.scroll()).unwrap_or(u16::MAX);
    let results = Paragraph::new(result_lines(view, palette))
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(results, area);
}

fn draw_footer<B: Backend>(f: &mut Frame<B>, area: Rect, app: &App<'_>, palette: &Palette) {
    let tip = format!("Tip: Press {} to focus search.", app.focus_hint());
    let footer = Paragraph::new(tip)
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

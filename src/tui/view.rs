//! Screen rendering

use crate::preset::Preset;
use crate::tui::state::{AddOptionFocus, App, View};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

const ACCENT: Color = Color::Green;
const CURSOR: &str = "█";

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    match app.view {
        View::Url => render_url(f, app, chunks[0]),
        View::Presets => render_presets(f, app, chunks[0]),
        View::EditPreset => render_edit(f, app, chunks[0]),
        View::AddOption => render_add_option(f, app, chunks[0]),
        View::NewPreset => render_new_preset(f, app, chunks[0]),
    }

    render_footer(f, app, chunks[1]);
}

fn render_url(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let input = Paragraph::new(format!("{}{}", app.url_input, CURSOR)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" URL ")
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(input, chunks[0]);

    let mut lines = Vec::new();
    if !app.current_url.is_empty() {
        if crate::utils::is_http_url(&app.current_url) {
            lines.push(Line::from(Span::styled(
                format!("✓ Current URL: {}", app.current_url),
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("✗ Invalid URL: {}", app.current_url),
                Style::default().fg(Color::Red),
            )));
        }
    }
    if !app.url_history.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} downloads in history (↑/↓ to recall)", app.url_history.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);
}

fn preset_item(preset: &Preset) -> ListItem<'_> {
    let mark = if preset.active { "✓ " } else { "  " };
    let summary = if preset.options.is_empty() {
        "No options configured".to_string()
    } else {
        format!(
            "{} options ({} active)",
            preset.options.len(),
            preset.enabled_count()
        )
    };
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{mark}{}", preset.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(summary, Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_presets(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app.presets.presets().iter().map(preset_item).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Presets "))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.preset_list);
}

fn render_edit(f: &mut Frame, app: &mut App, area: Rect) {
    let title = app
        .presets
        .get(app.edit_index)
        .map(|p| format!(" {} ", p.name))
        .unwrap_or_else(|| " Preset ".to_string());

    let items: Vec<ListItem> = app
        .presets
        .get(app.edit_index)
        .map(|p| p.options.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|option| {
            let mark = if option.enabled { "✓ " } else { "  " };
            let comment = if option.comment.is_empty() {
                "No description".to_string()
            } else {
                option.comment.clone()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark}{}", option.flag)),
                Span::raw("  "),
                Span::styled(comment, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.option_list);
}

fn render_add_option(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let field = |value: &str, title: &'static str, focused: bool| {
        let text = if focused {
            format!("{value}{CURSOR}")
        } else {
            value.to_string()
        };
        let style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(style),
        )
    };

    f.render_widget(
        field(
            &app.flag_input,
            " Flag ",
            app.add_focus == AddOptionFocus::Flag,
        ),
        chunks[0],
    );
    f.render_widget(
        field(
            &app.comment_input,
            " Comment (optional) ",
            app.add_focus == AddOptionFocus::Comment,
        ),
        chunks[1],
    );
}

fn render_new_preset(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let input = Paragraph::new(format!("{}{}", app.name_input, CURSOR)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" New preset name ")
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(input, chunks[0]);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = app.status.clone().unwrap_or_default();
    let help = help_text(app);

    let lines = vec![
        Line::from(Span::styled(status, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn help_text(app: &App) -> &'static str {
    match app.view {
        View::Url => "Esc: quit • Enter: download • Tab: presets • ↑/↓: history • Ctrl+L: clear",
        View::Presets => {
            if app.show_help {
                "N: new preset • Enter: edit • Space: toggle • D: delete • R: reset all • Esc: back • ?: hide help"
            } else {
                "?: help"
            }
        }
        View::EditPreset => {
            if app.show_help {
                "A: add option • Space: toggle • D: delete • R: reset • ↑/↓: navigate • Esc: back • ?: hide help"
            } else {
                "?: help"
            }
        }
        View::AddOption => "Enter: add option • Tab: next field • Esc: cancel",
        View::NewPreset => "Enter: create • Esc: cancel",
    }
}

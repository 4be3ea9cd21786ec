use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Tabs, Wrap,
};
use ratatui::Frame;

pub mod layout;
pub mod table;
pub mod widgets;

pub use table::TableView;

use crate::app::{App, InputMode};
use crate::config;
use crate::controller::{DetailView, Form, ModalContent, ModalState};
use crate::core::record::display_value;
use crate::core::{NotifyLevel, SectionId, TabId};
use widgets::SeriesChart;

const CHART_ROWS: u16 = 6;
const CHART_FIELD: &str = "bookings";

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let chart = chart_series(app);
    let areas = layout::areas(size, if chart.is_some() { CHART_ROWS } else { 0 });

    draw_header(f, areas.header, app);
    draw_sidebar(f, areas.sidebar, app);
    if let Some(series) = chart.as_deref() {
        draw_chart(f, areas.chart, series);
    }
    draw_table(f, areas.table, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
    if let Some(modal) = app.modal.state() {
        draw_modal(f, areas.size, modal);
    }
}

/// Dashboard chart data, once visuals are ready
fn chart_series(app: &App) -> Option<Vec<u64>> {
    if !app.dashboard.visuals_ready() {
        return None;
    }
    let view = app.dashboard.renderer();
    view.records_for(SectionId::Dashboard)
        .filter(|records| !records.is_empty())?;
    Some(view.series(CHART_FIELD))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let domain = app
        .dashboard
        .current_domain_descriptor()
        .map(|domain| format!("{} ({})", domain.display_name, domain.id))
        .unwrap_or_else(|| "--".to_string());
    let title = Line::from(vec![
        Span::styled(
            "Tourdesk",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Domain", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}  ", domain)),
        Span::styled("Backend", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.backend_label)),
    ]);
    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let (token, token_color) = if app.token_present {
        ("signed in", Color::LightGreen)
    } else {
        ("no token", Color::LightYellow)
    };
    let right_line = Line::from(vec![
        Span::styled("Domains ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.dashboard.domains().len())),
        Span::styled(token, Style::default().fg(token_color)),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let highlighted = app.dashboard.highlighted();
    let items: Vec<ListItem> = SectionId::ALL
        .iter()
        .map(|section| {
            let is_active = *section == highlighted;
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(section.title())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("-> ");

    let mut state = ListState::default();
    state.select(Some(highlighted.index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_chart(f: &mut Frame, area: Rect, series: &[u64]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Bookings, last {} days", series.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(SeriesChart::new(series), inner);
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
    let section = app.dashboard.current_section();
    let view = app.dashboard.renderer();
    let mut title = section.title().to_string();
    if app.dashboard.is_loading() {
        title.push_str(" (loading…)");
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(records) = view.records_for(section) else {
        let text = if app.dashboard.is_loading() {
            "Loading…"
        } else {
            "No data"
        };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    };
    if records.is_empty() {
        f.render_widget(Paragraph::new("No records").block(block), area);
        return;
    }

    let columns: Vec<&str> = std::iter::once("id")
        .chain(view.columns().iter().map(String::as_str))
        .collect();
    let header = Row::new(
        columns
            .iter()
            .map(|name| Cell::from(name.to_string()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            let cells = std::iter::once(record.id.clone()).chain(
                view.columns()
                    .iter()
                    .map(|key| record.fields.get(key).map(display_value).unwrap_or_default()),
            );
            Row::new(cells.map(|text| Cell::from(truncate_str(&text, 28))).collect::<Vec<_>>())
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Ratio(1, columns.len() as u32))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut state = TableState::default();
    state.select(Some(view.selected()));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let section = app.dashboard.current_section();
    let rows = app
        .dashboard
        .renderer()
        .records_for(section)
        .map(|records| records.len().to_string())
        .unwrap_or_else(|| "--".to_string());
    let mut spans = vec![
        Span::styled("Section ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", section.title())),
        Span::styled("Rows ", Style::default().fg(Color::DarkGray)),
        Span::raw(rows),
    ];
    if app.dashboard.is_loading() {
        spans.push(Span::styled("  loading…", Style::default().fg(Color::LightYellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("go", "Go to section: go <section>"),
        ("domain", "Switch domain: domain [id]"),
        ("new", "Create a record in this section"),
        ("refresh", "Reload this section"),
        ("export", "Export rows: export csv|json"),
        ("help", "Toggle help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) || input.starts_with(cmd) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input).unwrap_or("or type a section name");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(level_color(level))),
                ])
            } else {
                Line::from(Span::styled(
                    "[ ] section  d domain  Enter open  n new  r refresh  : command  ? help  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn level_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => Color::White,
        NotifyLevel::Success => Color::LightGreen,
        NotifyLevel::Warning => Color::LightYellow,
        NotifyLevel::Error => Color::LightRed,
    }
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let config_path = config::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  j / k      Move selection"),
        Line::from("  [ / ]      Prev/Next section"),
        Line::from("  d          Next domain"),
        Line::from("  Enter      Open detail"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  n          New record"),
        Line::from("  r          Refresh"),
        Line::from("  :          Command line"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("In a modal"),
        Line::from("  Tab        Next field / tab"),
        Line::from("  Enter      Save"),
        Line::from("  Esc        Close"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :go tours  :domain domain2  :export json"),
        Line::from(""),
        Line::from(format!("Config: {config_path}")),
        Line::from(format!(
            "Active section: {}",
            app.dashboard.current_section().title()
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_modal(f: &mut Frame, area: Rect, modal: &ModalState) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(modal.title.as_str());
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    match &modal.content {
        ModalContent::Form(form) => draw_form(f, chunks[0], form),
        ModalContent::Detail(detail) => draw_detail(f, chunks[0], detail),
        ModalContent::Message(text) => {
            f.render_widget(
                Paragraph::new(text.as_str()).wrap(Wrap { trim: true }),
                chunks[0],
            );
        }
    }

    let hint = if modal.submitting {
        "saving…"
    } else if modal.has_handler() {
        "Enter save  Tab next field  Esc close"
    } else {
        "Tab next tab  Esc close"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        chunks[1],
    );
}

fn draw_form(f: &mut Frame, area: Rect, form: &Form) {
    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let focused = idx == form.focused;
            let marker = if focused { "> " } else { "  " };
            let required = if field.required { "*" } else { " " };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(
                    format!("{:<16}{} ", field.label, required),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(field.value.clone()),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn draw_detail(f: &mut Frame, area: Rect, detail: &DetailView) {
    let record = &detail.record;
    let Some(tabs) = detail.tabs.as_ref() else {
        let lines = std::iter::once(field_line("id", &record.id))
            .chain(
                record
                    .fields
                    .iter()
                    .map(|(key, value)| field_line(key, &display_value(value))),
            )
            .collect::<Vec<_>>();
        f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let titles: Vec<&str> = tabs.tabs().iter().map(|tab| tab.title()).collect();
    let selected = tabs
        .tabs()
        .iter()
        .position(|tab| tabs.is_active(*tab))
        .unwrap_or(0);
    let tab_bar = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tab_bar, chunks[0]);

    let mut lines: Vec<Line> = tabs
        .active()
        .fields()
        .iter()
        .filter_map(|key| record.text(key).map(|value| field_line(key, &value)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("Nothing on this tab"));
    }
    f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }), chunks[1]);
}

fn field_line(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", key), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect::<String>() + "…"
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_match_prefixes_and_full_commands() {
        assert_eq!(command_hint("ex"), Some("Export rows: export csv|json"));
        assert_eq!(command_hint("go tours"), Some("Go to section: go <section>"));
        assert_eq!(command_hint("tours"), None);
    }

    #[test]
    fn truncation_counts_chars() {
        assert_eq!(truncate_str("Évora", 10), "Évora");
        assert_eq!(truncate_str("Coastal Cliffs Hike", 7), "Coastal…");
    }
}

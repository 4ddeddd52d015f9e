// src/tui/ui.rs
use crate::render::money;
use crate::tui::app::{App, Outcome};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)].as_ref())
        .split(f.size());

    draw_header(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)].as_ref())
        .split(rows[1]);

    draw_form(f, app, columns[0]);
    draw_results(f, app, columns[1]);
    draw_footer(f, app, rows[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled("The Shield", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | Side: "),
        Span::styled(
            format!("{:?}", app.side),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | Cap: {:?} | Basis: {:?}",
            app.add_on_cap, app.add_on_basis
        )),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(header, area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = if field.value.is_empty() && field.id.optional() {
                "(off)".to_string()
            } else {
                field.value.clone()
            };
            let style = if i == app.selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", field.id.label()), style),
                Span::styled(value, style.add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();

    let form = List::new(items).block(Block::default().borders(Borders::ALL).title("Inputs"));
    f.render_widget(form, area);
}

fn signed(value: Decimal) -> Style {
    if value < Decimal::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn row(label: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<26}", label)),
        Span::styled(value, style.add_modifier(Modifier::BOLD)),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

fn result_lines(outcome: &Outcome) -> Vec<Line<'static>> {
    let input = &outcome.input;
    let r = &outcome.report;
    let plain = Style::default();

    let mut lines = vec![
        section("Overview"),
        row("Open profit", money(r.total_profit), signed(r.total_profit)),
        row("Profit %", format!("{:.2}%", r.profit_pct), signed(r.profit_pct)),
        row("1R / R-multiple", format!("{:.2} / {:.2} R", r.one_r, r.profit_r), plain),
        Line::raw(""),
        section("1. Partial close"),
        row("Sell now", format!("{} units", r.sell), Style::default().fg(Color::Yellow)),
        row("Remaining", format!("{} units", r.remaining), plain),
        Line::raw(""),
        section("2. Add-on"),
    ];

    if input.add_on_stop.is_some() {
        lines.push(row("Add now", format!("{} units", r.add_on), Style::default().fg(Color::Yellow)));
        lines.push(row("Theoretical max", format!("{} units", r.theoretical_add_on), plain));
        lines.push(row("Capital needed", money(r.add_on_cost), plain));
        lines.push(row(
            "Result at add-on stop",
            money(r.add_on_floor_result),
            signed(r.add_on_floor_result),
        ));
    } else {
        lines.push(Line::raw("Add-on disabled (set an add-on stop)"));
    }

    lines.push(Line::raw(""));
    lines.push(section("Locked profit vs. no sell"));
    lines.push(row("Realized by selling", money(r.locked_realized), signed(r.locked_realized)));
    if input.target_stop.is_some() {
        lines.push(row("Remaining at trail stop", money(r.locked_potential), signed(r.locked_potential)));
        lines.push(row("Guaranteed total", money(r.locked_total), signed(r.locked_total)));
        lines.push(row(
            "No sell, at trail stop",
            money(r.no_sell_at_target_stop),
            Style::default().fg(Color::LightRed),
        ));
    }
    lines.push(row(
        "No sell, at initial stop",
        money(r.no_sell_at_initial_stop),
        signed(r.no_sell_at_initial_stop),
    ));

    lines.push(Line::raw(""));
    lines.push(section("Crash scenario"));
    let loss = Style::default().fg(Color::Red);
    lines.push(row("Full position", money(-r.crash.loss_full), loss));
    lines.push(row("After sell", money(-r.crash.loss_after_sell), Style::default().fg(Color::LightRed)));
    lines.push(row("After add-on", money(-r.crash.loss_after_add_on), loss));

    if !outcome.advisories.is_empty() {
        lines.push(Line::raw(""));
        for advisory in &outcome.advisories {
            let color = if advisory.is_warning() { Color::Yellow } else { Color::Green };
            lines.push(Line::from(Span::styled(advisory.to_string(), Style::default().fg(color))));
        }
    }

    lines
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.outcome {
        Some(outcome) => result_lines(outcome),
        None => vec![Line::raw("Press Enter to calculate.")],
    };
    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Instructions"));
    f.render_widget(results, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.error {
        Some(err) => Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))),
        None => Line::raw("Enter: calculate  Tab/Up/Down: field  Left/Right: side  p: cap  b: basis  Esc: quit"),
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

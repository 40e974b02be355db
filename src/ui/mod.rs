use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod format;
pub mod layout;
pub mod render;

use crate::app::{App, InputMode, SearchView, StatusLevel};

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_blocks_panel(f, areas.blocks, app);
    draw_wallet_panel(f, areas.wallet, app);
    draw_transactions_panel(f, areas.transactions, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if let Some(view) = app.search_view.as_ref() {
        draw_search_overlay(f, areas.size, view);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "RNRScan",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.api_endpoint)),
    ]);
    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let latest = render::indicator_text(app.stats.state(), |s| render::latest_block_text(s));
    let pending = render::indicator_text(app.stats.state(), |s| render::pending_text(s));
    let right_line = Line::from(vec![
        Span::styled("Latest ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", latest)),
        Span::styled("Mempool ", Style::default().fg(Color::DarkGray)),
        Span::raw(pending),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_blocks_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines = render::blocks_panel(app.blocks.state(), format::now_unix());
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Latest Blocks"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_wallet_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines = render::wallet_lines(app.wallet.state(), app.unit_price_usd);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Wallet"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_transactions_panel(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match app.demo_txs.as_ref() {
        Some(txs) => ("Transactions (demo)", render::demo_tx_rows(txs)),
        None => (
            "Transactions",
            render::transactions_panel(app.transactions.state()),
        ),
    };
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::LightCyan,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None if app.send_in_flight() => Line::from(Span::styled(
            "Transaction pending…",
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Normal => Line::from(Span::styled(
            "s send  c copy address  / search  r refresh  q quit",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Prompt(kind) => Line::from(vec![
            Span::styled(
                format!("{}: ", kind.label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(app.input.clone()),
            Span::styled("█", Style::default().fg(Color::LightCyan)),
        ]),
        InputMode::Search => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.input.clone()),
            Span::styled("█", Style::default().fg(Color::LightCyan)),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_search_overlay(f: &mut Frame, area: Rect, view: &SearchView) {
    let popup_area = centered_rect(72, 64, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(""), Line::from("Esc to go back"), Line::from("")];
    lines.extend(view.body.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(format!("Search: {}", view.query))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

use crate::output::formatter::{format_fee, format_total_score};
use crate::scoring::MAX_RATING;
use crate::tui::app::{App, InputMode};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Table(fill) + Level(2) + Summary(2) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Criteria table
        Constraint::Length(2), // Selected criterion's level description
        Constraint::Length(2), // Score and fee summary
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_table(frame, chunks[1], app);
    render_level(frame, chunks[2], app);
    render_summary(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Quote Builder",
        Style::default().fg(app.theme.title_color).bold(),
    )];

    if app.dirty {
        let marker = " [unsaved]";
        let left_len = "Quote Builder".len();
        let padding_len = (area.width as usize).saturating_sub(left_len + marker.len());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(marker, Style::default().fg(app.theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .catalog
        .iter()
        .enumerate()
        .map(|(idx, criterion)| {
            let rating = app.ratings.get(criterion.key).unwrap_or(0);
            let points = rating as f64 / MAX_RATING as f64 * criterion.weight;

            let index = format!("{}.", idx + 1);
            let bar_line = rating_bar(rating, &app.theme);
            let mut rating_spans = vec![Span::styled(
                format!("{} ", rating),
                Style::default().fg(app.theme.rating_color(rating)),
            )];
            rating_spans.extend(bar_line.spans);
            let rating_line = Line::from(rating_spans);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(app.theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(app.theme.index_color)),
                Cell::from(criterion.label),
                Cell::from(rating_line),
                Cell::from(format!("{:>5.1}", criterion.weight)),
                Cell::from(format!("{:>6.1}", points)),
            ])
            .style(row_style)
        })
        .collect();

    // Column widths
    let widths = [
        Constraint::Length(4),  // Index: "10."
        Constraint::Fill(1),    // Criterion label
        Constraint::Length(8),  // Rating + bar: "3 ███░░"
        Constraint::Length(7),  // Weight
        Constraint::Length(7),  // Points
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Criterion", "Rating", "Weight", "Points"])
                .style(app.theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(app.theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_level(frame: &mut Frame, area: Rect, app: &App) {
    let text = match (app.selected_criterion(), app.selected_rating()) {
        (Some(criterion), Some(rating)) => Line::from(vec![
            Span::styled(
                format!("{}: ", criterion.label),
                Style::default().fg(app.theme.muted),
            ),
            Span::raw(criterion.level_for(rating)),
        ]),
        _ => Line::from(""),
    };

    frame.render_widget(Paragraph::new(text), area);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let score = format_total_score(app.quote.total_score);
    let fee = format_fee(app.quote.fee, app.config.currency());

    let lines = vec![
        Line::from(vec![
            Span::styled("Total Weighted Score: ", Style::default().fg(app.theme.muted)),
            Span::styled(score, Style::default().bold()),
        ]),
        Line::from(vec![
            Span::styled("Proposed Fee: ", Style::default().fg(app.theme.muted)),
            Span::styled(fee, Style::default().fg(app.theme.fee_color).bold()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            app.theme.flash_error
        } else if msg.starts_with("Saved") || msg.starts_with("Reset") || msg.starts_with("Undid") {
            app.theme.flash_success
        } else {
            Color::White
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j", "/", "k", ":select "),
            ("h", "/", "l", ":adjust "),
            ("1", "-", "5", ":set "),
            ("d", "", "", ":defaults "),
            ("z", "", "", ":undo "),
            ("w", "", "", ":save "),
            ("b", "", "", ":breakdown "),
            ("?", "", "", ":help "),
            ("q", "", "", ":quit"),
        ];

        let mut hint_spans = Vec::new();
        for (i, (key1, sep, key2, label)) in hints.iter().enumerate() {
            if i > 0 {
                hint_spans.push(Span::raw(" "));
            }
            hint_spans.push(Span::styled(
                *key1,
                Style::default().fg(app.theme.status_key_color),
            ));
            if !sep.is_empty() {
                hint_spans.push(Span::raw(*sep));
                hint_spans.push(Span::styled(
                    *key2,
                    Style::default().fg(app.theme.status_key_color),
                ));
            }
            hint_spans.push(Span::raw(*label));
        }

        Line::from(hint_spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.theme.status_bar_bg)),
        area,
    );
}

fn rating_bar(rating: u8, theme: &crate::tui::theme::ThemeColors) -> Line<'static> {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(theme.rating_color(rating)),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(theme.bar_empty),
        ));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / Down      ", key_style),
            Span::raw("Next criterion"),
        ]),
        Line::from(vec![
            Span::styled("k / Up        ", key_style),
            Span::raw("Previous criterion"),
        ]),
        Line::from(vec![
            Span::styled("h / Left      ", key_style),
            Span::raw("Decrease rating"),
        ]),
        Line::from(vec![
            Span::styled("l / Right     ", key_style),
            Span::raw("Increase rating"),
        ]),
        Line::from(vec![
            Span::styled("1-5           ", key_style),
            Span::raw("Set rating directly"),
        ]),
        Line::from(vec![
            Span::styled("d             ", key_style),
            Span::raw("Reset all to defaults"),
        ]),
        Line::from(vec![
            Span::styled("z             ", key_style),
            Span::raw("Undo last change"),
        ]),
        Line::from(vec![
            Span::styled("w             ", key_style),
            Span::raw("Save ratings"),
        ]),
        Line::from(vec![
            Span::styled("b             ", key_style),
            Span::raw("Score breakdown"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit (saves if unsaved)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(app.theme.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the score breakdown overlay: per-criterion weighted points
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let height = app.quote.breakdown.len() as u16 + 5;
    let popup_area = centered_rect_fixed(56, height, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Score Breakdown ");
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let label_width = app
        .quote
        .breakdown
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = app
        .quote
        .breakdown
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::raw(format!("{:<width$}  ", c.label, width = label_width)),
                Span::styled(
                    format!("{}", c.rating),
                    Style::default().fg(app.theme.rating_color(c.rating)),
                ),
                Span::styled(
                    format!(" x {:>4.1}% ", c.weight),
                    Style::default().fg(app.theme.muted),
                ),
                Span::styled(format!("{:>6.1}", c.points), Style::default().bold()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(format!(
            "{:<width$}  ",
            "Total",
            width = label_width
        )),
        Span::styled(
            format!("{:>14.1}", app.quote.total_score),
            Style::default().bold(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Esc or b to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

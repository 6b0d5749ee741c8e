use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use skipper_core::pricing::{format_price, total_price, vat_amount};

use crate::app::{App, View};
use crate::card::{CARD_HEIGHT, SkipCardView};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SUMMARY_HEIGHT: u16 = 5;
const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 13;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let [header_area, content_area, status_area] = screen_layout(area);

    let header = Paragraph::new(vec![
        Line::from("Choose Your Skip Size").bold(),
        Line::from("Select the perfect skip for your project").fg(Color::Gray),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Skipper")
            .title(Line::from(format!(" {} ", app.location)).right_aligned()),
    );
    frame.render_widget(header, header_area);

    match app.view() {
        View::Loading => draw_loading(frame, app, content_area),
        View::Failed => draw_error(frame, app, content_area),
        View::Ready => draw_ready(frame, app, content_area),
    }

    draw_status(frame, app, status_area);

    if app.view() == View::Ready && app.modal_is_open() {
        draw_checkout_modal(frame, app, area);
    }
}

/// Header, main content and status line, in that order.
pub(crate) fn screen_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .margin(1)
    .areas(area)
}

/// Card grid and, when something is selected, the summary panel below it.
fn ready_layout(content: Rect, has_selection: bool) -> (Rect, Option<Rect>) {
    if has_selection {
        let [grid, summary] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(SUMMARY_HEIGHT)])
                .areas(content);
        (grid, Some(summary))
    } else {
        (content, None)
    }
}

pub(crate) fn grid_columns(width: u16) -> usize {
    match width {
        120.. => 3,
        80..=119 => 2,
        _ => 1,
    }
}

/// Screen rectangles of the cards currently visible, keyed by list index.
///
/// Rows scroll so that the focused card is always on screen.
pub(crate) fn card_areas(area: Rect, app: &App) -> Vec<(usize, Rect)> {
    let [_, content_area, _] = screen_layout(area);
    let (grid, _) = ready_layout(content_area, app.selected_skip().is_some());
    layout_cards(grid, app.skips.len(), app.cursor)
}

fn layout_cards(grid: Rect, count: usize, cursor: usize) -> Vec<(usize, Rect)> {
    if count == 0 || grid.is_empty() {
        return Vec::new();
    }

    let columns = grid_columns(grid.width);
    let visible_rows = usize::from((grid.height / CARD_HEIGHT).max(1));
    let first_row = (cursor / columns).saturating_sub(visible_rows - 1);

    let mut areas = Vec::new();
    for (row_offset, row_start) in (first_row * columns..count)
        .step_by(columns)
        .take(visible_rows)
        .enumerate()
    {
        let row_top = u16::try_from(row_offset)
            .unwrap_or(u16::MAX)
            .saturating_mul(CARD_HEIGHT);
        let row_area = Rect {
            x: grid.x,
            y: grid.y.saturating_add(row_top),
            width: grid.width,
            height: CARD_HEIGHT.min(grid.height.saturating_sub(row_top)),
        };
        if row_area.height == 0 {
            break;
        }

        let cells = Layout::horizontal(vec![Constraint::Fill(1); columns]).split(row_area);
        for (index, cell) in (row_start..count.min(row_start + columns)).zip(cells.iter()) {
            areas.push((index, *cell));
        }
    }
    areas
}

fn draw_loading(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let spinner = SPINNER
        .get(app.tick % SPINNER.len())
        .copied()
        .unwrap_or_default();
    let text = Paragraph::new(format!("{spinner} Loading skip options..."))
        .style(Style::default().fg(Color::Cyan))
        .centered();

    let [center] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(text, center);
}

fn draw_error(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let message = app.error_message.as_deref().unwrap_or_default();

    let error_text = Text::from(vec![
        Line::from(Span::styled(
            "⚠ Oops! Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Failed to load skip options. Please try again."),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Try Again",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )),
    ]);

    let paragraph = Paragraph::new(error_text)
        .centered()
        .wrap(Wrap { trim: true });

    let [center] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(paragraph, center);
}

fn draw_ready(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (grid, summary) = ready_layout(area, app.selected_skip().is_some());

    if app.skips.is_empty() {
        let paragraph = Paragraph::new("No skips are available for this location.")
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, grid);
    } else {
        for (index, card_area) in layout_cards(grid, app.skips.len(), app.cursor) {
            if let Some(skip) = app.skips.get(index) {
                SkipCardView::new(skip, app.is_selected(skip)).render(
                    frame,
                    card_area,
                    index == app.cursor,
                );
            }
        }
    }

    if let Some(summary_area) = summary {
        draw_summary(frame, app, summary_area);
    }
}

fn draw_summary(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(skip) = app.selected_skip() else {
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} Yard ", skip.size),
                Style::default().fg(Color::Black).bg(Color::LightBlue),
            ),
            Span::raw("  "),
            Span::styled(
                format_price(total_price(skip)),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" inc. VAT", Style::default().fg(Color::Gray)),
        ]),
        Line::from(format!(
            "{} days hire period in {}",
            skip.hire_period_days, skip.area
        )),
        Line::from(vec![
            Span::styled("[x] Change Selection", Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(
                "[c] Continue to Checkout",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue))
            .title("Selected Skip"),
    );
    frame.render_widget(panel, area);
}

fn draw_checkout_modal(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(skip) = app.selected_skip() else {
        return;
    };

    let [vertical] = Layout::vertical([Constraint::Length(MODAL_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);
    let [modal_area] = Layout::horizontal([Constraint::Length(MODAL_WIDTH)])
        .flex(Flex::Center)
        .areas(vertical);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} Yard Skip ", skip.size),
                Style::default().fg(Color::Black).bg(Color::LightBlue),
            ),
            Span::raw("  "),
            Span::styled(
                format_price(total_price(skip)),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(format!("Location: {}", skip.area)),
        Line::from(format!("Hire Period: {} days", skip.hire_period_days)),
        Line::from(format!(
            "Price: {} + {} VAT",
            format_price(skip.price_before_vat),
            format_price(vat_amount(skip))
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[b] Go Back", Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(
                "[Enter] Proceed to Checkout",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(Line::from(" Confirm Your Selection ").bold())
                .title(Line::from(" [Esc] ✕ ").right_aligned())
                .padding(Padding::uniform(1)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, modal_area);
    frame.render_widget(modal, modal_area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = match app.view() {
        View::Loading => "q/Ctrl-C quit",
        View::Failed => "r retry · q/Ctrl-C quit",
        View::Ready if app.modal_is_open() => {
            "Enter/p proceed to checkout · Esc/b go back · q/Ctrl-C quit"
        }
        View::Ready => {
            "←/↓/↑/→ move · Enter/Space select · c continue · x change selection · q/Ctrl-C quit"
        }
    };

    let status_text = match &app.status_message {
        Some(msg) => format!("{msg} · {nav_hint}"),
        None => nav_hint.to_owned(),
    };

    let status_style = match app.view() {
        View::Failed => Style::default().fg(Color::Red),
        View::Loading => Style::default().fg(Color::Yellow),
        View::Ready => Style::default(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

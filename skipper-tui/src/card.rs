//! Card projection of a single skip offer.

use std::mem;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use skipper_core::{
    model::{Skip, SkipId},
    pricing::format_price,
};

/// Rows a card occupies in the grid, borders included.
pub(crate) const CARD_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BadgeKind {
    HirePeriod,
    RoadAllowed,
    NoRoadPlacement,
    HeavyWaste,
}

impl BadgeKind {
    fn color(self) -> Color {
        match self {
            BadgeKind::HirePeriod => Color::Blue,
            BadgeKind::RoadAllowed => Color::Green,
            BadgeKind::NoRoadPlacement => Color::Yellow,
            BadgeKind::HeavyWaste => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Badge {
    pub kind: BadgeKind,
    pub label: String,
}

/// Everything a card shows, derived from a skip and its selection flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkipCardView {
    pub id: SkipId,
    pub title: String,
    pub area: String,
    pub price: String,
    pub capacity: String,
    pub postcode: String,
    pub badges: Vec<Badge>,
    pub is_selected: bool,
}

impl SkipCardView {
    pub(crate) fn new(skip: &Skip, is_selected: bool) -> Self {
        let mut badges = vec![Badge {
            kind: BadgeKind::HirePeriod,
            label: format!("{} days hire", skip.hire_period_days),
        }];

        badges.push(if skip.allowed_on_road {
            Badge {
                kind: BadgeKind::RoadAllowed,
                label: "Road placement allowed".to_owned(),
            }
        } else {
            Badge {
                kind: BadgeKind::NoRoadPlacement,
                label: "No road placement".to_owned(),
            }
        });

        if skip.allows_heavy_waste {
            badges.push(Badge {
                kind: BadgeKind::HeavyWaste,
                label: "Heavy waste accepted".to_owned(),
            });
        }

        Self {
            id: skip.id.clone(),
            title: format!("{} Yard Skip", skip.size),
            area: skip.area.clone(),
            price: format_price(skip.price_before_vat),
            capacity: format!("{} cubic yards", skip.size),
            postcode: skip.postcode.clone(),
            badges,
            is_selected,
        }
    }

    /// Draw the card. `is_focused` marks keyboard focus, which is not selection.
    pub(crate) fn render(&self, frame: &mut Frame<'_>, area: Rect, is_focused: bool) {
        let (border_type, border_style) = if self.is_selected {
            (
                BorderType::Thick,
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )
        } else if is_focused {
            (BorderType::Rounded, Style::default().fg(Color::Yellow))
        } else {
            (BorderType::Rounded, Style::default().fg(Color::DarkGray))
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Line::from(self.title.as_str()).bold().left_aligned());
        if self.is_selected {
            block = block.title(Line::from(" ✔ ").bold().fg(Color::LightBlue).right_aligned());
        }

        let inner_width = usize::from(area.width.saturating_sub(2));

        let mut lines = vec![
            Line::from(Span::styled(
                self.price.as_str(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.area.as_str(), Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("Capacity: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.capacity.as_str()),
            ]),
            Line::from(Span::styled(
                "Features:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(badge_lines(&self.badges, inner_width));
        lines.push(Line::from(vec![
            Span::styled("Postcode: ", Style::default().fg(Color::Gray)),
            Span::raw(self.postcode.as_str()),
        ]));

        let mut paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        if self.is_selected {
            paragraph = paragraph.style(Style::default().bg(Color::Rgb(20, 30, 60)));
        }

        frame.render_widget(paragraph, area);
    }
}

/// Pack badges into lines no wider than `width`, never splitting a badge.
fn badge_lines(badges: &[Badge], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for badge in badges {
        let text = format!(" {} ", badge.label);
        let badge_width = text.chars().count();
        if !spans.is_empty() && used + 1 + badge_width > width {
            lines.push(Line::from(mem::take(&mut spans)));
            used = 0;
        }
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
            used += 1;
        }
        spans.push(Span::styled(
            text,
            Style::default().fg(Color::Black).bg(badge.kind.color()),
        ));
        used += badge_width;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

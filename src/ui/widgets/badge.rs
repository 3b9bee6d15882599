//! Inline badge row for category labels

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::domain::{Badge, BadgeVariant};

pub fn badge_style(variant: BadgeVariant) -> Style {
    match variant {
        BadgeVariant::Destructive => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        BadgeVariant::Warning => Style::default().fg(Color::Black).bg(Color::Yellow),
        BadgeVariant::Default => Style::default().fg(Color::Black).bg(Color::Cyan),
        BadgeVariant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
        BadgeVariant::Outline => Style::default().fg(Color::Gray),
    }
}

fn badge_text(badge: &Badge) -> String {
    match badge.variant {
        BadgeVariant::Outline => format!("[{}]", badge.text),
        _ => format!(" {} ", badge.text),
    }
}

/// Badges as spans separated by a single space
pub fn badge_spans(badges: &[Badge]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(badges.len() * 2);
    for (idx, badge) in badges.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(badge_text(badge), badge_style(badge.variant)));
    }
    spans
}

const GAP: u16 = 1;

/// A single line of badges, clipped at the right edge
pub struct BadgeRow<'a> {
    badges: &'a [Badge],
}

impl<'a> BadgeRow<'a> {
    pub fn new(badges: &'a [Badge]) -> Self {
        Self { badges }
    }
}

impl<'a> Widget for BadgeRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let right = area.x + area.width;
        let mut x = area.x;
        for badge in self.badges {
            if x >= right {
                break;
            }
            let text = badge_text(badge);
            let (end, _) = buf.set_stringn(
                x,
                area.y,
                &text,
                (right - x) as usize,
                badge_style(badge.variant),
            );
            x = end.saturating_add(GAP);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category_badges;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf.get(x, 0).symbol().to_string()).collect()
    }

    #[test]
    fn test_badge_row_renders_in_order() {
        let badges = category_badges(Some("prl"), Some("incidente"), None);
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        BadgeRow::new(&badges).render(area, &mut buf);
        let text = row_text(&buf, 40);
        assert!(text.starts_with(" Prevención de riesgos   Incidente "));
    }

    #[test]
    fn test_badge_row_clips() {
        let badges = category_badges(Some("desconocido"), None, None);
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        BadgeRow::new(&badges).render(area, &mut buf);
        assert_eq!(row_text(&buf, 5), "[desc");
    }

    #[test]
    fn test_spans_separated() {
        let badges = category_badges(Some("lopd"), Some("brecha"), None);
        let spans = badge_spans(&badges);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, " ");
    }
}

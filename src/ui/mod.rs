pub mod editor;
pub mod quiz;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{Notice, NoticeKind};

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 2;

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw a modal notice box over whatever is already in `buf`
pub fn render_notice(notice: &Notice, area: Rect, buf: &mut Buffer) {
    let color = match notice.kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Warning => Color::Yellow,
        NoticeKind::Error => Color::Red,
    };
    let hint = "press any key";

    let inner_width = notice
        .body
        .width()
        .max(notice.title.width())
        .max(hint.width()) as u16;
    let max_inner = area.width.saturating_sub(2 * HORIZONTAL_MARGIN).max(10);
    let inner_width = inner_width.min(max_inner);
    let body_lines = (notice.body.width() as u16).div_ceil(inner_width.max(1)).max(1);
    let popup = centered_rect(inner_width + 4, body_lines + 4, area);

    Clear.render(popup, buf);

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(notice.body.clone(), bold_style)),
        Line::from(""),
        Line::from(Span::styled(
            hint,
            Style::default()
                .add_modifier(Modifier::ITALIC)
                .add_modifier(Modifier::DIM),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", notice.title),
                bold_style.fg(color),
            )),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    widget.render(popup, buf);
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    buf.content().iter().map(|c| c.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(20, 6, area);
        assert_eq!(r, Rect::new(30, 9, 20, 6));

        let clipped = centered_rect(200, 60, area);
        assert_eq!(clipped, area);
    }

    #[test]
    fn notice_renders_title_and_body() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_notice(&Notice::warning("Slow down!", "Too fast."), area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Slow down!"));
        assert!(text.contains("Too fast."));
        assert!(text.contains("press any key"));
    }
}

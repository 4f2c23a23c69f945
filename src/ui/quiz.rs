use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::QuizApp;
use crate::ui::{render_notice, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

const IMAGE_PANE_HEIGHT: u16 = 6;

impl Widget for &QuizApp {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),                 // progress
                Constraint::Length(IMAGE_PANE_HEIGHT), // problem image
                Constraint::Min(3),                    // answer box
                Constraint::Length(1),                 // timer
                Constraint::Length(1),                 // padding
                Constraint::Length(1),                 // legend
            ])
            .split(area);

        let session = &self.session;
        let progress = match session.current_index() {
            Some(i) => format!("Question {} of {}", i + 1, session.question_count()),
            None => "Finished".to_string(),
        };
        Paragraph::new(Span::styled(progress, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let image_lines = match &self.image {
            Some(Ok(image)) => vec![
                Line::from(Span::styled(image.file_name(), bold_style)),
                Line::from(format!("{} x {} px", image.width, image.height)),
                Line::from(Span::styled("(ctrl+o) open picture", italic_style)),
            ],
            Some(Err(reason)) => vec![
                Line::from(Span::styled(
                    session
                        .current_image()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    bold_style,
                )),
                Line::from(Span::styled(
                    format!("image unreadable: {reason}"),
                    Style::default().fg(Color::Red),
                )),
            ],
            None => vec![],
        };
        Paragraph::new(image_lines)
            .block(Block::default().borders(Borders::ALL).title(" Problem "))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        let min_words = session.settings().min_words;
        let answer_title = format!(" Answer ({} / {} words) ", session.word_count(), min_words);
        let answer = Paragraph::new(Line::from(vec![
            Span::raw(session.input().to_string()),
            Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(answer_title))
        .wrap(Wrap { trim: false });
        answer.render(chunks[2], buf);

        let (timer_text, timer_style) = if self.time_up {
            (
                "Time is up - you may continue".to_string(),
                Style::default().patch(bold_style).fg(Color::Green),
            )
        } else {
            (
                format!("Time left: {} seconds", self.seconds_remaining),
                dim_bold_style,
            )
        };
        Paragraph::new(Span::styled(timer_text, timer_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let next_ready = self.time_up || session.word_count() >= min_words;
        let legend = if next_ready {
            "(enter) next / (ctrl+u) clear"
        } else {
            "(enter) next - write more or wait for the timer / (ctrl+u) clear"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);

        if let Some(notice) = &self.notice {
            render_notice(notice, area, buf);
        }
    }
}

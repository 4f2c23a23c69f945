use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::{EditorApp, Field};
use crate::ui::{render_notice, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

fn field_block<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn field_line(value: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    }
    Line::from(spans)
}

impl Widget for &EditorApp {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(3), // min words
                Constraint::Length(3), // time limit
                Constraint::Length(3), // folder
                Constraint::Length(2), // read-only settings
                Constraint::Min(0),
                Constraint::Length(2), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Config Editor", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let fields = [
            (Field::MinWords, " Minimum Words ", &self.min_words, chunks[1]),
            (Field::TimeLimit, " Time Limit (seconds) ", &self.time_limit, chunks[2]),
            (Field::ImportFolder, " Import Folder ", &self.import_folder, chunks[3]),
        ];
        for (field, title, value, chunk) in fields {
            let focused = self.focus == field;
            Paragraph::new(field_line(value, focused))
                .block(field_block(title, focused))
                .render(chunk, buf);
        }

        let info = vec![
            Line::from(format!(
                "WPM limit: {}   Tracking window: {} s",
                self.settings.wpm_limit, self.settings.wpm_td
            )),
            Line::from(format!(
                "Config: {}   Problems: {}",
                self.config_path().display(),
                self.problem_dir().display()
            )),
        ];
        Paragraph::new(info)
            .style(Style::default().add_modifier(Modifier::DIM))
            .render(chunks[4], buf);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "(tab) next field / (ctrl+s) save settings / (enter) on folder imports",
                italic_style,
            )),
            Line::from(Span::styled("(esc)ape", italic_style)),
        ])
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        if let Some(notice) = &self.notice {
            render_notice(notice, area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::ProblemImporter;
    use crate::settings::{FileSettingsStore, Settings, SettingsStore};
    use crate::ui::buffer_text;
    use tempfile::tempdir;

    #[test]
    fn renders_fields_and_preserved_settings() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("config.csv"));
        store
            .save(&Settings {
                min_words: 3,
                time_limit: 45,
                wpm_limit: 30,
                wpm_td: 10,
            })
            .unwrap();
        let app = EditorApp::new(store, ProblemImporter::new(dir.path().join("p"))).unwrap();

        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        let text = buffer_text(&buffer);

        assert!(text.contains("Minimum Words"));
        assert!(text.contains("45"));
        assert!(text.contains("WPM limit: 30"));
        assert!(text.contains("Tracking window: 10 s"));
    }
}

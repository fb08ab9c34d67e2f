use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use scramble::round::Phase;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Lines needed to show `text_width` columns in `max_width`
fn occupied_lines(text_width: usize, max_width: u16) -> u16 {
    if max_width == 0 {
        return 1;
    }
    (text_width as f64 / max_width as f64).ceil().max(1.0) as u16
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Playing => render_playing(self, area, buf),
            AppState::Summary => render_summary(self, area, buf),
        }
    }
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let round = &app.round;
    let game = round.game();

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let tile_spans = round
        .tiles()
        .iter()
        .enumerate()
        .map(|(idx, tile)| {
            let style = if tile.used {
                dim_bold_style
            } else if round.flashing_tile() == Some(idx) {
                red_bold_style
            } else {
                bold_style
            };
            let style = if idx == app.cursor && !tile.used {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            let text = if tile.used {
                "[ ]".to_string()
            } else {
                format!("[{}]", tile.letter)
            };
            Span::styled(text, style)
        })
        .collect::<Vec<Span>>();

    let tiles_text: String = tile_spans.iter().map(|s| s.content.as_ref()).collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let tiles_lines = occupied_lines(tiles_text.width(), max_chars_per_line);

    let answer_spans = match round.phase() {
        Phase::Revealing { word } => vec![Span::styled(word.clone(), red_bold_style)],
        _ => {
            let word_len = game.current_word().chars().count();
            let mut spans = round
                .answer()
                .iter()
                .map(|c| Span::styled(c.to_string(), green_bold_style))
                .collect::<Vec<Span>>();
            spans.extend(
                (round.answer().len()..word_len).map(|_| Span::styled("_", dim_bold_style)),
            );
            spans
        }
    };

    let content_height = 1 + 1 + tiles_lines + 1 + 1;
    let top = area.height.saturating_sub(content_height) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(1), // progress
                Constraint::Length(1),
                Constraint::Length(tiles_lines),
                Constraint::Length(1),
                Constraint::Length(1), // answer
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "question {} / {}",
                game.current_question_number(),
                game.total_questions_number()
            ),
            bold_style,
        ),
        Span::styled(
            format!("   mistakes left: {}", round.remaining_mistakes()),
            dim_bold_style,
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(tile_spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    Paragraph::new(Line::from(answer_spans))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        "type letters or ←/→ and enter / (esc)ape",
        italic_style,
    ))
    .render(chunks[7], buf);
}

fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let stats = app.round.game().stats();
    let total = app.round.game().total_questions_number();

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().patch(bold_style).fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(1), // correct words
                Constraint::Length(1), // errors
                Constraint::Length(1), // most errors
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let lines = [
        format!("correct words: {} / {}", stats.correct_words_number, total),
        format!("errors: {}", stats.total_errors_number),
        format!("most difficult word: \"{}\"", stats.most_errors_word),
    ];

    for (line, chunk) in lines.into_iter().zip(&chunks[1..4]) {
        Paragraph::new(Span::styled(line, bold_style))
            .alignment(Alignment::Center)
            .render(*chunk, buf);
    }

    // highlight a flawless game
    if stats.total_errors_number == 0 {
        Paragraph::new(Span::styled("flawless!", magenta_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style))
        .render(chunks[5], buf);
}

pub mod reference;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use wordclass::{
    analysis::Category,
    game::Phase,
    language::Language,
    session::{AnswerFeedback, Session},
};

use crate::{ui::reference::ReferenceTable, App};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Lines a string needs when wrapped to `width` columns
fn wrapped_lines(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    (text.width() as f64 / width as f64).ceil().max(1.0) as u16
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title and settings
                Constraint::Min(1),    // body
                Constraint::Length(1), // notice
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(self, chunks[0], buf);

        match (self.busy, self.game.phase()) {
            (Some(message), _) => {
                Paragraph::new(Span::styled(
                    message,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
            }
            (None, Phase::Setup) => render_setup(self, chunks[1], buf),
            (None, Phase::Playing) => render_playing(self, chunks[1], buf),
            (None, Phase::Feedback(feedback)) => render_feedback(self, feedback, chunks[1], buf),
            (None, Phase::Results) => render_results(self, chunks[1], buf),
        }

        if let Some(notice) = self.game.notice() {
            Paragraph::new(Span::styled(
                notice,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ))
            .render(chunks[2], buf);
        }

        let legend = screen::current_screen(self.game.phase()).help();
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[3], buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let settings = app.game.settings();
    let band = settings.difficulty.band();
    let source = if settings.use_remote {
        "generated sentences"
    } else {
        "built-in sentences"
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("wordclass", bold().fg(Color::Magenta)),
            Span::styled("  parts of speech / ชนิดของคำ", dim()),
        ]),
        Line::from(vec![
            Span::styled(settings.language.native_name(), bold()),
            Span::raw(" · "),
            Span::styled(
                format!(
                    "{} ({}-{} words)",
                    settings.difficulty,
                    band.start(),
                    band.end()
                ),
                bold(),
            ),
            Span::raw(" · "),
            Span::styled(source, dim()),
        ]),
    ];

    Paragraph::new(lines).render(area, buf);
}

fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let settings = app.game.settings();
    let remote = match (app.game.remote_available(), settings.use_remote) {
        (false, _) => "not configured",
        (true, true) => "on",
        (true, false) => "off",
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Language: ", dim()),
        Span::styled(
            format!("{} ({})", settings.language, settings.language.native_name()),
            bold(),
        ),
        Span::styled("   Difficulty: ", dim()),
        Span::styled(
            format!("{} ({})", settings.difficulty, settings.difficulty.thai_name()),
            bold(),
        ),
    ])];
    lines.push(Line::from(vec![
        Span::styled("Generated sentences: ", dim()),
        Span::styled(remote, bold()),
    ]));

    if let Some(summary) = &app.history_summary {
        lines.push(Line::styled(
            format!(
                "Last played tier: {} rounds, best {:.0}%, average {:.0}%",
                summary.rounds, summary.best_accuracy, summary.mean_accuracy
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    ReferenceTable {
        language: settings.language,
    }
    .render(chunks[1], buf);
}

/// The quiz words in order: answered ones in green or red, the current one
/// underlined, the rest dimmed
fn word_spans(session: &Session, current: Option<usize>) -> Line<'static> {
    let spans = session.words().iter().enumerate().map(|(idx, word)| {
        let style = match session.answer(idx) {
            Some(answer) if answer == word.category => bold().fg(Color::Green),
            Some(_) => bold().fg(Color::Red),
            None if Some(idx) == current => bold()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            None => dim(),
        };
        Span::styled(word.text.clone(), style)
    });

    Line::from(Itertools::intersperse(spans, Span::styled(" · ", dim())).collect::<Vec<_>>())
}

fn render_sentence(app: &App, session: &Session, area: Rect, buf: &mut Buffer) -> Rect {
    let sentence_lines = wrapped_lines(&session.sentence, area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(sentence_lines),
            Constraint::Length(1),
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(session.sentence.clone(), bold()))
        .alignment(if sentence_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    Paragraph::new(word_spans(session, app.game.current_word()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    let position = app.game.current_word().map_or(session.words().len(), |idx| idx + 1);
    let origin = app
        .game
        .origin()
        .map(|origin| format!(" · {origin} sentence"))
        .unwrap_or_default();
    Paragraph::new(Span::styled(
        format!(
            "Word {} of {} · score {}/{}{}",
            position,
            session.words().len(),
            session.correct(),
            session.total(),
            origin
        ),
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    chunks[4]
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.game.session() else {
        return;
    };
    let rest = render_sentence(app, session, area, buf);

    let word = app
        .game
        .current_word()
        .and_then(|idx| session.words().get(idx))
        .map(|word| word.text.as_str())
        .unwrap_or_default();

    let prompt = match session.language {
        Language::English => format!("What part of speech is \"{word}\"?"),
        Language::Thai => format!("\"{word}\" เป็นคำชนิดใด?"),
    };

    let selected = app.game.selected_category();
    let mut lines = vec![Line::styled(prompt, bold()), Line::raw("")];
    lines.extend(Category::ALL.iter().map(|category| {
        let marker = if *category == selected { "▶ " } else { "  " };
        let style = if *category == selected {
            bold().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(marker, bold().fg(Color::Cyan)),
            Span::styled(format!("{} ", category.index() + 1), dim()),
            Span::styled(category.label(session.language), style),
        ])
    }));

    Paragraph::new(lines).render(rest, buf);
}

fn render_feedback(app: &App, feedback: &AnswerFeedback, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.game.session() else {
        return;
    };
    let rest = render_sentence(app, session, area, buf);
    let language = session.language;

    let verdict = if feedback.correct {
        Line::styled("✓ Correct! / ถูกต้อง!", bold().fg(Color::Green))
    } else {
        Line::styled("✗ Incorrect / ไม่ถูกต้อง", bold().fg(Color::Red))
    };

    let mut lines = vec![verdict, Line::raw("")];

    let word = match &feedback.gloss {
        Some(gloss) => format!("\"{}\" ({gloss})", feedback.word),
        None => format!("\"{}\"", feedback.word),
    };
    lines.push(Line::from(vec![
        Span::raw(format!("{word} is a ")),
        Span::styled(feedback.expected.label(language), bold().fg(Color::Cyan)),
    ]));
    if !feedback.correct {
        lines.push(Line::from(vec![
            Span::styled("You answered ", dim()),
            Span::styled(feedback.chosen.label(language), bold().fg(Color::Red)),
        ]));
    }

    let reference = feedback.expected.reference(language);
    lines.push(Line::raw(""));
    lines.push(Line::styled(reference.description, dim()));
    lines.push(Line::styled(
        format!("e.g. {}", reference.sentence),
        Style::default().add_modifier(Modifier::ITALIC),
    ));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(rest, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.game.session() else {
        return;
    };
    let language = session.language;

    let mut lines = vec![
        Line::styled(session.sentence.clone(), bold()),
        Line::raw(""),
        Line::styled(
            format!(
                "Score {}/{}   Accuracy {:.1}%",
                session.correct(),
                session.total(),
                session.accuracy()
            ),
            bold(),
        ),
        Line::styled(
            session.rating().message(language),
            bold().fg(Color::Magenta),
        ),
        Line::raw(""),
    ];

    let breakdown = session
        .category_breakdown()
        .iter()
        .map(|(category, tally)| format!("{category} {}/{}", tally.correct, tally.total))
        .join("   ");
    lines.push(Line::styled(breakdown, dim()));
    lines.push(Line::raw(""));

    for (idx, word) in session.words().iter().enumerate() {
        let answer = session.answer(idx);
        let (mark, style) = match answer {
            Some(answer) if answer == word.category => ("✓", Style::default().fg(Color::Green)),
            _ => ("✗", Style::default().fg(Color::Red)),
        };
        let mut spans = vec![
            Span::styled(format!("{mark} "), style),
            Span::styled(word.text.clone(), bold()),
            Span::raw("  "),
            Span::styled(word.category.label(language), Style::default().fg(Color::Cyan)),
        ];
        if let Some(answer) = answer.filter(|answer| *answer != word.category) {
            spans.push(Span::styled(format!("  (you: {answer})"), dim()));
        }
        lines.push(Line::from(spans));
    }

    if let Some(summary) = &app.history_summary {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!(
                "{} rounds at this level · best {:.0}% · average {:.0}%",
                summary.rounds, summary.best_accuracy, summary.mean_accuracy
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ));
    }

    if !app.recent_rounds.is_empty() {
        let recent = app
            .recent_rounds
            .iter()
            .map(|round| {
                format!(
                    "{} {} {} {:.0}%",
                    round.played_at.format("%H:%M"),
                    round.language.code(),
                    round.difficulty,
                    round.accuracy()
                )
            })
            .join("  ·  ");
        lines.push(Line::styled(format!("Recent rounds: {recent}"), dim()));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Left)
        .render(area, buf);
}

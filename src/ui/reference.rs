use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use unicode_width::UnicodeWidthStr;

use wordclass::analysis::Category;
use wordclass::language::Language;

/// The eight categories with their number keys, a short description and
/// example words, in the order of [`Category::ALL`]
pub struct ReferenceTable {
    pub language: Language,
}

impl ReferenceTable {
    /// Width of the widest bilingual label, in terminal columns
    fn label_width(&self) -> u16 {
        Category::ALL
            .iter()
            .map(|category| category.label(self.language).width())
            .max()
            .unwrap_or(0) as u16
    }
}

impl Widget for ReferenceTable {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let rows = Category::ALL.iter().map(|category| {
            let reference = category.reference(self.language);
            Row::new(vec![
                Cell::from(format!("{}", category.index() + 1)).style(bold),
                Cell::from(category.label(self.language)).style(bold.fg(Color::Cyan)),
                Cell::from(Text::from(vec![
                    Line::from(reference.description),
                    Line::styled(reference.examples, dim),
                ])),
            ])
            .height(2)
        });

        let title = match self.language {
            Language::English => " Parts of speech ",
            Language::Thai => " ชนิดของคำ ",
        };

        Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(self.label_width()),
                Constraint::Min(10),
            ],
        )
        .header(Row::new(vec!["#", "Category", "Meaning / examples"]).style(dim))
        .column_spacing(2)
        .block(Block::default().borders(Borders::ALL).title(title))
        .render(area, buf);
    }
}

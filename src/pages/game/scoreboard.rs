use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::game::score::{Medal, Score};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreboardStyles {
    pub panel: Style,
    pub score: Style,
    pub badge: Style,
}

/// End-of-run panel: score, best, NEW badge and medal.
#[derive(Debug, Clone)]
pub struct Scoreboard<'a> {
    score: &'a Score,
    styles: ScoreboardStyles,
}

impl<'a> Scoreboard<'a> {
    pub fn new(score: &'a Score, styles: ScoreboardStyles) -> Self {
        Scoreboard { score, styles }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let medal = match self.score.medal() {
            Some(medal) => medal_label(medal),
            None => "-".to_string(),
        };
        let mut best = vec![Span::raw("Best   "), Span::styled(self.score.best().to_string(), self.styles.score)];
        if self.score.is_new_best() {
            best.push(Span::raw(" "));
            best.push(Span::styled(" NEW ", self.styles.badge));
        }
        vec![
            Line::from(vec![Span::raw("Score  "), Span::styled(self.score.current().to_string(), self.styles.score)]),
            Line::from(best),
            Line::from(vec![Span::raw("Medal  "), Span::raw(medal)]),
        ]
    }
}

fn medal_label(medal: Medal) -> String {
    let glyph = match medal {
        Medal::Bronze | Medal::Silver | Medal::Gold => "\u{25cf}",
        Medal::Platinum => "\u{2605}",
    };
    format!("{glyph} {medal}")
}

impl Widget for Scoreboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(" Game Over ").bold())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(self.styles.panel);
        Clear.render(area, buf);
        Paragraph::new(self.lines()).alignment(Alignment::Center).block(block).render(area, buf);
    }
}

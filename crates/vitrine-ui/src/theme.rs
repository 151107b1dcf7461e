//! Styles for the catalog browser.

use ratatui::style::{Color, Modifier, Style};

/// Color and emphasis palette for the two panes.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::Reset,
            dim: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Fact-row labels and pane titles.
    pub fn label(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Plain field values.
    pub fn value(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Secondary text and disabled controls.
    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// An attribute link, highlighted when the link cursor is on it.
    pub fn link(&self, selected: bool) -> Style {
        let base = Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::UNDERLINED);
        if selected {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    /// The result-list cursor row.
    pub fn cursor_row(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Border of the focused pane.
    pub fn focused_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            self.dim()
        }
    }
}

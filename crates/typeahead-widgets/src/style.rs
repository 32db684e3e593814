use ratatui::style::{Color, Modifier, Style};

/// Style configuration shared by both pickers.
#[derive(Debug, Clone)]
pub struct TypeAheadStyle {
    /// Style for the input text.
    pub input: Style,
    /// Style for the placeholder shown while the input is empty.
    pub placeholder: Style,
    /// Style for the cursor cell.
    pub cursor: Style,
    /// Style for rows that are not highlighted.
    pub item: Style,
    /// Style for highlighted rows.
    pub selected_item: Style,
    /// Style for chosen-item chips.
    pub chip: Style,
    /// Style for the loading line.
    pub loading: Style,
    /// Style for the error line.
    pub error: Style,
}

impl Default for TypeAheadStyle {
    fn default() -> Self {
        Self {
            input: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            item: Style::default().fg(Color::White),
            selected_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            chip: Style::default().fg(Color::Black).bg(Color::Cyan),
            loading: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            error: Style::default().fg(Color::Red),
        }
    }
}

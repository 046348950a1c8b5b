use ratatui::{prelude::*, widgets::*};

use crate::messages::render::{CardAction, CardView, RowView};

/// Renders a text input field
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    let text = if is_focused {
        format!("{}▏", content)
    } else {
        content.to_string()
    };

    Paragraph::new(text).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: Vec<String>, selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.into_iter().map(Line::from).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Action hint color
pub fn action_color(action: CardAction) -> Color {
    match action {
        CardAction::Save => Color::Green,
        CardAction::Remove => Color::Red,
        CardAction::Pronounce => Color::Yellow,
        CardAction::Practice => Color::Magenta,
    }
}

/// Lines for one card: term, meaning, prompt, action hints
pub fn card_lines(card: &CardView, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_selected { "▶ " } else { "  " };
    let term_style = if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().bold()
    };

    let mut title = vec![Span::raw(marker), Span::styled(card.english.clone(), term_style)];
    if card.saved_indicator {
        title.push(Span::styled(" ★", Style::default().fg(Color::Magenta)));
    }
    let mut lines = vec![Line::from(title)];

    if let Some(meaning) = &card.meaning {
        lines.push(Line::from(Span::styled(
            format!("    {}", meaning),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(prompt) = &card.prompt {
        lines.push(Line::from(Span::styled(
            format!("    ✎ {}", prompt),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if is_selected {
        let mut hints = vec![Span::raw("    ")];
        for action in &card.actions {
            hints.push(Span::styled(
                format!("[{}] ", action.hint()),
                Style::default().fg(action_color(*action)),
            ));
        }
        lines.push(Line::from(hints));
    }

    lines
}

/// List items for the card area, one per row
pub fn render_rows(rows: &[RowView], selected_row: Option<usize>) -> Vec<ListItem<'static>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            RowView::Header(label) => ListItem::new(Line::from(Span::styled(
                format!("── {} ", label),
                Style::default().fg(Color::Blue).bold(),
            ))),
            RowView::Card(card) => ListItem::new(card_lines(card, Some(i) == selected_row)),
        })
        .collect()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardView {
        CardView {
            word_id: "w1".into(),
            english: "Apple".into(),
            meaning: Some("আপেল".into()),
            saved_indicator: true,
            actions: vec![CardAction::Pronounce],
            prompt: None,
        }
    }

    #[test]
    fn test_hints_only_on_selected_card() {
        assert_eq!(card_lines(&card(), false).len(), 2);
        assert_eq!(card_lines(&card(), true).len(), 3);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert!(inner.width > 0 && inner.width < outer.width);
        assert!(inner.height > 0 && inner.height < outer.height);
        assert!(inner.x > 0 && inner.y > 0);
    }
}

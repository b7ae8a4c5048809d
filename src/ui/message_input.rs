//! Input field rendering, shared by the join form and the chat composer.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::composer::ComposerDraft;

use super::styles;

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

/// Renders a bordered single-line input with the terminal cursor placed at
/// the draft's cursor.
pub fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    draft: &ComposerDraft,
    placeholder: &str,
) {
    let paragraph = Paragraph::new(build_input_line(draft, placeholder)).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );

    frame.render_widget(paragraph, area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(PROMPT_SYMBOL.len() as u16)
        .saturating_add(cursor_column(draft));
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Display column of the cursor, counting wide glyphs as two cells.
fn cursor_column(draft: &ComposerDraft) -> u16 {
    draft
        .text_before_cursor()
        .width()
        .min(u16::MAX as usize) as u16
}

fn build_input_line(draft: &ComposerDraft, placeholder: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if draft.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(draft.text().to_owned(), styles::input_text_style()),
        ])
    }
}

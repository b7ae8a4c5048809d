use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::shell_state::ShellState;

use super::message_input::render_input;
use super::message_rendering::{build_message_list_elements, element_to_list_item};
use super::styles;

const APP_TITLE: &str = "SeaChat";
const TYPING_HINT: &str = "Someone is typing...";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    if state.session().is_active() {
        render_chat_view(frame, content_area, state);
    } else {
        render_join_form(frame, content_area, state);
    }

    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

fn render_join_form(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [_, title_area, input_area, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(APP_TITLE, styles::title_style())),
        Line::from("Choose a name to join the room"),
    ])
    .centered();
    frame.render_widget(title, title_area);

    render_input(
        frame,
        input_area,
        "Name",
        state.name_input(),
        "Enter your name...",
    );
}

fn render_chat_view(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [header_area, messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(area);

    frame.render_widget(Paragraph::new(header_line(state)), header_area);
    render_messages_panel(frame, messages_area, state);
    render_input(
        frame,
        input_area,
        "Message",
        state.composer(),
        "Type a message...",
    );
}

fn render_messages_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let elements = build_message_list_elements(
        state.log().visible(),
        state.session().display_name(),
    );
    let items: Vec<ListItem<'static>> = elements.iter().map(element_to_list_item).collect();
    let last = items.len().checked_sub(1);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );

    // Selecting the newest item keeps the list scrolled to the bottom.
    let mut list_state = ListState::default();
    list_state.select(last);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn header_line(state: &ShellState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(APP_TITLE, styles::title_style()),
        Span::raw(" | "),
        Span::styled(
            format!("{} online", state.signals().presence().get()),
            styles::presence_style(),
        ),
    ];

    if state.signals().typing().is_typing() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(TYPING_HINT, styles::typing_style()));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("Hello, {}", state.session().display_name()),
        styles::greeting_style(),
    ));

    Line::from(spans)
}

fn status_line(state: &ShellState) -> String {
    let connectivity = state.connectivity_status().as_label();
    let hint = if state.session().is_active() {
        "Enter: send | Esc/Ctrl+C: quit"
    } else {
        "Enter: join | Esc/Ctrl+C: quit"
    };
    format!("connectivity: {connectivity} | {hint}")
}

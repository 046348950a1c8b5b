//! VocabBuilder TUI - Actor-based vocabulary trainer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use vocab_tui::app::AppActor;
use vocab_tui::config::Config;
use vocab_tui::constants::{APP_NAME, APP_VERSION};
use vocab_tui::messages::render::{ListBody, PracticeView, AddWordView};
use vocab_tui::messages::ui_events::{key_to_ui_event, FormField, InputMode};
use vocab_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use vocab_tui::network::{ApiClient, NetworkActor};
use vocab_tui::speech::Speaker;
use vocab_tui::ui::{centered_rect, render_input, render_rows, render_tabs};
use vocab_tui::view::Tab;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .context("log_file must name a file")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(api_url = %config.api_url, "Starting {} {}", APP_NAME, APP_VERSION);

    let client = ApiClient::new(&config.api_url, config.request_timeout())
        .with_context(|| format!("Invalid api_url {:?}", config.api_url))?;
    let speaker = Speaker::new(&config.speech);

    // Terminal setup
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(speaker, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.input_mode) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);
    draw_search_bar(f, state, main_chunks[1]);
    draw_list(f, state, main_chunks[2]);
    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if let Some(form) = &state.add_word {
        draw_add_word_popup(f, form, area);
    }

    if let Some(practice) = &state.practice {
        draw_practice_popup(f, practice, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(APP_NAME.len() as u16 + 2)])
        .split(area);

    let titles = vec![
        " 1:Browse ".to_string(),
        format!(" 2:Saved ({}) ", state.saved_count),
    ];
    let selected = match state.active_tab {
        Tab::Browse => 0,
        Tab::Saved => 1,
    };
    f.render_widget(render_tabs(titles, selected), chunks[0]);
    f.render_widget(
        Paragraph::new(APP_NAME)
            .style(Style::default().fg(Color::Cyan).bold())
            .right_aligned(),
        chunks[1],
    );
}

fn draw_search_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.input_mode == InputMode::Search;
    let content = if state.query.is_empty() && !is_focused {
        "Press / to search words..."
    } else {
        state.query.as_str()
    };
    f.render_widget(render_input(content, " Search ", is_focused), area);
}

fn draw_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let title_color = match state.active_tab {
        Tab::Browse => Color::Blue,
        Tab::Saved => Color::Magenta,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", state.section_title),
            Style::default().fg(title_color).bold(),
        ));

    match &state.body {
        ListBody::Loading => {
            let loading = Paragraph::new("Loading words...")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            f.render_widget(loading, area);
        }
        ListBody::Empty(message) => {
            let empty = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            f.render_widget(empty, area);
        }
        ListBody::Rows(rows) => {
            let list = List::new(render_rows(rows, state.selected_row)).block(block);
            let mut list_state = ListState::default().with_selected(state.selected_row);
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_busy {
        " Saving... "
    } else if state.is_loading {
        " Loading... "
    } else {
        match state.input_mode {
            InputMode::Search => " Type to filter | Enter/Esc:done | Ctrl+U:clear ",
            InputMode::Practice => " Enter:submit | Ctrl+P:pronounce | Esc:close ",
            InputMode::AddWord => " Tab:next field | Enter:add | Esc:cancel ",
            InputMode::Help => " Press any key to close ",
            InputMode::Normal => match state.active_tab {
                Tab::Browse => " s:save | p:pronounce | /:search | a:add word | 2:saved | ?:help | q:quit ",
                Tab::Saved => " Enter:practice | d:remove | p:pronounce | /:search | 1:browse | ?:help | q:quit ",
            },
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_practice_popup(f: &mut Frame, practice: &PracticeView, area: Rect) {
    let popup_area = centered_rect(70, 70, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" ✎ Practice: {} ", practice.english),
            Style::default().fg(Color::Magenta).bold(),
        ))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let input_title = if practice.submitting {
        " Saving... "
    } else {
        " Write a sentence using this word "
    };
    f.render_widget(
        render_input(&practice.draft, input_title, !practice.submitting && !practice.loading),
        chunks[0],
    );

    let previous: Vec<ListItem> = if practice.loading {
        vec![ListItem::new(Span::styled(
            "Loading sentences...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if practice.sentences.is_empty() {
        vec![ListItem::new(Span::styled(
            "No sentences yet. Be the first!",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        practice
            .sentences
            .iter()
            .map(|s| ListItem::new(format!("• {}", s)))
            .collect()
    };
    let list = List::new(previous).block(
        Block::default()
            .borders(Borders::TOP)
            .title(" Previous sentences "),
    );
    f.render_widget(list, chunks[1]);
}

fn draw_add_word_popup(f: &mut Frame, form: &AddWordView, area: Rect) {
    let popup_area = centered_rect(50, 40, area);

    let title = if form.submitting {
        " Add Word (saving...) "
    } else {
        " Add Word (Enter to add, Esc to cancel) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        render_input(&form.english, " English ", form.field == FormField::English),
        chunks[0],
    );
    f.render_widget(
        render_input(&form.bangla, " Bangla ", form.field == FormField::Bangla),
        chunks[1],
    );
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 VOCABBUILDER - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / Tab        Browse / Saved tab
   ↑ / ↓  j / k       Select word
   g / G              First / last word
   /                  Search (Esc clears)
   r                  Reload words

 WORDS
   s                  Save word (Browse)
   d                  Remove word (Saved)
   p                  Pronounce
   Enter              Practice (Saved)
   a                  Add a new word

 PRACTICE
   Enter              Submit sentence
   Ctrl+P             Pronounce
   Esc                Close

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

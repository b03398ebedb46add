use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portal_games::{CategoryKey, FilterSelection, PortalService, Provenance, SearchResults, SearchStatus};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Title,
    Detail,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub kind: LineKind,
    pub text: String,
}

impl ResultLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        ResultLine {
            kind,
            text: text.into(),
        }
    }
}

/// Flatten grouped results into display lines, in category order.
/// Gated-out and empty groups produce nothing.
pub fn result_lines(results: &SearchResults) -> Vec<ResultLine> {
    let mut lines = Vec::new();

    for key in CategoryKey::ALL {
        if results.count(key) == 0 {
            continue;
        }

        lines.push(ResultLine::new(
            LineKind::Header,
            format!("{} ({})", key.label(), results.count(key)),
        ));

        match key {
            CategoryKey::Personal => {
                for game in results.personal.iter().flatten() {
                    let status = game.status.as_deref().unwrap_or("-");
                    lines.push(ResultLine::new(
                        LineKind::Title,
                        format!("{} [{}] {}", game.title, game.genre, status),
                    ));
                    lines.push(ResultLine::new(LineKind::Detail, game.description.clone()));
                    lines.push(ResultLine::new(LineKind::Link, game.link.clone()));
                }
            }
            CategoryKey::Public => {
                for result in results.public.iter().flatten() {
                    let source = match result.provenance {
                        Provenance::Live => "Live API",
                        Provenance::Curated => "Kurasi",
                    };
                    lines.push(ResultLine::new(
                        LineKind::Title,
                        format!("{} [{}] <{}>", result.item.title, result.item.genre, source),
                    ));
                    lines.push(ResultLine::new(LineKind::Detail, result.item.description.clone()));
                    lines.push(ResultLine::new(LineKind::Link, result.item.link.clone()));
                }
            }
            CategoryKey::Events => {
                for event in results.events.iter().flatten() {
                    lines.push(ResultLine::new(
                        LineKind::Title,
                        format!("{} ({})", event.title, event.format),
                    ));
                    lines.push(ResultLine::new(
                        LineKind::Detail,
                        format!("{} · {} · {}", event.date, event.time, event.focus),
                    ));
                    lines.push(ResultLine::new(LineKind::Link, event.link.clone()));
                }
            }
            CategoryKey::Resources => {
                for resource in results.resources.iter().flatten() {
                    lines.push(ResultLine::new(
                        LineKind::Title,
                        format!("{} [{}]", resource.title, resource.tag),
                    ));
                    lines.push(ResultLine::new(LineKind::Detail, resource.description.clone()));
                    lines.push(ResultLine::new(LineKind::Link, resource.link.clone()));
                }
            }
            CategoryKey::Insight => {
                for insight in results.insight.iter().flatten() {
                    lines.push(ResultLine::new(LineKind::Title, insight.title.clone()));
                    lines.push(ResultLine::new(LineKind::Detail, insight.detail.clone()));
                }
            }
            CategoryKey::Community => {
                for highlight in results.community.iter().flatten() {
                    lines.push(ResultLine::new(LineKind::Title, highlight.title.clone()));
                    lines.push(ResultLine::new(LineKind::Detail, highlight.detail.clone()));
                }
            }
        }
    }

    lines
}

pub struct App {
    runtime: Runtime,
    portal: Arc<PortalService>,
    pub query: String,
    pub selection: FilterSelection,
    pub results: Option<SearchResults>,
    pub lines: Vec<ResultLine>,
    pub state: ListState,
}

impl App {
    pub fn new(runtime: Runtime, portal: Arc<PortalService>) -> Self {
        Self {
            runtime,
            portal,
            query: String::new(),
            selection: FilterSelection::all(),
            results: None,
            lines: Vec::new(),
            state: ListState::default(),
        }
    }

    pub fn run_search(&mut self) {
        let results = self
            .runtime
            .block_on(self.portal.search(&self.query, &self.selection));

        self.lines = result_lines(&results);
        self.results = Some(results);

        if self.lines.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    /// Toggle a category and re-run the current query
    pub fn toggle(&mut self, key: CategoryKey) {
        self.selection = self.selection.toggled(key);
        if self.results.is_some() {
            self.run_search();
        }
    }

    pub fn next(&mut self) {
        let len = self.lines.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.lines.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.query.clear()
                }
                KeyCode::Enter => app.run_search(),
                KeyCode::Backspace => {
                    app.query.pop();
                }
                KeyCode::F(n @ 1..=6) => app.toggle(CategoryKey::ALL[usize::from(n) - 1]),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                KeyCode::Char(c) => app.query.push(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Length(3), // Category toggles
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_input(f, chunks[0], app);
    render_filters(f, chunks[1], app);
    render_results(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("🔎 ", Style::default().fg(Color::Cyan)),
        Span::raw(app.query.as_str()),
        Span::styled("▏", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Pencarian Portal Games")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(input, area);
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];
    for (i, key) in CategoryKey::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }

        let enabled = app.selection.contains(*key);
        let mark = if enabled { "☑" } else { "☐" };
        let style = if enabled {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(
            format!("F{} {} {}", i + 1, mark, key.label()),
            style,
        ));
    }

    let filters = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Filter"));

    f.render_widget(filters, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .lines
        .iter()
        .map(|line| {
            let (prefix, style) = match line.kind {
                LineKind::Header => (
                    "",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                LineKind::Title => ("  ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                LineKind::Detail => ("    ", Style::default().fg(Color::Gray)),
                LineKind::Link => ("    ↗ ", Style::default().fg(Color::Green)),
            };
            ListItem::new(Line::from(Span::styled(format!("{}{}", prefix, line.text), style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Hasil"))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(list, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let message = match &app.results {
        None => "Ketik kata kunci lalu tekan Enter. Coba \"coding\", \"workshop\", atau \"math\".".to_string(),
        Some(results) => match results.status {
            SearchStatus::AwaitingInput => "Masukkan kata kunci untuk mulai mencari konten.".to_string(),
            SearchStatus::NoResults => format!(
                "Belum ada hasil untuk \"{}\". Coba kata lain atau aktifkan kategori lain.",
                results.query
            ),
            SearchStatus::Found => format!(
                "\"{}\" - {} hasil relevan berdasarkan filter aktif",
                results.query, results.total_count
            ),
        },
    };

    let status = Paragraph::new(vec![Line::from(vec![
        Span::styled(message, Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled(
            "Enter cari · F1-F6 filter · ↑↓ gulir · Esc keluar",
            Style::default().fg(Color::DarkGray),
        ),
    ])])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

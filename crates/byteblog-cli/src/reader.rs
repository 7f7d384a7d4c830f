//! Full-screen reader: posts on the left, the selected post on the right.

use anyhow::Result;
use byteblog_engine::{BlogPost, ContentParser, Render};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::terminal::TerminalRenderer;

/// Fetches a post's full body when the listing only carried a summary.
pub type PostLoader = Box<dyn FnMut(i64) -> Result<BlogPost> + Send>;

pub struct App {
    posts: Vec<BlogPost>,
    list_state: ListState,
    content: Vec<Line<'static>>,
    scroll: u16,
    parser: ContentParser,
    renderer: TerminalRenderer,
    loader: PostLoader,
}

impl App {
    pub fn new(posts: Vec<BlogPost>, parser: ContentParser, loader: PostLoader) -> Self {
        let mut app = Self {
            posts,
            list_state: ListState::default(),
            content: Vec::new(),
            scroll: 0,
            parser,
            renderer: TerminalRenderer::new(),
            loader,
        };

        // Select first post if available
        if !app.posts.is_empty() {
            app.list_state.select(Some(0));
            app.update_content_for_selection();
        }

        app
    }

    pub fn selected(&self) -> Option<&BlogPost> {
        self.list_state.selected().and_then(|i| self.posts.get(i))
    }

    pub fn content(&self) -> &[Line<'static>] {
        &self.content
    }

    pub fn next_post(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.posts.len(),
            None => 0,
        };
        self.select(i);
    }

    pub fn previous_post(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.posts.len() - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    pub fn scroll_down(&mut self, by: u16) {
        let max = u16::try_from(self.content.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(by).min(max);
    }

    pub fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
        self.scroll = 0;
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };

        if self.posts[index].content.trim().is_empty() {
            let id = self.posts[index].id;
            match (self.loader)(id) {
                Ok(full) => self.posts[index] = full,
                Err(e) => {
                    log::warn!("Failed to load post {id}: {e}");
                    self.content = vec![Line::from(format!("Error loading post: {e}"))];
                    return;
                }
            }
        }

        let post = &self.posts[index];
        let mut lines = vec![
            Line::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Line::styled(byline(post), Style::default().fg(Color::DarkGray)),
            Line::default(),
        ];
        lines.extend(self.renderer.render(&self.parser.parse(&post.content)));
        self.content = lines;
    }
}

fn byline(post: &BlogPost) -> String {
    let author = post
        .author
        .as_ref()
        .map(|a| a.display_name())
        .unwrap_or("Anonymous");
    match post.created_at.as_deref() {
        Some(date) => format!("{author} · {date}"),
        None => author.to_string(),
    }
}

pub fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_post(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_post(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(10),
                KeyCode::PageUp => app.scroll_up(10),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let items: Vec<ListItem> = app
        .posts
        .iter()
        .map(|post| ListItem::new(Line::from(Span::raw(post.title.clone()))))
        .collect();

    let posts = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Posts"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(posts, chunks[0], &mut app.list_state);

    let content_text = if app.content.is_empty() {
        vec![Line::from("No posts to show")]
    } else {
        app.content.clone()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Post"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("PgUp/PgDn: Scroll"),
    ]));
    f.render_widget(help, rows[1]);
}

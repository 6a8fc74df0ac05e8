use std::{io, time::Duration};

use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use piecework_core::{LocalWorkStore, MonthKey, MonthOverview, Theme};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use crate::report::money;

// --- THEME ---
struct Palette {
    primary: Color,
    muted: Color,
    text: Color,
    filled: Color,
    weekend: Color,
}

const LIGHT: Palette = Palette {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    filled: Color::Green,
    weekend: Color::Red,
};

const DARK: Palette = Palette {
    primary: Color::LightBlue,
    muted: Color::Gray,
    text: Color::Gray,
    filled: Color::LightGreen,
    weekend: Color::LightRed,
};

pub struct CalendarApp {
    pub month: MonthKey,
    pub overview: MonthOverview,
    pub person_count: u32,
    dark: bool,
}

impl CalendarApp {
    fn new(store: &mut LocalWorkStore, month: MonthKey) -> Self {
        Self {
            month,
            overview: store.month_overview(month),
            person_count: store.settings().person_count,
            dark: store.settings().theme == Theme::Dark,
        }
    }

    fn show(&mut self, store: &mut LocalWorkStore, month: MonthKey) {
        self.month = month;
        self.overview = store.month_overview(month);
    }

    fn palette(&self) -> &'static Palette {
        if self.dark { &DARK } else { &LIGHT }
    }
}

pub fn run(store: &mut LocalWorkStore, month: MonthKey) -> Result<()> {
    let mut app = CalendarApp::new(store, month);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &app)) {
            break Err(e.into());
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e.into()),
        }
        let event = match event::read() {
            Ok(event) => event,
            Err(e) => break Err(e.into()),
        };
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => {
                        let previous = app.month.previous();
                        app.show(store, previous);
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        let next = app.month.next();
                        app.show(store, next);
                    }
                    KeyCode::Char('t') => {
                        let today = piecework_core::DayKey::new(Local::now().date_naive());
                        app.show(store, today.month_key());
                    }
                    _ => {}
                }
            }
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn ui(frame: &mut Frame, app: &CalendarApp) {
    let theme = app.palette();
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Calendar + Sidebar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1), Constraint::Length(30)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "PIECEWORK",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(theme.text)),
        Span::styled(
            app.month.first_day().date().format(" %B %Y ").to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(theme.text)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);
    frame.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme.muted)),
        main_layout[0],
    );

    // --- Content ---
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75),
            Constraint::Length(1),
            Constraint::Percentage(25),
        ])
        .split(main_layout[1]);

    draw_grid(frame, app, content[0]);
    draw_summary(frame, app, content[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(theme.muted)),
        Span::styled("←/→ ", Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled("TODAY: ", Style::default().fg(theme.muted)),
        Span::styled("t", Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(theme.muted)),
        Span::styled("q", Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_grid(frame: &mut Frame, app: &CalendarApp, area: Rect) {
    let theme = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.muted))
        .title(" Calendar ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Monday-first weeks; leading blanks before the 1st.
    let lead = app.month.first_day().date().weekday().num_days_from_monday() as usize;
    let weeks = (lead + app.overview.days.len()).div_ceil(7);

    let mut row_constraints = vec![Constraint::Length(1)];
    row_constraints.extend(std::iter::repeat(Constraint::Ratio(1, weeks as u32)).take(weeks));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(row)
    };

    for (i, name) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].iter().enumerate() {
        let color = if i >= 5 { theme.weekend } else { theme.muted };
        frame.render_widget(
            Paragraph::new(*name).alignment(Alignment::Center).style(Style::default().fg(color)),
            columns(rows[0])[i],
        );
    }

    let today = Local::now().date_naive();
    for (index, cell) in app.overview.days.iter().enumerate() {
        let slot = lead + index;
        let (week, weekday) = (slot / 7, slot % 7);
        let area = columns(rows[week + 1])[weekday];

        let mut day_style = Style::default().fg(if weekday >= 5 { theme.weekend } else { theme.text });
        if cell.day.date() == today {
            day_style = day_style.add_modifier(Modifier::REVERSED);
        }
        let mut lines = vec![Line::from(Span::styled(cell.day.day().to_string(), day_style))];
        if cell.filled {
            lines.push(Line::from(Span::styled(
                money(cell.daily_total),
                Style::default().fg(theme.filled).add_modifier(Modifier::BOLD),
            )));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

fn draw_summary(frame: &mut Frame, app: &CalendarApp, area: Rect) {
    let theme = app.palette();
    let stats = &app.overview.stats;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.muted));

    let info_text = vec![
        Line::from(Span::styled("Month", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            label("Total:      "),
            Span::styled(money(stats.total), Style::default().fg(theme.filled).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            label("Premium:    "),
            Span::styled(money(stats.premium), Style::default().fg(theme.primary)),
        ]),
        Line::from(vec![
            label("Per person: "),
            Span::styled(money(stats.per_person), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Coefficient: "),
            Span::styled(format!("{:.2}", app.overview.coefficient), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            label("Persons:     "),
            Span::styled(app.person_count.to_string(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            label("Days logged: "),
            Span::styled(app.overview.filled_days().to_string(), Style::default().fg(theme.text)),
        ]),
    ];

    let summary = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.muted))
            .title(" Summary "),
    );
    frame.render_widget(summary, area);
}

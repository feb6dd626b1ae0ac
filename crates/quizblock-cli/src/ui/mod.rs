pub mod form;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quizblock_engine::{
    ConversionReport, FormAction, QuestionRecord, Session, SubmitOutcome, encode_records, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    io::{Stdout, stdout},
    path::PathBuf,
};

pub use form::{FormMode, FormState};

/// The interactive question builder: form contents plus the session it feeds.
pub struct FormApp {
    form: FormState,
    session: Session,
    output_dir: PathBuf,
    status: String,
    exports: Vec<PathBuf>,
    quit: bool,
}

impl FormApp {
    pub fn new(mode: FormMode, output_dir: PathBuf) -> Self {
        Self {
            form: FormState::new(mode),
            session: Session::new(),
            output_dir,
            status: String::new(),
            exports: Vec::new(),
            quit: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn exports(&self) -> &[PathBuf] {
        &self.exports
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.store(),
                KeyCode::Char('g') => self.generate(),
                KeyCode::Char('c') => self.quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }
    }

    /// Stores the current form in the session and clears it.
    fn store(&mut self) {
        if self.form.mode() == FormMode::Single {
            self.status = "Single question mode: press Ctrl-G to export".to_string();
            return;
        }

        match self.session.submit(&self.form.submission(FormAction::Next)) {
            Ok(SubmitOutcome::Stored { id }) => {
                self.status = format!(
                    "Stored question {id} ({} in session)",
                    self.session.len()
                );
                self.form.clear();
            }
            Ok(SubmitOutcome::Exported { .. }) => {}
            Err(e) => self.status = e.to_string(),
        }
    }

    fn generate(&mut self) {
        let records = match self.form.mode() {
            FormMode::Single => {
                let record = self.form.submission(FormAction::Generate).into_record();
                vec![record]
            }
            FormMode::Session if self.form.is_blank() => {
                if self.session.is_empty() {
                    self.status = "Nothing to export".to_string();
                    return;
                }
                self.session.flush_all()
            }
            FormMode::Session => {
                match self.session.submit(&self.form.submission(FormAction::Generate)) {
                    Ok(SubmitOutcome::Exported { records, .. }) => records,
                    Ok(SubmitOutcome::Stored { .. }) => return,
                    Err(e) => {
                        self.status = e.to_string();
                        return;
                    }
                }
            }
        };

        match self.export(records) {
            Ok((path, report)) => {
                self.status = format!("Wrote {} ({})", path.display(), report.summary());
                self.exports.push(path);
                self.form.clear();
            }
            Err(e) => self.status = format!("Export failed: {e}"),
        }
    }

    fn export(&self, records: Vec<QuestionRecord>) -> Result<(PathBuf, ConversionReport)> {
        let mut report = ConversionReport::default();
        let rows = encode_records(records, &mut report);
        let path = io::unique_export_path(&self.output_dir, &Local::now());
        io::write_rows(&path, &rows)?;
        Ok((path, report))
    }
}

pub fn run(mode: FormMode, output_dir: PathBuf) -> Result<Vec<PathBuf>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = FormApp::new(mode, output_dir);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(app.exports)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut FormApp) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &FormApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = match app.form().mode() {
        FormMode::Single => "New question".to_string(),
        FormMode::Session => format!(
            "Question {} ({} in session)",
            app.session().next_id(),
            app.session().len()
        ),
    };

    let lines: Vec<Line> = app
        .form()
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let label_style = if i == app.form().focus() {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Line::from(vec![
                Span::styled(format!("{:>20}", field.label), label_style),
                Span::raw(": "),
                Span::raw(field.value.clone()),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(form, chunks[0]);

    let status = Paragraph::new(app.status().to_string())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[1]);

    let help = match app.form().mode() {
        FormMode::Single => "Tab/↓: Next field | Shift-Tab/↑: Previous | Ctrl-G: Export | Esc: Quit",
        FormMode::Session => {
            "Tab/↓: Next field | Shift-Tab/↑: Previous | Ctrl-N: Store | Ctrl-G: Export | Esc: Quit"
        }
    };
    f.render_widget(Paragraph::new(Line::from(help)), chunks[2]);
}

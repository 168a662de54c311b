//! SQL Demo: a scripted "ask your database" session in the terminal.
//!
//! The demo types a question, streams an answer, writes the SQL, and shows
//! results. Touch any key or click and it stops, leaving you in control.
//!
//! Press 'r' to replay, 'q' or Escape to quit.
//! Set `SHOWREEL_LOG=debug` to write sequencer logs to `showreel-demo.log`.

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use showreel::{
    Control, EffectError, EffectHandlers, InputEvent, KeyCode, Mode, Player, PlayerConfig, Script,
    Sequencer, SequencerConfig, Signal, Step, ViewId,
};
use std::io::{self, Write};
use std::time::Duration;

const VIEWS: [&str; 3] = ["chat", "sql", "results"];

const RESULTS: [&str; 5] = [
    "Acme Corp        $1,204,330",
    "Globex           $  980,112",
    "Initech          $  712,045",
    "Umbrella         $  655,870",
    "Hooli            $  590,400",
];

fn script() -> Script {
    let ms = Duration::from_millis;
    Script::new(vec![
        Step::effect("clear", None, ms(800)),
        Step::navigate("chat", ms(400)),
        Step::type_text("Which customers spent the most last quarter?", ms(2400)),
        Step::effect("submit-prompt", None, ms(600)),
        Step::stream_text(
            "I'll join orders with customers and sum order totals for Q3.",
            ms(1500),
        ),
        Step::navigate("sql", ms(500)),
        Step::type_text(
            "SELECT c.name, SUM(o.total) AS spent\nFROM orders o JOIN customers c ON c.id = o.customer_id\nGROUP BY c.name ORDER BY spent DESC LIMIT 5;",
            ms(4000),
        )
        .with_unit_delay(ms(25)),
        Step::effect("run-query", None, ms(900)),
        Step::navigate("results", ms(2500)),
        Step::finish(),
    ])
}

/// What the terminal shows.
#[derive(Default)]
struct Screen {
    view: String,
    prompt: String,
    submitted: Option<String>,
    answer: String,
    sql: String,
    status: String,
    dirty: bool,
}

impl EffectHandlers for Screen {
    fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
        if !VIEWS.contains(&view.as_str()) {
            return Err(EffectError::UnknownView(view.to_string()));
        }
        self.view = view.to_string();
        self.dirty = true;
        Ok(())
    }

    fn on_text_partial(&mut self, text: &str) {
        let target = if self.view == "sql" {
            &mut self.sql
        } else {
            &mut self.prompt
        };
        text.clone_into(target);
        self.dirty = true;
    }

    fn on_stream_partial(&mut self, text: &str) {
        text.clone_into(&mut self.answer);
        self.dirty = true;
    }

    fn on_effect(&mut self, name: &str, _payload: Option<&str>) -> Result<(), EffectError> {
        match name {
            "clear" => *self = Self::default(),
            "submit-prompt" => self.submitted = Some(std::mem::take(&mut self.prompt)),
            "run-query" => self.status = "Running query...".to_string(),
            _ => return Err(EffectError::Unhandled(name.to_string())),
        }
        self.dirty = true;
        Ok(())
    }

    fn on_finish(&mut self) {
        self.status = "5 rows in 42ms".to_string();
        self.dirty = true;
    }

    fn on_interrupt(&mut self) {
        self.status = "You're in control. Press 'r' to replay.".to_string();
        self.dirty = true;
    }
}

fn draw(out: &mut impl Write, screen: &Screen, mode: Mode) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let tabs: Vec<String> = VIEWS
        .iter()
        .map(|v| if *v == screen.view { format!("[{v}]") } else { format!(" {v} ") })
        .collect();
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print("Showreel SQL Demo  "),
        SetAttribute(Attribute::Reset),
        Print(tabs.join(" ")),
    )?;

    let mut lines: Vec<String> = Vec::new();
    match screen.view.as_str() {
        "sql" => lines.extend(screen.sql.lines().map(str::to_string)),
        "results" => {
            lines.push("name             spent".to_string());
            lines.extend(RESULTS.iter().map(|r| (*r).to_string()));
        }
        _ => {
            if let Some(question) = &screen.submitted {
                lines.push(format!("you> {question}"));
                lines.push(format!(" ai> {}", screen.answer));
            }
            lines.push(String::new());
            lines.push(format!("> {}_", screen.prompt));
        }
    }

    for (row, line) in (2u16..).zip(&lines) {
        queue!(out, cursor::MoveTo(2, row), Print(line))?;
    }

    let (_, height) = terminal::size()?;
    let mode = match mode {
        Mode::Autoplay => "autoplay",
        Mode::Interactive => "interactive",
    };
    queue!(
        out,
        cursor::MoveTo(0, height.saturating_sub(1)),
        SetAttribute(Attribute::Dim),
        Print(format!("{mode} | {} | r: replay  q: quit", screen.status)),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

fn init_logging() {
    if std::env::var_os("SHOWREEL_LOG").is_none() {
        return;
    }
    if let Ok(file) = std::fs::File::create("showreel-demo.log") {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("SHOWREEL_LOG"))
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}

fn main() -> io::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let sequencer = Sequencer::with_config(
        script(),
        Screen::default(),
        SequencerConfig {
            loop_pause: Some(Duration::from_secs(4)),
            ..SequencerConfig::default()
        },
    );
    let mut player = Player::new(sequencer, PlayerConfig::default());

    let mut failure = None;
    player.run(|sequencer, signal| {
        let control = match signal {
            Signal::Input(InputEvent::Key {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }) => Control::Quit,
            Signal::Input(InputEvent::Key {
                code: KeyCode::Char('r'),
                ..
            }) => Control::Replay,
            Signal::Input(InputEvent::Resize { .. }) => {
                sequencer.handlers_mut().dirty = true;
                Control::Continue
            }
            _ => Control::Continue,
        };

        if sequencer.handlers().dirty {
            if let Err(e) = draw(&mut stdout, sequencer.handlers(), sequencer.mode()) {
                failure = Some(e);
                return Control::Quit;
            }
            sequencer.handlers_mut().dirty = false;
        }
        control
    });

    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    failure.map_or(Ok(()), Err)
}

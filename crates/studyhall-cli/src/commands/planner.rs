//! Interactive study planner.
//!
//! One task owns the controller and the goal list. It waits on stdin for
//! commands and, while the timer runs, on a one-second interval that feeds
//! `SessionController::tick`.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Args;
use studyhall_core::planner::{format_clock, GoalTracklist, SessionController, SessionType};
use studyhall_core::{Config, Event};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

#[derive(Args)]
pub struct PlannerArgs {
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
    /// Don't ring the terminal bell when a session ends
    #[arg(long)]
    quiet: bool,
}

const HELP: &str = "\
commands:
  start | pause | reset         control the timer
  focus | short | long          switch session type (while paused)
  goal <text>                   add a study goal
  done <n>                      toggle goal number n
  goals                         list goals
  status                        show timer state
  help                          this text
  quit                          leave the planner";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlannerCommand {
    Start,
    Pause,
    Reset,
    Switch(SessionType),
    AddGoal(String),
    ToggleGoal(usize),
    Goals,
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<PlannerCommand, String> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "start" | "s" => Ok(PlannerCommand::Start),
        "pause" | "p" => Ok(PlannerCommand::Pause),
        "reset" | "r" => Ok(PlannerCommand::Reset),
        "focus" | "short" | "long" => word
            .parse::<SessionType>()
            .map(PlannerCommand::Switch)
            .map_err(|e| e.to_string()),
        "switch" => rest
            .parse::<SessionType>()
            .map(PlannerCommand::Switch)
            .map_err(|e| e.to_string()),
        // Goal text is passed through untouched; blank text is the tracklist's call.
        "goal" | "add" => Ok(PlannerCommand::AddGoal(rest.to_string())),
        "done" | "toggle" => rest
            .trim()
            .parse()
            .map(PlannerCommand::ToggleGoal)
            .map_err(|_| format!("expected a goal number, got '{}'", rest.trim())),
        "goals" | "g" => Ok(PlannerCommand::Goals),
        "status" | "" => Ok(PlannerCommand::Status),
        "help" | "?" => Ok(PlannerCommand::Help),
        "quit" | "exit" | "q" => Ok(PlannerCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Owns the planner state for the lifetime of the session.
struct PlannerView {
    controller: SessionController,
    goals: GoalTracklist,
}

enum Outcome {
    Event(Event),
    Text(String),
    Ignored(&'static str),
    Quit,
}

impl PlannerView {
    fn new() -> Self {
        Self {
            controller: SessionController::new(),
            goals: GoalTracklist::new(),
        }
    }

    fn handle(&mut self, command: PlannerCommand) -> Outcome {
        let event = match command {
            PlannerCommand::Start => self.controller.start().ok_or(if self.controller.is_running() {
                "already running"
            } else {
                "nothing left to run; reset first"
            }),
            PlannerCommand::Pause => self.controller.pause().ok_or("already paused"),
            PlannerCommand::Reset => Ok(self.controller.reset()),
            PlannerCommand::Switch(t) => self
                .controller
                .switch_type(t)
                .ok_or("pause the timer before switching sessions"),
            PlannerCommand::AddGoal(text) => self.goals.add_goal(&text).ok_or("goal text is empty"),
            PlannerCommand::ToggleGoal(n) => match self.goals.nth(n).map(|g| g.id) {
                Some(id) => self.goals.toggle_goal(id).ok_or("no such goal"),
                None => Err("no such goal"),
            },
            PlannerCommand::Goals => return Outcome::Text(self.render_goals()),
            PlannerCommand::Status => return Outcome::Text(self.render_status()),
            PlannerCommand::Help => return Outcome::Text(HELP.to_string()),
            PlannerCommand::Quit => return Outcome::Quit,
        };
        match event {
            Ok(event) => Outcome::Event(event),
            Err(reason) => Outcome::Ignored(reason),
        }
    }

    fn render_status(&self) -> String {
        let state = self.controller.state();
        let stats = self.controller.stats();
        format!(
            "{:<11} {}  [{}]  completed: {}  focus today: {} min",
            state.session_type.label(),
            format_clock(state.remaining_secs),
            if state.running { "running" } else { "paused" },
            stats.completed_focus_count,
            stats.focus_minutes(),
        )
    }

    fn render_goals(&self) -> String {
        if self.goals.is_empty() {
            return "No goals yet. Add one to get started!".to_string();
        }
        let mut out = format!(
            "Study goals ({}/{} done)",
            self.goals.completed_count(),
            self.goals.len()
        );
        for (i, goal) in self.goals.goals().iter().enumerate() {
            let mark = if goal.completed { 'x' } else { ' ' };
            out.push_str(&format!("\n  [{mark}] {}. {}", i + 1, goal.text));
        }
        out
    }

    fn describe(&self, event: &Event) -> String {
        match event {
            Event::TimerStarted { session_type, remaining_secs, .. } => {
                format!("▶ {session_type} started ({} left)", format_clock(*remaining_secs))
            }
            Event::TimerPaused { session_type, remaining_secs, .. } => {
                format!("⏸ {session_type} paused at {}", format_clock(*remaining_secs))
            }
            Event::TimerReset { session_type, remaining_secs, .. } => {
                format!("↺ {session_type} reset to {}", format_clock(*remaining_secs))
            }
            Event::SessionSwitched { to, remaining_secs, .. } => {
                format!("switched to {to} ({})", format_clock(*remaining_secs))
            }
            Event::SessionCompleted { finished, next, completed_focus_count, .. } => format!(
                "✔ {finished} complete. Next up: {next}. Completed focus sessions: {completed_focus_count}. Type 'start' when ready."
            ),
            Event::GoalAdded { text, .. } => format!("+ goal {}: {text}", self.goals.len()),
            Event::GoalToggled { id, completed, .. } => {
                let text = self.goals.get(*id).map(|g| g.text.as_str()).unwrap_or_default();
                if *completed {
                    format!("[x] {text}")
                } else {
                    format!("[ ] {text}")
                }
            }
            Event::StateSnapshot { .. } => self.render_status(),
        }
    }
}

struct Printer<W> {
    out: W,
    json: bool,
    bell: bool,
    live: bool,
    /// A `\r` countdown line is on screen and must be cleared first.
    dirty: bool,
}

impl<W: Write> Printer<W> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        if self.dirty {
            writeln!(self.out)?;
            self.dirty = false;
        }
        writeln!(self.out, "{text}")
    }

    fn event(&mut self, view: &PlannerView, event: &Event) -> io::Result<()> {
        tracing::debug!(?event, "planner event");
        if self.json {
            let json = serde_json::to_string(event)?;
            return self.line(&json);
        }
        if self.bell && matches!(event, Event::SessionCompleted { .. }) {
            write!(self.out, "\x07")?;
        }
        self.line(&view.describe(event))
    }

    fn countdown(&mut self, view: &PlannerView) -> io::Result<()> {
        if self.json || !self.live {
            return Ok(());
        }
        write!(
            self.out,
            "\r{} {}  ",
            view.controller.session_type().label(),
            format_clock(view.controller.remaining_secs())
        )?;
        self.out.flush()?;
        self.dirty = true;
        Ok(())
    }
}

/// Forward stdin lines from a plain thread. A blocked read there never holds
/// up runtime shutdown; the channel closes at EOF.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the planner until `quit`, end of input, or `shutdown` resolves.
async fn drive<W, F>(
    view: &mut PlannerView,
    printer: &mut Printer<W>,
    lines: &mut mpsc::Receiver<String>,
    shutdown: F,
) -> io::Result<()>
where
    W: Write,
    F: Future,
{
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick(), if view.controller.is_running() => {
                match view.controller.tick() {
                    Some(event) => printer.event(view, &event)?,
                    None => printer.countdown(view)?,
                }
            }
            line = lines.recv() => {
                let Some(line) = line else { break };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        printer.line(&message)?;
                        continue;
                    }
                };
                match view.handle(command) {
                    Outcome::Event(event) => {
                        if matches!(event, Event::TimerStarted { .. }) {
                            // First decrement lands a full second after start.
                            ticker.reset();
                        }
                        printer.event(view, &event)?;
                    }
                    Outcome::Text(text) => printer.line(&text)?,
                    Outcome::Ignored(reason) => printer.line(&format!("({reason})"))?,
                    Outcome::Quit => break,
                }
            }
            _ = &mut shutdown => break,
        }
    }
    Ok(())
}

pub async fn run(args: PlannerArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = PlannerView::new();
    let mut printer = Printer {
        out: io::stdout(),
        json: args.json,
        bell: config.planner.bell && !args.quiet,
        live: config.planner.live_countdown,
        dirty: false,
    };

    if printer.json {
        printer.event(&view, &view.controller.snapshot())?;
    } else {
        printer.line(HELP)?;
        printer.line(&view.render_status())?;
    }

    let mut lines = stdin_lines();
    drive(&mut view, &mut printer, &mut lines, tokio::signal::ctrl_c()).await?;

    if !printer.json {
        printer.line(&view.render_status())?;
    }
    Ok(())
}

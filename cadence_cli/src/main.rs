use cadence_core::journal::read_records;
use cadence_core::progress::{next_exercise, overall_progress, phase_progress};
use cadence_core::*;
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Interval workout timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

/// Which program to use
#[derive(Args, Clone)]
struct ProgramArgs {
    /// Built-in program id (see `cadence list`)
    #[arg(long, conflicts_with = "file")]
    program: Option<String>,

    /// Program file (.json or .toml)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in programs
    List,

    /// Show the phase plan and total time of a program
    Plan {
        #[command(flatten)]
        program: ProgramArgs,
    },

    /// Run a workout (default)
    Run {
        #[command(flatten)]
        program: ProgramArgs,

        /// Milliseconds per workout second (overrides config)
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Only print the final summary
        #[arg(long)]
        quiet: bool,

        /// Do not record the workout in the journal
        #[arg(long)]
        no_journal: bool,
    },

    /// Show recent workouts
    History {
        /// Number of records to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

const DEFAULT_PROGRAM: &str = "quick";

fn main() -> Result<()> {
    // Initialize logging
    cadence_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    match cli.command {
        Some(Commands::List) => cmd_list(),
        Some(Commands::Plan { program }) => cmd_plan(&program),
        Some(Commands::Run {
            program,
            tick_ms,
            quiet,
            no_journal,
        }) => cmd_run(&program, tick_ms, quiet, no_journal, &config),
        Some(Commands::History { limit }) => cmd_history(limit, &config),
        None => {
            let program = ProgramArgs {
                program: None,
                file: None,
            };
            cmd_run(&program, None, false, false, &config)
        }
    }
}

fn resolve_program(args: &ProgramArgs) -> Result<Program> {
    match (&args.program, &args.file) {
        (_, Some(path)) => load_program_file(path),
        (Some(id), None) => Ok(find_program(id)?.clone()),
        (None, None) => Ok(find_program(DEFAULT_PROGRAM)?.clone()),
    }
}

fn cmd_list() -> Result<()> {
    for (id, program) in get_default_library() {
        println!(
            "{:<10} {:<20} {} sets  {}",
            id,
            program.name,
            program.sets,
            clock(total_workout_time(program))
        );
    }
    Ok(())
}

fn cmd_plan(args: &ProgramArgs) -> Result<()> {
    let program = resolve_program(args)?;
    program.ensure_valid()?;

    println!("{}", program.name);
    println!();
    for planned in phase_plan(&program) {
        let detail = match planned.phase {
            Phase::Working => program
                .exercises
                .get(planned.exercise_index)
                .map(|e| e.name.as_str())
                .unwrap_or(""),
            _ => "",
        };
        println!(
            "  set {}  {:<10} {:>5}s  {}",
            planned.set,
            planned.phase.label(),
            planned.duration,
            detail
        );
    }

    let total = total_workout_time(&program);
    println!();
    println!("Total: {}s ({})", total, clock(total));
    Ok(())
}

fn cmd_run(
    args: &ProgramArgs,
    tick_ms: Option<u64>,
    quiet: bool,
    no_journal: bool,
    config: &Config,
) -> Result<()> {
    let program = resolve_program(args)?;
    let tick_period = match tick_ms {
        Some(ms) => Duration::from_millis(ms),
        None => config.timer.tick_period(),
    };

    let renderer = TerminalRenderer {
        quiet,
        bell: config.sound.enabled && !quiet,
        last_phase: None,
    };
    let driver = Driver::new(program.clone(), renderer)?.with_tick_period(tick_period)?;
    let total = driver.session().state().total_workout_time;

    if !quiet {
        println!("{} ({} total)", program.name, clock(total));
        println!("Keys: p + Enter pause, r + Enter resume, q + Enter stop");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    // Start is queued ahead of any keyboard command; the sender held here
    // keeps the channel open after stdin reaches EOF.
    let (tx, rx) = mpsc::channel(16);
    tx.try_send(Command::Start)
        .map_err(|e| Error::Driver(format!("Failed to start workout: {}", e)))?;
    spawn_keyboard_reader(tx.clone());

    let started_at = chrono::Utc::now();
    let mut journaled: Result<()> = Ok(());
    runtime.block_on(driver.run(rx, |finish| {
        println!();
        match finish.reason {
            FinishReason::Completed => println!("✓ Workout complete!"),
            FinishReason::Aborted => println!("Workout stopped."),
        }
        println!("  Elapsed: {} of {}", clock(finish.elapsed_seconds), clock(total));

        if !no_journal {
            let record = WorkoutRecord::new(&program.name, started_at, finish, total);
            let mut sink = JsonlSink::new(config.journal_path());
            journaled = sink.append(&record);
        }
    }));
    drop(tx);

    journaled
}

fn cmd_history(limit: usize, config: &Config) -> Result<()> {
    let records = read_records(&config.journal_path())?;
    if records.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    for record in records.iter().rev().take(limit) {
        println!(
            "{}  {:<20} {:<9} {} / {}",
            record.started_at.format("%Y-%m-%d %H:%M"),
            record.program_name,
            record.outcome.to_string(),
            clock(record.elapsed_seconds),
            clock(record.total_seconds)
        );
    }
    Ok(())
}

/// Forward keyboard commands from stdin; EOF just ends the reader
fn spawn_keyboard_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let cmd = match line.trim().to_lowercase().as_str() {
                "p" => Command::Pause,
                "r" => Command::Resume,
                "q" => Command::Stop,
                _ => continue,
            };
            if tx.blocking_send(cmd).is_err() {
                break;
            }
        }
    });
}

struct TerminalRenderer {
    quiet: bool,
    bell: bool,
    last_phase: Option<(Phase, u32, usize)>,
}

impl SessionObserver for TerminalRenderer {
    fn on_state(&mut self, program: &Program, state: &TimerState) {
        if self.quiet || (state.status == Status::Idle && !state.is_done()) {
            return;
        }

        let position = (state.phase, state.current_set, state.current_exercise_index);
        if self.last_phase != Some(position) {
            if self.last_phase.is_some() {
                println!();
            }
            self.last_phase = Some(position);
        }

        let title = match state.phase {
            Phase::Working => program
                .exercises
                .get(state.current_exercise_index)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            _ => state.phase.label().to_string(),
        };
        let preview = match state.phase {
            Phase::Done => String::new(),
            _ => next_exercise(program, state)
                .map(|e| format!("  next: {}", e.name))
                .unwrap_or_default(),
        };
        let paused = if state.status == Status::Paused { " [paused]" } else { "" };

        print!(
            "\r{:<20} {}  set {}/{}  {} {:>3.0}%  total {:>3.0}%{}{}   ",
            title,
            clock(state.time_left),
            state.current_set,
            program.sets,
            bar(phase_progress(program, state), 10),
            phase_progress(program, state) * 100.0,
            overall_progress(state) * 100.0,
            preview,
            paused
        );
        let _ = io::stdout().flush();
    }

    fn on_notification(&mut self, notification: Notification) {
        if !self.bell {
            return;
        }
        print!("{}", cue(notification));
        let _ = io::stdout().flush();
    }
}

/// Bell pattern per cue: three to start, one per countdown second, two at phase end
fn cue(notification: Notification) -> &'static str {
    match notification {
        Notification::Start => "\x07\x07\x07",
        Notification::Countdown => "\x07",
        Notification::EndOfPhase => "\x07\x07",
    }
}

fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_notification_has_its_own_cue() {
        let start = cue(Notification::Start);
        let countdown = cue(Notification::Countdown);
        let end = cue(Notification::EndOfPhase);

        assert_ne!(start, countdown);
        assert_ne!(start, end);
        assert_ne!(countdown, end);
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(clock(0), "0:00");
        assert_eq!(clock(125), "2:05");
    }
}

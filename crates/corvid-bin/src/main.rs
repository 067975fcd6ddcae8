//! corvid entrypoint.
//!
//! Loads a document and configuration, replays a JSON script of actions
//! against the engine, then writes the resulting text to `--output` or
//! stdout. The final status message goes to stderr.
use anyhow::{Context, Result, bail};
use clap::Parser;
use core_actions::io_ops::{self, OpenFileResult, WriteFileResult};
use core_actions::{Action, dispatch};
use core_config::{Config, load_from};
use core_state::{EditorState, Locator, Settings, StatusStyle};
use core_syntax::Language;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "corvid.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "corvid", version, about = "Scriptable modal text editing engine")]
struct Args {
    /// Document to edit. Created on save if it does not exist.
    pub path: Option<PathBuf>,
    /// JSON array of actions to apply, e.g. `["join_lines", {"cursor_down": {}}]`.
    #[arg(long = "script")]
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `corvid.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write the resulting text here instead of stdout.
    #[arg(long = "output")]
    pub output: Option<PathBuf>,
    /// Seconds to wait for a background task left running by the script.
    #[arg(long = "task-timeout", default_value_t = 30)]
    pub task_timeout: u64,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

/// What a script run left behind.
#[derive(Debug, PartialEq, Eq)]
struct ScriptOutcome {
    dispatched: usize,
    quit: bool,
    task_timed_out: bool,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn load_editor_state(args: &Args) -> Result<EditorState> {
        let config = load_from(args.config.clone())?;
        let mut state = EditorState::new(settings_from_config(&config));
        if let Some(path) = args.path.as_ref() {
            if path.exists() {
                if io_ops::open_file(&mut state, path) == OpenFileResult::Error {
                    bail!("could not open {}", path.display());
                }
            } else {
                info!(target: "runtime.startup", "new_document");
                state.load_document(&path.to_string_lossy(), "", &Locator::Position(0));
            }
        }
        info!(
            target: "runtime.startup",
            chars = state.buffer().document().num_chars(),
            config_override = args.config.is_some(),
            config_found = config.path.is_some(),
            "bootstrap_complete"
        );
        Ok(state)
    }
}

/// Engine settings for a loaded configuration.
fn settings_from_config(config: &Config) -> Settings {
    let language = config.file.syntax.language.as_deref().and_then(|name| {
        let parsed = Language::parse(name);
        if parsed.is_none() {
            warn!(target: "config", language = name, "unknown_language_ignored");
        }
        parsed
    });
    Settings {
        tab_size: config.effective_tab_size(),
        tab_expand: config.file.editor.tab_expand,
        auto_indent: config.file.editor.auto_indent,
        language,
        search_history_limit: config.file.search.history_limit,
    }
}

fn read_script(path: &Path) -> Result<Vec<Action>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing script {}", path.display()))
}

/// Dispatch actions in order until the script ends or an action quits, then
/// give a running task up to `task_timeout` to finish.
fn run_script(
    state: &mut EditorState,
    actions: &[Action],
    task_timeout: Duration,
) -> ScriptOutcome {
    let mut outcome = ScriptOutcome {
        dispatched: 0,
        quit: false,
        task_timed_out: false,
    };
    for action in actions {
        let result = dispatch(state, action);
        outcome.dispatched += 1;
        if result.quit {
            outcome.quit = true;
            break;
        }
    }
    outcome.task_timed_out = !state.wait_for_task_timeout(task_timeout);
    debug!(
        target: "runtime",
        dispatched = outcome.dispatched,
        quit = outcome.quit,
        task_timed_out = outcome.task_timed_out,
        "script_finished"
    );
    outcome
}

fn write_output(state: &mut EditorState, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => match io_ops::write_file(state, Some(path)) {
            WriteFileResult::Success => Ok(()),
            WriteFileResult::NoFilename | WriteFileResult::Error => {
                bail!("could not write {}", path.display())
            }
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(state.buffer().text().as_bytes())
                .context("writing to stdout")?;
            stdout.flush().context("flushing stdout")
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let mut state = AppStartup::load_editor_state(&args)?;
    let actions = read_script(&args.script)?;
    run_script(&mut state, &actions, Duration::from_secs(args.task_timeout));
    write_output(&mut state, args.output.as_deref())?;

    if let Some(msg) = state.status_msg() {
        let prefix = match msg.style {
            StatusStyle::Success => "",
            StatusStyle::Error => "error: ",
        };
        eprintln!("{prefix}{}", msg.text);
    }
    info!(target: "runtime", "shutdown");
    drop(startup.log_guard.take());
    Ok(())
}

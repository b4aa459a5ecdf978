use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use stepper_tui::app::App;
use stepper_tui::config::Config;
use stepper_tui::logging;
use stepper_tui::stepper::{StepperController, StepperEvent, StepperLayout, Transition};
use stepper_tui::ui::terminal_guard::install_panic_hook;
use stepper_tui::ui::Stepper;

#[derive(Parser)]
#[command(name = "stepper")]
#[command(about = "Multi-step navigation widget for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Layout file (TOML) describing indicators, steps and actions
    #[arg(short, long, global = true)]
    layout: Option<PathBuf>,

    /// Initial step (overrides config and layout)
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    step: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply moves headlessly and print each event and resulting state
    Walk {
        /// Moves to apply in order: next, prev, to:N
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },

    /// Print the built-in layout as TOML
    Layout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let _logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let layout = match &cli.layout {
        Some(path) => StepperLayout::load(path)?,
        None => StepperLayout::default(),
    };
    let initial_step = cli
        .step
        .or(layout.initial_step)
        .unwrap_or(config.stepper.initial_step);

    match cli.command {
        Some(Commands::Walk { moves }) => {
            cmd_walk(&config, &layout, initial_step, &moves)?;
        }
        Some(Commands::Layout) => {
            let text = StepperLayout::default()
                .to_toml_string()
                .context("Failed to serialize layout")?;
            print!("{}", text);
        }
        None => {
            install_panic_hook();
            tracing::info!(initial_step, steps = layout.step_count(), "starting stepper");
            let mut app = App::new(&config, &layout, initial_step);
            if let Some(message) = app.run()? {
                println!("{}", message);
            }
        }
    }

    Ok(())
}

fn cmd_walk(
    config: &Config,
    layout: &StepperLayout,
    initial_step: i64,
    moves: &[String],
) -> Result<()> {
    let transitions = moves
        .iter()
        .map(|m| m.parse::<Transition>())
        .collect::<Result<Vec<_>, _>>()?;

    let controller =
        StepperController::with_chain_limit(initial_step, config.stepper.max_chained_transitions);
    let stepper = Stepper::from_layout(layout, controller);
    let api = stepper.controller().api();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    api.on(StepperEvent::Next, move |step| sink.borrow_mut().push(step));

    print_state(&stepper, "start");
    for transition in transitions {
        stepper.controller().request(transition);
        for step in events.borrow_mut().drain(..) {
            println!("  event next -> {}", step);
        }
        print_state(&stepper, &format!("{:?}", transition).to_lowercase());
    }

    Ok(())
}

fn print_state(stepper: &Stepper, label: &str) {
    let snapshot = stepper.snapshot();
    let panel = stepper
        .step_list()
        .and_then(|list| list.active_step(&snapshot))
        .map_or_else(|| "-".to_string(), |(_, step)| step.title.clone());
    let actions = stepper
        .actions()
        .map(|bar| {
            bar.visible(&snapshot)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    println!(
        "{:<8} step={} of {} panel={} actions=[{}]",
        label, snapshot.active_step, snapshot.items_count, panel, actions
    );
}

use std::time::Duration;

use clap::{Args, Subcommand};
use serde_json::json;
use studydock_core::runtime::TICK_PERIOD;
use studydock_core::{AudioCueKind, Config, Size, TickDriver, WidgetConfig, WidgetController, WidgetKind};
use tokio::io::{AsyncBufReadExt, BufReader};

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

#[derive(Args, Clone, Debug, Default)]
pub struct SessionArgs {
    /// Study phase length in minutes
    #[arg(long)]
    study: Option<u32>,
    /// Break phase length in minutes
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Number of study/break rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// Play no cues
    #[arg(long)]
    muted: bool,
    /// Finish right after the last study phase
    #[arg(long)]
    skip_final_break: bool,
}

impl SessionArgs {
    /// Saved config with command-line overrides applied.
    fn widget_config(&self) -> WidgetConfig {
        let mut config = Config::load_or_default().widget_config(WidgetKind::Timer);
        if let Some(study) = self.study {
            config.study_minutes = study;
        }
        if let Some(minutes) = self.break_minutes {
            config.break_minutes = minutes;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        config.muted |= self.muted;
        config.skip_final_break |= self.skip_final_break;
        config
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a session in real time. Stdin: p = start/pause, r = reset, q = quit
    Run {
        #[command(flatten)]
        session: SessionArgs,
        /// Clock multiplier, e.g. 60 runs a minute per second
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Run a number of ticks instantly and print the result as JSON
    Simulate {
        #[command(flatten)]
        session: SessionArgs,
        /// Seconds to advance
        #[arg(long)]
        ticks: u32,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { session, speed } => {
            let period = tick_period(speed)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_live(session.widget_config(), period))?;
        }
        TimerAction::Simulate { session, ticks } => {
            let mut widget = WidgetController::new(WidgetKind::Timer, &session.widget_config(), VIEWPORT);
            widget.start();
            for _ in 0..ticks {
                widget.tick();
            }
            let output = json!({
                "view": widget.view(),
                "events": widget.drain_events(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Length of one simulated second at `speed`.
fn tick_period(speed: f64) -> Result<Duration, String> {
    let invalid = || format!("invalid speed: {speed}");
    if !(speed.is_finite() && speed > 0.0) {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(TICK_PERIOD.as_secs_f64() / speed).map_err(|_| invalid())
}

async fn run_live(config: WidgetConfig, period: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = WidgetController::new(WidgetKind::Timer, &config, VIEWPORT);
    let mut driver = TickDriver::new(period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    widget.start();
    print_view(&widget)?;

    loop {
        driver.sync(widget.ticker());
        if !stdin_open && !driver.is_active() {
            break;
        }

        tokio::select! {
            () = driver.next_tick() => {
                widget.tick();
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match line.trim() {
                        "p" => widget.toggle(),
                        "r" => widget.reset(),
                        "q" => break,
                        "" => continue,
                        other => {
                            eprintln!("unknown command: {other} (p = start/pause, r = reset, q = quit)");
                            continue;
                        }
                    },
                    None => stdin_open = false,
                }
            }
        }

        for event in widget.drain_events() {
            eprintln!("{}", serde_json::to_string(&event)?);
        }
        print_view(&widget)?;

        if widget.engine().is_some_and(|engine| engine.is_complete()) {
            break;
        }
    }

    // Let the completion chord finish before the output is dropped.
    if widget
        .engine()
        .is_some_and(|engine| engine.is_complete() && !engine.is_muted())
    {
        tokio::time::sleep(AudioCueKind::Complete.total_duration()).await;
    }
    Ok(())
}

fn print_view(widget: &WidgetController) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(&widget.view())?);
    Ok(())
}

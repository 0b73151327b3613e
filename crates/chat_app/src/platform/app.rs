use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chat_core::{update, AppState, Msg};
use chat_engine::ServiceSettings;
use chat_logging::chat_info;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::{input, render};

pub fn run_app() -> Result<(), Box<dyn Error>> {
    logging::initialize(LogDestination::File);

    let settings = settings_from_env();
    chat_info!("starting docs chat against {}", settings.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(settings, msg_tx)?;

    // Stdin is read on its own thread; the main loop polls both channels.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut state = AppState::new();
    print_lines(&render::render(&state.view(), &clock()));
    print_lines(&render::help_lines());

    loop {
        let mut worked = false;

        while let Ok(msg) = msg_rx.try_recv() {
            state = dispatch(state, msg, &runner);
            worked = true;
        }

        match line_rx.try_recv() {
            Ok(line) => {
                worked = true;
                match input::parse_line(&line) {
                    input::InputAction::Quit => break,
                    input::InputAction::Help => print_lines(&render::help_lines()),
                    input::InputAction::Dispatch(msgs) => {
                        for msg in msgs {
                            state = dispatch(state, msg, &runner);
                        }
                    }
                    input::InputAction::Unknown(cmd) => {
                        println!("unknown command: {cmd} (try /help)");
                    }
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        if state.consume_dirty() {
            print_lines(&render::render(&state.view(), &clock()));
        }

        if !worked {
            thread::sleep(Duration::from_millis(20));
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn settings_from_env() -> ServiceSettings {
    let mut settings = ServiceSettings::default();
    if let Ok(url) = std::env::var("DOCS_CHAT_BASE_URL") {
        settings.base_url = url;
    }
    if let Ok(id) = std::env::var("DOCS_CHAT_INTEGRATION_ID") {
        settings.integration_id = id;
    }
    settings
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

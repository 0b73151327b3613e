//! Maps terminal input lines to core messages.
//!
//! A plain line is a question; `/`-prefixed lines are commands.

use chat_core::{FeedbackKind, Msg};

#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Help,
    Dispatch(Vec<Msg>),
    Unknown(String),
}

pub fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('/') {
        let (command, arg) = match rest.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };
        return match command {
            "quit" | "exit" => InputAction::Quit,
            "help" => InputAction::Help,
            "new" => InputAction::Dispatch(vec![Msg::NewChatClicked]),
            "toggle" if !arg.is_empty() => {
                InputAction::Dispatch(vec![Msg::ScopeToggled(arg.to_string())])
            }
            "up" | "down" => match arg.parse::<u64>() {
                Ok(turn) => {
                    let kind = if command == "up" {
                        FeedbackKind::Upvote
                    } else {
                        FeedbackKind::Downvote
                    };
                    InputAction::Dispatch(vec![Msg::FeedbackClicked { turn, kind }])
                }
                Err(_) => InputAction::Unknown(trimmed.to_string()),
            },
            _ => InputAction::Unknown(trimmed.to_string()),
        };
    }

    if trimmed.is_empty() {
        return InputAction::Dispatch(Vec::new());
    }
    InputAction::Dispatch(vec![
        Msg::InputChanged(trimmed.to_string()),
        Msg::QuestionSubmitted,
    ])
}

//! Renders the core view model as terminal transcript lines.

use chat_core::{AppViewModel, FeedbackKind, RejectReason, SubmitOutcome, TurnView};

pub fn render(view: &AppViewModel, clock: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("── docs chat [{clock}] {}", "─".repeat(40)));

    if view.selected_scopes.is_empty() {
        lines.push("Chatting with docs for: no scopes selected".to_string());
    } else {
        lines.push(format!(
            "Chatting with docs for: {}",
            view.selected_scopes.join(", ")
        ));
    }
    let choices = view
        .scope_choices
        .iter()
        .map(|choice| {
            let mark = if choice.selected { 'x' } else { ' ' };
            format!("[{mark}] {}", choice.name)
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("Scopes: {choices}"));

    if view.turns.is_empty() {
        lines.push("Ask your first question below!".to_string());
    } else {
        for turn in &view.turns {
            lines.extend(render_turn(turn));
        }
    }

    if view.generating {
        lines.push("AI is thinking...".to_string());
    }
    if let Some(SubmitOutcome::Rejected(reason)) = view.last_submit {
        lines.push(format!("(submission rejected: {})", reject_text(reason)));
    }

    lines
}

fn render_turn(turn: &TurnView) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("[#{}] You: {}", turn.key, turn.question));

    match (&turn.answer, &turn.failure) {
        (_, Some(failure)) => {
            lines.push(format!("      error: {failure}"));
        }
        (Some(answer), None) => {
            for (index, answer_line) in answer.lines().enumerate() {
                if index == 0 {
                    lines.push(format!("      AI: {answer_line}"));
                } else {
                    lines.push(format!("          {answer_line}"));
                }
            }
            if turn.pending {
                lines.push("          …".to_string());
            }
        }
        (None, None) => {
            lines.push("      AI: thinking…".to_string());
        }
    }

    if !turn.sources.is_empty() {
        lines.push("      sources:".to_string());
        for source in &turn.sources {
            lines.push(format!("        - {} <{}>", source.title, source.url));
        }
    }

    match turn.feedback {
        Some(FeedbackKind::Upvote) => lines.push("      feedback: helpful".to_string()),
        Some(FeedbackKind::Downvote) => lines.push("      feedback: not helpful".to_string()),
        None => {}
    }

    lines
}

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  <question>         ask the selected documentation".to_string(),
        "  /toggle <scope>    toggle a documentation scope (resets the chat)".to_string(),
        "  /new               start a new chat".to_string(),
        "  /up <n> /down <n>  vote on answered turn #n".to_string(),
        "  /help              show this list".to_string(),
        "  /quit              exit".to_string(),
    ]
}

fn reject_text(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::EmptyQuestion => "type a question first",
        RejectReason::NoScopes => "select at least one scope to enable the chat",
        RejectReason::Busy => "an answer is still being generated",
    }
}

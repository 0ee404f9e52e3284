//! Interactive chat REPL against the default session.
//!
//! Reads lines with rustyline-async so Ctrl+C/Ctrl+D are handled
//! cleanly. Slash commands: `/clear` empties the conversation history,
//! `/exit` quits. Backend errors are printed and the (rolled-back)
//! conversation continues.

use std::io::Write;

use console::style;
use rustyline_async::{Readline, ReadlineEvent};

use llamalink_core::relay::DEFAULT_SESSION;

use crate::state::AppState;

/// Run the interactive chat loop.
pub async fn run_repl(state: &AppState) -> anyhow::Result<()> {
    print_banner(state);

    let prompt = format!("{} ", style("you >").green().bold());
    let (mut rl, mut out) = Readline::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let input = line.trim().to_string();
                if input.is_empty() {
                    continue;
                }
                rl.add_history_entry(input.clone());

                match input.as_str() {
                    "/exit" => break,
                    "/clear" => {
                        state.relay.clear_history(DEFAULT_SESSION);
                        writeln!(out, "{}", style("conversation history cleared").dim())?;
                        continue;
                    }
                    _ => {}
                }

                match state.relay.chat(DEFAULT_SESSION, &input, None).await {
                    Ok(reply) => {
                        writeln!(out, "{} {reply}\n", style("ai  >").cyan().bold())?;
                    }
                    Err(err) => {
                        writeln!(out, "{} {err}\n", style("error:").red().bold())?;
                    }
                }
            }
            Ok(ReadlineEvent::Eof) | Ok(ReadlineEvent::Interrupted) => break,
            Err(err) => return Err(anyhow::anyhow!("input error: {err}")),
        }
    }

    println!("{}", style("bye.").dim());
    Ok(())
}

fn print_banner(state: &AppState) {
    println!();
    println!(
        "  {} {}",
        style("Llamalink").cyan().bold(),
        style(format!(
            "({} @ {})",
            state.config.backend.model, state.config.backend.base_url
        ))
        .dim()
    );
    println!(
        "  {}",
        style("/clear to reset the conversation, /exit to quit").dim()
    );
    println!();
}

//! Chat assistant command

use anyhow::Result;
use colored::Colorize;
use flight_lib::{ChatMessage, Session};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{format_timestamp, print_error, print_info, print_json, OutputFormat};

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Send one message, or start an interactive conversation when none is given
pub async fn chat(session: &mut Session, message: Option<String>, format: OutputFormat) -> Result<()> {
    if let Some(message) = message {
        let reply = session.send_chat(&message).await?;
        return print_reply(&reply, format);
    }

    print_info("Chat with the FlightCast assistant. Type 'exit' to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("{} ", ">".cyan().bold());
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }

        // A failed exchange ends that turn, not the conversation
        match session.send_chat(line).await {
            Ok(reply) => print_reply(&reply, format)?,
            Err(err) => print_error(&format!("Chat failed: {}", err)),
        }
    }

    Ok(())
}

fn print_reply(reply: &ChatMessage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(reply)?,
        OutputFormat::Table => println!(
            "{} {} {}",
            format_timestamp(&reply.timestamp).dimmed(),
            "assistant:".green().bold(),
            reply.text
        ),
    }
    Ok(())
}

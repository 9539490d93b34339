//! Tutor: command-line front end for the tutoring pipeline.

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;
use tutorbot_context::ConversationContext;
use tutorbot_core::TutorConfig;
use tutorbot_runtime::{TutorReply, TutorService};

fn print_help() {
    println!("Tutor: physics and chemistry tutoring assistant");
    println!();
    println!("Usage: tutor [command]");
    println!();
    println!("Commands:");
    println!("  (none) | chat            Start an interactive session");
    println!("  ask <message>            Answer a single message");
    println!("  classify <message>       Print the classified intent as JSON");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  TUTOR_HISTORY_LIMIT      Exchanges remembered per conversation (default 5)");
    println!("  TUTOR_MAX_SESSIONS       Concurrent sessions kept (default 1000)");
    println!("  TUTOR_MAX_MESSAGE_CHARS  Longest accepted message (default 2000)");
    println!("  TUTOR_RESPONSES          Path to a JSON response library");
    println!("  RUST_LOG                 Log filter (default info)");
}

fn print_reply(reply: &TutorReply) {
    println!("{}", reply.text);
    if reply.is_fallback {
        info!(
            "No specific content for topic {:?} ({})",
            reply.intent.topic, reply.strategy
        );
    }
}

fn chat(service: &TutorService) -> anyhow::Result<()> {
    let session = service.create_session();
    println!("Tutor ready. Ask about a topic, or type 'quit' to leave, 'reset' to start over.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                service.sessions().reset(&session);
                println!("Conversation cleared.");
                continue;
            }
            message => match service.respond(&session, message) {
                Ok(reply) => print_reply(&reply),
                Err(e) => eprintln!("{}", e),
            },
        }
        println!();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("chat");
    let message = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();

    match command {
        "--help" | "-h" | "help" => {
            print_help();
            return Ok(());
        }
        "classify" => {
            if message.trim().is_empty() {
                eprintln!("Usage: tutor classify <message>");
                std::process::exit(1);
            }
            let intent = tutorbot_intent::classify(message.trim());
            println!("{}", serde_json::to_string_pretty(&intent)?);
            return Ok(());
        }
        "ask" | "chat" => {}
        other => {
            eprintln!("Unknown command: {}. Use 'tutor help' for usage.", other);
            std::process::exit(1);
        }
    }

    let config = TutorConfig::from_env()?;
    let service = TutorService::new(config)?;

    if command == "ask" {
        let message = service.validate(&message)?;
        let mut context = ConversationContext::with_history_limit(service.config().history_limit);
        let reply = service.get_response(message, &mut context);
        print_reply(&reply);
        return Ok(());
    }

    chat(&service)
}

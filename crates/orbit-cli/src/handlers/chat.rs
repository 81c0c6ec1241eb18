//! Interactive conversation.
//!
//! Lines are read on a dedicated thread (the line editor blocks) and handed
//! to the async loop over a channel, so answers and speech keep flowing while
//! the prompt waits. Submitting a question never waits for the previous
//! answer: the session cancels whatever is in flight.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::planet;
use crate::presentation::format_history;

const PROMPT: &str = "🚀 > ";

const WELCOME: &str = "\
Welcome, space explorer! Ask me anything about space.
Type /help for commands. Press Enter on an empty line to hear a hint.";

const HELP: &str = "\
Commands:
  <question>       Ask the space guide (interrupts the current answer)
  /voice           Start or stop voice input
  /stop            Stop speaking
  /iss             Where is the International Space Station?
  /planet [name]   Planet facts, or the list of planets
  /history         Show the remembered conversation
  /clear           Forget the conversation
  /help            Show this help
  /quit            Leave";

/// A parsed chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Anything that is not a slash command, including an empty line.
    Ask(String),
    Voice,
    Stop,
    Iss,
    Planet(Option<String>),
    History,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Ask(trimmed.to_string());
        };

        let (command, argument) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(command, argument)| (command, argument.trim()));

        match command.to_ascii_lowercase().as_str() {
            "voice" | "v" => Self::Voice,
            "stop" | "s" => Self::Stop,
            "iss" => Self::Iss,
            "planet" | "p" => Self::Planet((!argument.is_empty()).then(|| argument.to_string())),
            "history" => Self::History,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(command.to_string()),
        }
    }
}

enum InputEvent {
    Line(String),
    Failed(String),
}

/// Run the interactive chat until `/quit`, Ctrl-C or end of input.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    println!("{WELCOME}");

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_line_reader(tx);

    let result = run_loop(ctx, &mut rx).await;
    shutdown(ctx);
    println!("Goodbye, space explorer!");
    result
}

async fn run_loop(ctx: &CliContext, rx: &mut mpsc::UnboundedReceiver<InputEvent>) -> Result<()> {
    while let Some(input) = rx.recv().await {
        let line = match input {
            InputEvent::Line(line) => line,
            InputEvent::Failed(reason) => return Err(CliError::Io(reason).into()),
        };

        match ChatCommand::parse(&line) {
            ChatCommand::Ask(question) => {
                // Runs in the background; a newer question supersedes it.
                let _submission = ctx.session.submit_question(&question);
            }
            ChatCommand::Voice => toggle_voice(ctx),
            ChatCommand::Stop => ctx.speech.stop_all(),
            ChatCommand::Iss => {
                // Failures are shown by the tracker itself.
                if let Err(err) = ctx.tracker.refresh().await {
                    debug!(error = %err, "ISS refresh failed");
                }
            }
            ChatCommand::Planet(name) => match planet::render(name.as_deref()) {
                Ok(text) => println!("{text}"),
                Err(err) => println!("{err}"),
            },
            ChatCommand::History => println!("{}", format_history(&ctx.session.history())),
            ChatCommand::Clear => {
                ctx.session.clear_history();
                println!("Conversation history cleared.");
            }
            ChatCommand::Help => println!("{HELP}"),
            ChatCommand::Quit => break,
            ChatCommand::Unknown(command) => {
                println!("Unknown command /{command}. Type /help for the list.");
            }
        }
    }
    Ok(())
}

fn toggle_voice(ctx: &CliContext) {
    let Some(voice) = &ctx.voice else {
        println!("Voice input is not configured (set --stt-command or ORBIT_STT_COMMAND).");
        return;
    };
    // A failed start is reported through the voice status event.
    match voice.toggle() {
        Ok(state) => debug!(?state, "Voice input toggled"),
        Err(err) => debug!(error = %err, "Voice input unavailable"),
    }
}

fn shutdown(ctx: &CliContext) {
    if let Some(voice) = &ctx.voice {
        voice.stop();
    }
    ctx.session.cancel_active();
    ctx.speech.stop_all();
}

fn spawn_line_reader(tx: mpsc::UnboundedSender<InputEvent>) {
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                let _ = tx.send(InputEvent::Failed(err.to_string()));
                return;
            }
        };

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    let quit = ChatCommand::parse(&line) == ChatCommand::Quit;
                    if tx.send(InputEvent::Line(line)).is_err() || quit {
                        return;
                    }
                }
                // Dropping the sender ends the chat loop.
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => return,
                Err(err) => {
                    let _ = tx.send(InputEvent::Failed(err.to_string()));
                    return;
                }
            }
        }
    });
}

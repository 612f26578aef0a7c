//! Terminal review driver
//!
//! Drives one [`ReviewSession`] against a [`ClauseGenerator`]: submissions
//! go through the session lifecycle, and typed commands become control
//! interactions.
//!
//! Commands:
//! - `submit <clause>`
//! - `edit <n> <text>`, `select <n> <value>`, `choose <n> <option-id>`
//! - `toggle <n> <item-id>`, `check <n> <item-id>`, `uncheck <n> <item-id>`
//! - `show`, `help`, `quit`

use clause_controls::{ControlKey, Interaction, ReviewSession, SessionError, UpstreamFailure};
use clause_generate::ClauseGenerator;
use std::str::FromStr;

/// Usage text for the interactive prompt
pub const HELP: &str = "\
commands:
  submit <clause>           request parameters for a clause
  edit <n> <text>           set the text of control n
  select <n> <value>        pick a select menu option
  choose <n> <option-id>    pick a radio option
  toggle <n> <item-id>      flip a checkbox
  check|uncheck <n> <id>    set a checkbox
  show                      print the current controls
  quit                      leave";

/// Errors from the review loop
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Input line is not a command
    #[error("{0}")]
    Command(String),

    /// Session rejected the request
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ReviewError {
    fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a clause
    Submit(String),
    /// Interact with a control
    Interact(ControlKey, Interaction),
    /// Print the controls
    Show,
    /// Print usage
    Help,
    /// Leave the loop
    Quit,
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], text[at..].trim()),
        None => (text, ""),
    }
}

impl FromStr for Command {
    type Err = ReviewError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line);
        match verb {
            "submit" if rest.is_empty() => Err(ReviewError::command("usage: submit <clause>")),
            "submit" => Ok(Self::Submit(rest.to_string())),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "edit" | "select" | "choose" | "toggle" | "check" | "uncheck" => {
                let (position, argument) = split_word(rest);
                let key = position
                    .parse::<usize>()
                    .map(ControlKey)
                    .map_err(|_| ReviewError::command(format!("usage: {verb} <n> <argument>")))?;
                if argument.is_empty() && verb != "edit" {
                    return Err(ReviewError::command(format!("usage: {verb} <n> <argument>")));
                }

                let argument = argument.to_string();
                let interaction = match verb {
                    "edit" => Interaction::Edit(argument),
                    "select" => Interaction::Select(argument),
                    "choose" => Interaction::Choose(argument),
                    "toggle" => Interaction::Toggle(argument),
                    checked => Interaction::SetChecked {
                        id: argument,
                        checked: checked == "check",
                    },
                };
                Ok(Self::Interact(key, interaction))
            }
            "" => Err(ReviewError::command("empty command; try `help`")),
            other => Err(ReviewError::command(format!("unknown command `{other}`; try `help`"))),
        }
    }
}

/// Run one submission through the session
///
/// Generation failures are recorded on the session, not returned.
///
/// # Errors
/// - `SessionError::SubmissionInFlight` if a submission is already loading
pub async fn submit(
    session: &mut ReviewSession,
    generator: &ClauseGenerator,
    clause: &str,
) -> Result<(), SessionError> {
    let ticket = session.begin_submission(clause)?;
    let response = generator.generate(clause).await.map_err(|e| {
        tracing::warn!("Generation failed: {}", e);
        UpstreamFailure::new(e.user_message())
    });
    session.complete_submission(ticket, response)
}

/// Apply one command
///
/// Returns `false` once the loop should stop.
///
/// # Errors
/// - `ReviewError::Session` if the session rejects the command
pub async fn execute(
    session: &mut ReviewSession,
    generator: &ClauseGenerator,
    command: Command,
) -> Result<bool, ReviewError> {
    match command {
        Command::Submit(clause) => submit(session, generator, &clause).await?,
        Command::Interact(key, interaction) => {
            tracing::debug!("{} on control {}", interaction.name(), key);
            session.interact(key, interaction)?;
        }
        Command::Show | Command::Help => {}
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

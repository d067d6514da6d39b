//! Command dispatch

use super::style::{style, Tag};
use super::{ConversationAgent, GenerationFailure};
use std::str::FromStr;

/// What to do with a command that is neither `help` nor `look`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedStrategy {
    /// Hand the text to the conversation agent
    #[default]
    Converse,
    /// Reflect the text back with a pointer to `help`
    Echo,
}

impl FromStr for UnrecognizedStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "converse" | "delegate" => Ok(Self::Converse),
            "echo" => Ok(Self::Echo),
            other => Err(format!("unknown unrecognized-command strategy: {other}")),
        }
    }
}

/// Routes one command to canned text or the agent.
///
/// `help` advertises `inventory`, `say` and `quit` as well, but those have no
/// handler and fall through to the unrecognized-command strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRouter {
    unrecognized: UnrecognizedStrategy,
}

impl CommandRouter {
    pub fn new(unrecognized: UnrecognizedStrategy) -> Self {
        Self { unrecognized }
    }

    pub async fn route(
        self,
        command: &str,
        agent: &mut ConversationAgent,
    ) -> Result<String, GenerationFailure> {
        match command {
            "help" => Ok(help_text()),
            "look" => Ok(look_text()),
            _ => match self.unrecognized {
                UnrecognizedStrategy::Converse => agent.submit(command).await,
                UnrecognizedStrategy::Echo => Ok(echo_text(command)),
            },
        }
    }
}

fn help_entry(name: &str, name_tag: Tag, summary: &str) -> String {
    format!(
        "{}{}",
        style(name_tag, &format!("  {name}")),
        style(Tag::Hint, &format!(" - {summary}"))
    )
}

fn help_text() -> String {
    [
        style(Tag::Heading, "Available commands:"),
        help_entry("look", Tag::Command, "Look around"),
        help_entry("inventory", Tag::Command, "Check your items"),
        help_entry("say <message>", Tag::Command, "Say something"),
        help_entry("quit", Tag::Danger, "Leave the game"),
    ]
    .join("\n")
}

fn look_text() -> String {
    [
        style(Tag::Narration, "You are in a "),
        style(Tag::Landmark, "lush forest clearing"),
        style(Tag::Narration, ". Sunlight filters through the "),
        style(Tag::Accent, "emerald canopy"),
        style(Tag::Narration, " above."),
    ]
    .concat()
}

fn echo_text(command: &str) -> String {
    format!(
        "{}\n{}{}{}",
        style(Tag::Notice, &format!("You entered: {command}")),
        style(Tag::Hint, "(Try "),
        style(Tag::Command, "help"),
        style(Tag::Hint, " for commands)"),
    )
}

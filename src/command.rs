//! Line commands accepted in text mode.

use crate::model::{ParsePriorityError, Priority, RecordId};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// `add <title> | <description> | <priority>`; missing parts are empty.
    Add {
        title: String,
        description: String,
        priority: Option<Priority>,
    },
    Resolve(RecordId),
    Delete(RecordId),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ParseCommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs a ticket id")]
    MissingId(&'static str),
    #[error("invalid ticket id '{0}'")]
    InvalidId(String),
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
}

pub(crate) const HELP: &[&str] = &[
    "add <title> | <description> | <low|medium|high>",
    "resolve <id>",
    "delete <id>",
    "list",
    "help",
    "quit",
];

fn parse_id(verb: &'static str, rest: &str) -> Result<RecordId, ParseCommandError> {
    if rest.is_empty() {
        return Err(ParseCommandError::MissingId(verb));
    }
    rest.parse::<RecordId>()
        .map_err(|_| ParseCommandError::InvalidId(rest.to_string()))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "add" | "new" => {
                let mut parts = rest.splitn(3, '|').map(str::trim);
                let title = parts.next().unwrap_or_default().to_string();
                let description = parts.next().unwrap_or_default().to_string();
                let priority = match parts.next() {
                    Some(p) if !p.is_empty() => Some(p.parse::<Priority>()?),
                    _ => None,
                };
                Ok(Command::Add {
                    title,
                    description,
                    priority,
                })
            }
            "resolve" | "r" => parse_id("resolve", rest).map(Command::Resolve),
            "delete" | "del" | "d" => parse_id("delete", rest).map(Command::Delete),
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

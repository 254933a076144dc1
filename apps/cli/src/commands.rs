//! Parsing of the lines typed at the prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    /// Start a fresh game, optionally with a different digit count.
    New(Option<u32>),
    Quit,
    Help,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Guess(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    match parts.next().unwrap_or_default() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "h" | "help" => Ok(Command::Help),
        "n" | "new" => match parts.next() {
            None => Ok(Command::New(None)),
            Some(raw) => raw
                .parse::<u32>()
                .map(|digits| Command::New(Some(digits)))
                .map_err(|_| ParseError(format!("not a digit count: {raw}"))),
        },
        other => Err(ParseError(format!("unknown command :{other}"))),
    }
}

pub const HELP: &str = "\
type a guess and press enter
:new [N]  start a new game (optionally with N digits)
:help     show this help
:quit     leave";

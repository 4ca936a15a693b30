//! Stdin line parsing.

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Post to chat.
    Say(String),
    Room(u64),
    Cloak(bool),
    Refresh,
    Who,
    Quit,
    /// A `:` command that could not be parsed.
    Invalid(String),
    Empty,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Input::Say(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("room", Some(id)) => id
                .parse()
                .map(Input::Room)
                .unwrap_or_else(|_| Input::Invalid(format!("not a room id: {id}"))),
            ("room", None) => Input::Invalid("usage: :room <id>".into()),
            ("cloak", Some("on")) => Input::Cloak(true),
            ("cloak", Some("off")) => Input::Cloak(false),
            ("cloak", _) => Input::Invalid("usage: :cloak on|off".into()),
            ("refresh", _) => Input::Refresh,
            ("who", _) => Input::Who,
            ("quit" | "q", _) => Input::Quit,
            _ => Input::Invalid(format!("unknown command: :{name}")),
        }
    }
}

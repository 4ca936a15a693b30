//! Ordered pattern table.
//!
//! Rules are tried top to bottom and the first match wins. Anything that
//! matches nothing is a plain message, so classification is total.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::variant::{CommandVariant, ELEMENTAL_VERBS};

type Build = fn(&str, &Captures<'_>) -> CommandVariant;

pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    build: Build,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, build: Build) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            build,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

fn group(caps: &Captures<'_>, i: usize) -> String {
    caps.get(i)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

static COIN_FLIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/rolls 1d2 (?:&rarr;|→) ([12])").unwrap());

fn build_roll(text: &str, caps: &Captures<'_>) -> CommandVariant {
    if let Some(flip) = COIN_FLIP_RE.captures(text) {
        let face = if &flip[1] == "1" { "heads" } else { "tails" };
        return CommandVariant::Roll {
            is_coin_flip: true,
            face: face.to_string(),
        };
    }
    CommandVariant::Roll {
        is_coin_flip: false,
        face: group(caps, 1).replace("&rarr;", "→"),
    }
}

/// Possessive precedes plain action: `/me's` also satisfies `/me\b`.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let verbs = ELEMENTAL_VERBS
        .iter()
        .map(|(verb, _)| *verb)
        .collect::<Vec<_>>()
        .join("|");

    vec![
        Rule::new("possessive", r"(?i)^/me's\s(.*)", |_, c| {
            CommandVariant::PossessiveAction { text: group(c, 1) }
        }),
        Rule::new("action", r"(?i)^/me\b(.*)", |_, c| CommandVariant::Action {
            text: group(c, 1),
        }),
        Rule::new("sing", r"(?i)^/sings?\b\s?(.*)", |_, c| CommandVariant::Sing {
            text: group(c, 1),
        }),
        Rule::new("whisper", r"(?i)^/whispers?\b\s?(.*)", |_, c| {
            CommandVariant::Whisper { text: group(c, 1) }
        }),
        Rule::new("death", r"(?i)^/death\s(.*)", |_, c| CommandVariant::Death {
            text: group(c, 1),
        }),
        Rule::new("roll", r"(?i)^/rolls(.*)", build_roll),
        Rule::new("elemental", &format!(r"(?i)^/({verbs})\s+(.+)"), |_, c| {
            CommandVariant::Elemental {
                verb: group(c, 1).to_lowercase(),
                target: group(c, 2),
            }
        }),
        Rule::new("sanctify", r"(?i)^/sanctify\s+(.+)", |_, c| {
            CommandVariant::Sanctify { target: group(c, 1) }
        }),
    ]
});

/// Classify one chat line.
pub fn classify(text: &str) -> CommandVariant {
    RULES
        .iter()
        .find_map(|rule| {
            rule.pattern
                .captures(text)
                .map(|caps| (rule.build)(text, &caps))
        })
        .unwrap_or_else(|| CommandVariant::Plain {
            text: text.to_string(),
        })
}

//! Classified chat line variants and their plain-text rendering.

/// Result of classifying one chat line.
///
/// Free text is kept raw; link markup inside it is left for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandVariant {
    /// Ordinary message.
    Plain { text: String },
    /// `/me waves`
    Action { text: String },
    /// `/me's hat is on fire`
    PossessiveAction { text: String },
    /// `/sing la la la`
    Sing { text: String },
    /// `/whisper psst`
    Whisper { text: String },
    /// `/death WHAT CAN THE HARVEST HOPE FOR`
    Death { text: String },
    /// `/rolls 3d6 → 11`. For a two-sided roll `face` is `heads` or `tails`,
    /// otherwise the normalized roll description.
    Roll { is_coin_flip: bool, face: String },
    /// `/fireball Bob`
    Elemental { verb: String, target: String },
    /// `/sanctify Bob`
    Sanctify { target: String },
}

/// Flavor text for the elemental ("egg") verbs.
pub const ELEMENTAL_VERBS: &[(&str, &str)] = &[
    ("anvil", "anvils"),
    ("blame", "blames"),
    ("egg", "eggs"),
    ("fireball", "casts fireball on"),
    ("giantsquid", "giant squids"),
    ("highfive", "highfives"),
    ("hug", "hugs"),
    ("hugg", "mis-spells"),
    ("immolate", "casts fireball on"),
    ("maul", "mauls"),
    ("omelet", "omelets"),
    ("omelette", "French-omelets"),
    ("pie", "pies"),
    ("pizza", "pizzas"),
    ("rubberchicken", "rubber chickens"),
    ("smite", "smites"),
    ("special", "does something 'special' to"),
    ("tea", "makes a nice cup of tea for"),
    ("tomato", "tomatoes"),
];

pub fn elemental_flavor(verb: &str) -> Option<&'static str> {
    ELEMENTAL_VERBS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(verb))
        .map(|(_, flavor)| *flavor)
}

impl CommandVariant {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandVariant::Plain { .. } => "plain",
            CommandVariant::Action { .. } => "action",
            CommandVariant::PossessiveAction { .. } => "possessive",
            CommandVariant::Sing { .. } => "sing",
            CommandVariant::Whisper { .. } => "whisper",
            CommandVariant::Death { .. } => "death",
            CommandVariant::Roll { .. } => "roll",
            CommandVariant::Elemental { .. } => "elemental",
            CommandVariant::Sanctify { .. } => "sanctify",
        }
    }

    /// One-line rendering for terminals and logs.
    pub fn render_plain(&self, actor: &str) -> String {
        match self {
            CommandVariant::Plain { text } => format!("<{actor}> {text}"),
            CommandVariant::Action { text } => join(actor, text),
            CommandVariant::PossessiveAction { text } => format!("{actor}'s {text}"),
            CommandVariant::Sing { text } => format!("<{actor}> ♪ {text} ♫"),
            CommandVariant::Whisper { text } => format!("<{actor}> ({text})"),
            CommandVariant::Death { text } => format!("<{actor}> {}", text.to_uppercase()),
            CommandVariant::Roll {
                is_coin_flip: true,
                face,
            } => format!("{actor} flips a coin → {face}"),
            CommandVariant::Roll { face, .. } => join(actor, &format!("rolls {face}")),
            CommandVariant::Elemental { verb, target } => {
                let flavor = elemental_flavor(verb).unwrap_or("casts a spell on");
                format!("{actor} {flavor} {target}")
            }
            CommandVariant::Sanctify { target } => format!("{actor} sanctifies {target}"),
        }
    }
}

fn join(actor: &str, text: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        actor.to_string()
    } else {
        format!("{actor} {text}")
    }
}

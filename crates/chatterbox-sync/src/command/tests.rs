use super::*;

fn plain(text: &str) -> CommandVariant {
    CommandVariant::Plain { text: text.into() }
}

#[test]
fn me_action() {
    assert_eq!(
        classify("/me waves"),
        CommandVariant::Action {
            text: "waves".into()
        }
    );
    assert_eq!(classify("/ME dances").kind(), "action");
}

#[test]
fn possessive_wins_over_action() {
    assert_eq!(
        classify("/me's hat is on fire"),
        CommandVariant::PossessiveAction {
            text: "hat is on fire".into()
        }
    );
}

#[test]
fn me_needs_word_boundary() {
    assert_eq!(classify("/meow"), plain("/meow"));
}

#[test]
fn coin_flips() {
    assert_eq!(
        classify("/rolls 1d2 → 1"),
        CommandVariant::Roll {
            is_coin_flip: true,
            face: "heads".into()
        }
    );
    assert_eq!(
        classify("/rolls 1d2 &rarr; 2"),
        CommandVariant::Roll {
            is_coin_flip: true,
            face: "tails".into()
        }
    );
}

#[test]
fn other_rolls_normalize_arrow() {
    assert_eq!(
        classify("/rolls 3d6 &rarr; 11"),
        CommandVariant::Roll {
            is_coin_flip: false,
            face: "3d6 → 11".into()
        }
    );
}

#[test]
fn elemental_verbs() {
    assert_eq!(
        classify("/fireball Bob"),
        CommandVariant::Elemental {
            verb: "fireball".into(),
            target: "Bob".into()
        }
    );
    for (verb, _) in ELEMENTAL_VERBS {
        assert_eq!(classify(&format!("/{verb} someone")).kind(), "elemental");
    }
    assert_eq!(classify("/fireball"), plain("/fireball"));
    // Prefix verbs must not swallow longer ones.
    assert_eq!(
        classify("/hugg Bob"),
        CommandVariant::Elemental {
            verb: "hugg".into(),
            target: "Bob".into()
        }
    );
    assert_eq!(classify("/frostbite Bob").kind(), "plain");
}

#[test]
fn sing_whisper_death_sanctify() {
    assert_eq!(
        classify("/sings la la"),
        CommandVariant::Sing {
            text: "la la".into()
        }
    );
    assert_eq!(
        classify("/sing la"),
        CommandVariant::Sing { text: "la".into() }
    );
    assert_eq!(
        classify("/whisper psst"),
        CommandVariant::Whisper {
            text: "psst".into()
        }
    );
    assert_eq!(
        classify("/death I AM HERE"),
        CommandVariant::Death {
            text: "I AM HERE".into()
        }
    );
    assert_eq!(
        classify("/sanctify Alice"),
        CommandVariant::Sanctify {
            target: "Alice".into()
        }
    );
}

#[test]
fn fallback_is_plain() {
    assert_eq!(classify("hello there"), plain("hello there"));
    assert_eq!(classify(""), plain(""));
    assert_eq!(classify("/unknown thing"), plain("/unknown thing"));
    assert_eq!(classify("not /me at start"), plain("not /me at start"));
}

#[test]
fn rule_order_is_stable() {
    let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "possessive",
            "action",
            "sing",
            "whisper",
            "death",
            "roll",
            "elemental",
            "sanctify"
        ]
    );
    let possessive = names.iter().position(|n| *n == "possessive").unwrap();
    let action = names.iter().position(|n| *n == "action").unwrap();
    assert!(possessive < action);
}

#[test]
fn renders_plain_lines() {
    let cases = [
        ("hi", "<Bob> hi"),
        ("/me waves", "Bob waves"),
        ("/me", "Bob"),
        ("/me's cat", "Bob's cat"),
        ("/sing la", "<Bob> ♪ la ♫"),
        ("/rolls 1d2 → 1", "Bob flips a coin → heads"),
        ("/rolls 2d6 &rarr; 7", "Bob rolls 2d6 → 7"),
        ("/fireball Alice", "Bob casts fireball on Alice"),
        ("/immolate Alice", "Bob casts fireball on Alice"),
        ("/tea Alice", "Bob makes a nice cup of tea for Alice"),
        ("/sanctify Alice", "Bob sanctifies Alice"),
    ];
    for (input, expected) in cases {
        assert_eq!(classify(input).render_plain("Bob"), expected, "input: {input}");
    }
}

#[test]
fn flavor_lookup_ignores_case() {
    assert_eq!(elemental_flavor("FIREBALL"), Some("casts fireball on"));
    assert_eq!(elemental_flavor("Omelette"), Some("French-omelets"));
    assert_eq!(elemental_flavor("sanctify"), None);
}

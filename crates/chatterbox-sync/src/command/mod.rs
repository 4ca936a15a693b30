//! Chat line classification for rendering.

mod classify;
mod variant;

pub use classify::{classify, Rule, RULES};
pub use variant::{elemental_flavor, CommandVariant, ELEMENTAL_VERBS};

#[cfg(test)]
mod tests;

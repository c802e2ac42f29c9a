#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';

/// The input tokens, classified once into positionals and flags.
///
/// * `--NAME` contributes `NAME` to the long flags.
/// * `-ABC` contributes each of `A`, `B`, `C` to the short flags.
/// * Everything else is a positional, in order.
///
/// The first positional is the invocation label (ex: the program name), shown in the usage text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TokenSets {
    positionals: Vec<String>,
    short_flags: Vec<char>,
    long_flags: Vec<String>,
}

impl TokenSets {
    pub(crate) fn classify(tokens: &[&str]) -> Self {
        let mut token_sets = TokenSets::default();

        for token in tokens {
            if let Some(long) = token.strip_prefix("--") {
                token_sets.long_flags.push(long.to_string());
            } else if let Some(short) = token.strip_prefix('-') {
                token_sets.short_flags.extend(short.chars());
            } else {
                token_sets.positionals.push(token.to_string());
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Classified tokens: {token_sets:?}.");
        }

        token_sets
    }

    #[cfg(test)]
    pub(crate) fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub(crate) fn short_flags(&self) -> &[char] {
        &self.short_flags
    }

    pub(crate) fn long_flags(&self) -> &[String] {
        &self.long_flags
    }

    /// The positional at `offset` of the specification sequence (the label is skipped).
    pub(crate) fn positional(&self, offset: usize) -> Option<&str> {
        self.positionals.get(offset + 1).map(String::as_str)
    }

    pub(crate) fn label(&self) -> &str {
        self.positionals.first().map_or("", String::as_str)
    }

    pub(crate) fn help_requested(&self) -> bool {
        self.short_flags.contains(&HELP_SHORT) || self.long_flags.iter().any(|f| f == HELP_NAME)
    }

    /// The tokens for the command matched at `offset` of the specification sequence.
    ///
    /// The label joins everything consumed so far (through the command name), followed by the unconsumed positionals.
    /// Flags are carried over as is.
    pub(crate) fn descend(&self, offset: usize) -> Self {
        let consumed = std::cmp::min(offset + 2, self.positionals.len());
        let mut positionals = vec![self.positionals[..consumed].join(" ")];
        positionals.extend_from_slice(&self.positionals[consumed..]);

        TokenSets {
            positionals,
            short_flags: self.short_flags.clone(),
            long_flags: self.long_flags.clone(),
        }
    }
}

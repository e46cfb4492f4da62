use super::cards_types::Card;

/// Centralized helper for parsing hardcoded card tokens in fixtures and tests.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card tokens (e.g. `["AS", "AS#1", "BJ"]`).
    ///
    /// Only for tokens known to be valid; panics otherwise.
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                s.parse::<Card>().expect("hardcoded valid card token")
            })
            .collect()
    }

    /// Ids of the hardcoded tokens, in order.
    pub fn ids(tokens: &[&str]) -> Vec<u8> {
        Self::parse_hardcoded(tokens).iter().map(|c| c.id).collect()
    }
}

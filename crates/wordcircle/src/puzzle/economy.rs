/// Coin economy knobs. All amounts are whole coins.
#[derive(Debug, Clone, PartialEq)]
pub struct Economy {
    /// Balance of the very first session.
    pub starting_coins: u32,
    /// Credit per letter of a found word.
    pub coins_per_letter: u32,
    /// Price of one hint, charged before the provider is asked.
    pub hint_cost: u32,
    /// Price of the first skip in a level.
    pub initial_skip_cost: u32,
    /// How much each skip raises the next skip's price.
    pub skip_cost_increment: u32,
    /// Extra credit when the last word of a level is found (0 = none).
    pub level_complete_bonus: u32,
    /// How long hinted letters stay highlighted, in seconds.
    pub hint_glow_secs: f32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            starting_coins: 100,
            coins_per_letter: 10,
            hint_cost: 50,
            initial_skip_cost: 10,
            skip_cost_increment: 5,
            level_complete_bonus: 0,
            hint_glow_secs: 5.0,
        }
    }
}

impl Economy {
    pub fn word_reward(&self, word: &str) -> u32 {
        word.chars().count() as u32 * self.coins_per_letter
    }
}

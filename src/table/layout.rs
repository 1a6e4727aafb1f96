use super::models::{GameKind, Round, Suit};

/// Players seeded into every new table
pub const DEFAULT_PLAYERS: [&str; 5] = ["Sowmiya", "Srinath", "Vidhya", "Vijay", "Vishwa"];

pub const SEVEN_CARDS_ROUNDS: usize = 15;

/// Trump suit and hand size for each Judgement deal, in play order
const JUDGEMENT_DEALS: [(Suit, u8); 20] = [
    (Suit::Spades, 10),
    (Suit::Diamonds, 9),
    (Suit::Clubs, 8),
    (Suit::Hearts, 7),
    (Suit::Numbers, 6),
    (Suit::Spades, 5),
    (Suit::Diamonds, 4),
    (Suit::Clubs, 3),
    (Suit::Hearts, 2),
    (Suit::Numbers, 1),
    (Suit::Numbers, 10),
    (Suit::Hearts, 9),
    (Suit::Clubs, 8),
    (Suit::Diamonds, 7),
    (Suit::Spades, 6),
    (Suit::Numbers, 5),
    (Suit::Hearts, 4),
    (Suit::Clubs, 3),
    (Suit::Diamonds, 2),
    (Suit::Spades, 1),
];

impl GameKind {
    pub fn default_rounds(self) -> Vec<Round> {
        match self {
            GameKind::SevenCards => (1..=SEVEN_CARDS_ROUNDS)
                .map(|n| Round::labelled(format!("Game {}", n)))
                .collect(),
            GameKind::Judgement => JUDGEMENT_DEALS
                .iter()
                .map(|(suit, cards)| Round::deal(*suit, *cards))
                .collect(),
        }
    }
}

pub fn default_players() -> Vec<String> {
    DEFAULT_PLAYERS.iter().map(|p| p.to_string()).collect()
}

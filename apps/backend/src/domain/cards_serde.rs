//! Serialization and deserialization for card types.
//!
//! Cards use the compact document shape `{"s": "h", "r": 14, "i": "<id>"}`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.letter().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Suit::from_letter(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Rank::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize)]
struct CompactCard {
    s: Suit,
    r: Rank,
    i: String,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CompactCard {
            s: self.suit,
            r: self.rank,
            i: self.id.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let compact = CompactCard::deserialize(deserializer)?;
        Ok(Card {
            suit: compact.s,
            rank: compact.r,
            id: compact.i,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn card_uses_compact_shape() {
        let card = Card::new(Suit::Spades, Rank::Ace, "spades-14-0-abc");
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value, json!({"s": "s", "r": 14, "i": "spades-14-0-abc"}));
    }

    #[test]
    fn card_round_trips_exactly() {
        let cards = vec![
            Card::new(Suit::Hearts, Rank::Two, "hearts-2-0-x1"),
            Card::new(Suit::Diamonds, Rank::Ten, "diamonds-10-1-y2"),
            Card::new(Suit::Clubs, Rank::Jack, "clubs-11-0-z3"),
        ];
        let encoded = serde_json::to_string(&cards).unwrap();
        let decoded: Vec<Card> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, cards);
    }

    #[test]
    fn unknown_suit_letter_is_rejected() {
        let result: Result<Card, _> = serde_json::from_value(json!({"s": "x", "r": 5, "i": "a"}));
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_rank_is_rejected() {
        let low: Result<Card, _> = serde_json::from_value(json!({"s": "h", "r": 1, "i": "a"}));
        let high: Result<Card, _> = serde_json::from_value(json!({"s": "h", "r": 15, "i": "a"}));
        assert!(low.is_err());
        assert!(high.is_err());
    }
}

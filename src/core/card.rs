//! Catalog entries and the cards dealt from them.
//!
//! A [`CatalogEntry`] is an immutable face (artwork + name) sourced from the
//! catalog. Dealing turns each selected entry into exactly two [`Card`]s whose
//! ids are `"{catalog_id}-1"` and `"{catalog_id}-2"`.

use serde::{Deserialize, Serialize};

/// A playable card face supplied by the catalog. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Image URL or other reference the view resolves.
    pub image_ref: String,
}

impl CatalogEntry {
    /// Create a catalog entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Identifier of a card on the board (catalog id + slot).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap a raw card id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id of one of the two cards dealt for a catalog entry.
    #[must_use]
    pub fn for_slot(catalog_id: &str, slot: u8) -> Self {
        Self(format!("{catalog_id}-{slot}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Visibility of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// Face down, can be flipped.
    #[default]
    Hidden,
    /// Face up, waiting for match resolution.
    Flipped,
    /// Paired and permanently face up.
    Matched,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Shared by exactly two cards per game.
    pub catalog_id: String,
    pub name: String,
    pub image_ref: String,
    pub status: CardStatus,
}

impl Card {
    /// Deal the two hidden cards for a catalog entry.
    #[must_use]
    pub fn pair(entry: &CatalogEntry) -> [Card; 2] {
        let card = |slot| Card {
            id: CardId::for_slot(&entry.id, slot),
            catalog_id: entry.id.clone(),
            name: entry.name.clone(),
            image_ref: entry.image_ref.clone(),
            status: CardStatus::Hidden,
        };
        [card(1), card(2)]
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.status == CardStatus::Hidden
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }

    /// True if the two cards show the same catalog face.
    #[must_use]
    pub fn same_face(&self, other: &Card) -> bool {
        self.catalog_id == other.catalog_id
    }

    /// Copy of this card with a different status.
    #[must_use]
    pub fn with_status(&self, status: CardStatus) -> Card {
        Card {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_ids_and_status() {
        let entry = CatalogEntry::new("owl", "Owl", "https://img/owl.png");
        let [a, b] = Card::pair(&entry);

        assert_eq!(a.id, CardId::new("owl-1"));
        assert_eq!(b.id, CardId::new("owl-2"));
        assert!(a.same_face(&b));
        assert!(a.is_hidden() && b.is_hidden());
        assert_eq!(a.image_ref, "https://img/owl.png");
    }

    #[test]
    fn test_with_status_keeps_identity() {
        let [card, _] = Card::pair(&CatalogEntry::new("cat", "Cat", "c.png"));
        let matched = card.with_status(CardStatus::Matched);

        assert_eq!(matched.id, card.id);
        assert!(matched.is_matched());
        assert!(card.is_hidden());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CardStatus::Flipped).unwrap();
        assert_eq!(json, "\"flipped\"");
    }

    #[test]
    fn test_card_id_display() {
        assert_eq!(CardId::for_slot("x", 2).to_string(), "x-2");
        assert_eq!(CardId::from("x-2").as_str(), "x-2");
    }
}

//! Board dealing.

use im::Vector;

use crate::core::{Card, CatalogEntry, GameRng};

/// Deal `card_count` cards from `catalog`.
///
/// Picks a uniformly shuffled selection of `card_count / 2` entries, deals
/// two cards per entry, and shuffles the result. A catalog with fewer
/// entries than needed deals what it has instead of failing, so the board
/// can come out smaller than requested.
pub fn deal_board(
    catalog: &Vector<CatalogEntry>,
    card_count: usize,
    rng: &mut GameRng,
) -> Vector<Card> {
    let pairs_needed = card_count / 2;
    if catalog.len() < pairs_needed {
        tracing::warn!(
            "Not enough unique catalog entries ({}) for {} pairs; dealing {} pairs",
            catalog.len(),
            pairs_needed,
            catalog.len()
        );
    }

    let mut entries: Vec<&CatalogEntry> = catalog.iter().collect();
    rng.shuffle(&mut entries);

    let mut cards: Vec<Card> = entries
        .into_iter()
        .take(pairs_needed)
        .flat_map(Card::pair)
        .collect();
    rng.shuffle(&mut cards);

    cards.into_iter().collect()
}

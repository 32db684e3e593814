//! Narrowing the source list down to the candidates a picker offers.

use crate::item::Item;

/// Items from `source`, in order, that are not already `chosen` and whose
/// name contains `text`, ignoring case. Empty text keeps everything.
pub fn visible_items<'a>(chosen: &[Item], source: &'a [Item], text: &str) -> Vec<&'a Item> {
    let needle = text.to_lowercase();
    source
        .iter()
        .filter(|item| !chosen.iter().any(|c| c.id == item.id))
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

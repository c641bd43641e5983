//! Cart Line Transitions
//!
//! Pure operations on the ordered line list. Storage and DOM live elsewhere.

use crate::models::{CartLine, ItemId};

/// Longest note kept per line, in characters
pub const NOTE_MAX_CHARS: usize = 300;

/// Add one unit of an item: bump an existing line or append a new one
pub fn add_line(lines: &mut Vec<CartLine>, item_id: &ItemId, name: &str, price: f64) {
    match lines.iter_mut().find(|line| &line.item_id == item_id) {
        Some(line) => line.qty = line.qty.saturating_add(1).max(1),
        None => lines.push(CartLine::new(item_id.clone(), name, price)),
    }
}

/// Returns whether a line was removed
pub fn remove_line(lines: &mut Vec<CartLine>, item_id: &ItemId) -> bool {
    let before = lines.len();
    lines.retain(|line| &line.item_id != item_id);
    lines.len() != before
}

/// Set the quantity (clamped to 1); returns whether the item was found
pub fn set_qty(lines: &mut [CartLine], item_id: &ItemId, qty: u32) -> bool {
    match lines.iter_mut().find(|line| &line.item_id == item_id) {
        Some(line) => {
            line.qty = qty.max(1);
            true
        }
        None => false,
    }
}

/// Set the note (truncated); returns whether the item was found
pub fn set_note(lines: &mut [CartLine], item_id: &ItemId, note: &str) -> bool {
    match lines.iter_mut().find(|line| &line.item_id == item_id) {
        Some(line) => {
            line.note = truncate_note(note);
            true
        }
        None => false,
    }
}

/// Integer prefix of user input, like `parseInt`; anything below 1 or
/// unparseable becomes 1
pub fn parse_qty(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return 1;
    }
    // All-digit input only fails on overflow
    digits.parse::<u32>().unwrap_or(u32::MAX).max(1)
}

pub fn truncate_note(note: &str) -> String {
    note.chars().take(NOTE_MAX_CHARS).collect()
}

pub fn total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::subtotal).sum()
}

pub fn count(lines: &[CartLine]) -> u32 {
    lines.iter().fold(0u32, |acc, line| acc.saturating_add(line.qty))
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod sequence_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, f64),
        Remove(String),
        SetQty(String, String),
        SetNote(String, String),
    }

    fn arb_id() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(|id| id.to_string())
    }

    fn arb_qty_input() -> impl Strategy<Value = String> {
        prop_oneof![
            (-5i64..50).prop_map(|n| n.to_string()),
            "[a-z0-9 .+-]{0,6}",
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (arb_id(), 0.0f64..500.0).prop_map(|(id, price)| Op::Add(id, price)),
            arb_id().prop_map(Op::Remove),
            (arb_id(), arb_qty_input()).prop_map(|(id, qty)| Op::SetQty(id, qty)),
            (arb_id(), "\\PC{0,400}").prop_map(|(id, note)| Op::SetNote(id, note)),
        ]
    }

    fn check(lines: &[CartLine]) -> Result<(), TestCaseError> {
        let mut ids = HashSet::new();
        for line in lines {
            prop_assert!(line.qty >= 1);
            prop_assert!(line.note.chars().count() <= NOTE_MAX_CHARS);
            prop_assert!(ids.insert(line.item_id.clone()), "duplicate line {}", line.item_id);
        }
        prop_assert_eq!(count(lines), lines.iter().map(|l| l.qty).sum::<u32>());
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Quantity, note length and id uniqueness hold after every operation
        #[test]
        fn prop_invariants_hold_for_random_sequences(ops in prop::collection::vec(arb_op(), 5000)) {
            let mut lines: Vec<CartLine> = Vec::new();
            for op in ops {
                match op {
                    Op::Add(id, price) => {
                        let id = ItemId::new(id);
                        let before = lines.iter().find(|l| l.item_id == id).cloned();
                        add_line(&mut lines, &id, "Dish", price);
                        let after = lines.iter().find(|l| l.item_id == id).cloned();
                        if let (Some(before), Some(after)) = (before, after) {
                            prop_assert_eq!(after.qty, before.qty + 1);
                            prop_assert_eq!(after.name, before.name);
                            prop_assert_eq!(after.price, before.price);
                            prop_assert_eq!(after.note, before.note);
                        }
                    }
                    Op::Remove(id) => {
                        remove_line(&mut lines, &ItemId::new(id));
                    }
                    Op::SetQty(id, raw) => {
                        set_qty(&mut lines, &ItemId::new(id), parse_qty(&raw));
                    }
                    Op::SetNote(id, note) => {
                        set_note(&mut lines, &ItemId::new(id), &note);
                    }
                }
                check(&lines)?;
            }
        }
    }
}

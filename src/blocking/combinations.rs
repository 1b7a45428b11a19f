//! Order-preserving q-gram combinations.
//!
//! `combinations(items, k)` concatenates every k-subset of `items` without
//! changing the relative order of the chosen elements. It follows the
//! "exclude the last element / include the last element" recurrence:
//!
//! ```text
//! C(items, k) = C(rest, k) ∪ { c + last : c ∈ C(rest, k - 1) } ∪ ({last} if k == 1)
//! ```
//!
//! Every sub-call works on a prefix of `items`, so results are memoized by
//! `(prefix length, k)`. Sibling calls at the same depth share their answers.

use super::KeySet;
use std::collections::HashMap;
use std::rc::Rc;

type Memo = HashMap<(usize, usize), Rc<KeySet>>;

/// All order-preserving concatenations of `k` elements of `items`.
///
/// Returns an empty set for `k == 0` or `k > items.len()`.
#[must_use]
pub fn combinations(items: &[String], k: usize) -> KeySet {
    let mut memo = Memo::new();
    let result = combine(items, items.len(), k, &mut memo);
    drop(memo);
    Rc::try_unwrap(result).unwrap_or_else(|shared| (*shared).clone())
}

fn combine(items: &[String], prefix: usize, k: usize, memo: &mut Memo) -> Rc<KeySet> {
    if k == 0 || prefix < k {
        return Rc::new(KeySet::new());
    }
    if let Some(cached) = memo.get(&(prefix, k)) {
        return Rc::clone(cached);
    }

    let last = &items[prefix - 1];
    let exclusive = combine(items, prefix - 1, k, memo);
    let inclusive = combine(items, prefix - 1, k - 1, memo);

    let mut result = KeySet::with_capacity(exclusive.len() + inclusive.len().max(1));
    result.extend(exclusive.iter().cloned());
    if inclusive.is_empty() {
        if k == 1 {
            result.insert(last.clone());
        }
    } else {
        for combination in inclusive.iter() {
            let mut key = String::with_capacity(combination.len() + last.len());
            key.push_str(combination);
            key.push_str(last);
            result.insert(key);
        }
    }

    let result = Rc::new(result);
    memo.insert((prefix, k), Rc::clone(&result));
    result
}

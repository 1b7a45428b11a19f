//! Whitespace tokenization and character q-gram extraction.

/// Split an attribute value into whitespace-delimited tokens.
///
/// Empty tokens (runs of whitespace, leading/trailing blanks) are dropped.
pub fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

/// Sliding window of `n` characters over `token`, left to right.
///
/// Tokens of at most `n` characters yield themselves as the only q-gram.
/// Windows are taken over Unicode scalar values, not bytes. The empty token
/// yields no q-grams.
#[must_use]
pub fn n_grams(n: usize, token: &str) -> Vec<String> {
    if token.is_empty() {
        return Vec::new();
    }
    let n = n.max(1);

    // Fast path: ASCII tokens can be sliced by byte offset directly
    if token.is_ascii() {
        if token.len() <= n {
            return vec![token.to_string()];
        }
        return (0..=token.len() - n)
            .map(|start| token[start..start + n].to_string())
            .collect();
    }

    // Slow path: record char boundaries and slice between them
    let boundaries: Vec<usize> = token
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(token.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    if char_count <= n {
        return vec![token.to_string()];
    }

    (0..=char_count - n)
        .map(|start| token[boundaries[start]..boundaries[start + n]].to_string())
        .collect()
}

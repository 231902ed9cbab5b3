use super::model::Row;

/// Letters a restricted palindrome may use (after upper-casing).
pub const PALINDROME_ALPHABET: [char; 5] = ['A', 'D', 'V', 'B', 'N'];

/// Whether `value` is a non-empty palindrome over [`PALINDROME_ALPHABET`],
/// ignoring case.
pub fn is_restricted_palindrome(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let upper: Vec<char> = value.to_uppercase().chars().collect();
    upper.iter().all(|c| PALINDROME_ALPHABET.contains(c))
        && upper.iter().eq(upper.iter().rev())
}

/// Qualifying cells in row-major scan order.
pub fn find_palindromes(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.iter())
        .filter(|cell| is_restricted_palindrome(cell))
        .cloned()
        .collect()
}

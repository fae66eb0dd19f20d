//! Free-text search helpers for catalog listings.
//!
//! Search is a pass-through full-text predicate: terms are sanitized and
//! AND-joined into a PostgreSQL `tsquery`. There is no ranking.

/// Text search configuration used for both the index and the query side.
pub const SEARCH_CONFIG: &str = "english";

/// Stop words of the `english` configuration. PostgreSQL drops these from a
/// `tsquery`, and a query made only of them matches no row at all.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "don", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term.to_lowercase().as_str())
}

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on whitespace and on every non-alphanumeric character except `_`,
///   so tsquery operators (`&`, `|`, `!`, `:`, `'`) never reach the parser.
/// - Drops empty terms and stop words, so `"the"` alone means no search.
///
/// Returns `None` if the input yields no usable terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Sanitize and convert user input into a PostgreSQL `tsquery` string.
///
/// - Whitespace-separated terms are joined with `&` (AND).
/// - Empty, whitespace-only, or stop-word-only input returns `None`.
/// - Special characters that could break tsquery parsing are stripped.
///
/// # Examples
///
/// ```
/// use equipmart_core::search::build_tsquery;
/// assert_eq!(build_tsquery("cat excavator"), Some("cat & excavator".to_string()));
/// assert_eq!(build_tsquery("  "), None);
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    sanitize_terms(query).map(|terms| terms.join(" & "))
}

/// Escape `LIKE`/`ILIKE` metacharacters and wrap the term for a contains match.
///
/// Backslash is PostgreSQL's default `LIKE` escape character.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

use models::Bucket;

const ARTICLE: &str = "the";
const SUFFIX: &str = ", The";

/// Moves a leading "The " to a trailing ", The" ("The Beatles" -> "Beatles, The").
///
/// The article is matched case-insensitively and must be followed by one
/// whitespace character and a non-empty remainder; the remainder keeps its
/// authored case. Names already carrying the ", The" suffix are returned
/// unchanged so the mapping is idempotent.
pub fn normalize_artist(name: &str) -> String {
    if ends_with_suffix(name) {
        return name.to_string();
    }

    let Some(head) = name.get(..ARTICLE.len()) else {
        return name.to_string();
    };
    if !head.eq_ignore_ascii_case(ARTICLE) {
        return name.to_string();
    }

    let rest = &name[ARTICLE.len()..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() && !chars.as_str().is_empty() => {
            format!("{}{SUFFIX}", chars.as_str())
        }
        _ => name.to_string(),
    }
}

/// Bucket of an authored artist name, from the first character of its normalized form.
pub fn bucket_of(name: &str) -> Bucket {
    normalize_artist(name)
        .chars()
        .next()
        .and_then(Bucket::letter)
        .unwrap_or(Bucket::Symbol)
}

fn ends_with_suffix(name: &str) -> bool {
    name.len() >= SUFFIX.len()
        && name
            .get(name.len() - SUFFIX.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_leading_article() {
        assert_eq!(normalize_artist("The Beatles"), "Beatles, The");
        assert_eq!(normalize_artist("the who"), "who, The");
        assert_eq!(normalize_artist("THE Clash"), "Clash, The");
    }

    #[test]
    fn leaves_other_names_alone() {
        assert_eq!(normalize_artist("Queen"), "Queen");
        assert_eq!(normalize_artist(""), "");
        assert_eq!(normalize_artist("The"), "The");
        assert_eq!(normalize_artist("The "), "The ");
        assert_eq!(normalize_artist("Theatre of Tragedy"), "Theatre of Tragedy");
        assert_eq!(normalize_artist("Them"), "Them");
        assert_eq!(normalize_artist("Pixies, The"), "Pixies, The");
    }

    #[test]
    fn keeps_extra_whitespace_after_article() {
        assert_eq!(normalize_artist("The  Band"), " Band, The");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "The Beatles",
            "the who",
            "The The",
            "The The Band",
            "Queen",
            "",
            "The",
            "  The Leading Space",
            "Été",
            "The\tTabs",
        ];
        for s in samples {
            let once = normalize_artist(s);
            assert_eq!(normalize_artist(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn handles_multibyte_prefixes() {
        assert_eq!(normalize_artist("Thé Band"), "Thé Band");
        assert_eq!(normalize_artist("日本"), "日本");
    }

    #[test]
    fn buckets_follow_normalized_first_char() {
        assert_eq!(bucket_of("The Beatles"), Bucket::Letter('B'));
        assert_eq!(bucket_of("queen"), Bucket::Letter('Q'));
        assert_eq!(bucket_of("10cc"), Bucket::Symbol);
        assert_eq!(bucket_of("!!!"), Bucket::Symbol);
        assert_eq!(bucket_of("Édith Piaf"), Bucket::Symbol);
        assert_eq!(bucket_of(""), Bucket::Symbol);
    }
}

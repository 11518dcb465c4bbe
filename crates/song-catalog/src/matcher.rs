/// Approximate matching of a single query token against a record's text.
///
/// Implementations return `None` when the token does not match, otherwise a
/// cost in `0.0..=1.0` where lower is better and `0.0` is an exact hit.
pub trait TokenMatcher {
    fn cost(&self, token: &str, text: &str) -> Option<f64>;
}

pub const DEFAULT_MAX_COST: f64 = 0.3;

/// Substring hits cost nothing; anything else is scored word by word with
/// Jaro-Winkler similarity and accepted up to `max_cost`.
///
/// Both inputs are expected to be lowercased already.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinklerMatcher {
    pub max_cost: f64,
}

impl JaroWinklerMatcher {
    pub fn new(max_cost: f64) -> Self {
        Self {
            max_cost: max_cost.clamp(0.0, 1.0),
        }
    }
}

impl Default for JaroWinklerMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COST)
    }
}

impl TokenMatcher for JaroWinklerMatcher {
    fn cost(&self, token: &str, text: &str) -> Option<f64> {
        if token.is_empty() {
            return None;
        }
        if text.contains(token) {
            return Some(0.0);
        }

        let best = words(text)
            .map(|word| 1.0 - strsim::jaro_winkler(token, word))
            .fold(f64::INFINITY, f64::min);

        (best <= self.max_cost).then_some(best)
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_is_free() {
        let m = JaroWinklerMatcher::default();
        assert_eq!(m.cost("rhap", "queen bohemian rhapsody"), Some(0.0));
        assert_eq!(m.cost("n bo", "queen bohemian rhapsody"), Some(0.0));
    }

    #[test]
    fn one_letter_typo_matches() {
        let m = JaroWinklerMatcher::default();
        let cost = m.cost("lemon", "john lennon imagine").unwrap();
        assert!(cost > 0.0 && cost <= DEFAULT_MAX_COST, "cost {cost}");
    }

    #[test]
    fn unrelated_token_does_not_match() {
        let m = JaroWinklerMatcher::default();
        assert_eq!(m.cost("zzz_no_such_artist_qqq", "queen bohemian rhapsody"), None);
        assert_eq!(m.cost("rhap", "beatles, the help!"), None);
        assert_eq!(m.cost("", "anything"), None);
    }

    #[test]
    fn zero_max_cost_only_accepts_substrings() {
        let m = JaroWinklerMatcher::new(0.0);
        assert_eq!(m.cost("lemon", "john lennon imagine"), None);
        assert_eq!(m.cost("lenn", "john lennon imagine"), Some(0.0));
    }

    #[test]
    fn max_cost_is_clamped() {
        assert_eq!(JaroWinklerMatcher::new(4.0).max_cost, 1.0);
        assert_eq!(JaroWinklerMatcher::new(-1.0).max_cost, 0.0);
    }
}

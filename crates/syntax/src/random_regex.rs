use rand::Rng;

use crate::RegexNode;

/// Generates a random regular expression of at most the given depth over the
/// first `num_of_symbols` lower case letters.
pub fn random_regex(rng: &mut impl Rng, depth: usize, num_of_symbols: u32) -> RegexNode {
    assert!(
        (1..=26).contains(&num_of_symbols),
        "Only alphabetic symbols are supported, requested {num_of_symbols}"
    );

    if depth == 0 {
        return match rng.random_range(0..10) {
            0 => RegexNode::epsilon(),
            1 => {
                let size = rng.random_range(1..=3);
                let mut symbols: Vec<char> = (0..size).map(|_| random_symbol(rng, num_of_symbols)).collect();
                symbols.sort_unstable();
                symbols.dedup();
                RegexNode::class(symbols)
            }
            _ => RegexNode::symbol(random_symbol(rng, num_of_symbols)),
        };
    }

    match rng.random_range(0..7) {
        0 | 1 => RegexNode::concat(
            random_regex(rng, depth - 1, num_of_symbols),
            random_regex(rng, depth - 1, num_of_symbols),
        ),
        2 | 3 => RegexNode::alternation(
            random_regex(rng, depth - 1, num_of_symbols),
            random_regex(rng, depth - 1, num_of_symbols),
        ),
        4 => RegexNode::star(random_regex(rng, depth - 1, num_of_symbols)),
        5 => RegexNode::plus(random_regex(rng, depth - 1, num_of_symbols)),
        _ => RegexNode::optional(random_regex(rng, depth - 1, num_of_symbols)),
    }
}

/// Returns one of the first `num_of_symbols` lower case letters.
fn random_symbol(rng: &mut impl Rng, num_of_symbols: u32) -> char {
    char::from_digit(rng.random_range(0..num_of_symbols) + 10, 36).expect("Digits from 10 to 35 are letters")
}

#[cfg(test)]
mod tests {
    use super::*;

    use log::trace;
    use test_log::test;

    use fsm_utilities::random_test;

    use crate::parse_regex;

    #[test]
    fn test_random_regex_display_parses() {
        random_test(100, |rng| {
            let regex = random_regex(rng, 4, 3);
            let text = regex.to_string();
            trace!("{text}");

            let parsed = parse_regex(&text).unwrap_or_else(|error| panic!("{text:?} should parse: {error}"));
            assert_eq!(parsed.without_spans(), regex.without_spans(), "{text}");
        });
    }
}

use fsm_automata::Nfa;
use fsm_automata::thompson;
use fsm_syntax::parse_regex;

/// Returns the automaton of Thompson's construction for the given expression.
pub fn nfa_of(regex: &str) -> Nfa {
    thompson(&parse_regex(regex).unwrap()).unwrap()
}

/// Returns all words over the given symbols up to and including the given length.
pub fn all_words(symbols: &[&str], max_length: usize) -> Vec<Vec<String>> {
    let mut words = vec![Vec::new()];
    let mut previous: Vec<Vec<String>> = vec![Vec::new()];
    for _ in 0..max_length {
        let next: Vec<Vec<String>> = previous
            .iter()
            .flat_map(|word| {
                symbols.iter().map(move |symbol| {
                    let mut word = word.clone();
                    word.push(symbol.to_string());
                    word
                })
            })
            .collect();
        words.extend(next.iter().cloned());
        previous = next;
    }

    words
}

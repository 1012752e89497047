use test_case::test_case;

use fsm_syntax::RegexExpr;
use fsm_syntax::RegexNode;
use fsm_syntax::parse_regex;

#[test_case("a(b|c)*" ; "concatenation with starred group")]
#[test_case("[a-z]+x?" ; "class with postfix operators")]
#[test_case("ab|ab" ; "duplicated alternatives")]
#[test_case("ε|a" ; "explicit empty word")]
#[test_case("\\*\\|\\(" ; "escaped operators")]
#[test_case("(a|(b|c))" ; "nested groups")]
#[test_case("a b" ; "spaces are symbols")]
fn test_parse_accepts(text: &str) {
    if let Err(error) = parse_regex(text) {
        panic!("Failed to parse {text:?}: {error}");
    }
}

#[test_case("(ab" ; "unclosed group")]
#[test_case("a|b)" ; "unopened group")]
#[test_case("+a" ; "leading postfix operator")]
#[test_case("[abc" ; "unclosed class")]
#[test_case("[]" ; "empty class")]
fn test_parse_rejects(text: &str) {
    assert!(parse_regex(text).is_err(), "{text:?} should be rejected");
}

#[test]
fn test_parse_escaped_symbols() {
    let regex = parse_regex("\\*").unwrap();
    assert_eq!(regex.expr, RegexExpr::Symbol('*'));
}

#[test]
fn test_display_minimal_parentheses() {
    let regex = RegexNode::concat(
        RegexNode::symbol('a'),
        RegexNode::star(RegexNode::alternation(RegexNode::symbol('b'), RegexNode::symbol('c'))),
    );
    assert_eq!(regex.to_string(), "a(b|c)*");

    let regex = RegexNode::alternation(
        RegexNode::concat(RegexNode::symbol('a'), RegexNode::symbol('b')),
        RegexNode::optional(RegexNode::class(['x', ']'])),
    );
    assert_eq!(regex.to_string(), "ab|[x\\]]?");
}

#[test]
fn test_display_reparses() {
    for text in ["a(b|c)*", "(ab)+|ε", "[a-c]?d", "a**"] {
        let regex = parse_regex(text).unwrap();
        let printed = regex.to_string();
        assert_eq!(
            parse_regex(&printed).unwrap().without_spans(),
            regex.without_spans(),
            "{text:?} printed as {printed:?}"
        );
    }
}

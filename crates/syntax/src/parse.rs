use itertools::Itertools;
use log::trace;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crate::RegexExpr;
use crate::RegexNode;
use crate::Span;

#[derive(Parser)]
#[grammar = "regex.pest"]
pub struct RegexParser;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    #[error("Invalid character range {start}-{end} at position {position}")]
    InvalidRange { start: char, end: char, position: usize },
}

impl ParseError {
    /// Returns the byte offset in the input at which the error was found.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax(error) => match error.location {
                pest::error::InputLocation::Pos(position) => position,
                pest::error::InputLocation::Span((start, _)) => start,
            },
            ParseError::InvalidRange { position, .. } => *position,
        }
    }
}

/// Parses the given text into a regular expression syntax tree.
///
/// Binary operators are left associative, the postfix operators bind
/// strongest and alternation binds weakest. An empty (sub)expression denotes
/// the empty word, so `a|` is the same as `a|ε`.
pub fn parse_regex(text: &str) -> Result<RegexNode, ParseError> {
    let mut pairs = RegexParser::parse(Rule::regex, text).map_err(|error| ParseError::Syntax(Box::new(error)))?;

    let regex = pairs.next().expect("The regex rule always produces one pair");
    let alternation = regex
        .into_inner()
        .next()
        .expect("The regex rule always contains an alternation");

    let result = parse_alternation(alternation)?;
    trace!("Parsed {text:?} into {result:?}");
    Ok(result)
}

fn parse_alternation(pair: Pair<'_, Rule>) -> Result<RegexNode, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::alternation);

    let mut result: Option<RegexNode> = None;
    for concatenation in pair.into_inner() {
        let node = parse_concatenation(concatenation)?;
        result = Some(match result {
            None => node,
            Some(lhs) => RegexNode::alternation(lhs, node),
        });
    }

    Ok(result.expect("An alternation contains at least one concatenation"))
}

fn parse_concatenation(pair: Pair<'_, Rule>) -> Result<RegexNode, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::concatenation);

    let span = Span::from(pair.as_span());
    let mut result: Option<RegexNode> = None;
    for repetition in pair.into_inner() {
        let node = parse_repetition(repetition)?;
        result = Some(match result {
            None => node,
            Some(lhs) => RegexNode::concat(lhs, node),
        });
    }

    // An empty concatenation is the empty word.
    Ok(result.unwrap_or_else(|| RegexNode::new(RegexExpr::Epsilon, span)))
}

fn parse_repetition(pair: Pair<'_, Rule>) -> Result<RegexNode, ParseError> {
    debug_assert_eq!(pair.as_rule(), Rule::repetition);

    let mut inner = pair.into_inner();
    let atom = inner.next().expect("A repetition starts with an atom");
    let mut result = parse_atom(atom)?;

    for postfix in inner {
        let span = Span::new(result.span.start, postfix.as_span().end());
        let expr = match postfix.as_rule() {
            Rule::star => RegexExpr::Star(Box::new(result)),
            Rule::plus => RegexExpr::Plus(Box::new(result)),
            Rule::optional => RegexExpr::Optional(Box::new(result)),
            rule => unreachable!("Unexpected postfix operator {rule:?}"),
        };
        result = RegexNode::new(expr, span);
    }

    Ok(result)
}

fn parse_atom(pair: Pair<'_, Rule>) -> Result<RegexNode, ParseError> {
    let span = Span::from(pair.as_span());

    match pair.as_rule() {
        Rule::group => {
            let alternation = pair.into_inner().next().expect("A group contains an alternation");
            let mut node = parse_alternation(alternation)?;
            node.span = span;
            Ok(node)
        }
        Rule::class => {
            let mut symbols = Vec::new();
            for item in pair.into_inner() {
                match item.as_rule() {
                    Rule::class_range => {
                        let position = item.as_span().start();
                        let mut bounds = item.into_inner();
                        let start = class_char(bounds.next().expect("A range has a lower bound").as_str());
                        let end = class_char(bounds.next().expect("A range has an upper bound").as_str());

                        if start > end {
                            return Err(ParseError::InvalidRange { start, end, position });
                        }

                        symbols.extend(start..=end);
                    }
                    Rule::class_char => symbols.push(class_char(item.as_str())),
                    rule => unreachable!("Unexpected class item {rule:?}"),
                }
            }

            // Keep the first occurrence of every symbol.
            let symbols = symbols.into_iter().unique().collect();
            Ok(RegexNode::new(RegexExpr::Class(symbols), span))
        }
        Rule::epsilon => Ok(RegexNode::new(RegexExpr::Epsilon, span)),
        Rule::escaped | Rule::literal => Ok(RegexNode::new(RegexExpr::Symbol(class_char(pair.as_str())), span)),
        rule => unreachable!("Unexpected atom {rule:?}"),
    }
}

/// Returns the symbol denoted by a possibly escaped character.
fn class_char(text: &str) -> char {
    let mut chars = text.chars();
    match chars.next() {
        Some('\\') => chars.next().expect("An escape is followed by a character"),
        Some(symbol) => symbol,
        None => unreachable!("The grammar does not produce empty characters"),
    }
}

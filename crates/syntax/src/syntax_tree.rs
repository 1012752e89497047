use std::hash::Hash;

/// The character that denotes the empty word in the concrete syntax. It can
/// not be used as a symbol.
pub const EPSILON_CHAR: char = 'ε';

/// Source location information, as byte offsets into the parsed text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Span::new(span.start(), span.end())
    }
}

/// A node of the regular expression syntax tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegexNode {
    pub expr: RegexExpr,
    /// Source location information
    pub span: Span,
}

/// The expressions of the supported regular expression syntax.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegexExpr {
    /// The empty word.
    Epsilon,
    /// A single symbol.
    Symbol(char),
    /// Any one of the given symbols, e.g. `[abc]` or `[a-c]`.
    Class(Vec<char>),
    /// The left expression followed by the right expression.
    Concat(Box<RegexNode>, Box<RegexNode>),
    /// Either the left or the right expression.
    Alternation(Box<RegexNode>, Box<RegexNode>),
    /// Zero or more repetitions.
    Star(Box<RegexNode>),
    /// One or more repetitions.
    Plus(Box<RegexNode>),
    /// Zero or one occurrence.
    Optional(Box<RegexNode>),
}

impl RegexNode {
    /// Creates a node for the given expression at the given location.
    pub fn new(expr: RegexExpr, span: Span) -> Self {
        Self { expr, span }
    }

    pub fn epsilon() -> Self {
        Self::new(RegexExpr::Epsilon, Span::default())
    }

    pub fn symbol(symbol: char) -> Self {
        Self::new(RegexExpr::Symbol(symbol), Span::default())
    }

    pub fn class(symbols: impl IntoIterator<Item = char>) -> Self {
        Self::new(RegexExpr::Class(symbols.into_iter().collect()), Span::default())
    }

    /// The span of the result covers both operands.
    pub fn concat(lhs: RegexNode, rhs: RegexNode) -> Self {
        let span = Span::new(lhs.span.start, rhs.span.end.max(lhs.span.end));
        Self::new(RegexExpr::Concat(Box::new(lhs), Box::new(rhs)), span)
    }

    /// The span of the result covers both operands.
    pub fn alternation(lhs: RegexNode, rhs: RegexNode) -> Self {
        let span = Span::new(lhs.span.start, rhs.span.end.max(lhs.span.end));
        Self::new(RegexExpr::Alternation(Box::new(lhs), Box::new(rhs)), span)
    }

    pub fn star(inner: RegexNode) -> Self {
        let span = inner.span;
        Self::new(RegexExpr::Star(Box::new(inner)), span)
    }

    pub fn plus(inner: RegexNode) -> Self {
        let span = inner.span;
        Self::new(RegexExpr::Plus(Box::new(inner)), span)
    }

    pub fn optional(inner: RegexNode) -> Self {
        let span = inner.span;
        Self::new(RegexExpr::Optional(Box::new(inner)), span)
    }

    /// Returns the number of nodes in the syntax tree.
    pub fn size(&self) -> usize {
        match &self.expr {
            RegexExpr::Epsilon | RegexExpr::Symbol(_) | RegexExpr::Class(_) => 1,
            RegexExpr::Concat(lhs, rhs) | RegexExpr::Alternation(lhs, rhs) => 1 + lhs.size() + rhs.size(),
            RegexExpr::Star(inner) | RegexExpr::Plus(inner) | RegexExpr::Optional(inner) => 1 + inner.size(),
        }
    }

    /// Returns the same syntax tree with all source locations cleared, useful
    /// to compare trees structurally.
    pub fn without_spans(self) -> Self {
        let expr = match self.expr {
            RegexExpr::Concat(lhs, rhs) => {
                RegexExpr::Concat(Box::new(lhs.without_spans()), Box::new(rhs.without_spans()))
            }
            RegexExpr::Alternation(lhs, rhs) => {
                RegexExpr::Alternation(Box::new(lhs.without_spans()), Box::new(rhs.without_spans()))
            }
            RegexExpr::Star(inner) => RegexExpr::Star(Box::new(inner.without_spans())),
            RegexExpr::Plus(inner) => RegexExpr::Plus(Box::new(inner.without_spans())),
            RegexExpr::Optional(inner) => RegexExpr::Optional(Box::new(inner.without_spans())),
            expr => expr,
        };

        Self::new(expr, Span::default())
    }
}

use std::fmt;

use crate::EPSILON_CHAR;
use crate::RegexExpr;
use crate::RegexNode;

/// Characters that must be escaped when they occur as a symbol.
const SPECIAL_CHARS: &[char] = &['|', '*', '+', '?', '(', ')', '[', ']', '\\', EPSILON_CHAR];

/// Characters that must be escaped inside a character class.
const SPECIAL_CLASS_CHARS: &[char] = &[']', '\\', '-'];

impl RegexNode {
    /// Binding strength of the top level operator, higher binds stronger.
    fn precedence(&self) -> usize {
        match &self.expr {
            RegexExpr::Alternation(_, _) => 0,
            RegexExpr::Concat(_, _) => 1,
            RegexExpr::Star(_) | RegexExpr::Plus(_) | RegexExpr::Optional(_) => 2,
            RegexExpr::Epsilon | RegexExpr::Symbol(_) | RegexExpr::Class(_) => 3,
        }
    }

    /// Writes the given operand, with parentheses when it binds weaker than required.
    fn fmt_operand(operand: &RegexNode, minimum: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if operand.precedence() < minimum {
            write!(f, "({operand})")
        } else {
            write!(f, "{operand}")
        }
    }
}

impl fmt::Display for RegexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expr {
            RegexExpr::Epsilon => write!(f, "{EPSILON_CHAR}"),
            RegexExpr::Symbol(symbol) => {
                if SPECIAL_CHARS.contains(symbol) {
                    write!(f, "\\{symbol}")
                } else {
                    write!(f, "{symbol}")
                }
            }
            RegexExpr::Class(symbols) => {
                write!(f, "[")?;
                for symbol in symbols {
                    if SPECIAL_CLASS_CHARS.contains(symbol) {
                        write!(f, "\\{symbol}")?;
                    } else {
                        write!(f, "{symbol}")?;
                    }
                }
                write!(f, "]")
            }
            RegexExpr::Concat(lhs, rhs) => {
                RegexNode::fmt_operand(lhs, 1, f)?;
                RegexNode::fmt_operand(rhs, 2, f)
            }
            RegexExpr::Alternation(lhs, rhs) => {
                RegexNode::fmt_operand(lhs, 0, f)?;
                write!(f, "|")?;
                RegexNode::fmt_operand(rhs, 1, f)
            }
            RegexExpr::Star(inner) => {
                RegexNode::fmt_operand(inner, 2, f)?;
                write!(f, "*")
            }
            RegexExpr::Plus(inner) => {
                RegexNode::fmt_operand(inner, 2, f)?;
                write!(f, "+")
            }
            RegexExpr::Optional(inner) => {
                RegexNode::fmt_operand(inner, 2, f)?;
                write!(f, "?")
            }
        }
    }
}

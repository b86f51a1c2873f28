// Dweve KVDF - Valve KeyValues Data Format
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Boolean conditional expressions over named conditions.
//!
//! # Grammar (lowest to highest precedence)
//!
//! ```text
//! or   = and ("||" and)*
//! and  = not ("&&" not)*
//! not  = ["!"] atom
//! atom = "(" or ")" | "$" identifier
//! ```
//!
//! `$NAME` is true when `NAME` is in the active [`ConditionSet`]. Names are
//! looked up when an operand is evaluated, never while it is scanned, so a
//! short-circuited right-hand side is consumed but never resolved.
//!
//! ```
//! use kvdf_core::{evaluate_condition, ConditionSet};
//!
//! let active: ConditionSet = ["WIN32"].into_iter().collect();
//! assert_eq!(evaluate_condition("$WIN32 && !$X360", &active), Ok(true));
//! assert_eq!(evaluate_condition("!$WIN32 || ($A && $B)", &active), Ok(false));
//! ```

use crate::conditions::ConditionSet;
use crate::error::{GrammarErrorKind, ParseContext, ParseError, Severity};
use crate::grammar::Fault;
use crate::lex::{literals, Cursor};

const PRODUCTION: &str = "ConditionalExpression";

/// An operand before it is reduced to a truth value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An already evaluated sub-expression.
    Bool(bool),
    /// A `$NAME` atom that has not been looked up yet.
    Unresolved(String),
}

impl Operand {
    /// Reduces the operand to a truth value against `conditions`.
    pub fn truth(&self, conditions: &ConditionSet) -> bool {
        match self {
            Operand::Bool(value) => *value,
            Operand::Unresolved(name) => conditions.contains(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

/// Recursive-descent evaluator reading from a shared cursor.
pub(crate) struct ConditionParser<'a, 'src> {
    cur: &'a mut Cursor<'src>,
    conditions: &'a ConditionSet,
    depth: usize,
    max_depth: usize,
}

impl<'a, 'src> ConditionParser<'a, 'src> {
    /// `depth` is the nesting already used by the enclosing grammar.
    pub(crate) fn new(
        cur: &'a mut Cursor<'src>,
        conditions: &'a ConditionSet,
        depth: usize,
        max_depth: usize,
    ) -> Self {
        Self {
            cur,
            conditions,
            depth,
            max_depth,
        }
    }

    /// Parses and evaluates an `or` expression.
    pub(crate) fn evaluate(&mut self) -> Result<bool, Fault> {
        let operand = self.or()?;
        Ok(operand.truth(self.conditions))
    }

    fn or(&mut self) -> Result<Operand, Fault> {
        let mut lhs = self.and()?;
        loop {
            self.cur.skip_trivia();
            if !self.cur.eat("||") {
                return Ok(lhs);
            }
            let rhs = self.and()?;
            lhs = self.combine(Connective::Or, &lhs, &rhs);
        }
    }

    fn and(&mut self) -> Result<Operand, Fault> {
        let mut lhs = self.not()?;
        loop {
            self.cur.skip_trivia();
            if !self.cur.eat("&&") {
                return Ok(lhs);
            }
            let rhs = self.not()?;
            lhs = self.combine(Connective::And, &lhs, &rhs);
        }
    }

    fn not(&mut self) -> Result<Operand, Fault> {
        self.cur.skip_trivia();
        if self.cur.eat_char('!') {
            let operand = self.atom()?;
            return Ok(Operand::Bool(!operand.truth(self.conditions)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Operand, Fault> {
        self.cur.skip_trivia();
        let start = self.cur.pos();

        if self.cur.eat_char('(') {
            if self.depth >= self.max_depth {
                return Err(self.fault(GrammarErrorKind::NestingTooDeep(self.max_depth), start));
            }
            self.depth += 1;
            let inner = self.or()?;
            self.depth -= 1;
            self.cur.skip_trivia();
            if !self.cur.eat_char(')') {
                let pos = self.cur.pos();
                return Err(self.fault(GrammarErrorKind::ExpectedToken(')'), pos));
            }
            return Ok(Operand::Bool(inner.truth(self.conditions)));
        }

        if self.cur.eat_char('$') {
            return match literals::identifier(self.cur) {
                Some(name) => Ok(Operand::Unresolved(name.to_string())),
                None => {
                    let pos = self.cur.pos();
                    Err(self.fault(GrammarErrorKind::ExpectedConditionalOperand, pos))
                }
            };
        }

        Err(self.fault(GrammarErrorKind::ExpectedConditionalOperand, start))
    }

    /// The single place operands are combined. `&&`/`||` short-circuit, so
    /// the right operand is only looked up when the left does not decide.
    fn combine(&self, connective: Connective, lhs: &Operand, rhs: &Operand) -> Operand {
        let left = lhs.truth(self.conditions);
        Operand::Bool(match connective {
            Connective::And => left && rhs.truth(self.conditions),
            Connective::Or => left || rhs.truth(self.conditions),
        })
    }

    fn fault(&self, kind: GrammarErrorKind, pos: crate::lex::SourcePos) -> Fault {
        Fault::new(kind, pos, ParseContext::new(PRODUCTION, pos))
    }
}

/// Evaluates a standalone conditional expression such as `$A && !$B`.
///
/// The whole input must be one expression; surrounding whitespace and
/// `//` comments are allowed.
pub fn evaluate_condition(expr: &str, conditions: &ConditionSet) -> Result<bool, ParseError> {
    let mut cur = Cursor::new(expr);
    let result = ConditionParser::new(&mut cur, conditions, 0, usize::MAX).evaluate();
    let value = result.map_err(|f| f.into_error(Severity::Fatal))?;
    cur.skip_trivia();
    if !cur.is_eof() {
        let pos = cur.pos();
        return Err(Fault::new(
            GrammarErrorKind::TrailingInput,
            pos,
            ParseContext::new(PRODUCTION, crate::lex::SourcePos::start()),
        )
        .into_error(Severity::Fatal));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(names: &[&str]) -> ConditionSet {
        names.iter().copied().collect()
    }

    fn eval(expr: &str, names: &[&str]) -> bool {
        evaluate_condition(expr, &active(names)).unwrap()
    }

    #[test]
    fn test_single_atom() {
        assert!(eval("$WIN32", &["WIN32"]));
        assert!(!eval("$WIN32", &[]));
    }

    #[test]
    fn test_atom_is_case_sensitive() {
        assert!(!eval("$win32", &["WIN32"]));
    }

    #[test]
    fn test_negation() {
        assert!(eval("!$X360", &["WIN32"]));
        assert!(!eval("!$WIN32", &["WIN32"]));
    }

    #[test]
    fn test_and_or() {
        assert!(eval("$A && $B", &["A", "B"]));
        assert!(!eval("$A && $B", &["A"]));
        assert!(eval("$A || $B", &["B"]));
        assert!(!eval("$A || $B", &[]));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // A || (B && C)
        assert!(eval("$A || $B && $C", &["A"]));
        assert!(!eval("$A || $B && $C", &["B"]));
        // (A && B) || C
        assert!(eval("$A && $B || $C", &["C"]));
    }

    #[test]
    fn test_left_to_right_chain() {
        assert!(eval("$A && $B && $C", &["A", "B", "C"]));
        assert!(!eval("$A && $B && $C", &["A", "C"]));
        assert!(eval("$A || $B || $C", &["C"]));
    }

    #[test]
    fn test_parentheses() {
        assert!(!eval("($A || $B) && $C", &["A"]));
        assert!(eval("!($A && $B)", &["A"]));
        assert!(eval("((($A)))", &["A"]));
    }

    #[test]
    fn test_short_circuit_and() {
        assert!(!eval("!$MISSING && $ALSOMISSING", &[]));
        assert!(!eval("$MISSING && $ALSOMISSING", &[]));
        assert!(eval("$PRESENT || $ALSOMISSING", &["PRESENT"]));
    }

    #[test]
    fn test_short_circuit_consumes_rhs() {
        // The right operand is still parsed; a malformed one is an error.
        let err = evaluate_condition("$A || $", &active(&["A"])).unwrap_err();
        assert_eq!(err.code, GrammarErrorKind::ExpectedConditionalOperand.code());
    }

    #[test]
    fn test_whitespace_between_tokens() {
        assert!(eval("  $A\t&&\n!$B  ", &["A"]));
    }

    #[test]
    fn test_dollar_must_touch_identifier() {
        let err = evaluate_condition("$ A", &active(&["A"])).unwrap_err();
        assert_eq!(err.code, GrammarErrorKind::ExpectedConditionalOperand.code());
        assert_eq!(err.column(), 2);
    }

    #[test]
    fn test_missing_operand() {
        let err = evaluate_condition("$A &&", &ConditionSet::new()).unwrap_err();
        assert_eq!(err.message, "expected conditional operand");
        assert_eq!(err.context.production, "ConditionalExpression");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = evaluate_condition("($A", &ConditionSet::new()).unwrap_err();
        assert_eq!(err.code, GrammarErrorKind::ExpectedToken(')').code());
    }

    #[test]
    fn test_trailing_input() {
        let err = evaluate_condition("$A $B", &ConditionSet::new()).unwrap_err();
        assert_eq!(err.code, GrammarErrorKind::TrailingInput.code());
    }

    #[test]
    fn test_operand_truth() {
        let set = active(&["X"]);
        assert!(Operand::Bool(true).truth(&set));
        assert!(Operand::Unresolved("X".into()).truth(&set));
        assert!(!Operand::Unresolved("Y".into()).truth(&set));
    }
}

use std::fmt;

use crate::balance::is_balanced;
use crate::error::ConvertError;
use crate::tokenizer::{starts_with_operator, Token, Tokenizer};

/// A postfix expression. Its `Display` form separates tokens with a single
/// space.
#[derive(Debug, PartialEq, Clone)]
pub struct RpnExpr<'a>(pub Vec<Token<'a>>);

impl<'a> std::ops::Deref for RpnExpr<'a> {
    type Target = Vec<Token<'a>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for RpnExpr<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for RpnExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, token) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

pub struct RpnConverter;

impl RpnConverter {
    /// Verifies that the converted expression is well formed: it must not
    /// start with an operator character and every operator must combine two
    /// operands.
    fn verify_rpn(
        output: &[Token],
        n_operands: usize,
        n_operators: usize,
    ) -> Result<(), ConvertError> {
        if output
            .first()
            .is_some_and(|token| starts_with_operator(&token.to_string()))
        {
            return Err(ConvertError::LeadingOperator);
        }

        if n_operands != n_operators + 1 {
            return Err(ConvertError::OperandMismatch {
                operands: n_operands,
                operators: n_operators,
            });
        }

        Ok(())
    }

    /// Converts infix notation to Reverse Polish Notation
    /// using the Shunting Yard algorithm.
    ///
    /// All operators are left associative. Brackets of any shape may be
    /// used as long as they are balanced.
    pub fn convert(input: &str) -> Result<RpnExpr<'_>, ConvertError> {
        use crate::tokenizer::Token::*;

        if !is_balanced(input) {
            return Err(ConvertError::Unbalanced);
        }

        let mut output = Vec::new();
        let mut stack: Vec<Token> = Vec::new();
        let mut n_operands = 0usize;
        let mut n_operators = 0usize;

        for token in Tokenizer::new(input) {
            let token = token?;
            match token {
                Number { .. } => {
                    output.push(token);
                    n_operands += 1;
                }
                Operator(op) => {
                    while let Some(&Operator(top)) = stack.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        stack.pop();
                        output.push(Operator(top));
                    }

                    stack.push(token);
                    n_operators += 1;
                }
                Open(_) => stack.push(token),
                Close(bracket) => loop {
                    match stack.pop() {
                        Some(Open(open)) if open == bracket => break,
                        Some(tok @ Operator(_)) => output.push(tok),
                        _ => return Err(ConvertError::UnmatchedClosingBracket(bracket)),
                    }
                },
            }
        }

        while let Some(tok) = stack.pop() {
            match tok {
                Operator(_) => output.push(tok),
                _ => return Err(ConvertError::Unbalanced),
            }
        }

        RpnConverter::verify_rpn(&output, n_operands, n_operators)?;
        Ok(RpnExpr(output))
    }
}

use thiserror::Error;

use crate::tokenizer::{Bracket, Op};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(String),
}

/// Reasons an infix expression has no postfix form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("unbalanced brackets")]
    Unbalanced,
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(String),
    #[error("closing '{}' has no matching opening bracket", .0.close())]
    UnmatchedClosingBracket(Bracket),
    #[error("expression starts with an operator")]
    LeadingOperator,
    #[error("{operands} operands cannot be combined by {operators} operators")]
    OperandMismatch { operands: usize, operators: usize },
}

impl From<TokenizerError> for ConvertError {
    fn from(err: TokenizerError) -> Self {
        match err {
            TokenizerError::UnexpectedToken(token) => ConvertError::UnexpectedToken(token),
        }
    }
}

/// Reasons a postfix expression cannot be rebuilt as infix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfixError {
    #[error("not enough operands for '{0}'")]
    NotEnoughOperands(Op),
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(String),
    #[error("nothing left on the operand stack")]
    EmptyStack,
    #[error("expression starts with an operator")]
    LeadingOperator,
    #[error("{operands} operands cannot be combined by {operators} operators")]
    OperandMismatch { operands: usize, operators: usize },
}

impl From<TokenizerError> for InfixError {
    fn from(err: TokenizerError) -> Self {
        match err {
            TokenizerError::UnexpectedToken(token) => InfixError::UnexpectedToken(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    #[error("nothing left on the evaluation stack")]
    EmptyStack,
}

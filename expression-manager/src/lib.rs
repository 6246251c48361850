//! Integer expression tools over whitespace separated tokens: bracket
//! balance checking, infix to postfix conversion, postfix to infix
//! reconstruction and postfix evaluation.
//!
//! The functions at the crate root speak plain strings and report every
//! failure as [`INVALID`]. The typed converters in the submodules return
//! the underlying errors.

pub mod balance;
pub mod error;
pub mod ffi;
pub mod infix_converter;
pub mod rpn_converter;
pub mod rpn_evaluator;
pub mod tokenizer;

pub use balance::is_balanced;

use infix_converter::InfixConverter;
use rpn_converter::RpnConverter;
use rpn_evaluator::RpnEvaluator;

/// Returned in place of a result for any malformed expression.
pub const INVALID: &str = "invalid";

/// Converts `( 1 + 2 ) * 3` into `1 2 + 3 *`.
pub fn infix_to_postfix(expression: &str) -> String {
    match RpnConverter::convert(expression) {
        Ok(rpn) => rpn.to_string(),
        Err(e) => {
            tracing::debug!(expression, %e, "rejecting infix expression");
            INVALID.to_string()
        }
    }
}

/// Converts `3 4 2 * +` into `( 3 + ( 4 * 2 ) )`.
pub fn postfix_to_infix(expression: &str) -> String {
    match InfixConverter::convert(expression) {
        Ok(infix) => infix.to_string(),
        Err(e) => {
            tracing::debug!(expression, %e, "rejecting postfix expression");
            INVALID.to_string()
        }
    }
}

/// Evaluates a postfix expression to its decimal result.
pub fn postfix_evaluate(expression: &str) -> String {
    match RpnEvaluator::evaluate(expression) {
        Ok(value) => value.to_string(),
        Err(e) => {
            tracing::debug!(expression, %e, "nothing to evaluate");
            INVALID.to_string()
        }
    }
}

use crate::error::{EvaluatorError, TokenizerError};
use crate::rpn_converter::RpnExpr;
use crate::tokenizer::{Op, Token, Tokenizer};

pub struct RpnEvaluator;

impl RpnEvaluator {
    /// Evaluates a postfix expression and returns the value left on top of
    /// the stack.
    ///
    /// The scan stops early, keeping whatever is already on the stack, at
    /// the first token it cannot use: an unknown word, a bracket, an
    /// operator with fewer than two operands, or a division by zero. No
    /// further validation is done, so `1 2 3 +` evaluates to `5`.
    pub fn evaluate(input: &str) -> Result<i64, EvaluatorError> {
        RpnEvaluator::evaluate_tokens(Tokenizer::new(input))
    }

    /// Evaluates an already converted expression.
    pub fn evaluate_expr(expr: &RpnExpr) -> Result<i64, EvaluatorError> {
        RpnEvaluator::evaluate_tokens(expr.iter().copied().map(Ok))
    }

    fn evaluate_tokens<'a, I>(tokens: I) -> Result<i64, EvaluatorError>
    where
        I: IntoIterator<Item = Result<Token<'a>, TokenizerError>>,
    {
        let mut eval_stack: Vec<i64> = vec![];

        for token in tokens {
            match token {
                Ok(Token::Number { value, .. }) => eval_stack.push(value),
                Ok(Token::Operator(op)) if eval_stack.len() >= 2 => {
                    let b = eval_stack.pop().unwrap_or_default();
                    let a = eval_stack.pop().unwrap_or_default();
                    match apply(op, a, b) {
                        Some(result) => eval_stack.push(result),
                        None => {
                            tracing::debug!(a, b, %op, "division by zero, stopping");
                            break;
                        }
                    }
                }
                Ok(token) => {
                    tracing::debug!(%token, depth = eval_stack.len(), "unusable token, stopping");
                    break;
                }
                Err(e) => {
                    tracing::debug!(%e, "stopping");
                    break;
                }
            }
        }

        eval_stack.last().copied().ok_or(EvaluatorError::EmptyStack)
    }
}

/// Applies `op` with wrapping overflow. Returns `None` when the divisor of
/// `/` or `%` is zero.
fn apply(op: Op, a: i64, b: i64) -> Option<i64> {
    match op {
        Op::Plus => Some(a.wrapping_add(b)),
        Op::Minus => Some(a.wrapping_sub(b)),
        Op::Mult => Some(a.wrapping_mul(b)),
        Op::Div => (b != 0).then(|| a.wrapping_div(b)),
        Op::Mod => (b != 0).then(|| a.wrapping_rem(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpn_converter::RpnConverter;

    #[test]
    fn test_rpn_evaluator() {
        assert_eq!(RpnEvaluator::evaluate("3 4 +"), Ok(7));
        assert_eq!(RpnEvaluator::evaluate("1 2 -"), Ok(-1));
        assert_eq!(RpnEvaluator::evaluate("2 3 *"), Ok(6));
        assert_eq!(RpnEvaluator::evaluate("10 2 /"), Ok(5));
        assert_eq!(RpnEvaluator::evaluate("10 3 %"), Ok(1));
        assert_eq!(RpnEvaluator::evaluate("3 4 2 * +"), Ok(11));
        assert_eq!(RpnEvaluator::evaluate("-8"), Ok(-8));
    }

    #[test]
    fn test_rpn_evaluator_truncation() {
        assert_eq!(RpnEvaluator::evaluate("-7 2 /"), Ok(-3));
        assert_eq!(RpnEvaluator::evaluate("-7 2 %"), Ok(-1));
        assert_eq!(RpnEvaluator::evaluate("7 -2 %"), Ok(1));
    }

    #[test]
    fn test_rpn_evaluator_wrapping() {
        assert_eq!(
            RpnEvaluator::evaluate("9223372036854775807 1 +"),
            Ok(i64::MIN)
        );
        assert_eq!(
            RpnEvaluator::evaluate("-9223372036854775808 -1 /"),
            Ok(i64::MIN)
        );
    }

    #[test]
    fn test_rpn_evaluator_division_by_zero() {
        assert_eq!(
            RpnEvaluator::evaluate("10 0 /"),
            Err(EvaluatorError::EmptyStack)
        );
        assert_eq!(
            RpnEvaluator::evaluate("5 0 %"),
            Err(EvaluatorError::EmptyStack)
        );
        assert_eq!(RpnEvaluator::evaluate("1 10 0 / +"), Ok(1));
    }

    #[test]
    fn test_rpn_evaluator_stops_early() {
        assert_eq!(RpnEvaluator::evaluate("3 4 + foo 9"), Ok(7));
        assert_eq!(RpnEvaluator::evaluate("4 +"), Ok(4));
        assert_eq!(RpnEvaluator::evaluate("2 ( 3 +"), Ok(2));
        assert_eq!(RpnEvaluator::evaluate("+"), Err(EvaluatorError::EmptyStack));
        assert_eq!(RpnEvaluator::evaluate(""), Err(EvaluatorError::EmptyStack));
    }

    #[test]
    fn test_rpn_evaluator_does_not_check_arity() {
        assert_eq!(RpnEvaluator::evaluate("1 2 3 +"), Ok(5));
    }

    #[test]
    fn test_convert_to_rpn_and_eval() {
        let rpn = RpnConverter::convert("( 123 * 6 + 12 ) * [ 13 - 4 ]").unwrap();
        assert_eq!(RpnEvaluator::evaluate_expr(&rpn), Ok(6750));

        let rpn = RpnConverter::convert("1 + 1 + 15 * 3 - 1 - -2").unwrap();
        assert_eq!(RpnEvaluator::evaluate_expr(&rpn), Ok(48));

        let rpn = RpnConverter::convert("{ 100 % 7 } * 3 / 2").unwrap();
        assert_eq!(RpnEvaluator::evaluate_expr(&rpn), Ok(3));
    }
}

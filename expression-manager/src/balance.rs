use crate::tokenizer::Bracket;

/// Checks that every bracket in `expression` is closed by a bracket of the
/// same shape, in nesting order.
///
/// The scan is per character rather than per token, so `(1+2)` is accepted
/// here even though the converters would reject its tokens. Characters other
/// than brackets are ignored and an empty expression is balanced.
pub fn is_balanced(expression: &str) -> bool {
    let mut stack = Vec::new();

    for (idx, c) in expression.char_indices() {
        if let Some(bracket) = Bracket::from_open(c) {
            stack.push(bracket);
        } else if let Some(bracket) = Bracket::from_close(c) {
            if stack.pop() != Some(bracket) {
                tracing::debug!(idx, close = %c, "closing bracket does not match");
                return false;
            }
        }
    }

    if !stack.is_empty() {
        tracing::debug!(unclosed = stack.len(), "brackets left open");
    }
    stack.is_empty()
}

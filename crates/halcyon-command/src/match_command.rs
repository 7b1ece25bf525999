//! The expression-matching command.
//!
//! `MatchCommand` evaluates the `Expression` property of the current
//! state's view action — for example `{entity}='Customer_Input'` — and
//! reports success or failure. Comparisons are always made on a string
//! basis: `<` means lexicographic ordering, not numeric.

use crate::{
    CommandError, CommandOutcome, InteractionCommand, InteractionContext,
};

/// Supported comparators, longest first so `<=` is recognised before
/// `<` during the scan.
const COMPARATORS: [&str; 9] = [
    "startsWith",
    "endsWith",
    "contains",
    "<=",
    ">=",
    "!=",
    "<",
    ">",
    "=",
];

/// Evaluates the current state's match expression.
///
/// Registers as `Match` under the default naming convention. A missing
/// state, view action, or expression — or an expression with no
/// recognisable comparator — fails the command; it never panics and
/// never surfaces as a server error.
#[derive(Debug, Default)]
pub struct MatchCommand;

impl InteractionCommand for MatchCommand {
    fn execute(
        &self,
        context: &mut InteractionContext,
    ) -> Result<CommandOutcome, CommandError> {
        match evaluate_current_state(context) {
            Some(true) => Ok(CommandOutcome::Success),
            Some(false) => Ok(CommandOutcome::Failure),
            None => {
                tracing::error!(
                    "could not evaluate match expression for current state"
                );
                Ok(CommandOutcome::Failure)
            }
        }
    }
}

fn evaluate_current_state(context: &InteractionContext) -> Option<bool> {
    let state = context.get_current_state()?;
    if state.entity_name().is_empty() {
        return None;
    }
    let expression = state.get_view_action()?.get_property("Expression")?;
    evaluate(context, expression)
}

/// Parses and evaluates one simple expression. `None` when no
/// comparator is found (a comparator at position zero means an empty
/// left operand and also fails).
fn evaluate(context: &InteractionContext, expression: &str) -> Option<bool> {
    for comparator in COMPARATORS {
        let Some(position) = expression.find(comparator) else {
            continue;
        };
        if position == 0 {
            continue;
        }
        let left =
            resolve_operand(context, &expression[..position]);
        let right = resolve_operand(
            context,
            &expression[position + comparator.len()..],
        );
        return Some(compare(comparator, &left, &right));
    }
    None
}

fn compare(comparator: &str, left: &str, right: &str) -> bool {
    match comparator {
        "=" => left == right,
        "!=" => left != right,
        "<" => left < right,
        ">" => left > right,
        "<=" => left <= right,
        ">=" => left >= right,
        "startsWith" => left.starts_with(right),
        "endsWith" => left.ends_with(right),
        "contains" => left.contains(right),
        _ => false,
    }
}

/// Resolves one operand: quoted literals lose their quotes, `{variable}`
/// looks up path parameters first and query parameters second, and an
/// unresolved variable falls back to its bare name. Values are trimmed
/// before comparison.
fn resolve_operand(context: &InteractionContext, operand: &str) -> String {
    let trimmed = operand.trim();
    if let Some(literal) = strip_quotes(trimmed, '\'')
        .or_else(|| strip_quotes(trimmed, '"'))
    {
        return literal.trim().to_string();
    }
    if let Some(variable) = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        let variable = variable.trim();
        return context
            .first_path_parameter(variable)
            .or_else(|| context.first_query_parameter(variable))
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| variable.to_string());
    }
    trimmed.to_string()
}

fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    } else {
        None
    }
}

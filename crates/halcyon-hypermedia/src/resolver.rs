//! Path-to-entity resolution.
//!
//! Given an HTTP event and a concrete request path, work out which
//! declared entity type the path refers to. Resolution is two-phase:
//! ask the state provider directly, then fall back to a best-effort
//! pattern scan over every declared path template. The fallback is
//! heuristic by design — see the notes on [`resolve_entity_name`].

use std::collections::HashMap;

use regex::Regex;

use crate::{Event, ResourceStateProvider, DEFAULT_ID_PATH_ELEMENT};

/// Resolves the entity type name a request path refers to.
///
/// Before matching, every path-parameter *value* occurring in the raw
/// path is substituted back into its `{parameterName}` placeholder, so
/// the text compared against declared templates is template-shaped.
///
/// Phase 1 delegates to the provider's determinant — deterministic and
/// preferred. Phase 2 scans the declared `(path, states)` table: each
/// state's template is split around its path-id placeholder and the
/// request path must carry the captured prefix and suffix; when that
/// fails, a template that is itself a prefix of the request path still
/// counts as a hit. The scan awards ties to the first-declared state —
/// declaration order is the documented tie-break policy.
///
/// Returns `None` when nothing matches; callers decide whether that is
/// a client error (it is, on decode).
pub fn resolve_entity_name(
    provider: &dyn ResourceStateProvider,
    event: &Event,
    resource_path: &str,
    path_parameters: &HashMap<String, Vec<String>>,
) -> Option<String> {
    let canonical = canonicalize_path(resource_path, path_parameters);

    if let Some(state) = provider.determine(event, &canonical) {
        return Some(state.entity_name().to_string());
    }

    tracing::warn!(path = %canonical, "no state found, dropping back to path matching");
    for (declared_path, state_names) in provider.states_by_path() {
        for state_name in state_names {
            let Some(state) = provider.state_by_name(state_name) else {
                continue;
            };
            let id_parameter =
                state.path_id().unwrap_or(DEFAULT_ID_PATH_ELEMENT);

            let pattern_hit = match split_template(declared_path, id_parameter)
            {
                Some((prefix, suffix)) => {
                    canonical.starts_with(&prefix)
                        && canonical.ends_with(&suffix)
                }
                None => false,
            };
            // Last resort: a literal template that prefixes the request
            // path is still considered a hit.
            if pattern_hit || canonical.starts_with(declared_path.as_str()) {
                return Some(state.entity_name().to_string());
            }
        }
    }

    None
}

/// Substitutes each known path-parameter value back into its
/// `{parameterName}` placeholder, yielding a template-shaped path.
pub fn canonicalize_path(
    resource_path: &str,
    path_parameters: &HashMap<String, Vec<String>>,
) -> String {
    let mut canonical = resource_path.to_string();
    for (parameter, values) in path_parameters {
        for value in values {
            if value.is_empty() {
                continue;
            }
            canonical = canonical.replace(value, &format!("{{{parameter}}}"));
        }
    }
    canonical
}

/// Splits a declared template around its `{id_parameter}` placeholder,
/// returning the literal prefix and suffix. `None` when the template
/// does not carry the placeholder.
fn split_template(
    declared_path: &str,
    id_parameter: &str,
) -> Option<(String, String)> {
    let pattern = format!(r"(.*)\{{{}\}}(.*)", regex::escape(id_parameter));
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(error) => {
            tracing::debug!(%id_parameter, %error, "unusable path-id pattern");
            return None;
        }
    };
    let captures = regex.captures(declared_path)?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

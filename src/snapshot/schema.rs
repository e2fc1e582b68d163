//! Structural schema: the shape of a machine without its behavior.
//!
//! ```json
//! {
//!   "states": ["AJAR", "CLOSED", "OPEN"],
//!   "startState": "OPEN",
//!   "transitions": [
//!     {"name": "preClose", "start": "OPEN", "end": "AJAR"},
//!     {"name": "close", "start": "AJAR", "end": "CLOSED"}
//!   ]
//! }
//! ```
//!
//! States are sorted with [`collate`]; transitions keep declaration order.
//! Guards and actions are never encoded.

use super::error::CodecError;
use crate::core::{State, TransitionTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Endpoints of one transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSchema {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Serializable structure of a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub states: Vec<String>,

    #[serde(rename = "startState")]
    pub start_state: String,

    pub transitions: Vec<TransitionSchema>,
}

/// A schema whose state names have been turned back into states.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSchema<S> {
    pub states: Vec<S>,
    pub start_state: S,
    /// `(name, start, end)` in declaration order
    pub transitions: Vec<(String, S, S)>,
}

/// Case-insensitive ordering of state names.
///
/// Only case is folded. Accents and other locale-collator equivalences are
/// not, so `"Étagère"` sorts after every ASCII name. Names that differ only
/// by case compare by their raw form, which keeps the result total and
/// export deterministic.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Schema {
    /// Describe a machine's structure.
    pub fn describe<S: State, C>(
        states: &[S],
        start_state: &S,
        table: &TransitionTable<S, C>,
    ) -> Self {
        let mut names: Vec<String> = states.iter().map(|s| s.name().to_string()).collect();
        names.sort_by(|a, b| collate(a, b));
        names.dedup();

        Self {
            states: names,
            start_state: start_state.name().to_string(),
            transitions: table
                .iter()
                .map(|t| TransitionSchema {
                    name: t.name.clone(),
                    start: t.start.name().to_string(),
                    end: t.end.name().to_string(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse every state name with `parser`.
    ///
    /// Reports all names the parser rejected, not just the first one.
    pub fn parse<S, P>(&self, parser: P) -> Result<ParsedSchema<S>, Vec<String>>
    where
        P: Fn(&str) -> Option<S>,
    {
        let names: Vec<&str> = self
            .states
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.start_state.as_str()))
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|t| [t.start.as_str(), t.end.as_str()]),
            )
            .collect();

        let checks: Vec<Validation<S, NonEmptyVec<String>>> = names
            .iter()
            .map(|name| match parser(name) {
                Some(state) => Validation::success(state),
                None => Validation::fail(name.to_string()),
            })
            .collect();

        match Validation::all_vec(checks) {
            Validation::Success(parsed) => {
                let mut parsed = parsed.into_iter();
                let states: Vec<S> = parsed.by_ref().take(self.states.len()).collect();
                let Some(start_state) = parsed.next() else {
                    return Err(vec![self.start_state.clone()]);
                };
                let mut transitions = Vec::with_capacity(self.transitions.len());
                for t in &self.transitions {
                    if let (Some(start), Some(end)) = (parsed.next(), parsed.next()) {
                        transitions.push((t.name.clone(), start, end));
                    }
                }

                Ok(ParsedSchema {
                    states,
                    start_state,
                    transitions,
                })
            }
            Validation::Failure(errors) => {
                let mut rejected: Vec<String> = Vec::new();
                for name in errors.iter() {
                    if !rejected.contains(name) {
                        rejected.push(name.clone());
                    }
                }
                Err(rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    fn door_table() -> TransitionTable<String, ()> {
        TransitionTable::new(vec![
            Transition::new("preClose", "OPEN".to_string(), "AJAR".to_string()),
            Transition::new("close", "AJAR".to_string(), "CLOSED".to_string()),
        ])
    }

    #[test]
    fn collate_ignores_case() {
        assert_eq!(collate("ajar", "OPEN"), Ordering::Less);
        assert_eq!(collate("Open", "closed"), Ordering::Greater);
        assert_eq!(collate("b", "B"), Ordering::Greater);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn collate_does_not_fold_accents() {
        assert_eq!(collate("étage", "Zed"), Ordering::Greater);
        assert_ne!(collate("café", "cafe"), Ordering::Equal);
        assert_eq!(collate("Café", "café"), Ordering::Less);
    }

    #[test]
    fn describe_sorts_states_and_keeps_transition_order() {
        let table = door_table();
        let schema = Schema::describe(&table.states(), &"OPEN".to_string(), &table);

        assert_eq!(schema.states, vec!["AJAR", "CLOSED", "OPEN"]);
        assert_eq!(schema.start_state, "OPEN");
        let names: Vec<&str> = schema
            .transitions
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["preClose", "close"]);
    }

    #[test]
    fn schema_json_uses_camel_case_start_state() {
        let table = door_table();
        let schema = Schema::describe(&table.states(), &"OPEN".to_string(), &table);

        assert_eq!(
            schema.to_json().unwrap(),
            concat!(
                r#"{"states":["AJAR","CLOSED","OPEN"],"startState":"OPEN","#,
                r#""transitions":[{"name":"preClose","start":"OPEN","end":"AJAR"},"#,
                r#"{"name":"close","start":"AJAR","end":"CLOSED"}]}"#
            )
        );
    }

    #[test]
    fn parse_maps_every_name() {
        let table = door_table();
        let schema = Schema::describe(&table.states(), &"OPEN".to_string(), &table);

        let parsed = schema.parse(|s| Some(s.to_lowercase())).unwrap();

        assert_eq!(parsed.states, vec!["ajar", "closed", "open"]);
        assert_eq!(parsed.start_state, "open");
        let transitions: Vec<(&str, &str, &str)> = parsed
            .transitions
            .iter()
            .map(|(name, start, end)| (name.as_str(), start.as_str(), end.as_str()))
            .collect();
        assert_eq!(
            transitions,
            vec![("preClose", "open", "ajar"), ("close", "ajar", "closed")]
        );
    }

    #[test]
    fn parse_reports_all_rejected_names_once() {
        let table = door_table();
        let schema = Schema::describe(&table.states(), &"OPEN".to_string(), &table);

        let result = schema.parse(|s| (s == "OPEN").then(|| s.to_string()));

        assert_eq!(result, Err(vec!["AJAR".to_string(), "CLOSED".to_string()]));
    }
}

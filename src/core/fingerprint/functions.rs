//! Formatting function call fingerprints.
//!
//! `NUMBER(...)` and `DATETIME(...)` calls carry formatting contracts
//! (fraction digits, date styles) that must survive translation. Argument
//! order inside a call is irrelevant, and plural variants commonly repeat
//! the same call, so the fingerprint is the sorted, deduplicated list of
//! calls with each call's arguments sorted alphabetically.

use std::sync::LazyLock;

use regex::Regex;

static FUNCTION_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(NUMBER|DATETIME)\(([^)]*)\)").unwrap());

/// One canonical formatting call: name plus sorted arguments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<String>,
}

/// Extract the canonical call list from a message text.
pub fn function_calls(text: &str) -> Vec<FunctionCall> {
    let mut calls: Vec<FunctionCall> = Vec::new();
    for capture in FUNCTION_CALL_RE.captures_iter(text) {
        let mut args: Vec<String> = capture[2]
            .split(',')
            .map(|arg| arg.trim().to_string())
            .collect();
        args.sort();
        let call = FunctionCall {
            name: capture[1].to_string(),
            args,
        };
        // Identical calls repeat across plural variants; keep one.
        if !calls.contains(&call) {
            calls.push(call);
        }
    }
    calls.sort();
    calls
}

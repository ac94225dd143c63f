//! Parsing of the model's free-text reply.
//!
//! The two extraction patterns below are the parsing contract with the
//! prompt: a `Grade: <n>/<d>` line and a `Feedback: ...` tail. They are
//! deliberately independent, and each degrades to a fixed default on its
//! own, so a half-well-formed reply still yields a usable result.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

lazy_static! {
    static ref GRADE: Regex = Regex::new(r"(?i)Grade:\s*(\d+)\s*/\s*(\d+)").unwrap();
    static ref FEEDBACK: Regex = Regex::new(r"(?is)Feedback:\s*(.*)").unwrap();
}

/// Feedback when the reply carries no recognizable feedback section.
pub const NO_FEEDBACK: &str = "No detailed feedback provided.";

/// A numeric grade plus feedback text for one submission. The grade is a
/// whole non-negative number; every failure mode elsewhere defaults it to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub grade: u32,
    pub feedback: String,
}

/// Parses a model reply. A missing grade pattern defaults to 0; missing
/// feedback defaults to [`NO_FEEDBACK`]. A grade above its stated
/// denominator is clamped to the denominator; the model is asked to stay in
/// bounds but is not trusted to.
pub fn parse_reply(reply: &str) -> GradeResult {
    let grade = match GRADE.captures(reply) {
        Some(captures) => {
            let numerator: u32 = captures[1].parse().unwrap_or(0);
            let denominator: u32 = captures[2].parse().unwrap_or(u32::MAX);
            if numerator > denominator {
                warn!(numerator, denominator, "model graded above the denominator, clamping");
                denominator
            } else {
                numerator
            }
        }
        None => 0,
    };

    let feedback = FEEDBACK
        .captures(reply)
        .map(|captures| captures[1].trim().to_owned())
        .unwrap_or_else(|| NO_FEEDBACK.to_owned());

    GradeResult { grade, feedback }
}

use crate::domain::{Verdict, VerdictOutcome};

const RESULT_MARKER: &str = "RESULT:";
const EXPLANATION_MARKER: &str = "EXPLANATION:";

/// Extracts a verdict from the model's free-text reply.
///
/// Splits on the first occurrence of each marker, with no escaping.
/// Fail-closed: a reply without markers, or with an outcome token other than
/// `pass`, is a failure.
pub fn parse_verdict(raw: &str) -> Verdict {
    let Some((_, after_result)) = raw.split_once(RESULT_MARKER) else {
        return Verdict {
            outcome: VerdictOutcome::Fail,
            explanation: raw.to_string(),
        };
    };

    let after_result = after_result.trim();
    match after_result.split_once(EXPLANATION_MARKER) {
        // Partial parses keep the full raw text as the explanation.
        None => Verdict {
            outcome: outcome_from_token(after_result),
            explanation: raw.to_string(),
        },
        Some((token, explanation)) => Verdict {
            outcome: outcome_from_token(token.trim()),
            explanation: explanation.trim().to_string(),
        },
    }
}

fn outcome_from_token(token: &str) -> VerdictOutcome {
    if token.eq_ignore_ascii_case("pass") {
        VerdictOutcome::Pass
    } else {
        VerdictOutcome::Fail
    }
}

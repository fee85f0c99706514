use clangtool_core::CompletionCandidate;
use clangtool_frontend::RawCompletion;

/// Drops unavailable results and stably sorts by ascending priority.
pub(crate) fn candidates(raw: Vec<RawCompletion>, max: Option<usize>) -> Vec<CompletionCandidate> {
    let mut out: Vec<CompletionCandidate> = raw
        .into_iter()
        .filter(|r| r.available)
        .map(|r| CompletionCandidate {
            name: r.typed_text,
            result_type: r.result_type,
            kind: r.kind.completion_kind(),
            brief: r.brief,
            priority: r.priority,
            args: r.placeholders,
        })
        .collect();
    out.sort_by_key(|c| c.priority);
    if let Some(max) = max {
        out.truncate(max);
    }
    out
}

//! Borrow a version from the most similar known group when a dependency's own
//! group has no recorded version anywhere up the parent chain.
//!
//! Groups are compared segment by segment (`com.acme.core` vs
//! `com.acme.util` share two leading segments). A borrowed version is only
//! accepted if the best candidate diverges from the target in at most one
//! segment.

use pomver_core::application::Application;
use pomver_core::module::ModuleId;

const SEPARATOR: char = '.';

/// Score for two identical group ids.
pub const EXACT_MATCH: usize = usize::MAX;

/// The best-scoring known group for some target group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarGroup {
    pub group_id: String,
    pub version: String,
    pub score: usize,
    /// Module whose `group_to_version` held the candidate.
    pub module: ModuleId,
}

/// Number of leading `.`-separated segments the two group ids share.
pub fn group_similarity(target: &str, candidate: &str) -> usize {
    if target == candidate {
        return EXACT_MATCH;
    }
    target
        .split(SEPARATOR)
        .zip(candidate.split(SEPARATOR))
        .take_while(|(a, b)| a == b)
        .count()
}

/// Minimum score a candidate needs for its version to be borrowed: the
/// number of segments in `target` minus one.
pub fn acceptance_threshold(target: &str) -> usize {
    target.split(SEPARATOR).count().saturating_sub(1)
}

/// Find the highest-scoring group recorded in `start` or any of its
/// ancestors, whether or not it clears the acceptance threshold.
///
/// Ties go to the first candidate seen. Each module's groups are visited in
/// lexicographic order, and modules from `start` upwards, so among equal
/// scores the nearest module and then the smallest group id win. Candidates
/// without a version and candidates sharing no segment are never selected.
pub fn find_similar_group(
    app: &Application,
    start: ModuleId,
    target: &str,
) -> Option<SimilarGroup> {
    let mut best: Option<SimilarGroup> = None;
    for (id, module) in app.ancestors(start) {
        for (group_id, version) in &module.group_to_version {
            if version.is_empty() {
                continue;
            }
            let score = group_similarity(target, group_id);
            let best_score = best.as_ref().map_or(0, |b| b.score);
            if score > best_score {
                best = Some(SimilarGroup {
                    group_id: group_id.clone(),
                    version: version.clone(),
                    score,
                    module: id,
                });
            }
        }
    }
    best
}

/// The similar group whose version may be borrowed for `target`, if any.
pub fn borrow_version(app: &Application, start: ModuleId, target: &str) -> Option<SimilarGroup> {
    find_similar_group(app, start, target).filter(|m| m.score >= acceptance_threshold(target))
}

use crate::build::{item_searchable_text, text_to_term_vector};
use crate::console::now_ms;
use crate::parse::parse_date;
use crate::types::{Item, MatchConfig, MatchResult, TermVector};
use chrono::NaiveDate;
use std::cmp::Ordering;

#[cfg(feature = "native")]
use rayon::prelude::*;

/// Euclidean norm of the counts
fn magnitude(tv: &TermVector) -> f64 {
    let sum_sq: u64 = tv.values().map(|&c| c as u64 * c as u64).sum();
    (sum_sq as f64).sqrt()
}

/// Cosine similarity between two term vectors, 0 if either is empty
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    // integer dot product keeps the result independent of iteration order
    let dot: u64 = small
        .iter()
        .filter_map(|(term, &ca)| large.get(term).map(|&cb| ca as u64 * cb as u64))
        .sum();

    let mag_a = magnitude(a);
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    (dot as f64 / (mag_a * mag_b)).clamp(0.0, 1.0)
}

/// Cosine similarity between the term frequencies of two texts
pub fn text_similarity(a: &str, b: &str) -> f64 {
    cosine_similarity(&text_to_term_vector(a), &text_to_term_vector(b))
}

/// Seed-side data computed once per ranking call
struct Seed<'a> {
    item: &'a Item,
    terms: TermVector,
    date: Option<NaiveDate>,
}

/// Composite score for one candidate, None for same-kind or below-threshold
fn score_candidate(seed: &Seed, candidate: &Item, config: &MatchConfig) -> Option<MatchResult> {
    if candidate.kind == seed.item.kind {
        return None;
    }

    let mut score = cosine_similarity(
        &seed.terms,
        &text_to_term_vector(&item_searchable_text(candidate)),
    );

    if seed.item.category == candidate.category {
        score += config.category_bonus;
    }

    // an unparseable date on either side just forfeits the bonus
    if let (Some(a), Ok(b)) = (seed.date, parse_date(&candidate.date)) {
        if (a - b).num_days().abs() <= config.date_window_days {
            score += config.date_bonus;
        }
    }

    (score > config.threshold).then(|| MatchResult {
        id: candidate.id.clone(),
        score,
    })
}

/// Rank opposite-kind candidates against a seed with explicit constants.
///
/// Results are sorted by descending composite score. The sort is stable, so
/// equal scores keep their order from `pool`. No truncation happens here.
pub fn rank_matches_with(seed: &Item, pool: &[Item], config: &MatchConfig) -> Vec<MatchResult> {
    let start = now_ms();

    let seed = Seed {
        item: seed,
        terms: text_to_term_vector(&item_searchable_text(seed)),
        date: parse_date(&seed.date).ok(),
    };

    #[cfg(feature = "native")]
    let scored: Vec<Option<MatchResult>> = pool
        .par_iter()
        .map(|candidate| score_candidate(&seed, candidate, config))
        .collect();
    #[cfg(not(feature = "native"))]
    let scored: Vec<Option<MatchResult>> = pool
        .iter()
        .map(|candidate| score_candidate(&seed, candidate, config))
        .collect();

    let mut results: Vec<MatchResult> = scored.into_iter().flatten().collect();
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    log::debug!(
        "[perf] seed='{}' candidates={} matches={} | rank={:.1}ms",
        seed.item.id,
        pool.len(),
        results.len(),
        now_ms() - start
    );

    results
}

/// Rank opposite-kind candidates against a seed using the default constants
pub fn rank_matches(seed: &Item, pool: &[Item]) -> Vec<MatchResult> {
    rank_matches_with(seed, pool, &MatchConfig::default())
}

/// Keep the first N of an already ranked list
pub fn top_n(mut ranked: Vec<MatchResult>, n: usize) -> Vec<MatchResult> {
    ranked.truncate(n);
    ranked
}

//! Caller-facing operations over a roster value.
//!
//! Each function borrows the caller's roster and returns a transformed copy,
//! so a failure or a cancelled external call leaves the original exactly as
//! it was. Callers must not run two of these against the same roster
//! concurrently; nothing here locks.

use std::collections::HashSet;
use std::time::Duration;

use crate::allocation::{self, Allocation};
use crate::error::{Error, Result};
use crate::notify::{compose, DispatchService};
use crate::roster::{Roster, Selection};
use crate::scoring::{self, ScoringConfig};
use crate::verification::{
    reconcile, reconcile_matching, VerificationRequest, VerificationResult, VerificationService,
};

/// Normalize practice counts, then recompute final scores
pub fn normalize_and_score(roster: &Roster, config: &ScoringConfig) -> Roster {
    let mut scored = roster.clone();
    scoring::normalize(&mut scored);
    scoring::score(&mut scored, config);
    scored
}

/// Rank and block-allocate into `section_count` sections.
/// Fails with `InvalidSectionCount` for counts below 1.
pub fn allocate_sections(roster: &Roster, section_count: i64) -> Result<(Roster, Allocation)> {
    let mut allocated = roster.clone();
    let allocation = allocation::allocate(&mut allocated, section_count)?;
    Ok((allocated, allocation))
}

/// Full rescoring and reallocation, as requested after verification
pub fn reevaluate(
    roster: &Roster,
    config: &ScoringConfig,
    section_count: i64,
) -> Result<(Roster, Allocation)> {
    allocate_sections(&normalize_and_score(roster, config), section_count)
}

/// Rescore and reallocate a roster that was allocated before, typically
/// after verification corrected some counts.
///
/// Without an explicit count the roster keeps its current number of
/// sections. Fails with `Unallocated` if no student has a section yet.
pub fn reevaluate_allocated(
    roster: &Roster,
    config: &ScoringConfig,
    section_count: Option<i64>,
) -> Result<(Roster, Allocation)> {
    let existing = roster.distinct_sections();
    if existing == 0 {
        return Err(Error::Unallocated);
    }
    reevaluate(roster, config, section_count.unwrap_or(existing as i64))
}

/// Section count to use when none is given explicitly: the number of
/// distinct sections the roster already has, or 1 for a fresh roster.
pub fn inferred_section_count(roster: &Roster) -> i64 {
    roster.distinct_sections().max(1) as i64
}

/// Merge a verification fetch outcome into a copy of the roster.
///
/// A failed fetch yields `VerificationFailed` and nothing is merged; a
/// successful one stages corrected counts without rescoring.
pub fn reconcile_verification(
    roster: &Roster,
    fetched: anyhow::Result<Vec<VerificationResult>>,
) -> Result<Roster> {
    let results = fetched.map_err(|e| Error::VerificationFailed(format!("{:#}", e)))?;
    let mut updated = roster.clone();
    reconcile(&mut updated, &results);
    Ok(updated)
}

/// Send the selected students to the verification service and stage any
/// corrected counts.
///
/// Scores and sections are not recomputed; call `reevaluate` for that.
/// Returns the updated roster and the number of corrected counts. An empty
/// selection makes no call. Any service error, or no answer within
/// `timeout`, yields `VerificationFailed` with the caller's roster
/// untouched.
pub async fn verify_selected<V: VerificationService>(
    service: &V,
    roster: &Roster,
    selection: &Selection,
    timeout: Duration,
) -> Result<(Roster, usize)> {
    let mut seen = HashSet::new();
    let batch: Vec<VerificationRequest> = roster
        .iter()
        .filter(|s| selection.matches(s) && !s.id.is_empty())
        .filter(|s| seen.insert(s.id.clone()))
        .map(|s| VerificationRequest {
            id: s.id.clone(),
            practice_count: s.practice_count,
        })
        .collect();

    if batch.is_empty() {
        log::debug!("Verification skipped: no selected students with an id");
        return Ok((roster.clone(), 0));
    }

    let results = match tokio::time::timeout(timeout, service.verify(&batch)).await {
        Ok(Ok(results)) => results,
        Ok(Err(e)) => return Err(Error::VerificationFailed(format!("{:#}", e))),
        Err(_) => {
            return Err(Error::VerificationFailed(format!(
                "no response within {}",
                humantime::format_duration(timeout)
            )))
        }
    };

    let requested: HashSet<&str> = batch.iter().map(|r| r.id.as_str()).collect();
    let results: Vec<_> = results
        .into_iter()
        .filter(|r| requested.contains(r.id.as_str()))
        .collect();

    let mut updated = roster.clone();
    // The flag reflects this round only
    for student in updated.iter_mut() {
        if requested.contains(student.id.as_str()) && selection.matches(student) {
            student.verified = None;
        }
    }
    let corrected = reconcile_matching(&mut updated, &results, |s| selection.matches(s));
    log::debug!(
        "Verified {} students, {} counts corrected",
        batch.len(),
        corrected
    );
    Ok((updated, corrected))
}

/// Render `template` for each selected student and hand the batch to the
/// dispatch service. Never touches the roster.
///
/// Returns the number of messages sent.
pub async fn dispatch_selected<D: DispatchService>(
    service: &D,
    roster: &Roster,
    selection: &Selection,
    template: &str,
    subject: &str,
    timeout: Duration,
) -> Result<usize> {
    let messages = compose(
        roster.iter().filter(|s| selection.matches(s)),
        template,
        subject,
    );
    if messages.is_empty() {
        return Ok(0);
    }

    match tokio::time::timeout(timeout, service.send(&messages)).await {
        Ok(Ok(())) => Ok(messages.len()),
        Ok(Err(e)) => Err(Error::DispatchFailed(format!("{:#}", e))),
        Err(_) => Err(Error::DispatchFailed(format!(
            "no response within {}",
            humantime::format_duration(timeout)
        ))),
    }
}

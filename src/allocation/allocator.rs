use super::labels::section_labels;
use crate::error::{Error, Result};
use crate::roster::Roster;

/// Outcome of one allocation run
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Every generated label with its block size, in allocation order.
    /// Sections past the roster size appear with size 0.
    pub sections: Vec<(String, usize)>,
    /// Students whose section changed in this run
    pub moved: usize,
}

/// Block sizes for `total` students over `sections` sections.
///
/// The first `total % sections` blocks get one extra student.
pub fn block_sizes(total: usize, sections: usize) -> Vec<usize> {
    if sections == 0 {
        return Vec::new();
    }
    let base = total / sections;
    let remainder = total % sections;
    (0..sections)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

/// Indices of the roster in rank order: final score descending.
///
/// The sort is stable, so equal scores keep their input order. There is no
/// secondary key. `-0.0` and `0.0` count as equal.
pub fn rank_order(roster: &Roster) -> Vec<usize> {
    // Adding 0.0 turns -0.0 into 0.0
    let key = |idx: usize| roster.students[idx].final_score + 0.0;
    let mut order: Vec<usize> = (0..roster.len()).collect();
    order.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
    order
}

/// Rank the roster and reassign every student to one of `section_count`
/// contiguous blocks.
///
/// On success the roster is reordered into rank order. Students whose
/// section changes get their old section recorded in `previous_section`;
/// unchanged students are left alone. An invalid count fails before
/// anything is touched.
pub fn allocate(roster: &mut Roster, section_count: i64) -> Result<Allocation> {
    let sections = usize::try_from(section_count)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or(Error::InvalidSectionCount {
            requested: section_count,
        })?;

    let labels = section_labels(sections);
    let sizes = block_sizes(roster.len(), sections);

    let order = rank_order(roster);
    let mut slots: Vec<_> = std::mem::take(&mut roster.students)
        .into_iter()
        .map(Some)
        .collect();

    let mut ranked = Vec::with_capacity(slots.len());
    let mut moved = 0;
    let mut cursor = order.into_iter();
    for (label, &size) in labels.iter().zip(&sizes) {
        for idx in cursor.by_ref().take(size) {
            if let Some(mut student) = slots[idx].take() {
                if student.move_to(label) {
                    moved += 1;
                }
                ranked.push(student);
            }
        }
    }
    roster.students = ranked;

    log::debug!(
        "Allocated {} students into {} sections ({} moved)",
        roster.len(),
        sections,
        moved
    );

    Ok(Allocation {
        sections: labels.into_iter().zip(sizes).collect(),
        moved,
    })
}

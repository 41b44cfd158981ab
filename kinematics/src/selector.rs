use log::error;

use crate::error::IkError;
use crate::pose::Joint6D;
use crate::solution::{BranchCode, SolutionSet};

/// The candidate picked for a control cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub branch: BranchCode,
    pub joints: Joint6D,
    /// Squared joint-space distance to the reference.
    pub distance_sq: f64,
    pub singular: bool,
}

/// Picks the valid candidate with the smallest squared joint displacement
/// from `reference`.
///
/// Candidates are scanned in branch-code order and only a strictly smaller
/// distance replaces the current best, so ties go to the lowest code.
///
/// Calling this on a set with no valid candidate is a sequencing error in
/// the caller and returns [`IkError::NoValidCandidate`].
pub fn select_best(solutions: &SolutionSet, reference: &Joint6D) -> Result<Selection, IkError> {
    let mut best: Option<Selection> = None;
    for candidate in solutions.valid() {
        let distance_sq = candidate.joints.distance_sq(reference);
        if best.is_none_or(|b| distance_sq < b.distance_sq) {
            best = Some(Selection {
                branch: candidate.branch,
                joints: candidate.joints,
                distance_sq,
                singular: candidate.singular,
            });
        }
    }
    best.ok_or_else(|| {
        error!("select_best called on a solution set without valid candidates");
        IkError::NoValidCandidate
    })
}

impl SolutionSet {
    pub fn best(&self, reference: &Joint6D) -> Result<Selection, IkError> {
        select_best(self, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::{BRANCH_COUNT, Candidate, StageFlags};

    const VALID: StageFlags = StageFlags {
        arm: true,
        wrist: true,
        limits: true,
    };

    fn candidate(index: usize, joints: [f64; 6], flags: StageFlags) -> Candidate {
        Candidate {
            branch: BranchCode::ALL[index],
            joints: Joint6D::new(joints),
            flags,
            singular: false,
        }
    }

    fn set_with(entries: &[(usize, [f64; 6], StageFlags)]) -> SolutionSet {
        let mut candidates = BranchCode::ALL.map(Candidate::failed);
        for &(index, joints, flags) in entries {
            candidates[index] = candidate(index, joints, flags);
        }
        SolutionSet::from_candidates(candidates)
    }

    #[test]
    fn test_picks_minimum_distance() {
        let set = set_with(&[
            (0, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0], VALID),
            (3, [0.2, 0.1, 0.0, 0.0, 0.0, 0.0], VALID),
            (6, [0.5, 0.5, 0.5, 0.0, 0.0, 0.0], VALID),
        ]);
        let best = select_best(&set, &Joint6D::zeros()).unwrap();
        assert_eq!(best.branch.index(), 3);
        assert!((best.distance_sq - 0.05).abs() < 1e-12);

        for c in set.valid() {
            assert!(best.distance_sq <= c.joints.distance_sq(&Joint6D::zeros()));
        }
    }

    #[test]
    fn test_skips_invalid_candidates() {
        let arm_only = StageFlags {
            arm: true,
            ..StageFlags::FAILED
        };
        let outside_limits = StageFlags {
            limits: false,
            ..VALID
        };
        let set = set_with(&[
            (1, [0.0; 6], arm_only),
            (2, [0.0; 6], outside_limits),
            (5, [0.3, 0.0, 0.0, 0.0, 0.0, 0.0], VALID),
        ]);
        let best = select_best(&set, &Joint6D::zeros()).unwrap();
        assert_eq!(best.branch.index(), 5);
    }

    #[test]
    fn test_ties_go_to_lowest_branch() {
        let set = set_with(&[
            (2, [0.0, 0.0, 0.4, 0.0, 0.0, 0.0], VALID),
            (4, [0.0, 0.0, -0.4, 0.0, 0.0, 0.0], VALID),
            (7, [0.4, 0.0, 0.0, 0.0, 0.0, 0.0], VALID),
        ]);
        let best = select_best(&set, &Joint6D::zeros()).unwrap();
        assert_eq!(best.branch.index(), 2);
    }

    #[test]
    fn test_reference_on_candidate_has_zero_distance() {
        let joints = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6];
        let set = set_with(&[
            (0, [0.0; 6], VALID),
            (4, joints, VALID),
        ]);
        let best = set.best(&Joint6D::new(joints)).unwrap();
        assert_eq!(best.branch.index(), 4);
        assert_eq!(best.distance_sq, 0.0);
        assert_eq!(best.joints, Joint6D::new(joints));
    }

    #[test]
    fn test_empty_set_fails_loudly() {
        let set = set_with(&[]);
        assert_eq!(set.candidates().len(), BRANCH_COUNT);
        assert_eq!(
            select_best(&set, &Joint6D::zeros()),
            Err(IkError::NoValidCandidate)
        );
    }
}

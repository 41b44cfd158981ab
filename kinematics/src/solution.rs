use crate::pose::Joint6D;

pub const BRANCH_COUNT: usize = 8;

/// Which side of the base axis the shoulder reaches toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shoulder {
    Front,
    Back,
}

/// Sign of the joint 3 law-of-cosines solution.
///
/// `Up` and `Down` describe the elbow for the front shoulder; when the
/// shoulder reaches back the same joint sign puts the elbow on the other side
/// of the shoulder-to-wrist line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Elbow {
    Up,
    Down,
}

/// Sign of joint 5. `Flip` turns joint 4 and joint 6 by half a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrist {
    NoFlip,
    Flip,
}

impl Shoulder {
    pub fn sign(self) -> f64 {
        match self {
            Shoulder::Front => 1.0,
            Shoulder::Back => -1.0,
        }
    }
}

impl Elbow {
    pub fn sign(self) -> f64 {
        match self {
            Elbow::Up => 1.0,
            Elbow::Down => -1.0,
        }
    }
}

impl Wrist {
    pub fn sign(self) -> f64 {
        match self {
            Wrist::NoFlip => 1.0,
            Wrist::Flip => -1.0,
        }
    }
}

/// 3-bit configuration code: `(shoulder << 2) | (elbow << 1) | wrist`.
///
/// The numeric value is the slot index in a [`SolutionSet`] and the order in
/// which the selector breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchCode(u8);

impl BranchCode {
    pub const ALL: [BranchCode; BRANCH_COUNT] = [
        BranchCode(0),
        BranchCode(1),
        BranchCode(2),
        BranchCode(3),
        BranchCode(4),
        BranchCode(5),
        BranchCode(6),
        BranchCode(7),
    ];

    pub fn new(shoulder: Shoulder, elbow: Elbow, wrist: Wrist) -> Self {
        let bits = ((shoulder == Shoulder::Back) as u8) << 2
            | ((elbow == Elbow::Down) as u8) << 1
            | (wrist == Wrist::Flip) as u8;
        Self(bits)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn shoulder(self) -> Shoulder {
        if self.0 & 0b100 == 0 { Shoulder::Front } else { Shoulder::Back }
    }

    pub fn elbow(self) -> Elbow {
        if self.0 & 0b010 == 0 { Elbow::Up } else { Elbow::Down }
    }

    pub fn wrist(self) -> Wrist {
        if self.0 & 0b001 == 0 { Wrist::NoFlip } else { Wrist::Flip }
    }
}

/// Outcome of the three solver stages for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageFlags {
    /// Joints 1-3 placed the wrist center.
    pub arm: bool,
    /// Joints 4-6 produced the wrist orientation.
    pub wrist: bool,
    /// All joints inside the configured limits.
    pub limits: bool,
}

impl StageFlags {
    pub const FAILED: StageFlags = StageFlags {
        arm: false,
        wrist: false,
        limits: false,
    };

    pub fn all(&self) -> bool {
        self.arm && self.wrist && self.limits
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub branch: BranchCode,
    /// NaN in every axis when the arm or wrist stage failed.
    pub joints: Joint6D,
    pub flags: StageFlags,
    /// Joint 5 is at a wrist singularity; joint 4 was held at the reference.
    pub singular: bool,
}

impl Candidate {
    pub(crate) fn failed(branch: BranchCode) -> Self {
        Self {
            branch,
            joints: Joint6D::placeholder(),
            flags: StageFlags::FAILED,
            singular: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.flags.all()
    }

    pub fn valid_joints(&self) -> Option<&Joint6D> {
        self.is_valid().then_some(&self.joints)
    }
}

/// All eight IK branches for one target, valid or not.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSet {
    candidates: [Candidate; BRANCH_COUNT],
}

impl SolutionSet {
    pub(crate) fn from_candidates(candidates: [Candidate; BRANCH_COUNT]) -> Self {
        debug_assert!(
            candidates
                .iter()
                .enumerate()
                .all(|(i, c)| c.branch.index() == i)
        );
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate; BRANCH_COUNT] {
        &self.candidates
    }

    pub fn get(&self, branch: BranchCode) -> &Candidate {
        &self.candidates[branch.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn valid(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| c.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.valid().count()
    }

    /// True when at least one candidate passed every stage.
    pub fn is_success(&self) -> bool {
        self.candidates.iter().any(Candidate::is_valid)
    }
}

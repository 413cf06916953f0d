use crate::vocab::tp2;
use oxrdf::NamedNodeRef;
use std::fmt::{Display, Formatter};

/// The kind of an atomic traversable unit of a route.
///
/// Every kind carries a fixed difficulty that is asserted on each segment of that kind before any
/// route-level propagation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    BlueRun,
    RedRun,
    BlackRun,
    SkiLift,
}

impl SegmentKind {
    /// All kinds, in the order in which their difficulties are set up.
    pub const ALL: [SegmentKind; 4] = [
        SegmentKind::BlueRun,
        SegmentKind::RedRun,
        SegmentKind::BlackRun,
        SegmentKind::SkiLift,
    ];

    /// Returns the `rdf:type` of the segments of this kind.
    pub fn class(self) -> NamedNodeRef<'static> {
        match self {
            SegmentKind::BlueRun => tp2::BLUE_RUN,
            SegmentKind::RedRun => tp2::RED_RUN,
            SegmentKind::BlackRun => tp2::BLACK_RUN,
            SegmentKind::SkiLift => tp2::SKI_LIFT,
        }
    }

    /// Returns the difficulty of this kind. Lifts are not skied and have no difficulty.
    pub fn difficulty(self) -> i64 {
        match self {
            SegmentKind::BlueRun => 1,
            SegmentKind::RedRun => 2,
            SegmentKind::BlackRun => 3,
            SegmentKind::SkiLift => 0,
        }
    }
}

impl Display for SegmentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SegmentKind::BlueRun => "BlueRun",
            SegmentKind::RedRun => "RedRun",
            SegmentKind::BlackRun => "BlackRun",
            SegmentKind::SkiLift => "SkiLift",
        };
        f.write_str(name)
    }
}

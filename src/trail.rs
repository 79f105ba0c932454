use std::collections::VecDeque;
use std::num::NonZeroUsize;

use ultraviolet::DVec2;

/// How many past positions a [`Trail`] keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailRetention {
    /// Every position is kept for the lifetime of the simulation.
    #[default]
    Unbounded,
    /// Only the most recent `n` positions are kept.
    Bounded(NonZeroUsize),
}

impl TrailRetention {
    /// `None` maps to [`TrailRetention::Unbounded`].
    pub fn from_capacity(capacity: Option<usize>) -> Option<Self> {
        match capacity {
            None => Some(Self::Unbounded),
            Some(n) => NonZeroUsize::new(n).map(Self::Bounded),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(n) => Some(n.get()),
        }
    }
}

/// Chronological record of a body's past positions, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<DVec2>,
    retention: TrailRetention,
}

impl Trail {
    pub fn new(retention: TrailRetention) -> Self {
        let points = match retention {
            TrailRetention::Unbounded => VecDeque::new(),
            TrailRetention::Bounded(n) => VecDeque::with_capacity(n.get()),
        };
        Self { points, retention }
    }

    /// Appends a position, evicting the oldest one if the trail is full.
    pub fn push(&mut self, point: DVec2) {
        if let TrailRetention::Bounded(n) = self.retention {
            if self.points.len() == n.get() {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn retention(&self) -> TrailRetention {
        self.retention
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    /// A trail is drawn as a polyline once it holds more than two points.
    pub fn is_drawable(&self) -> bool {
        self.points.len() > 2
    }

    pub fn to_vec(&self) -> Vec<DVec2> {
        self.iter().collect()
    }
}

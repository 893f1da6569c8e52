use crate::{Error, Point, Rect, Ring};
use std::sync::Arc;

/// A ring plus its holes, sharing the same storage either way.
///
/// When a polygon has zero holes the source treats a ring pointer as
/// a polygon pointer; here that becomes this two-variant enum so
/// `Polygon::exterior` returns a view over the very same `Ring`
/// storage rather than allocating a redundant wrapper.
#[derive(Debug, Clone)]
enum Repr {
    RingView(Ring),
    WithHoles(Arc<WithHoles>),
}

#[derive(Debug)]
struct WithHoles {
    exterior: Ring,
    holes: Vec<Ring>,
    rect: Rect,
}

/// `{exterior: Ring, holes: [Ring]}`. A point is "in" the polygon iff
/// covered by `exterior` and not strictly interior to any hole.
#[derive(Debug, Clone)]
pub struct Polygon {
    repr: Repr,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Result<Polygon, Error> {
        if holes.is_empty() {
            return Ok(Polygon {
                repr: Repr::RingView(exterior),
            });
        }
        let rect = holes.iter().fold(exterior.rect(), |acc, h| acc.expand(&h.rect()));
        Ok(Polygon {
            repr: Repr::WithHoles(Arc::new(WithHoles {
                exterior,
                holes,
                rect,
            })),
        })
    }

    pub fn exterior(&self) -> &Ring {
        match &self.repr {
            Repr::RingView(r) => r,
            Repr::WithHoles(w) => &w.exterior,
        }
    }

    pub fn hole_at(&self, i: usize) -> Option<&Ring> {
        match &self.repr {
            Repr::RingView(_) => None,
            Repr::WithHoles(w) => w.holes.get(i),
        }
    }

    pub fn holes(&self) -> &[Ring] {
        match &self.repr {
            Repr::RingView(_) => &[],
            Repr::WithHoles(w) => &w.holes,
        }
    }

    pub fn num_holes(&self) -> usize {
        self.holes().len()
    }

    pub fn rect(&self) -> Rect {
        match &self.repr {
            Repr::RingView(r) => r.rect(),
            Repr::WithHoles(w) => w.rect,
        }
    }

    pub fn area(&self) -> f64 {
        self.exterior().area() - self.holes().iter().map(Ring::area).sum::<f64>()
    }

    pub fn perimeter(&self) -> f64 {
        self.exterior().perimeter() + self.holes().iter().map(Ring::perimeter).sum::<f64>()
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.exterior() == other.exterior() && self.holes() == other.holes()
    }
}

impl std::fmt::Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "polygon({}", self.exterior())?;
        for hole in self.holes() {
            write!(f, ", hole {hole}")?;
        }
        write!(f, ")")
    }
}

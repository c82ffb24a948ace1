use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::LonLat;

/// A closed polygon boundary: at least 4 points, the first equal to the last.
/// Maintaining the duplicated closing vertex as an invariant here prevents the
/// bug class of forgetting it when building rings by hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // first equals last
    pts: Vec<LonLat>,
}

impl Ring {
    pub fn new(pts: Vec<LonLat>) -> Result<Ring> {
        if pts.len() < 4 {
            anyhow::bail!("Can't make a ring with only {} points", pts.len());
        }
        if pts[0] != *pts.last().unwrap() {
            anyhow::bail!("Can't make a ring with mismatching first/last points");
        }
        if pts.windows(2).any(|pair| pair[0] == pair[1]) {
            anyhow::bail!("Ring has duplicate adjacent points");
        }
        Ok(Ring { pts })
    }

    pub fn must_new(pts: Vec<LonLat>) -> Ring {
        Ring::new(pts).unwrap()
    }

    pub fn points(&self) -> &Vec<LonLat> {
        &self.pts
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  LonLat::new({}, {}),", pt.longitude, pt.latitude)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_input() {
        // Too few points
        assert!(Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(0.0, 0.0),
        ])
        .is_err());

        // Not closed
        assert!(Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 1.0),
        ])
        .is_err());

        // Duplicate adjacent points
        assert!(Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 0.0),
        ])
        .is_err());
    }

    #[test]
    fn accepts_a_square() {
        let ring = Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(ring.points().len(), 5);
    }
}

use std::{fmt, ops};

use serde::{Deserialize, Serialize};

/// An angle, stored in degrees.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub fn degrees(degs: f64) -> Angle {
        Angle(degs)
    }

    pub fn to_degrees(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.0)
    }
}

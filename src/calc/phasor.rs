//! Polar/complex conversion for current phasors.

use std::fmt;

use num_complex::Complex64;
use serde::Serialize;

/// A phasor in polar form: magnitude and angle in degrees, angle in (-180, 180].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Phasor {
    pub magnitude: f64,
    pub angle_deg: f64,
}

impl Phasor {
    pub fn new(magnitude: f64, angle_deg: f64) -> Self {
        Self {
            magnitude,
            angle_deg,
        }
    }

    /// Polar form of a complex value.
    pub fn from_complex(z: Complex64) -> Self {
        let (magnitude, angle_deg) = to_polar(z);
        Self {
            magnitude,
            angle_deg,
        }
    }

    /// Rectangular form of this phasor.
    pub fn to_complex(self) -> Complex64 {
        from_polar(self.magnitude, self.angle_deg)
    }
}

impl fmt::Display for Phasor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} A ∠ {:.2}°", self.magnitude, self.angle_deg)
    }
}

/// Wraps an angle in degrees into (-180, 180].
///
/// Exactly 180 stays 180 and -180 maps to 180.
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a > 180.0 {
        a - 360.0
    } else if a <= -180.0 {
        a + 360.0
    } else {
        a
    }
}

/// Returns `(|z|, arg z)` with the angle in degrees, normalized to (-180, 180].
///
/// A zero value reports angle 0 regardless of the signs of its zero parts.
pub fn to_polar(z: Complex64) -> (f64, f64) {
    let magnitude = z.norm();
    if magnitude == 0.0 {
        return (0.0, 0.0);
    }
    (magnitude, normalize_angle_deg(z.arg().to_degrees()))
}

/// Builds a complex value from a magnitude and an angle in degrees.
pub fn from_polar(magnitude: f64, angle_deg: f64) -> Complex64 {
    Complex64::from_polar(magnitude, angle_deg.to_radians())
}

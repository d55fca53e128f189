//! Linear scale construction from raw metric samples.

/// Which end of the pixel range the domain minimum maps to.
///
/// `Forward` puts the minimum at the low-pixel end. `Reverse` puts it at the
/// high-pixel end (high value → low pixel), for axes where smaller values
/// should read as visually better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    Forward,
    Reverse,
}

/// Affine data→pixel mapping with an exact inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    /// Fits a scale over `samples`, mapping onto `range` inset by `inset`
    /// pixels at both ends so no point renders flush against the plot border.
    ///
    /// A single distinct sample value widens the domain symmetrically by one
    /// unit, so the map stays well-defined and the lone value lands centered.
    /// Non-finite samples are ignored; no finite samples → `None` ("no
    /// data"), and callers skip drawing instead of throwing.
    pub fn fit(
        samples: impl IntoIterator<Item = f64>,
        range: (f64, f64),
        inset: f64,
        direction: ScaleDirection,
    ) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in samples {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            return None;
        }
        if min == max {
            min -= 1.0;
            max += 1.0;
        }

        let (p0, p1) = (range.0 + inset, range.1 - inset);
        let (r0, r1) = match direction {
            ScaleDirection::Forward => (p0, p1),
            ScaleDirection::Reverse => (p1, p0),
        };
        Some(Self {
            d0: min,
            d1: max,
            r0,
            r1,
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    pub fn to_pixel(&self, value: f64) -> f64 {
        let t = (value - self.d0) / (self.d1 - self.d0);
        self.r0 + t * (self.r1 - self.r0)
    }

    pub fn to_value(&self, pixel: f64) -> f64 {
        if self.r1 == self.r0 {
            // Zero-width pixel range; every pixel reads as the domain midpoint.
            return (self.d0 + self.d1) / 2.0;
        }
        let t = (pixel - self.r0) / (self.r1 - self.r0);
        self.d0 + t * (self.d1 - self.d0)
    }
}

use thiserror::Error;
use time::OffsetDateTime;

/// A half-open stay interval `[check_in, check_out)`.
///
/// A checkout on day N and a check-in on day N for the same room do not
/// conflict, which is why the interval excludes its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StayRange {
    check_in: OffsetDateTime,
    check_out: OffsetDateTime,
}

/// The error produced when a stay does not end strictly after it starts.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("check-in must be before check-out")]
pub struct InvalidRange;

impl StayRange {
    /// Construct a stay, failing unless `check_in < check_out`.
    pub fn new(check_in: OffsetDateTime, check_out: OffsetDateTime) -> Result<Self, InvalidRange> {
        if check_in < check_out {
            Ok(Self {
                check_in,
                check_out,
            })
        } else {
            Err(InvalidRange)
        }
    }

    /// The first instant of the stay
    pub fn check_in(&self) -> OffsetDateTime {
        self.check_in
    }

    /// The first instant after the stay
    pub fn check_out(&self) -> OffsetDateTime {
        self.check_out
    }

    /// Two half-open intervals `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// The number of nights billed for this stay, rounding partial days up.
    pub fn nights(&self) -> u32 {
        let seconds = (self.check_out - self.check_in).whole_seconds();
        let nights = (seconds + 86_399) / 86_400;
        u32::try_from(nights).unwrap_or(u32::MAX)
    }
}

use chrono::{DateTime, Utc};

/// Minimum TTL and earliest absolute expiry over the records of one message.
///
/// Built by folding records in with [`TtlSummary::observe`]; summaries for
/// separate sections are combined with [`TtlSummary::merge`]. A summary with
/// no records has `have_ttl == false` and its other fields are meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtlSummary {
    pub have_ttl: bool,
    pub least_ttl: u32,
    pub earliest_expires: Option<DateTime<Utc>>,
}

impl TtlSummary {
    pub fn observe(self, ttl: u32, expires: DateTime<Utc>) -> Self {
        if !self.have_ttl {
            return Self {
                have_ttl: true,
                least_ttl: ttl,
                earliest_expires: Some(expires),
            };
        }

        Self {
            have_ttl: true,
            least_ttl: self.least_ttl.min(ttl),
            earliest_expires: match self.earliest_expires {
                Some(current) => Some(current.min(expires)),
                None => Some(expires),
            },
        }
    }

    pub fn merge(self, other: Self) -> Self {
        match (self.have_ttl, other.have_ttl) {
            (false, _) => other,
            (_, false) => self,
            _ => Self {
                have_ttl: true,
                least_ttl: self.least_ttl.min(other.least_ttl),
                earliest_expires: match (self.earliest_expires, other.earliest_expires) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                },
            },
        }
    }

    /// The aggregated TTL, if any record was observed.
    pub fn least_ttl(&self) -> Option<u32> {
        self.have_ttl.then_some(self.least_ttl)
    }
}

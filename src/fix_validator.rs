use crate::domain::{LocationFix, LocationSettings};
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    InvalidAccuracy,
    PredatesSession,
    OutOfOrder,
    Repeated,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InvalidAccuracy => write!(f, "invalid horizontal accuracy"),
            Rejection::PredatesSession => write!(f, "fix predates the session"),
            Rejection::OutOfOrder => write!(f, "fix is older than the current location"),
            Rejection::Repeated => write!(f, "repeated location without better accuracy"),
        }
    }
}

pub fn accept(candidate: &LocationFix, prior: Option<&LocationFix>, session_start: Option<DateTime<Utc>>, settings: &LocationSettings) -> bool {
    evaluate(candidate, prior, session_start, settings).is_accepted()
}

/// See http://troybrant.net/blog/2010/02/detecting-bad-corelocation-data/
pub fn evaluate(candidate: &LocationFix, prior: Option<&LocationFix>, session_start: Option<DateTime<Utc>>, settings: &LocationSettings) -> Verdict {
    if !candidate.is_valid() {
        return Verdict::Rejected(Rejection::InvalidAccuracy);
    }

    if settings.strict_mode {
        if session_start.is_some_and(|start| candidate.timestamp < start) {
            return Verdict::Rejected(Rejection::PredatesSession);
        }

        if prior.is_some_and(|prior| candidate.timestamp < prior.timestamp) {
            return Verdict::Rejected(Rejection::OutOfOrder);
        }

        if settings.reject_repeated_locations
            && let Some(prior) = prior
            && candidate.coordinate() == prior.coordinate()
            && candidate.horizontal_accuracy >= prior.horizontal_accuracy
        {
            return Verdict::Rejected(Rejection::Repeated);
        }
    }

    Verdict::Accepted
}

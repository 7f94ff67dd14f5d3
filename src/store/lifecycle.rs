//! The three-phase lifecycle every async request goes through.
//!
//! A thunk dispatches `Pending` when it is issued and exactly one of
//! `Fulfilled` or `Rejected` when its API call settles. Slices embed
//! `Lifecycle<T, A>` in their action enums and reduce all three phases.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Reason stored when a rejection carries no text.
pub const DEFAULT_REJECTION: &str = "operation failed";

/// Identity of one issued request. Strictly increasing per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Request identity plus the argument the thunk was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta<A> {
    pub request: RequestId,
    pub arg: A,
}

impl<A> Meta<A> {
    pub fn new(request: RequestId, arg: A) -> Self {
        Self { request, arg }
    }
}

/// A value together with the moment it was received.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub value: T,
    pub at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T, A = ()> {
    Pending(Meta<A>),
    Fulfilled(Meta<A>, T),
    Rejected(Meta<A>, String),
}

impl<T, A> Lifecycle<T, A> {
    /// Rejection with `reason`, or [`DEFAULT_REJECTION`] when it is blank.
    pub fn rejected(meta: Meta<A>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            Lifecycle::Rejected(meta, DEFAULT_REJECTION.to_string())
        } else {
            Lifecycle::Rejected(meta, reason)
        }
    }

    pub fn meta(&self) -> &Meta<A> {
        match self {
            Lifecycle::Pending(meta)
            | Lifecycle::Fulfilled(meta, _)
            | Lifecycle::Rejected(meta, _) => meta,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Lifecycle::Pending(_))
    }

    /// The part of the transition shared by every slice: raise the loading
    /// flag and clear the error on `Pending`, lower it on settlement, and
    /// record the reason on `Rejected`.
    pub fn apply_status(&self, loading: &mut bool, error: &mut Option<String>) {
        match self {
            Lifecycle::Pending(_) => {
                *loading = true;
                *error = None;
            }
            Lifecycle::Fulfilled(..) => *loading = false,
            Lifecycle::Rejected(_, reason) => {
                *loading = false;
                *error = Some(reason.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Meta<()> {
        Meta::new(RequestId::new(1), ())
    }

    #[test]
    fn blank_reason_gets_default() {
        let lifecycle: Lifecycle<()> = Lifecycle::rejected(meta(), "  ");
        assert_eq!(lifecycle, Lifecycle::Rejected(meta(), DEFAULT_REJECTION.into()));
    }

    #[test]
    fn pending_raises_flag_and_clears_error() {
        let mut loading = false;
        let mut error = Some("old".to_string());
        Lifecycle::<()>::Pending(meta()).apply_status(&mut loading, &mut error);
        assert!(loading);
        assert_eq!(error, None);
    }

    #[test]
    fn fulfilled_keeps_error_untouched() {
        let mut loading = true;
        let mut error = None;
        Lifecycle::Fulfilled(meta(), ()).apply_status(&mut loading, &mut error);
        assert!(!loading);
        assert_eq!(error, None);
    }

    #[test]
    fn rejected_records_reason() {
        let mut loading = true;
        let mut error = None;
        Lifecycle::<()>::rejected(meta(), "nope").apply_status(&mut loading, &mut error);
        assert!(!loading);
        assert_eq!(error.as_deref(), Some("nope"));
    }

    #[test]
    fn settled_and_meta() {
        let pending = Lifecycle::<u8>::Pending(meta());
        assert!(!pending.is_settled());
        assert_eq!(pending.meta().request.get(), 1);
        assert!(Lifecycle::Fulfilled(meta(), 3u8).is_settled());
    }
}

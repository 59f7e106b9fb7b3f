//! What the decoder does with fields the response model does not know.
//!
//! A decoder is always given an explicit [`UnknownFieldPolicy`]. Requests that
//! are not given one read the process-wide override at call time; that
//! override is a single atomic flag. Flipping it does not affect decodes that
//! have already read it, so concurrent requests may observe either value.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

static FAIL_ON_UNKNOWN_FIELDS: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Keep unknown fields in each record's residual bag.
    #[default]
    Tolerant,
    /// Fail with [`crate::Error::SchemaViolation`] on the first unknown field.
    Strict,
}

impl UnknownFieldPolicy {
    /// Current value of the process-wide override.
    pub fn global() -> Self {
        if FAIL_ON_UNKNOWN_FIELDS.load(Ordering::Acquire) {
            UnknownFieldPolicy::Strict
        } else {
            UnknownFieldPolicy::Tolerant
        }
    }

    pub fn is_strict(self) -> bool {
        self == UnknownFieldPolicy::Strict
    }
}

/// Sets the process-wide override used by requests without an explicit policy.
///
/// The write is atomic, but requests already decoding keep the value they read.
/// Default is `false` (tolerant).
pub fn set_fail_on_unknown_fields(value: bool) {
    let previous = FAIL_ON_UNKNOWN_FIELDS.swap(value, Ordering::AcqRel);
    if previous != value {
        info!(fail_on_unknown_fields = value, "Unknown-field policy changed");
    }
}

pub fn fail_on_unknown_fields() -> bool {
    FAIL_ON_UNKNOWN_FIELDS.load(Ordering::Acquire)
}

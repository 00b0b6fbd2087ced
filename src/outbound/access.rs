//! Access gate adapter.
//!
//! Authentication itself happens at the inbound edge (session cookie plus
//! credential check); by the time a request context reaches the domain, a
//! present staff identity is the authorisation fact. This adapter turns
//! that fact into the boolean capability check the core consumes.

use crate::domain::ports::{AccessGate, RequestContext};

/// Gate that trusts the staff identity carried by the request context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAccessGate;

impl AccessGate for SessionAccessGate {
    fn is_staff(&self, ctx: &RequestContext) -> bool {
        ctx.staff_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StaffId;
    use rstest::rstest;

    #[rstest]
    fn anonymous_callers_lack_the_capability() {
        assert!(!SessionAccessGate.is_staff(&RequestContext::anonymous()));
    }

    #[rstest]
    fn staff_callers_hold_the_capability() {
        let ctx = RequestContext::staff(StaffId::new("admin").expect("valid id"));
        assert!(SessionAccessGate.is_staff(&ctx));
    }
}

//! Module: recorder
//! Responsibility: resolve accessor chains by running the closure once
//! against synthetic stand-ins and logging every intercepted accessor.
//! Does not own: identity extraction, caching, or the direct fast path.
//! Boundary: invoked by the resolver when the direct resolver declines.

mod proxy;
mod session;


pub use proxy::Proxy;

use crate::{
    error::ResolveError, identity::ClosureIdentity, property::ResolvedProperty,
    traits::Recordable,
};
use session::RecorderSession;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Record the accessor chain `property` performs on a stand-in root.
pub(crate) fn record<T, R, F>(
    identity: &ClosureIdentity,
    property: &F,
    max_depth: usize,
) -> Result<ResolvedProperty, ResolveError>
where
    T: Recordable,
    R: 'static,
    F: Fn(&Proxy<T>) -> R,
{
    let session = RecorderSession::shared(identity.describe(), T::descriptor(), max_depth);
    let root = Proxy::<T>::root(&session)?;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| property(&root)));
    let mut state = session.borrow_mut();
    let result = match &outcome {
        Ok(output) => state.finish(output),
        Err(payload) => Err(state
            .take_failure()
            .unwrap_or_else(|| state.panicked(payload.as_ref()))),
    };

    if let Err(error) = &result {
        debug!(closure = %identity.describe(), %error, "chain recording failed");
    }

    result
}

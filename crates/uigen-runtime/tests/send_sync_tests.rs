//! Handles and records cross task boundaries.

use uigen_runtime::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_runtime_types_are_send_sync() {
    assert_send_sync::<ProjectSession>();
    assert_send_sync::<ProjectRegistry>();
    assert_send_sync::<InvocationTracker>();
    assert_send_sync::<ToolInvocation>();
    assert_send_sync::<ToolCallResult>();
    assert_send_sync::<TransitionEvent>();
    assert_send_sync::<ChannelObserver>();
    assert_send_sync::<SessionError>();
    assert_send_sync::<TrackerError>();
}

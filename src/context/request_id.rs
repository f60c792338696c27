//! Request identifier carrier.

use super::{Context, ContextKey};

/// Private key for the request identifier.
struct RequestIdKey;

impl ContextKey for RequestIdKey {
    type Value = i64;
    const NAME: &'static str = "request_id";
}

/// Derive a context that carries `id` as the request identifier.
#[must_use]
pub fn set_request_id(ctx: &Context, id: i64) -> Context {
    ctx.with_value::<RequestIdKey>(id)
}

/// The request identifier, or `None` if it was never set on this chain.
pub fn request_id(ctx: &Context) -> Option<i64> {
    ctx.value::<RequestIdKey>().copied()
}

/// The request identifier, or `0` if it was never set.
pub fn get_request_id(ctx: &Context) -> i64 {
    request_id(ctx).unwrap_or_default()
}

//! Wall-clock time for save timestamps and upload names.

use time::OffsetDateTime;

/// Current UTC time. In the browser this reads `Date.now()`, since the
/// system clock is unavailable to `wasm32-unknown-unknown`.
#[must_use]
pub fn now() -> OffsetDateTime {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let millis = js_sys::Date::now() as i128;
        OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        OffsetDateTime::now_utc()
    }
}

pub mod endpoint;
pub mod response;

pub use endpoint::*;
pub use response::*;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Current time as an ISO-8601 string, the wire format for mock
/// response timestamps.
pub fn iso_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

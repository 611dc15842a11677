//! Shared constants.

use uuid::Uuid;

/// Fixed id of the single academy_profile row. Reads and upserts always address this row.
pub const PROFILE_ROW_ID: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);

/// Hard cap on rows returned by any listing endpoint, regardless of requested limit.
pub const MAX_LIST_RESULTS: i64 = 500;

/// Default page size for listing endpoints when no limit is given.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

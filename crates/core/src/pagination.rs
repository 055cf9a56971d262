//! Pagination defaults shared by every list operation.

/// Page size used when the caller supplies zero or a negative limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Offset used when the caller supplies zero or a negative offset.
pub const DEFAULT_OFFSET: i64 = 0;

/// Upper bound for a caller-supplied limit.
pub const MAX_LIMIT: i64 = 100;

/// A resolved `LIMIT` / `OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Resolve caller-supplied values. Non-positive values fall back to the
    /// defaults silently; the limit is capped at [`MAX_LIMIT`].
    pub fn resolve(limit: i64, offset: i64) -> Self {
        let limit = if limit > 0 { limit.min(MAX_LIMIT) } else { DEFAULT_LIMIT };
        let offset = if offset > 0 { offset } else { DEFAULT_OFFSET };
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        assert_eq!(Page::resolve(0, -1), Page::resolve(DEFAULT_LIMIT, DEFAULT_OFFSET));
        assert_eq!(Page::resolve(-20, 0), Page::default());
    }

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(Page::resolve(25, 50), Page { limit: 25, offset: 50 });
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(Page::resolve(5_000, 0).limit, MAX_LIMIT);
    }
}

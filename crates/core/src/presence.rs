//! Presence rule for partial updates.
//!
//! A patch field is applied only when its value is *present*: strings must be
//! non-empty and numbers strictly positive. The consequence is that a patch
//! can never clear a string to `""` or set a number to exactly `0`; such a
//! field is treated as "no change".

/// Values that can be judged present or absent in a partial update.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for &str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for f64 {
    fn is_present(&self) -> bool {
        *self > 0.0
    }
}

impl Presence for i32 {
    fn is_present(&self) -> bool {
        *self > 0
    }
}

impl Presence for i64 {
    fn is_present(&self) -> bool {
        *self > 0
    }
}

impl Presence for u64 {
    fn is_present(&self) -> bool {
        *self > 0
    }
}

/// Keep `value` only if it is present.
pub fn present<T: Presence>(value: Option<T>) -> Option<T> {
    value.filter(Presence::is_present)
}

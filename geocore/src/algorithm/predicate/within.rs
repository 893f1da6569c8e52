use geocore_types::GeometryValue;

use super::contains::contains;

/// `within(a, b) ⇔ contains(b, a)` (spec §4.6).
pub fn within(a: &GeometryValue, b: &GeometryValue) -> bool {
    contains(b, a)
}

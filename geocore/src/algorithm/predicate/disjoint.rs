use geocore_types::GeometryValue;

use super::intersects::intersects;

/// `disjoint = ¬intersects` (spec §4.6). An Error or Empty operand
/// makes `intersects` false, so `disjoint` reports `true` for those —
/// matching the predicate table's note that `disjoint` is the one
/// predicate where an Error/Empty operand yields `true` rather than
/// `false`.
pub fn disjoint(a: &GeometryValue, b: &GeometryValue) -> bool {
    !intersects(a, b)
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::{new_geom_point, Point};

    #[test]
    fn error_operand_is_disjoint() {
        let err = GeometryValue::Error(geocore_types::Error::NoMemory);
        let point = new_geom_point(Point::new(0.0, 0.0));
        assert!(disjoint(&err, &point));
    }
}

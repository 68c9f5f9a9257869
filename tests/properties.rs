//! Property-based tests for the region algebra.
//!
//! Verifies the Boolean algebra laws, the canonical storage invariants and
//! the round-trip guarantees across randomly generated regions.

use proptest::prelude::*;
use rectset::{Point, Rect, RectF, Region, RegionF};

/// Generate an arbitrary non-empty rectangle.
fn arb_rect() -> impl Strategy<Value = Rect> {
    (-50..50i32, -50..50i32, 1..20i32, 1..20i32).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// Generate an arbitrary region of up to a dozen rectangles.
fn arb_region() -> impl Strategy<Value = Region> {
    prop::collection::vec(arb_rect(), 0..12).prop_map(|rects| Region::from_unsorted_rects(&rects))
}

/// Generate an arbitrary real rectangle on a half-unit grid, which keeps
/// every coordinate comparison exact.
fn arb_rect_f() -> impl Strategy<Value = RectF> {
    (-40..40i32, -40..40i32, 1..16i32, 1..16i32).prop_map(|(x, y, w, h)| {
        RectF::new(
            x as f64 * 0.5,
            y as f64 * 0.5,
            w as f64 * 0.5,
            h as f64 * 0.5,
        )
    })
}

/// Generate an arbitrary real region.
fn arb_region_f() -> impl Strategy<Value = RegionF> {
    prop::collection::vec(arb_rect_f(), 0..10)
        .prop_map(|rects| RegionF::from_unsorted_rects(&rects))
}

/// Generate a rectangle list together with a permutation of it.
fn arb_rect_list_and_permutation() -> impl Strategy<Value = (Vec<Rect>, Vec<Rect>)> {
    prop::collection::vec(arb_rect(), 0..12)
        .prop_flat_map(|rects| (Just(rects.clone()), Just(rects).prop_shuffle()))
}

proptest! {
    #[test]
    fn union_and_intersection_commute(a in arb_region(), b in arb_region()) {
        prop_assert_eq!(a.united(&b), b.united(&a));
        prop_assert_eq!(a.intersected(&b), b.intersected(&a));
        prop_assert_eq!(a.xored(&b), b.xored(&a));
    }

    #[test]
    fn operations_associate(a in arb_region(), b in arb_region(), c in arb_region()) {
        prop_assert_eq!(a.united(&b).united(&c), a.united(&b.united(&c)));
        prop_assert_eq!(
            a.intersected(&b).intersected(&c),
            a.intersected(&b.intersected(&c))
        );
        prop_assert_eq!(a.xored(&b).xored(&c), a.xored(&b.xored(&c)));
    }

    #[test]
    fn empty_region_is_neutral(a in arb_region()) {
        let empty = Region::new();
        prop_assert_eq!(a.united(&empty), a.clone());
        prop_assert_eq!(a.subtracted(&empty), a.clone());
        prop_assert_eq!(a.xored(&empty), a.clone());
        prop_assert!(a.intersected(&empty).is_empty());
        prop_assert!(empty.subtracted(&a).is_empty());
    }

    #[test]
    fn operations_are_idempotent_or_cancel(a in arb_region()) {
        prop_assert_eq!(a.united(&a), a.clone());
        prop_assert_eq!(a.intersected(&a), a.clone());
        prop_assert!(a.subtracted(&a).is_empty());
        prop_assert!(a.xored(&a).is_empty());
    }

    #[test]
    fn intersection_distributes_over_union(
        a in arb_region(),
        b in arb_region(),
        c in arb_region(),
    ) {
        prop_assert_eq!(
            a.intersected(&b.united(&c)),
            a.intersected(&b).united(&a.intersected(&c))
        );
    }

    #[test]
    fn xor_is_union_minus_intersection(a in arb_region(), b in arb_region()) {
        prop_assert_eq!(a.xored(&b), a.united(&b).subtracted(&a.intersected(&b)));
    }

    #[test]
    fn difference_partitions_the_minuend(a in arb_region(), b in arb_region()) {
        let difference = a.subtracted(&b);
        prop_assert!(!difference.intersects(&b));
        prop_assert_eq!(difference.united(&a.intersected(&b)), a.clone());
    }

    #[test]
    fn every_operation_yields_canonical_form(a in arb_region(), b in arb_region()) {
        prop_assert!(a.is_canonical());
        prop_assert!(a.united(&b).is_canonical());
        prop_assert!(a.subtracted(&b).is_canonical());
        prop_assert!(a.intersected(&b).is_canonical());
        prop_assert!(a.xored(&b).is_canonical());
    }

    #[test]
    fn sorted_rects_round_trip(a in arb_region()) {
        prop_assert_eq!(Region::from_sorted_rects(a.rects()), a.clone());
    }

    #[test]
    fn construction_ignores_rectangle_order(
        (rects, shuffled) in arb_rect_list_and_permutation(),
    ) {
        prop_assert_eq!(
            Region::from_unsorted_rects(&rects),
            Region::from_unsorted_rects(&shuffled)
        );
    }

    #[test]
    fn translation_round_trips(a in arb_region(), dx in -100..100i32, dy in -100..100i32) {
        let moved = a.translated(dx, dy);
        prop_assert!(moved.is_canonical());
        prop_assert_eq!(moved.translated(-dx, -dy), a.clone());
    }

    #[test]
    fn wire_round_trips(a in arb_region()) {
        let mut buf = Vec::new();
        a.write_to(&mut buf).unwrap();
        prop_assert_eq!(Region::read_from(&mut buf.as_slice()).unwrap(), a.clone());
    }

    #[test]
    fn stored_rectangles_are_contained(a in arb_region()) {
        for rect in a.rects() {
            prop_assert!(a.contains_rect(rect));
            for point in [
                Point::new(rect.left(), rect.top()),
                Point::new(rect.right() - 1, rect.top()),
                Point::new(rect.left(), rect.bottom() - 1),
                Point::new(rect.right() - 1, rect.bottom() - 1),
            ] {
                prop_assert!(a.contains_point(point));
            }
        }
    }

    #[test]
    fn points_outside_the_bounds_are_not_contained(a in arb_region(), x in -60..60i32, y in -60..60i32) {
        let bounds = a.bounding_rect();
        let point = Point::new(x, y);
        if !bounds.contains_point(point) {
            prop_assert!(!a.contains_point(point));
        }
        prop_assert!(!a.contains_point(Point::new(bounds.right(), y)));
        prop_assert!(!a.contains_point(Point::new(x, bounds.bottom())));
    }

    #[test]
    fn containment_matches_subtraction(a in arb_region(), r in arb_rect()) {
        prop_assert_eq!(
            a.contains_rect(&r),
            Region::from(r).subtracted(&a).is_empty()
        );
        prop_assert_eq!(a.intersects_rect(&r), !a.intersected_rect(&r).is_empty());
    }

    #[test]
    fn real_regions_obey_the_same_laws(a in arb_region_f(), b in arb_region_f()) {
        prop_assert_eq!(a.united(&b), b.united(&a));
        prop_assert_eq!(a.xored(&b), a.united(&b).subtracted(&a.intersected(&b)));
        prop_assert!(a.united(&b).is_canonical());
        prop_assert!(a.subtracted(&b).is_canonical());

        let mut buf = Vec::new();
        a.write_to(&mut buf).unwrap();
        prop_assert_eq!(RegionF::read_from(&mut buf.as_slice()).unwrap(), a.clone());
    }

    #[test]
    fn rounding_out_covers_rounding_in(a in arb_region_f()) {
        let rounded_out = a.rounded_out();
        let rounded_in = a.rounded_in();
        prop_assert!(rounded_out.is_canonical());
        prop_assert!(rounded_in.is_canonical());
        prop_assert!(a.rounded().is_canonical());
        prop_assert!(rounded_in.subtracted(&rounded_out).is_empty());
    }

    #[test]
    fn widening_preserves_equality(a in arb_region(), b in arb_region()) {
        let af = RegionF::from(&a);
        let bf = RegionF::from(&b);
        prop_assert!(af.is_canonical());
        prop_assert_eq!(RegionF::from(&a.united(&b)), af.united(&bf));
        prop_assert_eq!(RegionF::from(&a.subtracted(&b)), af.subtracted(&bf));
    }
}

//! Tests for BoundingBox parsing and containment.

use goes_common::bbox::BoundingBox;
use goes_common::GoesError;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_whitespace_separated() {
    let bbox = BoundingBox::from_domain_box("-105.0 35.5 -90.0 45.0").unwrap();
    assert_eq!(bbox, BoundingBox::new(-105.0, 35.5, -90.0, 45.0).unwrap());
}

#[test]
fn test_parse_comma_separated() {
    let bbox = BoundingBox::from_domain_box("-105,35.5,-90,45").unwrap();
    assert_eq!(bbox.west, -105.0);
    assert_eq!(bbox.north, 45.0);
}

#[test]
fn test_parse_mixed_separators_and_padding() {
    let bbox = BoundingBox::from_domain_box("  -105.0, 35.5   -90.0 ,45.0 ").unwrap();
    assert_eq!(bbox.south, 35.5);
    assert_eq!(bbox.east, -90.0);
}

#[test]
fn test_parse_wrong_arity() {
    assert!(matches!(
        BoundingBox::from_domain_box("-105 35 -90"),
        Err(GoesError::InvalidBbox(_))
    ));
    assert!(matches!(
        BoundingBox::from_domain_box("-105 35 -90 45 0"),
        Err(GoesError::InvalidBbox(_))
    ));
}

#[test]
fn test_parse_not_a_number() {
    assert!(matches!(
        BoundingBox::from_domain_box("-105 south -90 45"),
        Err(GoesError::InvalidBbox(_))
    ));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_reject_inverted_longitudes() {
    assert!(BoundingBox::new(-90.0, 30.0, -100.0, 40.0).is_err());
}

#[test]
fn test_reject_degenerate_latitudes() {
    assert!(BoundingBox::new(-100.0, 30.0, -90.0, 30.0).is_err());
}

#[test]
fn test_reject_non_finite() {
    assert!(BoundingBox::new(f64::NAN, 30.0, -90.0, 40.0).is_err());
    assert!(BoundingBox::new(-100.0, 30.0, f64::INFINITY, 40.0).is_err());
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_inclusive_edges_are_kept() {
    let bbox = BoundingBox::new(-100.0, 30.0, -90.0, 40.0).unwrap();
    for lat in [30.0, 35.0, 40.0] {
        assert!(bbox.contains_lat(lat), "lat {}", lat);
    }
    for lon in [-100.0, -95.0, -90.0] {
        assert!(bbox.contains_lon(lon), "lon {}", lon);
    }
    assert!(!bbox.contains_lat(40.000001));
    assert!(!bbox.contains_lon(-100.000001));
}

#[test]
fn test_strict_edges_are_masked() {
    let bbox = BoundingBox::new(-100.0, 30.0, -90.0, 40.0).unwrap();
    assert!(!bbox.strictly_contains(-100.0, 35.0));
    assert!(!bbox.strictly_contains(-95.0, 40.0));
    assert!(bbox.strictly_contains(-99.999, 39.999));
}

#[test]
fn test_expanded() {
    let bbox = BoundingBox::new(-100.0, 30.0, -90.0, 40.0).unwrap();
    let grown = bbox.expanded(0.5);
    assert_eq!(grown, BoundingBox::new(-100.5, 29.5, -89.5, 40.5).unwrap());
    assert!(grown.strictly_contains(-100.0, 30.0));
}

#[test]
fn test_display_round_trips_through_parser() {
    let bbox = BoundingBox::new(-105.25, 35.5, -90.0, 45.0).unwrap();
    let parsed = BoundingBox::from_domain_box(&bbox.to_string()).unwrap();
    assert_eq!(parsed, bbox);
}

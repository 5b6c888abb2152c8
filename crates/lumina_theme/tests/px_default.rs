//! The scale engine before any viewport is bound. Kept in its own test
//! binary so no other test can activate the engine first.

use lumina_theme::px;
use pretty_assertions::assert_eq;

#[test]
fn unbound_engine_uses_identity_scale() {
    assert!(!px::is_active());
    assert_eq!(px::current_scale(), 1.0);

    assert_eq!(px::to_pixels(16.0), 16);
    assert_eq!(px::even(15.0), 16);
    assert_eq!(px::raw_scale(12.5), 12.5);
    assert_eq!(px::floor_pixels(12.5), 12);
    assert_eq!(px::ceil_pixels(12.5), 13);
}

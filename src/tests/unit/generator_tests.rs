//! Generator Unit Tests
//!
//! Exact-output scenarios with scripted randomness, plus the failure and
//! fallback edges of `pick_distinct` / `pick_excluding`.

use rstest::rstest;

use crate::core::hero::{
    generate, pick_distinct, pick_excluding, FixedIndex, HeroError, PowerRecord, RngSource,
    ScriptedSource, SHAPE_PALETTE,
};
use crate::core::power_store::{ListFields, PowerStore, StaticPowerStore};
use crate::tests::mocks::flight_and_strength;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_index_zero_scenario() {
    let hero = generate(&flight_and_strength(), &mut FixedIndex(0)).unwrap();

    assert_eq!(hero.name, "Captain Sky");
    assert_eq!(hero.primary_power_title, "Flight");
    assert_eq!(hero.secondary_power_title, "Strength");
    assert_eq!(hero.background_color, "#F00");
    assert_eq!(hero.foreground_color, "#00F");
    assert_eq!(hero.background_icon, SHAPE_PALETTE[0]);
    assert_eq!(hero.foreground_icon, "Plane");
}

#[test]
fn test_scripted_scenario_swaps_powers() {
    // primary = 1 (Strength), secondary = 0 (Flight); then last entries
    let mut rng = ScriptedSource::new(vec![1, 0, 1, 0, 2, 1, 1, 0]);
    let hero = generate(&flight_and_strength(), &mut rng).unwrap();

    assert_eq!(hero.primary_power_title, "Strength");
    assert_eq!(hero.secondary_power_title, "Flight");
    // colors union = [#00F, #F00]
    assert_eq!(hero.background_color, "#F00");
    assert_eq!(hero.foreground_color, "#00F");
    assert_eq!(hero.background_icon, SHAPE_PALETTE[2]);
    // icons union = [Fist, Plane]
    assert_eq!(hero.foreground_icon, "Plane");
    // prefixes = [Iron, Captain], mains = [Fist, Sky]
    assert_eq!(hero.name, "Captain Fist");
    assert_eq!(rng.picks(), 8);
}

#[test]
fn test_single_record_is_insufficient() {
    let records = vec![PowerRecord::new("Flight")];
    let err = pick_distinct(&records, &mut FixedIndex(0)).unwrap_err();
    assert!(matches!(err, HeroError::InsufficientData { available: 1 }));

    let err = generate(&records, &mut FixedIndex(0)).unwrap_err();
    assert!(matches!(err, HeroError::InsufficientData { available: 1 }));
}

#[test]
fn test_prefix_equal_to_main_is_excluded() {
    let records = vec![
        PowerRecord::new("Echo")
            .with_name_prefixes(["Echo"])
            .with_name_mains(["Echo", "Wave"]),
        PowerRecord::new("Sound"),
    ];
    let hero = generate(&records, &mut FixedIndex(0)).unwrap();
    assert_eq!(hero.name, "Echo Wave");
}

#[test]
fn test_foreground_icon_never_repeats_background_shape() {
    let records = vec![
        PowerRecord::new("Round").with_icons([SHAPE_PALETTE[0]]),
        PowerRecord::new("Square").with_icons([SHAPE_PALETTE[1]]),
    ];
    let hero = generate(&records, &mut FixedIndex(0)).unwrap();
    assert_eq!(hero.background_icon, SHAPE_PALETTE[0]);
    assert_eq!(hero.foreground_icon, SHAPE_PALETTE[1]);
}

// =============================================================================
// pick_excluding
// =============================================================================

#[rstest]
#[case::empty(&[], Some("anything"), "")]
#[case::all_excluded(&["red", "red"], Some("red"), "")]
#[case::absent_exclusion(&["red", "blue"], Some("green"), "red")]
#[case::no_exclusion(&["red", "blue"], None, "red")]
#[case::exclusion_skips_first(&["red", "blue"], Some("red"), "blue")]
fn test_pick_excluding_cases(
    #[case] candidates: &[&str],
    #[case] exclude: Option<&str>,
    #[case] expected: &str,
) {
    let candidates = strings(candidates);
    let exclude = exclude.map(str::to_string);
    let picked = pick_excluding(&candidates, exclude.as_ref(), &mut FixedIndex(0));
    assert_eq!(picked, expected);
}

#[test]
fn test_pick_excluding_other_default_types() {
    let numbers = [3u32, 3, 3];
    assert_eq!(pick_excluding(&numbers, Some(&3), &mut FixedIndex(0)), 0);
    assert_eq!(pick_excluding(&numbers, Some(&4), &mut FixedIndex(2)), 3);
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn test_seeded_generation_is_reproducible() {
    let records = StaticPowerStore::sample()
        .fetch_all("Powers", &ListFields::default())
        .await
        .unwrap();

    let run = |seed| {
        let mut rng = RngSource::seeded(seed);
        (0..10)
            .map(|_| generate(&records, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(1234), run(1234));
}

//! Random Combination Generator
//!
//! Synthesizes a [`HeroIdentity`] from two distinct power records. Each paired
//! pick excludes its partner's value when it can, so the foreground never
//! repeats the background color or icon and the name stem never repeats its
//! prefix. Exclusion only reduces collisions; when it would leave nothing to
//! pick, the field falls back to empty.
//!
//! ```text
//! records --pick_distinct--> (primary, secondary)
//!                               |
//!          colors ∪  -> background_color -> foreground_color (≠ background)
//!          SHAPES    -> background_icon
//!          icons  ∪  -> foreground_icon  (≠ background_icon)
//!          prefixes ∪ -> prefix
//!          mains  ∪  -> main (≠ prefix)
//! ```

use indexmap::IndexSet;

use super::errors::HeroError;
use super::models::{HeroIdentity, PowerRecord};
use super::random::RandomSource;

/// Shape icons the background is drawn from, independent of the records.
pub const SHAPE_PALETTE: &[&str] = &[
    "CircleShapeSolid",
    "SquareShapeSolid",
    "TriangleShapeSolid",
    "DiamondSolid",
    "HexagonSolid",
    "ShieldSolid",
    "StarburstSolid",
    "HeartFill",
];

/// Pick two records at different positions.
///
/// The first is uniform over the whole slice, the second uniform over the
/// rest. A single record is rejected rather than paired with itself.
pub fn pick_distinct<'a>(
    records: &'a [PowerRecord],
    rng: &mut impl RandomSource,
) -> Result<(&'a PowerRecord, &'a PowerRecord), HeroError> {
    if records.len() < 2 {
        return Err(HeroError::insufficient_data(records.len()));
    }

    let first = rng.pick_index(records.len());
    let mut second = rng.pick_index(records.len() - 1);
    if second >= first {
        second += 1;
    }

    Ok((&records[first], &records[second]))
}

/// Pick one candidate uniformly, skipping any equal to `exclude`.
///
/// Returns `T::default()` when nothing survives the filter.
pub fn pick_excluding<T>(candidates: &[T], exclude: Option<&T>, rng: &mut impl RandomSource) -> T
where
    T: PartialEq + Clone + Default,
{
    let remaining: Vec<&T> = candidates
        .iter()
        .filter(|c| exclude.map(|e| *c != e).unwrap_or(true))
        .collect();

    if remaining.is_empty() {
        return T::default();
    }

    remaining[rng.pick_index(remaining.len())].clone()
}

/// Order-preserving, de-duplicated union of two candidate pools.
fn union(a: &[String], b: &[String]) -> Vec<String> {
    a.iter()
        .chain(b.iter())
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Generate a hero from the loaded power records.
pub fn generate(
    records: &[PowerRecord],
    rng: &mut impl RandomSource,
) -> Result<HeroIdentity, HeroError> {
    let (primary, secondary) = pick_distinct(records, rng)?;

    let colors = union(&primary.colors, &secondary.colors);
    let background_color = pick_excluding(&colors, None, rng);
    let foreground_color = pick_excluding(&colors, Some(&background_color), rng);

    let shapes: Vec<String> = SHAPE_PALETTE.iter().map(|s| s.to_string()).collect();
    let background_icon = pick_excluding(&shapes, None, rng);
    let icons = union(&primary.icons, &secondary.icons);
    let foreground_icon = pick_excluding(&icons, Some(&background_icon), rng);

    let prefixes = union(&primary.name_prefixes, &secondary.name_prefixes);
    let prefix = pick_excluding(&prefixes, None, rng);
    let mains = union(&primary.name_mains, &secondary.name_mains);
    let main = pick_excluding(&mains, Some(&prefix), rng);

    let identity = HeroIdentity {
        name: format!("{} {}", prefix, main),
        primary_power_title: primary.title.clone(),
        secondary_power_title: secondary.title.clone(),
        background_color,
        foreground_color,
        background_icon,
        foreground_icon,
    };

    log::debug!(
        "Generated hero '{}' from {} + {}",
        identity.name,
        identity.primary_power_title,
        identity.secondary_power_title
    );

    Ok(identity)
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural city layout generation for Metro Dash.
//!
//! The generator places a fixed number of randomly sized buildings uniformly
//! over the viewport and overlays an evenly spaced grid of road bands. Roads
//! are purely cosmetic and may run straight through buildings. One building,
//! selected by generation index, is recoloured and designated as the mission
//! target.

use glam::Vec2;
use metro_dash_core::{
    Building, BuildingId, CityTuning, RgbColor, Road, TuningRange, Viewport, WorldRect,
    ROAD_COLOR, TARGET_BUILDING_COLOR,
};
use rand::Rng;

/// Static layout produced once per session.
#[derive(Clone, Debug, PartialEq)]
pub struct CityLayout {
    buildings: Vec<Building>,
    roads: Vec<Road>,
    target: Option<BuildingId>,
}

impl CityLayout {
    /// Buildings in generation order.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Road bands, alternating vertical and horizontal.
    #[must_use]
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Building designated as the mission target, if the configured index exists.
    #[must_use]
    pub fn target(&self) -> Option<&Building> {
        let target = self.target?;
        self.buildings.iter().find(|building| building.id() == target)
    }

    /// Point the mission asks the player to reach: the target building's centre.
    #[must_use]
    pub fn mission_target(&self) -> Option<Vec2> {
        self.target().map(|building| building.rect().center())
    }

    /// Splits the layout into its owned parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Building>, Vec<Road>, Option<BuildingId>) {
        (self.buildings, self.roads, self.target)
    }
}

/// Generates buildings and roads covering the provided viewport.
pub fn generate<R>(viewport: Viewport, tuning: &CityTuning, rng: &mut R) -> CityLayout
where
    R: Rng + ?Sized,
{
    let buildings = generate_buildings(viewport, tuning, rng);
    let target = buildings
        .iter()
        .find(|building| building.is_target())
        .map(Building::id);

    CityLayout {
        buildings,
        roads: generate_roads(viewport, tuning),
        target,
    }
}

fn generate_buildings<R>(viewport: Viewport, tuning: &CityTuning, rng: &mut R) -> Vec<Building>
where
    R: Rng + ?Sized,
{
    let horizontal = TuningRange::new(0.0, viewport.width());
    let vertical = TuningRange::new(0.0, viewport.height());
    let count = usize::try_from(tuning.building_count).unwrap_or(0);

    let mut buildings = Vec::with_capacity(count);
    for index in 0..tuning.building_count {
        let origin = Vec2::new(sample_f32(horizontal, rng), sample_f32(vertical, rng));
        let size = Vec2::new(
            sample_f32(tuning.building_width, rng),
            sample_f32(tuning.building_height, rng),
        );
        let color = RgbColor::from_rgb(
            sample_channel(tuning.building_channel, rng),
            sample_channel(tuning.building_channel, rng),
            sample_channel(tuning.building_channel, rng),
        );

        let is_target = index == tuning.target_index;
        let color = if is_target {
            TARGET_BUILDING_COLOR
        } else {
            color
        };

        buildings.push(Building::new(
            BuildingId::new(index),
            WorldRect::from_origin_and_size(origin, size),
            color,
            is_target,
        ));
    }
    buildings
}

fn generate_roads(viewport: Viewport, tuning: &CityTuning) -> Vec<Road> {
    if tuning.road_bands == 0 {
        return Vec::new();
    }

    let bands = tuning.road_bands as f32;
    let column_spacing = viewport.width() / bands;
    let row_spacing = viewport.height() / bands;
    let thickness = tuning.road_thickness.max(0.0);

    let mut roads = Vec::with_capacity(tuning.road_bands as usize * 2);
    for index in 0..tuning.road_bands {
        let offset = index as f32;
        roads.push(Road::new(
            WorldRect::from_origin_and_size(
                Vec2::new(offset * column_spacing, 0.0),
                Vec2::new(thickness, viewport.height()),
            ),
            ROAD_COLOR,
        ));
        roads.push(Road::new(
            WorldRect::from_origin_and_size(
                Vec2::new(0.0, offset * row_spacing),
                Vec2::new(viewport.width(), thickness),
            ),
            ROAD_COLOR,
        ));
    }
    roads
}

fn sample_f32<R>(range: TuningRange<f32>, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    if range.is_empty() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

fn sample_channel<R>(range: TuningRange<u8>, rng: &mut R) -> u8
where
    R: Rng + ?Sized,
{
    if range.is_empty() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn zero_road_bands_produce_no_roads() {
        let tuning = CityTuning {
            road_bands: 0,
            ..CityTuning::default()
        };
        assert!(generate_roads(Viewport::new(800.0, 600.0), &tuning).is_empty());
    }

    #[test]
    fn empty_ranges_fall_back_to_their_lower_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(sample_f32(TuningRange::new(7.0, 7.0), &mut rng), 7.0);
        assert_eq!(sample_channel(TuningRange::new(9, 2), &mut rng), 9);
    }

    #[test]
    fn out_of_range_target_index_leaves_no_target() {
        let tuning = CityTuning {
            building_count: 3,
            target_index: 3,
            ..CityTuning::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let layout = generate(Viewport::new(640.0, 480.0), &tuning, &mut rng);

        assert_eq!(layout.buildings().len(), 3);
        assert!(layout.target().is_none());
        assert!(layout.mission_target().is_none());
    }
}

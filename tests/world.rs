use glam::DVec2;
use serde_json::json;

use worldlayers::biomes::{Biome, CellConditions};
use worldlayers::climate::{temperature_c, ClimateConfig, ClimateLayer};
use worldlayers::generator::{ConfigError, WorldConfig, WorldGenError, WorldGenerator};
use worldlayers::grid::{CoordGrid, Field};
use worldlayers::noise::{NoiseEngine, CM_PER_KM};
use worldlayers::pipeline::LayerSet;
use worldlayers::tectonics::{PlateSet, TectonicConfig, TectonicSynthesizer};

use std::sync::Arc;

fn generator(seed: u64) -> WorldGenerator {
    WorldGenerator::new(WorldConfig::with_seed(seed)).unwrap()
}

fn small_grid(origin: DVec2, spacing: f64, side: usize) -> CoordGrid {
    CoordGrid::regular(origin, DVec2::splat(spacing), side, side)
}

#[test]
fn center_temperature_is_in_range_and_reproducible() {
    let gen = generator(42);
    let cfg = gen.config().climate.clone();
    let (cx, cy) = (gen.world_width_cm() / 2.0, gen.world_height_cm() / 2.0);

    let first = gen.sample_point(cx, cy).temperature_c;
    let again = gen.sample_point(cx, cy).temperature_c;
    assert_eq!(first.to_bits(), again.to_bits(), "same query must reproduce the same float");

    let target = cfg.target_sea_level_temp_c as f64;
    let seasonal = cfg.seasonal_variation_c as f64 / 2.0;
    let lower = target - cfg.polar_temperature_drop_c as f64 - seasonal - cfg.lapse_rate_c_per_unit_elevation as f64;
    let upper = target + seasonal;
    assert!((lower..=upper).contains(&first), "{first} outside [{lower}, {upper}]");
}

#[test]
fn hot_world_stays_above_freezing() {
    let gen = WorldGenerator::from_overrides(&json!({ "seed": 1, "target_sea_level_temp_c": 100.0 })).unwrap();
    let cfg = gen.config().climate.clone();
    assert!(cfg.lapse_rate_c_per_unit_elevation * 1.0 <= 100.0);

    // Coldest corner of the model: minimum noise, pole, peak elevation.
    let coldest = temperature_c(&cfg, 0.0, 1.0, 1.0);
    assert!((coldest - (100.0 - 15.0 - 30.0 - 40.0)).abs() < 1e-9);
    assert!(coldest > 0.0);

    let grid = small_grid(DVec2::ZERO, gen.world_height_cm() / 5.0, 6);
    let elevation = gen.elevation(&grid);
    let temperature = gen.temperature(&grid, Some(&elevation)).unwrap();
    for (e, t) in elevation.iter().zip(temperature.iter()) {
        if *e > gen.terrain().sea_level() {
            assert!(*t > 0.0, "land cell at elevation {e} froze: {t}");
        }
    }

    let peak = Field::filled(6, 6, 1.0f32);
    let at_peak = gen.temperature(&grid, Some(&peak)).unwrap();
    assert!(at_peak.iter().all(|&t| t > 0.0));
}

#[test]
fn flat_terrain_gets_full_soil_on_land_only() {
    let gen = generator(3);
    let max_soil = gen.config().terrain.max_soil_depth_units;
    let grid = small_grid(DVec2::ZERO, 500.0, 5);

    let land = Field::filled(5, 5, 0.6f32);
    let slope = gen.slope_from_bedrock(&grid, &land).unwrap();
    assert!(slope.iter().all(|&s| s == 0.0));
    let soil = gen.soil_depth_from(&slope, &land).unwrap();
    assert!(soil.iter().all(|&d| d == max_soil));

    let sea = Field::filled(5, 5, 0.02f32);
    let soil = gen.soil_depth_from(&gen.slope_from_bedrock(&grid, &sea).unwrap(), &sea).unwrap();
    assert!(soil.iter().all(|&d| d == 0.0));

    let mixed = Field::from_fn(5, 5, |c, _| if c < 2 { 0.02f32 } else { 0.6 });
    let soil = gen.soil_depth_from(&Field::filled(5, 5, 0.0), &mixed).unwrap();
    for row in 0..5 {
        for col in 0..5 {
            let expected = if col < 2 { 0.0 } else { max_soil };
            assert_eq!(soil.get(col, row), expected);
        }
    }
}

#[test]
fn boundary_proximity_peaks_on_bisector() {
    let config = TectonicConfig {
        num_tectonic_plates: 2,
        mountain_influence_radius_km: 1.0,
        ..Default::default()
    };
    let plates = PlateSet::from_points(vec![DVec2::new(-2.0e5, 0.0), DVec2::new(2.0e5, 0.0)]);
    let tectonics = TectonicSynthesizer::from_plates(plates, &config);

    for y in [-3.0e5, -1.0e4, 0.0, 7.5e4, 2.0e5] {
        assert_eq!(tectonics.boundary_proximity_at(0.0, y), 1.0);
    }

    for y in [0.0, 5.0e4] {
        let profile: Vec<f64> = (0..=30)
            .map(|i| tectonics.boundary_proximity_at(i as f64 * 5.0e3, y))
            .collect();
        for pair in profile.windows(2) {
            assert!(pair[1] <= pair[0], "proximity rose away from the bisector: {profile:?}");
        }
        assert!(profile[1] < profile[0]);
        assert_eq!(*profile.last().unwrap(), 0.0);
    }
}

#[test]
fn single_plate_has_no_boundaries() {
    let gen = WorldGenerator::from_overrides(&json!({ "num_tectonic_plates": 1 })).unwrap();
    let grid = small_grid(DVec2::ZERO, 1.0e5, 4);
    assert!(gen.boundary_proximity(&grid).iter().all(|&p| p == 0.0));
    assert!(gen.tectonic_uplift(&grid).iter().all(|&u| u == 0.0));
    assert!(gen.plate_ids(&grid).iter().all(|&id| id == 0));
}

#[test]
fn coarse_grid_matches_fine_grid() {
    let gen = generator(11);
    let origin = DVec2::new(31_000.0, 47_000.0);
    let coarse = small_grid(origin, 400.0, 4);
    let fine = small_grid(origin, 100.0, 13);

    let layers = |grid: &CoordGrid| {
        let elevation = gen.elevation(grid);
        let temperature = gen.temperature(grid, None).unwrap();
        let humidity = gen.humidity(grid, None, None).unwrap();
        (
            gen.bedrock_elevation(grid),
            gen.slope(grid),
            gen.soil_depth(grid),
            elevation,
            temperature,
            humidity,
        )
    };
    let c = layers(&coarse);
    let f = layers(&fine);

    for row in 0..4 {
        for col in 0..4 {
            let (fc, fr) = (col * 4, row * 4);
            assert_eq!(c.0.get(col, row), f.0.get(fc, fr), "bedrock");
            assert_eq!(c.1.get(col, row), f.1.get(fc, fr), "slope");
            assert_eq!(c.2.get(col, row), f.2.get(fc, fr), "soil");
            assert_eq!(c.3.get(col, row), f.3.get(fc, fr), "elevation");
            assert_eq!(c.4.get(col, row), f.4.get(fc, fr), "temperature");
            assert_eq!(c.5.get(col, row), f.5.get(fc, fr), "humidity");
        }
    }
}

#[test]
fn adjacent_chunks_share_their_edge_samples() {
    let gen = generator(5);
    let size = gen.config().chunk_size_cm;
    // Padding by one sample makes the left chunk reach into the right one.
    let left = CoordGrid::chunk(0, 0, 8, size, 1);
    let right = CoordGrid::chunk(1, 0, 8, size, 0);
    let (a, b) = (gen.elevation(&left), gen.elevation(&right));
    for row in 0..8 {
        assert_eq!(a.get(9, row + 1), b.get(0, row));
    }
}

#[test]
fn higher_ground_is_colder() {
    let gen = generator(9);
    let (x, y) = (123_456.0, 654_321.0);
    let mut previous = f64::INFINITY;
    for step in 0..=10 {
        let t = gen.climate().temperature_at(x, y, step as f64 / 10.0);
        assert!(t < previous);
        previous = t;
    }
}

#[test]
fn warmer_target_never_cools_a_cell() {
    let grid = small_grid(DVec2::new(5.0e4, 2.0e5), 3.0e4, 5);
    let cool = generator(9);
    let warm = WorldGenerator::from_overrides(&json!({ "seed": 9, "target_sea_level_temp_c": 25.0 })).unwrap();
    let elevation = cool.elevation(&grid);
    let a = cool.temperature(&grid, Some(&elevation)).unwrap();
    let b = warm.temperature(&grid, Some(&elevation)).unwrap();
    for (lo, hi) in a.iter().zip(b.iter()) {
        assert!(hi >= lo);
    }
}

#[test]
fn sea_ice_outranks_grassland() {
    let gen = generator(2);
    let table = gen.biome_table();
    let frozen_sea = CellConditions {
        elevation: 0.05,
        temperature: -5.0,
        humidity: 7.0,
        soil_depth: 0.0,
    };
    assert_eq!(table.classify_cell(&frozen_sea), Biome::SeaIce);

    let meadow = CellConditions {
        elevation: 0.3,
        temperature: 10.0,
        humidity: 7.0,
        soil_depth: 0.04,
    };
    assert_eq!(table.classify_cell(&meadow), Biome::Grassland);
}

#[test]
fn ridge_casts_rain_shadow() {
    let climate = ClimateLayer::new(
        ClimateConfig { humidity_noise_amplitude_g_m3: 0.0, ..Default::default() },
        Arc::new(NoiseEngine::new(21)),
        0.1,
        1.0e7,
    );
    // Sea to the west, wind from the west, a ridge between the coast and one site.
    let open = |x: f64, _y: f64| if x < 0.0 { 0.0 } else { 0.25 };
    let ridged = |x: f64, y: f64| {
        if (15.0 * CM_PER_KM..20.0 * CM_PER_KM).contains(&x) {
            0.9
        } else {
            open(x, y)
        }
    };
    let x = 40.0 * CM_PER_KM;
    let clear = climate.humidity_sample(&open, x, 0.0, 0.25, 18.0);
    let shadowed = climate.humidity_sample(&ridged, x, 0.0, 0.25, 18.0);
    assert!(shadowed.absolute_g_m3() <= clear.absolute_g_m3());
    assert!(shadowed.water_distance_km > clear.water_distance_km);
}

fn quiet_climate() -> ClimateLayer {
    ClimateLayer::new(
        ClimateConfig { humidity_noise_amplitude_g_m3: 0.0, ..Default::default() },
        Arc::new(NoiseEngine::new(21)),
        0.1,
        1.0e7,
    )
}

fn km(v: f64) -> f64 {
    v * CM_PER_KM
}

#[test]
fn crosswind_water_is_found() {
    let climate = quiet_climate();
    let dry = |_x: f64, _y: f64| 0.25;
    let north_sea = |_x: f64, y: f64| if y > km(2.0) { 0.0 } else { 0.25 };

    let inland = climate.humidity_sample(&dry, 0.0, 0.0, 0.25, 18.0);
    let coastal = climate.humidity_sample(&north_sea, 0.0, 0.0, 0.25, 18.0);
    assert!(inland.water_distance_km.is_infinite());
    assert_eq!(inland.absolute_g_m3(), 0.0);
    // straight north is a quarter turn off the wind: weight 1.5
    assert!((2.9..3.1).contains(&coastal.water_distance_km), "{}", coastal.water_distance_km);
    assert!(coastal.absolute_g_m3() > 0.0);
}

#[test]
fn near_downwind_shore_beats_far_upwind_shore() {
    let climate = quiet_climate();
    let strait = |x: f64, _y: f64| if x < km(-60.0) || x > km(0.5) { 0.0 } else { 0.25 };
    let upwind_only = |x: f64, _y: f64| if x < km(-60.0) { 0.0 } else { 0.25 };

    let both = climate.humidity_sample(&strait, 0.0, 0.0, 0.25, 18.0);
    let far = climate.humidity_sample(&upwind_only, 0.0, 0.0, 0.25, 18.0);
    assert!((0.95..1.05).contains(&both.water_distance_km), "{}", both.water_distance_km);
    assert!(both.absolute_g_m3() > far.absolute_g_m3());
}

#[test]
fn nearest_of_several_shores_wins() {
    let climate = quiet_climate();
    let lake_and_sea = |x: f64, _y: f64| {
        if x < km(-40.0) || (km(-12.0)..km(-7.0)).contains(&x) {
            0.0
        } else {
            0.25
        }
    };
    let sample = climate.humidity_sample(&lake_and_sea, 0.0, 0.0, 0.25, 18.0);
    assert!((6.9..7.1).contains(&sample.water_distance_km), "{}", sample.water_distance_km);
}

#[test]
fn narrow_lake_beside_the_cell_is_seen() {
    let climate = quiet_climate();
    let pond = |x: f64, _y: f64| if (km(-1.0)..km(-0.6)).contains(&x) { 0.0 } else { 0.25 };
    let sample = climate.humidity_sample(&pond, 0.0, 0.0, 0.25, 18.0);
    assert!((0.59..0.62).contains(&sample.water_distance_km), "{}", sample.water_distance_km);
    assert!(sample.relative > 0.99);
}

#[test]
fn ridge_dries_only_the_point_behind_it() {
    let climate = quiet_climate();
    // Sea to the west; a ridge sits between the coast and the northern site only.
    let land = |x: f64, y: f64| {
        if x < 0.0 {
            0.0
        } else if (km(15.0)..km(20.0)).contains(&x) && (km(40.0)..km(60.0)).contains(&y) {
            0.9
        } else {
            0.25
        }
    };
    let open = climate.humidity_sample(&land, km(40.0), 0.0, 0.25, 18.0);
    let sheltered = climate.humidity_sample(&land, km(40.0), km(50.0), 0.25, 18.0);
    assert!((open.water_distance_km - 40.0).abs() < 0.1);
    assert!(sheltered.water_distance_km > open.water_distance_km);
    assert!(sheltered.absolute_g_m3() <= open.absolute_g_m3());
}

#[test]
fn humidity_depends_only_on_final_fields() {
    let gen = generator(17);
    let grid = small_grid(DVec2::new(2.0e5, 3.0e5), 2.5e3, 4);

    let bedrock = gen.bedrock_elevation(&grid);
    let elevation = gen.elevation_from_bedrock(&grid, &bedrock).unwrap();
    let again = gen.elevation_from_bedrock(&grid, &gen.bedrock_elevation(&grid)).unwrap();
    assert_eq!(elevation, again);

    let temperature = gen.temperature(&grid, Some(&elevation)).unwrap();
    let supplied = gen.humidity(&grid, Some(&elevation), Some(&temperature)).unwrap();
    let recomputed = gen.humidity(&grid, Some(&again), None).unwrap();
    assert_eq!(supplied, recomputed);
}

#[test]
fn concurrent_chunks_match_serial_generation() {
    let gen = generator(23);
    let size = gen.config().chunk_size_cm;
    let grids: Vec<CoordGrid> = (0..4).map(|cx| CoordGrid::chunk(cx, 2, 4, size, 0)).collect();

    let serial: Vec<LayerSet> = grids.iter().map(|g| LayerSet::generate(&gen, g).unwrap()).collect();
    let parallel: Vec<LayerSet> = std::thread::scope(|scope| {
        let handles: Vec<_> = grids
            .iter()
            .map(|g| {
                let gen = &gen;
                scope.spawn(move || LayerSet::generate(gen, g).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}

#[test]
fn mismatched_fields_are_rejected_before_work() {
    let gen = generator(4);
    let grid = small_grid(DVec2::ZERO, 100.0, 3);
    let wrong = Field::filled(2, 3, 0.5f32);
    assert!(matches!(gen.temperature(&grid, Some(&wrong)), Err(WorldGenError::Shape(_))));
    assert!(matches!(gen.humidity(&grid, Some(&wrong), None), Err(WorldGenError::Shape(_))));
    assert!(matches!(gen.humidity(&grid, None, Some(&wrong)), Err(WorldGenError::Shape(_))));
    assert!(matches!(gen.elevation_from_bedrock(&grid, &wrong), Err(WorldGenError::Shape(_))));

    let ok = Field::filled(3, 3, 0.5f32);
    assert!(matches!(gen.classify(&ok, &ok, &wrong, &ok), Err(WorldGenError::Shape(_))));
}

#[test]
fn overrides_merge_over_defaults() {
    let gen = WorldGenerator::from_overrides(&json!({
        "seed": 7,
        "not_a_real_option": 12,
        "biome_thresholds": { "tundra_max_temp": -8.0 },
        "world_edge_mode": "island",
    }))
    .unwrap();
    let cfg = gen.config();
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.biomes.biome_thresholds.tundra_max_temp, -8.0);
    assert_eq!(cfg.biomes.biome_thresholds.taiga_max_temp, 3.0);
    assert_eq!(cfg.climate, ClimateConfig::default());
}

#[test]
fn invalid_overrides_fail_construction() {
    let zero_octaves = WorldGenerator::from_overrides(&json!({ "base_noise_octaves": 0 })).unwrap_err();
    assert!(matches!(zero_octaves, WorldGenError::Config(ConfigError::OutOfRange { .. })));

    let scale = WorldGenerator::from_overrides(&json!({ "terrain_base_feature_scale_km": 0.0 })).unwrap_err();
    assert!(matches!(scale, WorldGenError::Config(ConfigError::OutOfRange { .. })));

    let bands = WorldGenerator::from_overrides(&json!({ "biome_thresholds": { "taiga_max_temp": -20.0 } })).unwrap_err();
    assert!(matches!(bands, WorldGenError::Config(ConfigError::MalformedTable { .. })));

    let typed = WorldGenerator::from_overrides(&json!({ "seed": "forty-two" })).unwrap_err();
    assert!(matches!(typed, WorldGenError::Config(ConfigError::Decode(_))));

    let not_object = WorldGenerator::from_overrides(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(not_object, WorldGenError::Config(ConfigError::NotAnObject)));
}

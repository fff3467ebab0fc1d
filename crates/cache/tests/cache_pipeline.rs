//! End-to-end tests: real generators through the disk cache.

use sigfield_cache::{fingerprint, quantize, CacheStatus, RasterCache};
use sigfield_core::{
    Bounds, DistanceField, DistanceParams, FractalNoiseField, NoiseParams, Region, SignalField,
    CRACKLE,
};
use std::fs;
use test_log::test;

fn noise(seed: i64) -> FractalNoiseField {
    FractalNoiseField::new(NoiseParams {
        seed,
        scale: 0.02,
        octaves: 4,
        ..NoiseParams::default()
    })
    .unwrap()
}

fn voronoi(k: i64) -> DistanceField {
    DistanceField::new(DistanceParams {
        seed: 9,
        bounds: Bounds::new(0.0, 0.0, 64.0, 48.0),
        scale: 8.0,
        k,
        pds_attempts: 30,
    })
    .unwrap()
}

#[test]
fn second_construction_is_a_byte_identical_hit() {
    let dir = tempfile::tempdir().unwrap();
    let field = noise(1);
    let region = Region::new(-16, 8, 64, 32).unwrap();

    let first = RasterCache::new(&field, region, dir.path()).unwrap();
    assert_eq!(first.status(), CacheStatus::Miss);
    let path = first.path().unwrap().to_path_buf();
    let bytes_before = fs::read(&path).unwrap();
    let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

    let second = RasterCache::new(&field, region, dir.path()).unwrap();
    assert_eq!(second.status(), CacheStatus::Hit);
    assert_eq!(fs::read(&path).unwrap(), bytes_before);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified_before);
    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn samples_match_direct_quantized_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let field = noise(2);
    let region = Region::new(100, -50, 40, 30).unwrap();
    RasterCache::new(&field, region, dir.path()).unwrap();
    let cache = RasterCache::new(&field, region, dir.path()).unwrap();
    assert_eq!(cache.status(), CacheStatus::Hit);

    let (min, max) = field.range();
    for y in -50..-20 {
        for x in 100..140 {
            let direct = field.eval(x as f64, y as f64);
            let expected = quantize(direct, min, max) as f64 / 255.0;
            assert_eq!(cache.sample(x, y), expected, "at ({x}, {y})");
            let unit = (direct - min) / (max - min);
            assert!((cache.sample(x, y) - unit).abs() <= 1.0 / 255.0 + 1e-9);
        }
    }
}

#[test]
fn distance_field_round_trips_through_cache() {
    let dir = tempfile::tempdir().unwrap();
    let field = voronoi(CRACKLE);
    let region = Region::new(0, 0, 64, 48).unwrap();
    let miss = RasterCache::new(&field, region, dir.path()).unwrap();
    let hit = RasterCache::new(&field, region, dir.path()).unwrap();
    assert_eq!(hit.status(), CacheStatus::Hit);
    assert_eq!(miss.pixels(), hit.pixels());
    for (x, y) in [(0, 0), (31, 17), (63, 47)] {
        let expected = quantize(field.eval(x as f64, y as f64), 0.0, 1.0) as f64 / 255.0;
        assert_eq!(hit.sample(x, y), expected);
    }
}

#[test]
fn distinct_parameters_get_distinct_entries() {
    let dir = tempfile::tempdir().unwrap();
    let region = Region::new(0, 0, 16, 16).unwrap();
    let a = RasterCache::new(&voronoi(0), region, dir.path()).unwrap();
    let b = RasterCache::new(&voronoi(1), region, dir.path()).unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(b.status(), CacheStatus::Miss);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn noise_seeds_collide_unless_seed_is_signed() {
    // Fractal noise leaves the seed out of its signature by default, so two
    // seeds share one cache entry and the second reads the first's pixels.
    let dir = tempfile::tempdir().unwrap();
    let region = Region::new(0, 0, 32, 32).unwrap();
    let (a, b) = (noise(1), noise(2));
    assert_eq!(fingerprint(&a, &region), fingerprint(&b, &region));

    let first = RasterCache::new(&a, region, dir.path()).unwrap();
    let second = RasterCache::new(&b, region, dir.path()).unwrap();
    assert_eq!(second.status(), CacheStatus::Hit);
    assert_eq!(first.pixels(), second.pixels());
    let direct_b = RasterCache::in_memory(&b, region).unwrap();
    assert_ne!(direct_b.pixels(), second.pixels(), "stale entry served for seed 2");

    let signed = |seed| {
        FractalNoiseField::new(NoiseParams {
            seed,
            scale: 0.02,
            octaves: 4,
            seed_in_signature: true,
            ..NoiseParams::default()
        })
        .unwrap()
    };
    assert_ne!(
        fingerprint(&signed(1), &region),
        fingerprint(&signed(2), &region)
    );
}

#[test]
fn cache_works_through_trait_objects() {
    let dir = tempfile::tempdir().unwrap();
    let region = Region::new(0, 0, 8, 8).unwrap();
    let fields: Vec<Box<dyn SignalField>> = vec![Box::new(noise(3)), Box::new(voronoi(0))];
    for field in &fields {
        let cache = RasterCache::new(field.as_ref(), region, dir.path()).unwrap();
        assert_eq!(cache.pixels().len(), 64);
    }
}

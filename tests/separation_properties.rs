use infoot::{
    angular_separation_deg, match_batch, AngleUnit, Catalog, QueryPoint, SkyPosition, Tile,
};
use proptest::prelude::*;

fn grid_catalog() -> Catalog {
    let mut tiles = Vec::new();
    for (i, ra_hour) in (0..24).map(|h| h as f64).enumerate() {
        for (j, dec) in [-60.0, -30.0, 0.0, 30.0, 60.0].into_iter().enumerate() {
            let status = ((i + j) % 7) as i32;
            tiles.push(Tile::new(format!("T{i:02}_{j}"), ra_hour, dec, status).unwrap());
        }
    }
    Catalog::from_tiles(tiles).unwrap()
}

proptest! {
    #[test]
    fn separation_is_symmetric(
        ra1 in 0.0..360.0_f64,
        dec1 in -90.0..=90.0_f64,
        ra2 in 0.0..360.0_f64,
        dec2 in -90.0..=90.0_f64,
    ) {
        let ab = angular_separation_deg(ra1, dec1, ra2, dec2);
        let ba = angular_separation_deg(ra2, dec2, ra1, dec1);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn separation_stays_in_range(
        ra1 in -720.0..720.0_f64,
        dec1 in -90.0..=90.0_f64,
        ra2 in -720.0..720.0_f64,
        dec2 in -90.0..=90.0_f64,
    ) {
        let d = angular_separation_deg(ra1, dec1, ra2, dec2);
        prop_assert!((0.0..=180.0).contains(&d), "separation {} out of range", d);
    }

    #[test]
    fn separation_to_self_is_zero(ra in 0.0..360.0_f64, dec in -90.0..=90.0_f64) {
        let p = SkyPosition::from_degrees(ra, dec)?;
        prop_assert_eq!(p.separation(&p), 0.0);
    }

    #[test]
    fn ra_shift_by_full_turn_is_invisible(ra in 0.0..360.0_f64, dec in -89.0..89.0_f64) {
        let d = angular_separation_deg(ra, dec, ra + 360.0, dec);
        prop_assert!(d < 1e-9, "full-turn shift moved the point by {} deg", d);
    }

    #[test]
    fn hour_and_degree_queries_match_the_same_tile(
        ra_hour in 0.0..24.0_f64,
        dec in -90.0..=90.0_f64,
    ) {
        let catalog = grid_catalog();
        let queries = [
            QueryPoint::new(ra_hour, dec, AngleUnit::Hour)?,
            QueryPoint::new(ra_hour * 15.0, dec, AngleUnit::Degree)?,
        ];
        let results = match_batch(&queries, &catalog, 1.0)?;
        prop_assert_eq!(results[0].tile_name(), results[1].tile_name());
        prop_assert_eq!(results[0].status(), results[1].status());
    }

    #[test]
    fn batch_result_is_the_closest_tile(
        ra in 0.0..360.0_f64,
        dec in -90.0..=90.0_f64,
    ) {
        let catalog = grid_catalog();
        let queries = [QueryPoint::new(ra, dec, AngleUnit::Degree)?];
        let result = &match_batch(&queries, &catalog, 1.0)?[0];

        for tile in &catalog {
            let d = queries[0].position.separation(tile.position());
            prop_assert!(result.nearest_separation_deg <= d);
        }
        prop_assert_eq!(result.in_footprint, result.nearest_separation_deg < 1.0);
        if !result.in_footprint {
            prop_assert_eq!(result.tile_name(), "-");
            prop_assert_eq!(result.status(), -10);
        }
    }
}

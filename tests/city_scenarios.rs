use std::collections::HashSet;

use cityscape::core::rect::cover;
use cityscape::{
    make_city, make_region_set, Backing, Cell, City, DenseRegionSet, FloorLabel, Floors,
    GridConfig, Rect, RegionError, RegionSet, RegionStore,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn r(x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
    Rect::new(x1, y1, x2, y2).unwrap()
}

/// Floors of one building, planned on their own grid.
fn plan(
    grid_size: i32,
    building: &'static str,
    floors: &[(i32, Vec<Rect>)],
) -> Floors<&'static str> {
    let mut out = Floors::new(grid_size).unwrap();
    for (floor, rects) in floors {
        out.add(FloorLabel::new(building, *floor), rects.clone())
            .unwrap();
    }
    out
}

#[test]
fn scenario_c_same_floor_overlap_between_buildings_is_rejected() {
    init_tracing();
    let mut city = make_city::<&str>(4).unwrap();

    let b1 = plan(4, "B1", &[(0, vec![r(0, 0, 2, 2)]), (1, vec![r(0, 0, 2, 2)])]);
    city.add_building("B1", &b1).unwrap();

    let b2 = plan(4, "B2", &[(0, vec![r(1, 1, 3, 3)])]);
    let err = city.add_building("B2", &b2).unwrap_err();
    assert!(matches!(err, RegionError::Overlap { .. }));
    assert_eq!(city.labels(), HashSet::from(["B1"]));
}

#[test]
fn scenario_d_removed_building_frees_its_cells() {
    init_tracing();
    let mut city = make_city::<&str>(4).unwrap();
    let b1 = plan(4, "B1", &[(0, vec![r(0, 0, 2, 2)]), (1, vec![r(0, 0, 2, 2)])]);
    city.add_building("B1", &b1).unwrap();

    assert!(city.remove_building(&"B1"));
    assert!(city.get_building(&"B1").is_none());
    assert!(city.labels().is_empty());
    assert!(!city.remove_building(&"B1"));

    let b2 = plan(4, "B2", &[(0, vec![r(1, 1, 3, 3)]), (1, vec![r(0, 0, 1, 2)])]);
    city.add_building("B2", &b2).unwrap();
    assert_eq!(city.labels(), HashSet::from(["B2"]));
}

#[test]
fn other_floors_do_not_conflict() {
    let mut city = make_city::<&str>(4).unwrap();
    city.add_building("low", &plan(4, "low", &[(0, vec![r(0, 0, 4, 4)])]))
        .unwrap();
    city.add_building("high", &plan(4, "high", &[(1, vec![r(0, 0, 4, 4)])]))
        .unwrap();
    city.add_building("deep", &plan(4, "deep", &[(-2, vec![r(1, 1, 3, 3)])]))
        .unwrap();
    assert_eq!(city.labels(), HashSet::from(["low", "high", "deep"]));
    assert_eq!(city.floor_count(&"high"), 1);
}

#[test]
fn duplicate_building_is_rejected() {
    let mut city = make_city::<&str>(5).unwrap();
    city.add_building("B", &plan(5, "B", &[(0, vec![r(0, 0, 1, 1)])]))
        .unwrap();
    let again = plan(5, "B", &[(3, vec![r(4, 4, 5, 5)])]);
    assert!(matches!(
        city.add_building("B", &again),
        Err(RegionError::DuplicateLabel { .. })
    ));
    assert_eq!(city.floor_count(&"B"), 1);
}

#[test]
fn building_needs_at_least_one_floor() {
    let mut city = make_city::<&str>(5).unwrap();
    let nothing: Floors<&str> = Floors::new(5).unwrap();
    assert!(matches!(
        city.add_building("B", &nothing),
        Err(RegionError::EmptyBuilding { .. })
    ));
    assert!(city.labels().is_empty());
}

#[test]
fn floors_must_name_the_new_building() {
    let mut city = make_city::<&str>(5).unwrap();
    let mut floors = plan(5, "B", &[(0, vec![r(0, 0, 1, 1)])]);
    floors
        .add(FloorLabel::new("other", 2), [r(0, 0, 1, 1)])
        .unwrap();
    assert_eq!(
        city.add_building("B", &floors),
        Err(RegionError::MismatchedBuilding {
            expected: "\"B\"".to_string(),
            found: "\"other\"".to_string(),
            floor: 2,
        })
    );
    assert!(city.labels().is_empty());
}

#[test]
fn failing_upper_floor_leaves_no_partial_building() {
    init_tracing();
    let mut city = make_city::<&str>(4).unwrap();
    city.add_building("A", &plan(4, "A", &[(2, vec![r(0, 0, 4, 1)])]))
        .unwrap();

    // Floors 0 and 1 are fine, floor 2 collides with A.
    let tower = plan(
        4,
        "T",
        &[
            (0, vec![r(0, 0, 1, 1)]),
            (1, vec![r(0, 0, 1, 1)]),
            (2, vec![r(0, 0, 1, 1)]),
        ],
    );
    assert!(matches!(
        city.add_building("T", &tower),
        Err(RegionError::Overlap { .. })
    ));
    assert_eq!(city.labels(), HashSet::from(["A"]));
    assert_eq!(city.floor_count(&"T"), 0);

    // Nothing of T lingers on floors 0 and 1.
    let probe = plan(4, "P", &[(0, vec![r(0, 0, 4, 4)]), (1, vec![r(0, 0, 4, 4)])]);
    city.add_building("P", &probe).unwrap();
}

#[test]
fn out_of_bounds_floor_is_rejected() {
    let mut city = make_city::<&str>(3).unwrap();
    // Floors planned on a larger grid than the city.
    let wide = plan(6, "W", &[(0, vec![r(0, 0, 5, 1)])]);
    assert!(matches!(
        city.add_building("W", &wide),
        Err(RegionError::OutOfBounds { grid_size: 3, .. })
    ));
}

#[test]
fn get_building_returns_an_independent_copy() {
    let mut city = make_city::<&str>(6).unwrap();
    city.add_building(
        "A",
        &plan(6, "A", &[(0, vec![r(0, 0, 2, 2)]), (4, vec![r(0, 0, 1, 3)])]),
    )
    .unwrap();
    city.add_building("B", &plan(6, "B", &[(0, vec![r(3, 3, 6, 6)])]))
        .unwrap();

    let mut copy = city.get_building(&"A").unwrap();
    assert_eq!(
        copy.labels(),
        HashSet::from([FloorLabel::new("A", 0), FloorLabel::new("A", 4)])
    );
    assert_eq!(copy.floor_numbers(), vec![0, 4]);
    assert_eq!(
        cover(&copy.get_region(&FloorLabel::new("A", 4)).unwrap()),
        cover(&[r(0, 0, 1, 3)])
    );

    // Editing the copy leaves the city alone.
    assert!(copy.remove(&FloorLabel::new("A", 0)));
    copy.add(FloorLabel::new("A", 9), [r(5, 5, 6, 6)]).unwrap();
    assert_eq!(city.floor_count(&"A"), 2);
    assert!(city.get_building(&"A").unwrap().level(9).is_none());

    assert!(city.get_building(&"missing").is_none());
}

#[test]
fn building_copy_can_be_moved_to_another_city() {
    let mut city = make_city::<&str>(4).unwrap();
    let a = plan(4, "A", &[(0, vec![r(0, 0, 2, 1), r(0, 1, 1, 2)])]);
    city.add_building("A", &a).unwrap();

    let mut other = make_city::<&str>(4).unwrap();
    other
        .add_building("A", &city.get_building(&"A").unwrap())
        .unwrap();
    assert_eq!(other.labels(), city.labels());
}

#[test]
fn flat_region_sets_can_describe_a_building() {
    init_tracing();
    let mut city = make_city::<&str>(4).unwrap();

    let mut flat = make_region_set::<FloorLabel<&str>>(4).unwrap();
    flat.add(FloorLabel::new("F", 0), [r(0, 0, 2, 1)]).unwrap();
    flat.add(FloorLabel::new("F", 3), [r(2, 2, 4, 4)]).unwrap();
    city.add_building("F", &flat).unwrap();
    assert_eq!(city.get_building(&"F").unwrap().floor_numbers(), vec![0, 3]);

    let config = GridConfig::new(4).with_backing(Backing::Dense);
    let mut stored: RegionStore<FloorLabel<&str>> = RegionStore::from_config(&config).unwrap();
    stored.add(FloorLabel::new("G", 0), [r(0, 0, 1, 1)]).unwrap();
    assert!(matches!(
        city.add_building("G", &stored),
        Err(RegionError::Overlap { .. })
    ));

    let mut other = make_region_set::<FloorLabel<&str>>(4).unwrap();
    other.add(FloorLabel::new("G", 0), [r(0, 3, 4, 4)]).unwrap();
    city.add_building("G", &other).unwrap();
    assert_eq!(city.labels(), HashSet::from(["F", "G"]));
}

#[test]
fn dense_city_behaves_like_sparse() {
    let mut city: City<&str, DenseRegionSet<FloorLabel<&str>>> = City::new(4).unwrap();
    let b1 = plan(4, "B1", &[(0, vec![r(0, 0, 2, 2)]), (1, vec![r(0, 0, 2, 2)])]);
    city.add_building("B1", &b1).unwrap();
    let b2 = plan(4, "B2", &[(0, vec![r(1, 1, 3, 3)])]);
    assert!(matches!(
        city.add_building("B2", &b2),
        Err(RegionError::Overlap { .. })
    ));
    let floor0 = city.get_building(&"B1").unwrap();
    let level = floor0.level(0).unwrap();
    assert_eq!(
        level.label_at(Cell::new(1, 1)),
        Some(&FloorLabel::new("B1", 0))
    );
}

#[test]
fn configured_city_uses_requested_backing() {
    for backing in Backing::ALL {
        let config = GridConfig::new(4).with_backing(backing);
        let mut city = City::<u16, _>::from_config(&config).unwrap();
        let mut floors = Floors::<u16>::new(4).unwrap();
        floors.add(FloorLabel::new(7, 0), [r(0, 0, 4, 1)]).unwrap();
        city.add_building(7, &floors).unwrap();

        let copy = city.get_building(&7).unwrap();
        assert_eq!(copy.level(0).unwrap().backing(), backing);
        assert_eq!(copy.grid_size(), 4);
    }
    assert!(City::<u16, _>::from_config(&GridConfig::new(0)).is_err());
}

#[test]
fn invalid_grid_size_is_rejected() {
    assert!(matches!(
        make_city::<&str>(0),
        Err(RegionError::InvalidGeometry { .. })
    ));
    assert!(make_city::<&str>(-1).is_err());
    assert_eq!(make_city::<&str>(9).unwrap().grid_size(), 9);
}

#[test]
fn display_lists_buildings() {
    let mut city = make_city::<&str>(3).unwrap();
    city.add_building("Z", &plan(3, "Z", &[(0, vec![r(0, 0, 1, 1)])]))
        .unwrap();
    city.add_building("A", &plan(3, "A", &[(0, vec![r(2, 2, 3, 3)])]))
        .unwrap();
    let shown = city.to_string();
    assert!(shown.starts_with("City [\"A\", \"Z\"]"));
    assert!(shown.contains("floor 0:"));
}

use serde_json::{json, Value};
use sweph_batch::{EngineConfig, NameOverflow, Topocentric, SE_MOON, SE_SUN};

mod common;
use common::{counted_sweph, J2000};

#[test]
fn test_single_element_batch_serializes_flat() {
    let (sweph, _) = counted_sweph();
    let result = sweph.calc(&[J2000], &[SE_SUN], 0).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["return"], json!([0]));
    assert_eq!(value["serr"], json!([""]));
    assert_eq!(value["xx"], json!([0.0, 0.0, 1.0, 0.0, 0.0, 0.0]));
}

#[test]
fn test_batch_serializes_rows() {
    let (sweph, _) = counted_sweph();
    let result = sweph.calc(&[J2000, J2000], &[SE_SUN, SE_MOON], 0).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    let rows = value["xx"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], json!([30.0, 0.1, 2.0, 0.0, 0.0, 0.0]));
}

#[test]
fn test_collapsed_output_matches_batch_layout() {
    let (sweph, _) = counted_sweph();
    let one = sweph.calc(&[J2000], &[SE_SUN], 0).unwrap();
    assert_eq!(
        serde_json::to_value(one.collapse()).unwrap(),
        json!([0.0, 0.0, 1.0, 0.0, 0.0, 0.0])
    );

    let two = sweph.calc(&[J2000, J2000], &[SE_SUN, SE_MOON], 0).unwrap();
    let collapsed = serde_json::to_value(two.collapse()).unwrap();
    assert_eq!(collapsed, serde_json::to_value(&two).unwrap()["xx"]);
    assert_eq!(collapsed[1], json!([30.0, 0.1, 2.0, 0.0, 0.0, 0.0]));
}

#[test]
fn test_star_batch_carries_names() {
    let (sweph, _) = counted_sweph();
    let result = sweph.fixstar2_ut(&["Spica", "x"], &[J2000, J2000], 0).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["star"], json!(["Spica,alVir", "x"]));
    assert_eq!(value["return"][1], json!(-1));
    assert_eq!(value["serr"][1], json!("star x not found"));
    assert!(value.get("result").is_none());

    let mags = serde_json::to_value(sweph.fixstar2_mag(&["Regulus"]).unwrap()).unwrap();
    assert_eq!(mags["mag"], json!([1.4]));
}

#[test]
fn test_eclipse_arrays_keep_their_width() {
    let (sweph, _) = counted_sweph();
    let event = sweph
        .sol_eclipse_when_loc(J2000, 0, &[0.0, 0.0, 0.0], false)
        .unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["tret"].as_array().map(Vec::len), Some(10));
    assert_eq!(value["attr"].as_array().map(Vec::len), Some(20));

    let houses = serde_json::to_value(sweph.houses_ex(J2000, 0, 0.0, 0.0, 'P').unwrap()).unwrap();
    assert_eq!(houses["cusps"].as_array().map(Vec::len), Some(37));
}

#[test]
fn test_config_round_trip() {
    let config = EngineConfig::default()
        .with_ephe_path("/opt/sweph/ephe")
        .with_topo(Topocentric::new(8.55, 47.37, 400.0))
        .with_name_overflow(NameOverflow::Reject);
    let text = serde_json::to_string(&config).unwrap();
    assert!(text.contains("\"name_overflow\":\"reject\""));
    let back: EngineConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);

    let partial: EngineConfig = serde_json::from_value(json!({ "tid_acc": -25.8 })).unwrap();
    assert_eq!(partial.tid_acc, Some(-25.8));
    assert_eq!(partial.name_overflow, NameOverflow::Truncate);
}

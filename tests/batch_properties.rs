use sweph_batch::engine::stub::StubEngine;
use sweph_batch::{
    EngineConfig, NameOverflow, NumericOutput, Sweph, SwephError, ERR, SEFLG_SPEED, SE_MARS,
    SE_MOON, SE_SUN, SE_VENUS,
};

mod common;
use common::{assert_batch_shape, assert_rows_close, counted_sweph, J2000};

#[test]
fn test_lengths_and_order_follow_input() {
    let (sweph, counter) = counted_sweph();
    for n in [0usize, 1, 2, 7] {
        let jd: Vec<f64> = (0..n).map(|i| J2000 + i as f64).collect();
        let ipl: Vec<i32> = (0..n).map(|i| (i % 10) as i32).collect();
        let before = counter.get();
        let result = sweph.calc_ut(&jd, &ipl, SEFLG_SPEED).unwrap();
        assert_batch_shape(&result, n, 6);
        assert_eq!(counter.get() - before, n);

        // element i carries the body of input i
        for i in 0..n {
            assert_eq!(result.row(i)[2], 1.0 + ipl[i] as f64);
        }
    }
}

#[test]
fn test_zero_length_batch_calls_nothing() {
    let (sweph, counter) = counted_sweph();
    let result = sweph.calc(&[], &[], 0).unwrap();
    assert!(result.is_empty());
    assert_batch_shape(&result, 0, 6);
    assert_eq!(result.collapse().dim(), vec![0, 6]);

    let stars = sweph.fixstar2_ut(&[], &[], 0).unwrap();
    assert!(stars.names.is_empty());
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_mismatched_lengths_fail_before_engine() {
    let (sweph, counter) = counted_sweph();
    let err = sweph
        .calc_ut(&[J2000, J2000 + 1.0], &[SE_SUN, SE_MOON, SE_MARS], 0)
        .unwrap_err();
    assert_eq!(
        err,
        SwephError::LengthMismatch {
            left: "jd_ut",
            left_len: 2,
            right: "ipl",
            right_len: 3,
        }
    );
    assert!(err.to_string().contains("'jd_ut' (2)"));
    assert!(err.to_string().contains("'ipl' (3)"));

    assert!(sweph.fixstar2(&["Spica"], &[J2000, J2000], 0).is_err());
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_repeated_batches_are_identical() {
    let (sweph, _) = counted_sweph();
    let jd = [J2000, J2000 + 10.5, J2000 - 3.25];
    let ipl = [SE_SUN, 99, SE_VENUS];
    let first = sweph.calc(&jd, &ipl, SEFLG_SPEED).unwrap();
    let second = sweph.calc(&jd, &ipl, SEFLG_SPEED).unwrap();
    assert_eq!(first, second);
    assert_rows_close(&first, &second, 0.0);

    let a = sweph.fixstar2_ut(&[",alTau", "Regulus"], &[J2000, J2000], 0).unwrap();
    let b = sweph.fixstar2_ut(&[",alTau", "Regulus"], &[J2000, J2000], 0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_collapse_rule() {
    let (sweph, _) = counted_sweph();
    let one = sweph.calc_ut(&[J2000], &[SE_MOON], 0).unwrap();
    assert!(matches!(one.collapse(), NumericOutput::Vector(ref v) if v.len() == 6));
    // the underlying data keeps its batch dimension
    assert_eq!(one.values.shape(), (1, 6));

    let two = sweph.calc_ut(&[J2000, J2000], &[SE_SUN, SE_MOON], 0).unwrap();
    assert_eq!(two.collapse().dim(), vec![2, 6]);
}

#[test]
fn test_failure_is_contained_to_its_element() {
    let (sweph, counter) = counted_sweph();
    let ipl = [SE_SUN, SE_MOON, 99, SE_MARS, SE_VENUS];
    let jd = [J2000; 5];
    let result = sweph.calc_ut(&jd, &ipl, SEFLG_SPEED).unwrap();

    assert_batch_shape(&result, 5, 6);
    assert_eq!(counter.get(), 5);
    assert_eq!(result.failed(), vec![2]);
    assert_eq!(result.status[2], ERR);
    assert_eq!(result.serr[2], "illegal planet number 99.");
    assert_eq!(result.row(2), vec![0.0; 6]);
    for i in [0, 1, 3, 4] {
        assert_eq!(result.status[i], SEFLG_SPEED);
        assert!(result.serr[i].is_empty());
    }
}

#[test]
fn test_star_names_come_back_clean() {
    let (sweph, _) = counted_sweph();
    let result = sweph
        .fixstar2(&["ald", ",alVir", "Unknown"], &[J2000; 3], 0)
        .unwrap();
    assert_eq!(result.names, ["Aldebaran,alTau", "Spica,alVir", "Unknown"]);
    for name in &result.names {
        assert!(!name.contains('\0'));
        assert!(name.len() < 41);
    }
    assert_eq!(result.result.failed(), vec![2]);
    assert_eq!(result.result.serr[2], "star Unknown not found");
}

#[test]
fn test_overlong_star_name() {
    let long = format!("Sirius{}", " ".repeat(60));

    // default policy: cut to 40 bytes, then resolved by the engine
    let (sweph, _) = counted_sweph();
    let result = sweph.fixstar2_ut(&[long.as_str()], &[J2000], 0).unwrap();
    assert_eq!(result.names, ["Sirius,alCMa"]);

    let sweph = Sweph::with_config(
        StubEngine::new(),
        EngineConfig::default().with_name_overflow(NameOverflow::Reject),
    )
    .unwrap();
    let err = sweph.fixstar2_ut(&[long.as_str()], &[J2000], 0).unwrap_err();
    assert!(matches!(err, SwephError::NameTooLong { capacity: 41, .. }));
}

#[test]
fn test_name_with_nul_fails_before_engine() {
    for policy in [NameOverflow::Truncate, NameOverflow::Reject] {
        let engine = StubEngine::new();
        let counter = engine.counter();
        let sweph =
            Sweph::with_config(engine, EngineConfig::default().with_name_overflow(policy)).unwrap();

        let err = sweph
            .fixstar2_ut(&["Spica", "Sirius\0garbage"], &[J2000, J2000], 0)
            .unwrap_err();
        assert!(matches!(err, SwephError::NameContainsNul(ref name) if name.starts_with("Sirius")));
        assert!(sweph.fixstar2_mag(&["Sirius\0"]).is_err());
        assert_eq!(counter.get(), 0);
    }
}

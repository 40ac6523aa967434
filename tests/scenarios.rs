use approx::assert_relative_eq;
use sweph_batch::engine::SkyGeometry;
use sweph_batch::eclipse::Horizon;
use sweph_batch::{
    Conditions, NumericOutput, SwephError, SEFLG_SPEED, SEFLG_SWIEPH, SE_CALC_ITRANSIT,
    SE_CALC_MTRANSIT, SE_CALC_RISE, SE_ECL_ANNULAR, SE_ECL_PARTIAL, SE_ECL_TOTAL,
    SE_EVENING_FIRST, SE_HELIACAL_RISING, SE_HELIACAL_SETTING, SE_MARS, SE_MOON, SE_MORNING_LAST,
    SE_NO_BODY, SE_SUN,
};

mod common;
use common::{assert_batch_shape, counted_sweph, J2000};

const ZURICH: [f64; 3] = [8.55, 47.37, 400.0];

#[test]
fn scenario_a_three_planets() {
    let (sweph, counter) = counted_sweph();
    let result = sweph
        .calc_ut(
            &[J2000, J2000 + 1.0, J2000 + 2.0],
            &[SE_SUN, SE_MOON, SE_MARS],
            SEFLG_SWIEPH | SEFLG_SPEED,
        )
        .unwrap();
    assert_batch_shape(&result, 3, 6);
    assert!(result.serr.iter().all(String::is_empty));
    assert!(result.status.iter().all(|&s| s >= 0));
    assert!(matches!(result.collapse(), NumericOutput::Matrix(m) if m.shape() == (3, 6)));
    assert_eq!(counter.get(), 3);
}

#[test]
fn scenario_b_single_element_is_flat() {
    let (sweph, _) = counted_sweph();
    let result = sweph.calc(&[J2000], &[SE_SUN], SEFLG_SPEED).unwrap();
    let flat = result.collapse();
    assert_eq!(flat.dim(), vec![6]);
    let v = flat.as_vector().unwrap();
    assert_relative_eq!(v[0], 0.0);
    assert_relative_eq!(v[3], 0.9856);
}

#[test]
fn scenario_c_mismatch_is_refused() {
    let (sweph, counter) = counted_sweph();
    let err = sweph
        .calc(&[J2000, J2000 + 1.0], &[SE_SUN, SE_MOON, SE_MARS], 0)
        .unwrap_err();
    assert!(matches!(err, SwephError::LengthMismatch { left_len: 2, right_len: 3, .. }));
    assert_eq!(
        err.to_string(),
        "The number of elements in 'jd_et' (2) and the number of elements in 'ipl' (3) must be identical!"
    );
    assert_eq!(counter.get(), 0);
}

#[test]
fn scenario_d_short_geopos_is_refused() {
    let (sweph, counter) = counted_sweph();
    let short = [8.55, 47.37];

    let errors = [
        sweph.sol_eclipse_how(J2000, 0, &short).unwrap_err(),
        sweph.lun_eclipse_when_loc(J2000, 0, &short, false).unwrap_err(),
        sweph
            .rise_trans_true_hor(
                J2000,
                SE_SUN,
                "",
                0,
                SE_CALC_RISE,
                &short,
                Horizon { atpress: 1013.25, attemp: 15.0, horhgt: 0.0 },
            )
            .unwrap_err(),
        sweph.azalt_rev(J2000, 0, &short, &[0.0, 0.0]).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(
            err.to_string(),
            "Geographic position 'geopos' must have at least length 3 (got 2)"
        );
    }
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_eclipse_search() {
    let (sweph, _) = counted_sweph();
    let local = sweph.sol_eclipse_when_loc(J2000, SEFLG_SWIEPH, &ZURICH, false).unwrap();
    assert_eq!(local.status, SE_ECL_PARTIAL);
    assert!(local.tret[0] > J2000);
    assert!(local.serr.is_empty());

    let before = sweph.lun_eclipse_when(J2000, SEFLG_SWIEPH, 0, true).unwrap();
    assert_eq!(before.status, SE_ECL_TOTAL);
    assert!(before.tret[0] < J2000);

    let annular = sweph
        .sol_eclipse_when_glob(J2000, SEFLG_SWIEPH, SE_ECL_ANNULAR, false)
        .unwrap();
    assert_eq!(annular.status, SE_ECL_ANNULAR);

    let path = sweph.sol_eclipse_where(J2000 + 0.25, SEFLG_SWIEPH).unwrap();
    assert_relative_eq!(path.geopos[0], -90.0, epsilon = 1e-6);
    assert_eq!(path.geopos.len(), 15);
}

#[test]
fn test_rise_transit_surfaces_star_name() {
    let (sweph, _) = counted_sweph();
    let horizon = Horizon { atpress: 1013.25, attemp: 15.0, horhgt: 0.0 };

    let star = sweph
        .rise_trans_true_hor(J2000, SE_NO_BODY, ",alLeo", 0, SE_CALC_MTRANSIT, &ZURICH, horizon)
        .unwrap();
    assert_eq!(star.status, 0);
    assert_eq!(star.star, "Regulus,alLeo");
    // upper transit at noon of the civil day holding the start date
    assert_eq!(star.tret, J2000);

    let lower = sweph
        .rise_trans_true_hor(J2000, SE_MOON, "", 0, SE_CALC_ITRANSIT, &ZURICH, horizon)
        .unwrap();
    assert_eq!(lower.tret, J2000 - 0.5);

    let polar = sweph
        .rise_trans_true_hor(J2000, SE_SUN, "", 0, SE_CALC_RISE, &[0.0, 85.0, 0.0], horizon)
        .unwrap();
    assert_eq!(polar.status, -2);
    assert_eq!(polar.star, "");
}

#[test]
fn test_heliacal_rising_of_a_planet() {
    let (sweph, counter) = counted_sweph();
    let conditions = Conditions::new(&ZURICH, &[1013.25, 15.0, 40.0, 0.0], &[36.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    let result = sweph
        .heliacal_ut(J2000, conditions, "Venus", SE_HELIACAL_RISING, 0)
        .unwrap();
    assert_eq!(result.status, 0);
    assert_eq!(result.object.as_deref(), Some("Venus"));
    assert!(result.dret[0] < result.dret[1] && result.dret[1] < result.dret[2]);

    let events = [SE_HELIACAL_SETTING, SE_EVENING_FIRST, SE_MORNING_LAST].map(|event| {
        sweph
            .heliacal_ut(J2000, conditions, "Mercury", event, 0)
            .unwrap()
            .dret[0]
    });
    assert!(events[0] < events[1] && events[1] < events[2]);

    let angle = sweph
        .heliacal_angle(J2000, conditions, 0, -4.0, SkyGeometry::default())
        .unwrap();
    assert_eq!(angle.dret.len(), 50);
    assert_eq!(counter.get(), 5);
}

#[test]
fn test_phenomena_and_refraction() {
    let (sweph, _) = counted_sweph();
    let pheno = sweph.pheno_ut(J2000, SE_MOON, 0).unwrap();
    assert_eq!(pheno.attr.len(), 20);
    assert!((0.0..=1.0).contains(&pheno.attr[1]));

    let bad = sweph.pheno(J2000, 99, 0).unwrap();
    assert!(bad.status < 0);

    let refraction = sweph.refrac_extended(10.0, 400.0, 1013.25, 15.0, 0.0065, 0).unwrap();
    assert_relative_eq!(refraction.value, 10.5);
    assert_relative_eq!(refraction.dret[2], 0.5);
}

#[test]
fn test_houses() {
    let (sweph, _) = counted_sweph();
    let houses = sweph.houses_ex(J2000, 0, ZURICH[1], ZURICH[0], 'K').unwrap();
    assert_eq!(houses.status, 0);
    assert_relative_eq!(houses.cusps[1], houses.ascendant());
    assert_relative_eq!(houses.mc(), (houses.ascendant() + 270.0) % 360.0);
}

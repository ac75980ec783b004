use emdflow::emd::*;

fn points(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

#[test]
fn weighted_transport_moves_surplus_to_nearest() {
    let s = points(&[[0., 0.], [4., 0.]]);
    let t = points(&[[1., 0.], [4., 0.]]);
    let (plan, emd) =
        compute_optimal_transport(&s, &t, manhattan, Some(&[3., 1.]), Some(&[1., 1.])).unwrap();
    // half of all mass goes from the origin to (1, 0), a quarter travels on
    // to (4, 0), and the last quarter is already in place
    assert!((emd - (0.5 * 1. + 0.25 * 4.)).abs() < 1e-12, "{}", emd);
    assert_eq!(plan.emd(), emd);
    assert!((plan.mass(0) - 3.).abs() < 1e-12);
    assert!((plan.mass(1) - 1.).abs() < 1e-12);
    assert!((plan.get(0, 0) - 2.).abs() < 1e-12);
    assert!((plan.get(0, 1) - 1.).abs() < 1e-12);
    assert!((plan.get(1, 1) - 1.).abs() < 1e-12);
    assert_eq!(plan.get(1, 0), 0.);
}

#[test]
fn proportional_weights_agree() {
    let s = points(&[[0., 0.], [2., 1.], [5., 5.]]);
    let t = points(&[[1., 1.], [3., 0.]]);
    let emd = |ws: &[f64], wt: &[f64]| {
        compute_optimal_transport(&s, &t, euclidean, Some(ws), Some(wt))
            .unwrap()
            .1
    };
    let base = emd(&[1., 2., 3.], &[2., 5.]);
    let tiny = emd(&[1e-8, 2e-8, 3e-8], &[2e12, 5e12]);
    assert!((base - tiny).abs() < 1e-9, "{} != {}", base, tiny);
}

#[test]
fn plan_serializes_for_reporting() {
    let s = points(&[[0., 0.]]);
    let t = points(&[[3., 4.]]);
    let (plan, _) = compute_optimal_transport(&s, &t, euclidean, None, None).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["emd"], 5.);
    assert_eq!(json["rows"][0]["point"], serde_json::json!([0., 0.]));
    assert_eq!(json["rows"][0]["moves"][0]["mass"], 1.);
}

#[test]
fn invalid_inputs_are_rejected() {
    let s = points(&[[0., 0.], [1., 1.]]);
    let t = points(&[[0., 1.]]);
    match compute_optimal_transport(&s, &t, euclidean, Some(&[1.]), None) {
        Err(Error::WeightCount {
            side,
            points,
            weights,
        }) => {
            assert_eq!(side, Side::Source);
            assert_eq!((points, weights), (2, 1));
        }
        other => panic!("expected WeightCount, got {:?}", other.map(|(_, e)| e)),
    }
    let error = compute_optimal_transport(&s, &t, |_, _| f64::NAN, None, None).unwrap_err();
    assert!(matches!(error, Error::InvalidDistance { .. }));
    assert!(error.network().is_none());
    assert!(!error.to_string().is_empty());
}

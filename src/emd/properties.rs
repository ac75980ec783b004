use super::*;
use crate::Arbitrary;
use crate::Energy;
use crate::Mass;
use crate::transport::Coupling;

/// Random trials per property.
const TRIALS: usize = 32;
/// Float slack for costs accumulated in different orders.
const TOLERANCE: Energy = 1e-9;

fn solve(s: &Sample, t: &Sample) -> Plan {
    Transport::new(&s.points, &t.points)
        .source_weights(&s.weights)
        .target_weights(&t.weights)
        .solve()
        .expect("valid random instance")
}

/// Exhaustive minimum over all perfect matchings of equally sized sets.
fn assignment(s: &[Point], t: &[Point]) -> Energy {
    fn search(s: &[Point], t: &[Point], used: &mut Vec<bool>, i: usize) -> Energy {
        if i == s.len() {
            return 0.;
        }
        let mut best = Energy::INFINITY;
        for j in 0..t.len() {
            if !used[j] {
                used[j] = true;
                best = best.min(euclidean(&s[i], &t[j]) + search(s, t, used, i + 1));
                used[j] = false;
            }
        }
        best
    }
    search(s, t, &mut vec![false; t.len()], 0)
}

#[test]
fn is_emd_nonnegative() {
    for _ in 0..TRIALS {
        let plan = solve(&Sample::random(), &Sample::random());
        assert!(plan.emd() >= 0., "{}", plan.emd());
    }
}

#[test]
fn is_emd_self_annihilating() {
    for _ in 0..TRIALS {
        let s = Sample::random();
        let plan = solve(&s, &s);
        assert_eq!(plan.emd(), 0.);
        for row in plan.rows() {
            assert_eq!(row.moves().len(), 1);
            assert_eq!(row.moves()[0].index(), row.index());
        }
    }
}

#[test]
fn is_emd_symmetric() {
    for _ in 0..TRIALS {
        let s = Sample::random();
        let t = Sample::random();
        let st = solve(&s, &t).emd();
        let ts = solve(&t, &s).emd();
        assert!((st - ts).abs() < TOLERANCE, "{} != {}", st, ts);
    }
}

#[test]
fn is_emd_scale_invariant() {
    for _ in 0..TRIALS {
        let s = Sample::random();
        let t = Sample::random();
        let base = solve(&s, &t).emd();
        for (k, m) in [
            (2., 1.),
            (1., 3.),
            (7., 5.),
            (0.5, 0.25),
            (1e-7, 1e10),
            (1e10, 1e-7),
        ] {
            let sk = Sample {
                points: s.points.clone(),
                weights: s.weights.iter().map(|w| w * k).collect(),
            };
            let tm = Sample {
                points: t.points.clone(),
                weights: t.weights.iter().map(|w| w * m).collect(),
            };
            let scaled = solve(&sk, &tm).emd();
            assert!((base - scaled).abs() < TOLERANCE, "{} != {}", base, scaled);
        }
    }
}

#[test]
fn is_emd_scale_invariant_for_thirds() {
    let s = vec![Point::from([0., 0.]), Point::from([1., 0.])];
    let t = vec![Point::from([0., 1.]), Point::from([1., 1.])];
    let emd = |wt: &[Mass]| {
        Transport::new(&s, &t)
            .target_weights(wt)
            .solve()
            .expect("valid weights")
            .emd()
    };
    let thirds = emd(&[1. / 3., 1.]);
    let whole = emd(&[1., 3.]);
    assert!((thirds - whole).abs() < TOLERANCE, "{} != {}", thirds, whole);
}

#[test]
fn is_plan_conservative() {
    for _ in 0..TRIALS {
        let s = Sample::random();
        let t = Sample::random();
        let plan = solve(&s, &t);
        let wt = t.weights.iter().sum::<Mass>();
        for (i, w) in s.weights.iter().enumerate() {
            assert!((plan.mass(i) - w).abs() < TOLERANCE, "row {}", i);
        }
        let total = (0..s.points.len())
            .flat_map(|i| (0..t.points.len()).map(move |j| (i, j)))
            .map(|(i, j)| Coupling::flow(&plan, &i, &j))
            .sum::<Mass>();
        assert!((total * wt - plan.flow() as Mass).abs() < TOLERANCE);
    }
}

#[test]
fn is_plan_marginal_on_targets() {
    for _ in 0..TRIALS {
        let s = Sample::random();
        let t = Sample::random();
        let plan = solve(&s, &t);
        let ws = s.weights.iter().sum::<Mass>();
        let wt = t.weights.iter().sum::<Mass>();
        for (j, w) in t.weights.iter().enumerate() {
            let arriving = (0..s.points.len()).map(|i| plan.get(i, j)).sum::<Mass>();
            assert!((arriving * wt / ws - w).abs() < TOLERANCE, "column {}", j);
        }
    }
}

#[test]
fn is_emd_optimal_on_matchings() {
    for n in 1..=5 {
        let s = (0..n).map(|_| Point::random()).collect::<Vec<_>>();
        let t = (0..n).map(|_| Point::random()).collect::<Vec<_>>();
        let plan = Transport::new(&s, &t).solve().unwrap();
        let exact = assignment(&s, &t) / n as Energy;
        assert!((plan.emd() - exact).abs() < TOLERANCE, "{} != {}", plan.emd(), exact);
    }
}

#[test]
fn is_duplicate_point_same_as_merged_weight() {
    let s = vec![Point::from([0., 0.]), Point::from([0., 0.]), Point::from([1., 1.])];
    let merged = vec![Point::from([0., 0.]), Point::from([1., 1.])];
    let t = vec![Point::from([0., 1.]), Point::from([2., 2.])];
    let split = Transport::new(&s, &t).solve().unwrap();
    let fused = Transport::new(&merged, &t)
        .source_weights(&[2., 1.])
        .solve()
        .unwrap();
    assert!((split.emd() - fused.emd()).abs() < TOLERANCE);
    assert_eq!(split.rows().len(), 3);
    assert_eq!(fused.rows().len(), 2);
}

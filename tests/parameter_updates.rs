#![allow(non_snake_case)]

use canongen::algebra::CscMatrix;
use canongen::canon::*;

// Same toy quadratic program as in the canonicalization tests: two scalar
// parameters a, b over flat vector [a, b, 1], arrays (P, q, d, A, l, u).
fn qp_test_problem() -> (ReducedProblem<f64>, ParameterValues<f64>) {
    let params = ParameterSpace::new(vec![
        UserParameter::new(0, "a", (1, 1)),
        UserParameter::new(1, "b", (1, 1)),
    ])
    .unwrap();

    let quad_cost = QuadBlock {
        map: CscMatrix::from(&[
            [2., 0., 0.], //
            [0., 1., 0.], //
        ]),
        pattern: SparsityPattern::new((2, 2), vec![0, 1], vec![0, 1, 2]),
    };

    let lin_cost = CscMatrix::from(&[
        [0., 1., 0.],  //
        [0., -1., 0.], //
        [0., 0., 5.],  //
    ]);

    let constraints = ConstraintBlock {
        map: CscMatrix::from(&[
            [0., 0., 1.],  //
            [0., 0., 1.],  //
            [0., 0., 1.],  //
            [0., 0., 1.],  //
            [-1., 0., 0.], //
            [0., -1., 0.], //
            [0., 0., -3.], //
        ]),
        rowval: vec![0, 1, 0, 2, 0, 1, 2],
        colptr: vec![0, 2, 4, 7],
    };

    let prob = ReducedProblem {
        params,
        lin_cost,
        quad_cost: Some(quad_cost),
        constraints,
        dims: StructuralConstants {
            n_var: 2,
            n_eq: 1,
            n_ineq: 2,
            cones: ConeDims::default(),
        },
    };

    let mut values = ParameterValues::new();
    values.set(ParameterId(0), vec![1.]);
    values.set(ParameterId(1), vec![2.]);

    (prob, values)
}

fn canonicalize(prob: ReducedProblem<f64>, values: &ParameterValues<f64>) -> Canonicalizer<f64> {
    Canonicalizer::new(
        SupportedFormat::Qp(QpFormat::default()),
        prob,
        values,
        &EngineSettings::default(),
    )
    .unwrap()
}

fn vector(canon: &Canonicalizer<f64>, id: CanonicalArrayId) -> Vec<f64> {
    match canon.data(id).unwrap() {
        CanonicalData::Vector(v) => v.clone(),
        other => panic!("expected a vector encoding, got {:?}", other),
    }
}

#[test]
fn test_plan_is_exact() {
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);

    use CanonicalArrayId::*;
    let a = ParameterId(0);
    let b = ParameterId(1);

    assert_eq!(
        canon.plan(&[a]).unwrap().arrays,
        vec![CostMatrix, LowerBound, UpperBound]
    );
    assert_eq!(
        canon.plan(&[b]).unwrap().arrays,
        vec![CostMatrix, CostVector, UpperBound]
    );
    assert_eq!(
        canon.plan(&[a, b]).unwrap().arrays,
        vec![CostMatrix, CostVector, LowerBound, UpperBound]
    );
    // duplicated ids change nothing
    assert_eq!(canon.plan(&[a, a]).unwrap(), canon.plan(&[a]).unwrap());
    // nothing changed, nothing recomputed
    assert!(canon.plan(&[]).unwrap().arrays.is_empty());
}

#[test]
fn test_plan_rejects_unknown_parameter() {
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);

    assert!(matches!(
        canon.plan(&[ParameterId(9)]),
        Err(CanonError::UnknownParameter(ParameterId(9)))
    ));
}

#[test]
fn test_update_touches_only_planned_arrays() {
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    // change b only; the lower bound is not adjacent to b and must keep
    // its buffer bit-identical
    let l_before = vector(&canon, CanonicalArrayId::LowerBound);

    let mut values2 = ParameterValues::new();
    values2.set(ParameterId(0), vec![1.]);
    values2.set(ParameterId(1), vec![-4.]);
    canon.update(&[ParameterId(1)], &values2).unwrap();

    assert_eq!(vector(&canon, CanonicalArrayId::LowerBound), l_before);
    assert_eq!(vector(&canon, CanonicalArrayId::CostVector), vec![-4., 4.]);
    assert_eq!(vector(&canon, CanonicalArrayId::UpperBound), vec![1., -4., 3.]);
}

#[test]
fn test_update_is_idempotent() {
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    let mut values2 = ParameterValues::new();
    values2.set(ParameterId(0), vec![0.25]);
    values2.set(ParameterId(1), vec![-1.5]);

    let changed = [ParameterId(0), ParameterId(1)];
    canon.update(&changed, &values2).unwrap();
    let first = canon.artifact();

    canon.update(&changed, &values2).unwrap();
    let second = canon.artifact();

    assert_eq!(first, second);
}

#[test]
fn test_dependency_soundness() {
    // perturbing a parameter not adjacent to an array leaves the array's
    // values unchanged; perturbing an adjacent one changes them
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    let q_before = vector(&canon, CanonicalArrayId::CostVector);
    let l_before = vector(&canon, CanonicalArrayId::LowerBound);

    // a is not adjacent to q, but is adjacent to l
    let mut values2 = ParameterValues::new();
    values2.set(ParameterId(0), vec![100.]);
    values2.set(ParameterId(1), vec![2.]);
    canon.update(&[ParameterId(0)], &values2).unwrap();

    assert_eq!(vector(&canon, CanonicalArrayId::CostVector), q_before);
    assert_ne!(vector(&canon, CanonicalArrayId::LowerBound), l_before);
}

#[test]
fn test_sentinel_rows_never_change() {
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);
    let inf = get_infinity();

    for (a, b) in [(3., -7.), (0., 0.), (-12.5, 42.)] {
        let mut v = ParameterValues::new();
        v.set(ParameterId(0), vec![a]);
        v.set(ParameterId(1), vec![b]);
        canon
            .update(&[ParameterId(0), ParameterId(1)], &v)
            .unwrap();

        let l = vector(&canon, CanonicalArrayId::LowerBound);
        assert_eq!(l[0], a);
        assert_eq!(&l[1..], &[-inf, -inf]);
    }
}

#[test]
fn test_update_requires_all_values() {
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    // the values buffer is missing b entirely
    let mut incomplete = ParameterValues::new();
    incomplete.set(ParameterId(0), vec![1.]);

    let result = canon.update(&[ParameterId(0)], &incomplete);
    assert!(matches!(
        result,
        Err(CanonError::MissingParameterValue(ParameterId(1)))
    ));
}

#[test]
fn test_generation_requires_values_for_all_parameters() {
    let (prob, _) = qp_test_problem();

    let mut incomplete = ParameterValues::new();
    incomplete.set(ParameterId(0), vec![1.]);

    let result = Canonicalizer::new(
        SupportedFormat::Qp(QpFormat::default()),
        prob,
        &incomplete,
        &EngineSettings::default(),
    );
    assert!(matches!(
        result,
        Err(CanonError::MissingParameterValue(ParameterId(1)))
    ));
}

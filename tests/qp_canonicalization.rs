#![allow(non_snake_case)]

use canongen::algebra::CscMatrix;
use canongen::canon::*;

// Toy quadratic program with 2 variables and 3 constraint rows (one
// equality, two one-sided inequalities), and two scalar parameters a, b:
//
//   P = a*P0 + b*P1   with P0 = diag(2, 0), P1 = diag(0, 1)
//   q = b*q1          with q1 = [1, -1]
//   d = 5
//   x0 + x1 = a,  x0 <= b,  x1 <= 3
//
// The flattened parameter vector is [a, b, 1].
fn qp_test_problem() -> (ReducedProblem<f64>, ParameterValues<f64>) {
    let params = ParameterSpace::new(vec![
        UserParameter::new(0, "a", (1, 1)),
        UserParameter::new(1, "b", (1, 1)),
    ])
    .unwrap();

    let quad_cost = QuadBlock {
        map: CscMatrix::from(&[
            [2., 0., 0.], //P[0,0] = 2a
            [0., 1., 0.], //P[1,1] = b
        ]),
        pattern: SparsityPattern::new((2, 2), vec![0, 1], vec![0, 1, 2]),
    };

    let lin_cost = CscMatrix::from(&[
        [0., 1., 0.],  //q[0] = b
        [0., -1., 0.], //q[1] = -b
        [0., 0., 5.],  //d = 5
    ]);

    // stacked constraint data in CSC order over [x0, x1, const]:
    // matrix entries are all constant; the constant column carries the
    // right-hand sides -a, -b, -3
    let constraints = ConstraintBlock {
        map: CscMatrix::from(&[
            [0., 0., 1.],  //A[0,0]
            [0., 0., 1.],  //A[1,0]
            [0., 0., 1.],  //A[0,1]
            [0., 0., 1.],  //A[2,1]
            [-1., 0., 0.], //rhs of row 0
            [0., -1., 0.], //rhs of row 1
            [0., 0., -3.], //rhs of row 2
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

fn matrix(canon: &Canonicalizer<f64>, id: CanonicalArrayId) -> CscMatrix<f64> {
    match canon.data(id).unwrap() {
        CanonicalData::Matrix(M) => M.clone(),
        other => panic!("expected a matrix encoding, got {:?}", other),
    }
}

#[test]
fn test_qp_canonical_values() {
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);

    // P = P0 + 2*P1 = diag(2, 2) exactly
    let P = matrix(&canon, CanonicalArrayId::CostMatrix);
    assert_eq!(P.size(), (2, 2));
    assert_eq!(P.colptr, vec![0, 1, 2]);
    assert_eq!(P.rowval, vec![0, 1]);
    assert_eq!(P.nzval, vec![2., 2.]);

    assert_eq!(vector(&canon, CanonicalArrayId::CostVector), vec![2., -2.]);
    assert_eq!(
        canon.data(CanonicalArrayId::CostOffset),
        Some(&CanonicalData::Scalar(5.))
    );

    let A = matrix(&canon, CanonicalArrayId::ConstraintMatrix);
    assert_eq!(A.size(), (3, 2));
    assert_eq!(A.colptr, vec![0, 2, 4]);
    assert_eq!(A.rowval, vec![0, 1, 0, 2]);
    assert_eq!(A.nzval, vec![1., 1., 1., 1.]);

    let inf = get_infinity();
    assert_eq!(
        vector(&canon, CanonicalArrayId::LowerBound),
        vec![1., -inf, -inf]
    );
    assert_eq!(vector(&canon, CanonicalArrayId::UpperBound), vec![1., 2., 3.]);
}

#[test]
fn test_qp_affine_correctness() {
    // re-evaluating the maps at a second assignment must equal a
    // from-scratch canonicalization at that assignment
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    let mut values2 = ParameterValues::new();
    values2.set(ParameterId(0), vec![-0.5]);
    values2.set(ParameterId(1), vec![3.]);
    canon
        .update(&[ParameterId(0), ParameterId(1)], &values2)
        .unwrap();

    let inf = get_infinity();
    assert_eq!(matrix(&canon, CanonicalArrayId::CostMatrix).nzval, vec![-1., 3.]);
    assert_eq!(vector(&canon, CanonicalArrayId::CostVector), vec![3., -3.]);
    assert_eq!(
        canon.data(CanonicalArrayId::CostOffset),
        Some(&CanonicalData::Scalar(5.))
    );
    assert_eq!(
        matrix(&canon, CanonicalArrayId::ConstraintMatrix).nzval,
        vec![1., 1., 1., 1.]
    );
    assert_eq!(
        vector(&canon, CanonicalArrayId::LowerBound),
        vec![-0.5, -inf, -inf]
    );
    assert_eq!(
        vector(&canon, CanonicalArrayId::UpperBound),
        vec![-0.5, 3., 3.]
    );
}

#[test]
fn test_qp_structural_invariance() {
    // the sparsity structure of every matrix-shaped array is identical
    // across distinct parameter assignments
    let (prob, values) = qp_test_problem();
    let mut canon = canonicalize(prob, &values);

    let P1 = matrix(&canon, CanonicalArrayId::CostMatrix);
    let A1 = matrix(&canon, CanonicalArrayId::ConstraintMatrix);

    let mut values2 = ParameterValues::new();
    values2.set(ParameterId(0), vec![17.25]);
    values2.set(ParameterId(1), vec![-0.125]);
    canon
        .update(&[ParameterId(0), ParameterId(1)], &values2)
        .unwrap();

    let P2 = matrix(&canon, CanonicalArrayId::CostMatrix);
    let A2 = matrix(&canon, CanonicalArrayId::ConstraintMatrix);

    assert_eq!(P1.colptr, P2.colptr);
    assert_eq!(P1.rowval, P2.rowval);
    assert_eq!(A1.colptr, A2.colptr);
    assert_eq!(A1.rowval, A2.rowval);
    assert_ne!(P1.nzval, P2.nzval);
}

#[test]
fn test_qp_adjacency_table() {
    // hand-built adjacency over (P, q, d, A, l, u) x (a, b)
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);
    let deps = canon.dependencies();

    let expected = [
        (true, true),   //P
        (false, true),  //q
        (false, false), //d
        (false, false), //A
        (true, false),  //l
        (true, true),   //u
    ];
    for (i, &(on_a, on_b)) in expected.iter().enumerate() {
        assert_eq!(deps.is_adjacent(i, 0), on_a, "array {} vs a", i);
        assert_eq!(deps.is_adjacent(i, 1), on_b, "array {} vs b", i);
    }

    use CanonicalArrayId::*;
    assert_eq!(
        canon.outdated_set(ParameterId(0)).unwrap(),
        &[CostMatrix, LowerBound, UpperBound]
    );
    assert_eq!(
        canon.outdated_set(ParameterId(1)).unwrap(),
        &[CostMatrix, CostVector, UpperBound]
    );
    assert!(canon.outdated_set(ParameterId(9)).is_none());
}

#[test]
fn test_qp_parameter_invariant_arrays() {
    // the constraint matrix and cost offset depend on no parameter; they
    // are valued once and belong to no outdated set
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);

    assert!(!canon.array(CanonicalArrayId::ConstraintMatrix).unwrap().is_parametric);
    assert!(!canon.array(CanonicalArrayId::CostOffset).unwrap().is_parametric);
    assert!(canon.array(CanonicalArrayId::CostMatrix).unwrap().is_parametric);
}

#[test]
fn test_qp_sentinel_rows() {
    // one-sided inequality rows carry the signed-infinity sentinel and
    // never vary with parameters
    let (prob, values) = qp_test_problem();
    let canon = canonicalize(prob, &values);

    let l = canon.array(CanonicalArrayId::LowerBound).unwrap();
    assert_eq!(l.map.sentinel(), Some((2, -get_infinity())));
    assert_eq!(l.map.rows(), 3);
}

#[test]
fn test_qp_requires_quadratic_block() {
    let (mut prob, values) = qp_test_problem();
    prob.quad_cost = None;

    let result = Canonicalizer::new(
        SupportedFormat::Qp(QpFormat::default()),
        prob,
        &values,
        &EngineSettings::default(),
    );
    assert!(matches!(result, Err(CanonError::StructuralMismatch(_))));
}

#[test]
fn test_qp_rejects_foreign_array_id() {
    use canongen::canon::formats::CanonicalFormat;

    let (prob, _values) = qp_test_problem();
    let format = QpFormat::<f64>::default();
    let result = format.build_array(CanonicalArrayId::EqualityMatrix, &prob);
    assert!(matches!(result, Err(CanonError::UnknownArray(_, "qp"))));
}

#[test]
fn test_qp_malformed_structure_is_rejected() {
    // structural row out of range
    let (mut prob, values) = qp_test_problem();
    prob.constraints.rowval[6] = 3;
    let result = Canonicalizer::new(
        SupportedFormat::Qp(QpFormat::default()),
        prob,
        &values,
        &EngineSettings::default(),
    );
    assert!(result.is_err());

    // quadratic map rows inconsistent with the declared pattern
    let (mut prob, values) = qp_test_problem();
    prob.quad_cost.as_mut().unwrap().map = CscMatrix::from(&[[2., 0., 0.]]);
    let result = Canonicalizer::new(
        SupportedFormat::Qp(QpFormat::default()),
        prob,
        &values,
        &EngineSettings::default(),
    );
    assert!(matches!(result, Err(CanonError::StructuralMismatch(_))));
}

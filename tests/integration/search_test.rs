use bfff::catalog::Catalog;
use bfff::ir::{Case, InputSlots};
use bfff::search::{Enumerator, SearchConfig, Session, count_trees, create_session};
use bfff::semantics::{evaluate, normalize};
use bfff::ConfigError;
use std::sync::Arc;

fn case(inputs: &[f64], output: f64) -> Case {
    Case::new(inputs.to_vec(), output)
}

#[test_log::test]
fn test_identity_at_depth_two() {
    let cases = vec![case(&[2.0], 2.0), case(&[5.0], 5.0), case(&[-1.0], -1.0)];
    let mut session = create_session(cases, 2).unwrap();
    let result = session.run_batch(50_000);

    assert!(result.exhausted);
    let identity = result
        .passes
        .iter()
        .find(|p| p.rendered_text == "(a) -> a")
        .expect("Identity should be found");
    assert_eq!(identity.cost, 1);
}

#[test_log::test]
fn test_linear_combination_at_depth_three() {
    let cases = vec![
        case(&[1.0, 2.0], 3.0),
        case(&[2.0, 3.0], 5.0),
        case(&[0.0, 0.0], 0.0),
    ];
    let config = SearchConfig::default().with_max_depth(3).with_seed(11);
    let mut session = Session::new(cases.clone(), &config).unwrap();

    let extra_points = [[7.0, 5.0], [-3.0, 10.0], [0.5, 0.25], [100.0, -1.0]];
    let behaves_like_sum = |expr: &bfff::Expr| {
        let on_cases = cases
            .iter()
            .all(|c| evaluate(expr, &InputSlots::from_values(&c.inputs)) == c.output);
        let on_extra = extra_points
            .iter()
            .all(|&[a, b]| evaluate(expr, &InputSlots::from_values(&[a, b])) == a + b);
        on_cases && on_extra
    };

    let result = session.run_batch(10_000);
    let found = result.passes.iter().find(|p| behaves_like_sum(p.expr.as_ref()));
    assert!(found.is_some(), "A pass equivalent to a + b should be found");
}

#[test]
fn test_arity_rejection() {
    let result = create_session(vec![case(&[1.0, 2.0], 3.0), case(&[1.0], 2.0)], 2);
    assert!(matches!(result, Err(ConfigError::ArityMismatch { .. })));
}

#[test]
fn test_every_pass_is_sound() {
    let cases = vec![case(&[3.0], 9.0), case(&[-2.0], 4.0)];
    let mut session = create_session(cases.clone(), 2).unwrap();
    let result = session.run_batch(50_000);
    assert!(!result.passes.is_empty());

    for pass in &result.passes {
        for c in &cases {
            let slots = InputSlots::from_values(&c.inputs);
            assert_eq!(evaluate(&pass.expr, &slots), c.output, "{}", pass.rendered_text);
        }
    }
}

#[test]
fn test_enumeration_is_deterministic() {
    let catalog = Arc::new(Catalog::standard(2));
    let render_all = || -> Vec<String> {
        Enumerator::new(Arc::clone(&catalog), 2)
            .map(|e| e.render())
            .collect()
    };
    let first = render_all();
    let second = render_all();

    assert_eq!(first, second);
    assert_eq!(Some(first.len() as u128), count_trees(&catalog, 2));
}

#[test]
fn test_batches_pull_contiguous_slices() {
    let catalog = Arc::new(Catalog::standard(2));
    let skipped_in_first_400 = Enumerator::new(catalog, 2)
        .take(400)
        .filter(|e| !e.has_input())
        .count() as u64;

    let cases = vec![case(&[1.0, 2.0], 3.0)];
    let config = SearchConfig::default().with_max_depth(2).with_seed(5);
    let mut session = Session::new(cases, &config).unwrap();

    let first = session.run_batch(200);
    let second = session.run_batch(200);

    assert_eq!(first.pulled, 200);
    assert_eq!(second.pulled, 200);
    assert_eq!(first.skipped + second.skipped, skipped_in_first_400);
    assert_eq!(first.examined() + second.examined(), 400 - skipped_in_first_400);
}

#[test]
fn test_normalization_of_passes_is_stable() {
    let cases = vec![case(&[1.0, 2.0], 3.0), case(&[2.0, 3.0], 5.0)];
    let mut session = create_session(cases, 2).unwrap();
    let result = session.run_batch(50_000);

    for pass in &result.passes {
        let again = normalize(&pass.expr);
        assert_eq!(again.render(), pass.expr.render());
        assert_eq!(again.cost(), pass.cost);
    }
}

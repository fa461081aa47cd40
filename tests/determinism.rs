//! Same input, same output; and predicting never changes the artifacts.

mod common;

use ghgp::{ArtifactStore, FeatureVector, InferenceContext};

#[test]
fn repeated_predictions_are_identical() {
    let ctx = common::demo_context();
    let input = FeatureVector::default();

    let first = ctx.predict(&input).unwrap();
    for _ in 0..100 {
        let next = ctx.predict(&input).unwrap();
        assert_eq!(first.value().to_bits(), next.value().to_bits());
        assert_eq!(first.message(), next.message());
    }
}

#[test]
fn independently_loaded_contexts_agree() {
    let a = common::demo_context();
    let b = common::demo_context();
    let rows = [
        FeatureVector::default().to_array(),
        [700.0, 2019.0, 0.6, 0.1, 0.2, 0.3, 0.01, 0.4, 0.08],
        [0.0; 9],
    ];

    for row in rows {
        assert_eq!(a.predict_values(&row).unwrap(), b.predict_values(&row).unwrap());
    }
}

#[test]
fn artifacts_are_unchanged_after_predictions() {
    let store = ArtifactStore::load(&common::demo_paths()).unwrap();
    let snapshot = store.clone();
    let ctx = InferenceContext::from_store(store);

    let mut row = FeatureVector::default().to_array();
    for i in 0..50 {
        row[0] = f64::from(i) * 20.0;
        let _ = ctx.predict_values(&row);
        let _ = ctx.predict_values(&row[..4]);
    }

    let reloaded = ArtifactStore::load(&common::demo_paths()).unwrap();
    assert_eq!(snapshot, reloaded);
    assert_eq!(
        ctx.predict(&FeatureVector::default()).unwrap(),
        InferenceContext::from_store(snapshot)
            .predict(&FeatureVector::default())
            .unwrap()
    );
}

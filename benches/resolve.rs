//! Resolution benchmark: probabilities → selected class → override rules.

use accident_severity::config::ResolverConfig;
use accident_severity::error::ModelError;
use accident_severity::features::{FeatureSchema, FeatureVector};
use accident_severity::input::{AreaType, LightCondition, RawInput, SurfaceCondition};
use accident_severity::model::LabelCodec;
use accident_severity::resolver::{SelectionStrategy, SeverityResolver};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_resolve(c: &mut Criterion) {
    let schema = FeatureSchema::new(["Speed_limit", "Urban_or_Rural_Area"]).unwrap();
    let features = FeatureVector::from_schema(&schema, |_| 1.0);
    let codec = LabelCodec::new(["Fatal", "Serious", "Slight"]).unwrap();
    let model = |_: &FeatureVector| -> Result<Vec<f64>, ModelError> { Ok(vec![0.05, 0.25, 0.7]) };
    let raw = RawInput::new(50, AreaType::Rural, LightCondition::DarknessNoLighting, SurfaceCondition::WetDamp);

    let argmax = SeverityResolver::new(ResolverConfig::default());
    let thresholded = SeverityResolver::new(ResolverConfig {
        strategy: SelectionStrategy::Thresholded {
            thresholds: vec![0.04, 0.3, 0.6],
        },
        ..ResolverConfig::default()
    });

    let mut g = c.benchmark_group("resolve_by_strategy");
    for (name, resolver) in [("argmax", &argmax), ("thresholded", &thresholded)] {
        g.bench_function(name, |b| {
            b.iter(|| {
                resolver
                    .resolve(black_box(&features), &model, &codec, black_box(&raw))
                    .unwrap()
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);

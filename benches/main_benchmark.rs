use confax::config;
use confax::env::{EffectiveEnv, Layer, merge::merge_layers, presets};
use confax::flags::{CompilerFamily, add_compiler_warnings, configure_preprocessor_definitions};
use confax::target::{BuildMode, Target};
use confax::templates;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use toml;

const MOCK_CONFIG: &str = r#"
[package]
name = "benchmark_project"

[env]
layer = "dev"

[toolchain]
file = "arm-cortex-m4"

[targets.app]
coverage = true
definitions = ["USE_RTOS"]
"#;

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_cfx_toml", |b| {
        b.iter(|| {
            let _: config::CfxConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_layer_merge(c: &mut Criterion) {
    let layers = vec![presets::common(), presets::dev()];

    c.bench_function("merge_common_dev", |b| {
        b.iter(|| merge_layers(black_box(&layers)))
    });

    let wide: Vec<Layer> = (0..4)
        .map(|rank| {
            let pairs: Vec<(String, String)> = (0..64)
                .map(|i| (format!("KEY_{}", i), format!("value_{}_{}", rank, i)))
                .collect();
            Layer {
                name: format!("layer{}", rank),
                rank,
                vars: pairs.into_iter().collect(),
            }
        })
        .collect();

    c.bench_function("merge_wide_stack", |b| {
        b.iter(|| merge_layers(black_box(&wide)))
    });
}

fn bench_effective_env(c: &mut Criterion) {
    let layers = vec![presets::common(), presets::prod()];
    c.bench_function("effective_env_build", |b| {
        b.iter(|| EffectiveEnv::from_layers(black_box(&layers)))
    });
}

fn bench_flag_functions(c: &mut Criterion) {
    c.bench_function("warnings_and_definitions", |b| {
        b.iter(|| {
            let mut target = Target::new(black_box("app"));
            add_compiler_warnings(&mut target, black_box(CompilerFamily::Gcc));
            configure_preprocessor_definitions(
                &mut target,
                black_box(BuildMode::Debug),
                black_box(Some("FEATURE_X;LOG_LEVEL=2")),
            );
            target
        })
    });
}

fn bench_templates(c: &mut Criterion) {
    c.bench_function("get_template_console", |b| {
        b.iter(|| templates::get_template(black_box("myapp"), black_box("console")))
    });

    c.bench_function("get_template_embedded", |b| {
        b.iter(|| templates::get_template(black_box("fw"), black_box("embedded")))
    });
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_layer_merge,
    bench_effective_env,
    bench_flag_functions,
    bench_templates
);
criterion_main!(benches);

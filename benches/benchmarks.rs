// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use semrel_action::{Inputs, ReleaseConfig, parse_json, parse_references};

fn benchmark_parse_json(c: &mut Criterion,)
{
    let branches = r#"["+([0-9])?(.{+([0-9]),x}).x", "main", "next", {"name": "beta", "prerelease": true}, {"name": "alpha", "prerelease": true}]"#;
    let double_encoded =
        serde_json::to_string(branches,).expect("failed to encode branches",);

    c.bench_function("parse_json_branches", |b| b.iter(|| parse_json(black_box(branches,),),),);
    c.bench_function("parse_json_double_encoded", |b| {
        b.iter(|| parse_json(black_box(&double_encoded,),),)
    },);
    c.bench_function("parse_json_literal", |b| b.iter(|| parse_json(black_box("release/*",),),),);
}

fn benchmark_parse_references(c: &mut Criterion,)
{
    let raw = "@semantic-release/apm-config@^9.0.0\r\ngithub:owner/shared-config#main\r\ngitlab:@scope/release@v1.0.0\r\nnot a reference\r\nplain-config\r\n";

    c.bench_function("parse_references", |b| b.iter(|| parse_references(black_box(raw,),),),);
}

fn benchmark_release_config(c: &mut Criterion,)
{
    let inputs = Inputs::from_inputs([
        ("branches", r#"["main", {"name": "beta", "prerelease": true}]"#,),
        ("dry_run", "true",),
        ("ci", "false",),
        ("extends", "@scope/config@1\nother#main",),
        ("tag_format", "v${version}",),
        ("repository_url", "https://github.com/owner/repo.git",),
    ],);

    c.bench_function("release_config_from_inputs", |b| {
        b.iter(|| ReleaseConfig::from_inputs(black_box(&inputs,),),)
    },);
}

criterion_group!(
    benches,
    benchmark_parse_json,
    benchmark_parse_references,
    benchmark_release_config
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mqtt_config::AnalyzerConfig;
use mqtt_ide::{Analysis, Position, RenderContext, TemplateStore};
use mqtt_syntax::SourceFile;
use mqtt_test_utils::fixtures;
use std::fmt::Write;
use std::hint::black_box;

const SERVICE_START: Position = Position::new(fixtures::SERVICE_LINE, 0);

/// A file with `count` services, every third one empty.
fn many_services(count: usize) -> String {
    let mut text = String::from("import ballerina/mqtt;\n\n");
    for i in 0..count {
        let _ = writeln!(
            text,
            "listener mqtt:Listener l{i} = new (mqtt:DEFAULT_URL, \"client-{i}\", \"topic/{i}\");"
        );
        if i % 3 == 0 {
            let _ = writeln!(text, "service on l{i} {{}}\n");
        } else {
            let _ = writeln!(
                text,
                "service on l{i} {{\n    int count = 0;\n\n    remote function onMessage(mqtt:Message message, mqtt:Caller caller) returns error? {{\n        check caller->complete();\n    }}\n}}\n"
            );
        }
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = many_services(100);
    c.bench_function("parse_100_services", |b| {
        b.iter(|| black_box(SourceFile::parse("main.bal", black_box(&text))));
    });
}

fn bench_validate(c: &mut Criterion) {
    let file = SourceFile::parse("main.bal", &many_services(100)).unwrap();
    let config = AnalyzerConfig::default();
    c.bench_function("validate_100_services", |b| {
        b.iter(|| black_box(mqtt_linter::validate(&file, &config)));
    });
}

fn bench_code_actions(c: &mut Criterion) {
    let analysis = Analysis::default();
    let file = SourceFile::parse("main.bal", fixtures::SNIPPET_GEN_SERVICE_2).unwrap();
    c.bench_function("code_actions_at_service", |b| {
        b.iter(|| black_box(analysis.code_actions(&file, SERVICE_START)));
    });
}

fn bench_execute(c: &mut Criterion) {
    let analysis = Analysis::default();
    let file = SourceFile::parse("main.bal", fixtures::SNIPPET_GEN_SERVICE_1).unwrap();
    let actions = analysis.code_actions(&file, SERVICE_START);
    c.bench_function("execute_with_caller", |b| {
        b.iter_batched(
            || actions[0].clone(),
            |action| black_box(analysis.execute(&file, &action)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_render(c: &mut Criterion) {
    let store = TemplateStore::builtin();
    let ctx = RenderContext {
        prefix: "mqtt",
        base_indent: 4,
        indent_unit: 4,
        line_ending: "\n",
    };
    c.bench_function("render_template", |b| {
        b.iter(|| black_box(store.render("add_on_message_with_caller", &ctx)));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_validate,
    bench_code_actions,
    bench_execute,
    bench_render
);
criterion_main!(benches);

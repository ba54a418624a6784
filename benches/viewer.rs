use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dagscope::config::Config;
use dagscope::graph::build_graph;
use dagscope::layout::compute_layout;
use dagscope::render::render_svg;
use dagscope::{Scene, parse_document};
use std::hint::black_box;

fn dense_document(nodes: usize, extra_edges: usize) -> String {
    let mut node_list = String::new();
    let mut edge_list = String::new();
    for i in 0..nodes {
        if i > 0 {
            node_list.push(',');
        }
        let kind = if i == 0 {
            "\"input\""
        } else if i == nodes - 1 {
            "\"output\""
        } else {
            "null"
        };
        node_list.push_str(&format!(
            "{{\"name\": \"n{i}\", \"type\": {kind}, \"value\": {{\"step\": {i}}}}}"
        ));
    }
    for i in 0..nodes.saturating_sub(1) {
        if i > 0 {
            edge_list.push(',');
        }
        edge_list.push_str(&format!("[\"n{}\", \"n{}\"]", i, i + 1));
    }
    let mut count = 0usize;
    'outer: for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break 'outer;
            }
            edge_list.push_str(&format!(",[\"n{}\", \"n{}\"]", i, j));
            count += 1;
        }
    }
    format!("{{\"nodes\": [{node_list}], \"edges\": [{edge_list}]}}")
}

fn fixture(name: &str) -> &'static str {
    match name {
        "small" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/small.json"
        )),
        "medium" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/medium.json"
        )),
        "large" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/large.json"
        )),
        _ => panic!("unknown fixture"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in ["small", "medium", "large"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let document = parse_document(black_box(data)).expect("parse failed");
                black_box(document.nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let config = Config::default();
    for name in ["small", "medium", "large"] {
        let document = parse_document(fixture(name)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &document, |b, doc| {
            b.iter(|| {
                let graph = build_graph(black_box(doc), &config.theme, &config.interaction)
                    .expect("build failed");
                black_box(graph.nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for name in ["small", "medium", "large"] {
        let document = parse_document(fixture(name)).expect("parse failed");
        let graph =
            build_graph(&document, &config.theme, &config.interaction).expect("build failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let layout = compute_layout(black_box(graph), &config.theme, &config.layout);
                black_box(layout.nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_layout_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_dense");
    let config = Config::default();
    for (nodes, extra_edges) in [(40usize, 80usize), (60, 180), (80, 320)] {
        let name = format!("dense_{}_{}", nodes, extra_edges);
        let input = dense_document(nodes, extra_edges);
        let document = parse_document(&input).expect("parse failed");
        let graph =
            build_graph(&document, &config.theme, &config.interaction).expect("build failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let layout = compute_layout(black_box(graph), &config.theme, &config.layout);
                black_box(layout.edges.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let config = Config::default();
    for name in ["small", "medium", "large"] {
        let document = parse_document(fixture(name)).expect("parse failed");
        let graph =
            build_graph(&document, &config.theme, &config.interaction).expect("build failed");
        let layout = compute_layout(&graph, &config.theme, &config.layout);
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(layout, graph),
            |b, (layout, graph)| {
                b.iter(|| {
                    let svg = render_svg(black_box(layout), graph, &config.theme, &config.render);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_json");
    let config = Config::default();
    for name in ["small", "medium", "large"] {
        let document = parse_document(fixture(name)).expect("parse failed");
        let graph =
            build_graph(&document, &config.theme, &config.interaction).expect("build failed");
        let layout = compute_layout(&graph, &config.theme, &config.layout);
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(layout, graph),
            |b, (layout, graph)| {
                b.iter(|| {
                    let scene = Scene::from_layout(black_box(layout), graph, &config);
                    let json = serde_json::to_string(&scene).expect("serialize failed");
                    black_box(json.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for name in ["small", "medium", "large"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let document = parse_document(black_box(data)).expect("parse failed");
                let graph = build_graph(&document, &config.theme, &config.interaction)
                    .expect("build failed");
                let layout = compute_layout(&graph, &config.theme, &config.layout);
                let svg = render_svg(&layout, &graph, &config.theme, &config.render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_build, bench_layout, bench_layout_dense, bench_render, bench_scene, bench_end_to_end
);
criterion_main!(benches);

//! Benchmarks for label extraction and room lookup.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};

use roomfinder::svg::parse_labels;
use roomfinder::{Building, Floor, FloorStatus, Room, VenueIndex, resolve};

const PLAN: &str = include_str!("../tests/fixtures/venue/A/0.svg");

/// A venue of 5 buildings x 8 floors x 60 rooms.
fn synthetic_venue() -> VenueIndex {
    let buildings = (0..5)
        .map(|b| Building {
            name: format!("Building {b}"),
            floors: (0..8)
                .map(|f| Floor {
                    name: f.to_string(),
                    source_path: PathBuf::from(format!("{b}/{f}.svg")),
                    image_path: PathBuf::from(format!("{b}/{f}.png")),
                    rooms: (0..60)
                        .map(|r| Room::new(format!("{b}{f}.{r:02}"), r as f64, f as f64))
                        .collect(),
                    status: FloorStatus::Loaded,
                })
                .collect(),
            default_floor: 0,
        })
        .collect();
    VenueIndex::new(buildings)
}

/// One layer with `count` labels.
fn synthetic_plan(count: usize) -> String {
    let mut svg = String::from(concat!(
        r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">"#,
        r#"<g inkscape:label="Rooms">"#,
    ));
    for i in 0..count {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}"><tspan>Room {i}</tspan></text>"#,
            i * 3,
            i * 2
        ));
    }
    svg.push_str("</g></svg>");
    svg
}

fn bench_parse_labels(c: &mut Criterion) {
    c.bench_function("parse_labels_fixture", |b| {
        b.iter(|| parse_labels(black_box(PLAN), "Rooms").unwrap());
    });

    let large = synthetic_plan(2_000);
    c.bench_function("parse_labels_2000", |b| {
        b.iter(|| parse_labels(black_box(&large), "Rooms").unwrap());
    });
}

fn bench_resolve(c: &mut Criterion) {
    let index = synthetic_venue();

    c.bench_function("resolve_first", |b| {
        b.iter(|| resolve(black_box("00.00"), &index));
    });

    c.bench_function("resolve_last", |b| {
        b.iter(|| resolve(black_box("47.59"), &index));
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| resolve(black_box("no such room"), &index));
    });
}

criterion_group!(benches, bench_parse_labels, bench_resolve);
criterion_main!(benches);

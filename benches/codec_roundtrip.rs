//! Benchmark: wire encode/decode and text parse/format over a mix of field
//! widths (MAC, IPv4, IPv6, 16-bit and 20-bit integers).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setfield::{SetFieldAction, StandardRegistry};

const SAMPLES: &[&str] = &[
    "aa:bb:cc:dd:ee:01->dl_src",
    "10.0.0.1->nw_src",
    "2001:db8::1->ipv6_src",
    "443->tcp_dst",
    "1000->mpls_label",
];

fn bench_roundtrip(c: &mut Criterion) {
    let registry = StandardRegistry;
    let actions: Vec<SetFieldAction> = SAMPLES
        .iter()
        .map(|t| SetFieldAction::from_text(t, &registry).expect("sample"))
        .collect();
    let wires: Vec<Vec<u8>> = actions.iter().map(|a| a.to_wire()).collect();

    c.bench_function("encode_wire", |b| {
        b.iter(|| {
            for a in &actions {
                black_box(a.to_wire());
            }
        })
    });
    c.bench_function("decode_wire", |b| {
        b.iter(|| {
            for w in &wires {
                black_box(SetFieldAction::from_wire(w, &registry).expect("decode"));
            }
        })
    });
    c.bench_function("parse_text", |b| {
        b.iter(|| {
            for t in SAMPLES {
                black_box(SetFieldAction::from_text(t, &registry).expect("parse"));
            }
        })
    });
    c.bench_function("format_text", |b| {
        b.iter(|| {
            for a in &actions {
                black_box(a.to_text(&registry));
            }
        })
    });
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);

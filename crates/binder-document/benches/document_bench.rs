// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the binder-document crate: the autofit size search
// and rendering a full divider page.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use binder_core::{BinderConfig, SectionEntry};
use binder_document::BinderAssets;
use binder_document::pdf::autofit::fit_text;
use binder_document::pdf::divider::{PRODUCT_BOX, PRODUCT_PARAMS, render_divider};
use binder_document::pdf::metrics::FontWeight;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A long product name forces the search to walk most of the size range.
fn bench_autofit(c: &mut Criterion) {
    let text = "Non-Structural Metal Framing with Slotted Deflection Track, Bridging Clips and Accessories";

    c.bench_function("fit_text (long product name)", |b| {
        b.iter(|| {
            let layout = fit_text(black_box(text), &PRODUCT_BOX, FontWeight::Bold, &PRODUCT_PARAMS);
            black_box(layout);
        });
    });
}

/// Render a divider with builtin fonts, no logo.
fn bench_divider(c: &mut Criterion) {
    let config = BinderConfig::default();
    let assets = BinderAssets::builtin();
    let section = SectionEntry::new("092900", "Gypsum Board Assemblies", Vec::new());

    c.bench_function("render_divider", |b| {
        b.iter(|| {
            let rendered = render_divider(black_box(&section), &config, &assets);
            black_box(rendered.bytes);
        });
    });
}

criterion_group!(benches, bench_autofit, bench_divider);
criterion_main!(benches);

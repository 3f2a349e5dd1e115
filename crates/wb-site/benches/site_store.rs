//! Benchmarks for site store and directory operations.

use std::collections::HashSet;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use wb_site::{FormPayload, NewSite, SiteDirectory, SiteStore, WebsiteType, slug};
use wb_storage::FsStorage;

fn titled(title: &str) -> FormPayload {
    let mut payload = FormPayload::new(WebsiteType::Others);
    if let Some(page) = payload.page_mut() {
        page.page_title = title.to_owned();
    }
    payload
}

/// Store over a temp directory, seeded with `count` sites sharing one title.
fn seeded_store(root: &std::path::Path, count: usize) -> SiteStore {
    let store = SiteStore::new(Arc::new(FsStorage::new(root.to_path_buf())));
    for _ in 0..count {
        let _ = store.create(NewSite::new(titled("Shop")));
    }
    store
}

fn bench_slug(c: &mut Criterion) {
    let mut group = c.benchmark_group("slug");

    group.bench_function("normalize", |b| {
        b.iter(|| slug::normalize("  The Best -- Bakery in Town!!  "))
    });

    for taken in [0, 10, 100] {
        let existing: Vec<String> = std::iter::once("shop".to_owned())
            .chain((1..taken).map(|i| format!("shop-{i}")))
            .collect();
        let set: HashSet<&str> = existing.iter().map(String::as_str).collect();

        group.bench_with_input(BenchmarkId::new("make_unique", taken), &set, |b, set| {
            b.iter(|| slug::make_unique("Shop", set))
        });
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("site_store");

    for count in [10, 100, 500] {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), count);

        group.bench_with_input(BenchmarkId::new("list", count), &store, |b, store| {
            b.iter(|| store.list())
        });
        group.bench_with_input(BenchmarkId::new("get_by_slug", count), &store, |b, store| {
            b.iter(|| store.get_by_slug("shop-5"))
        });
    }

    group.finish();
}

fn bench_directory(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(seeded_store(temp_dir.path(), 500));
    let directory = SiteDirectory::new(store);

    let mut group = c.benchmark_group("site_directory");

    group.bench_function("search", |b| b.iter(|| directory.search("SHOP-4")));
    group.bench_function("get_by_slug", |b| b.iter(|| directory.get_by_slug("shop-250")));

    group.finish();
}

criterion_group!(benches, bench_slug, bench_store, bench_directory);
criterion_main!(benches);

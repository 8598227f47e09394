use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use uigen_files::{FilePath, FileTree, FilesBuilder};

/// Benchmark `read_file` across tree sizes
fn bench_read_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_file");

    for size in [10, 100, 1000, 10000] {
        let tree = create_tree_with_files(size);
        let path = FilePath::new(format!("/src/components/file_{}.jsx", size / 2)).unwrap();

        group.bench_with_input(BenchmarkId::new("read", size), &path, |b, path| {
            b.iter(|| tree.read_file(black_box(path)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark `list_directory` on a wide directory
fn bench_list_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_directory");
    let dir = FilePath::new("/src/components").unwrap();

    for size in [10, 100, 1000] {
        let tree = create_tree_with_files(size);

        group.bench_with_input(BenchmarkId::new("list", size), &size, |b, _| {
            b.iter(|| tree.list_directory(black_box(&dir)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark renaming a directory, which re-indexes its subtree
fn bench_rename_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename_directory");
    let from = FilePath::new("/src").unwrap();
    let to = FilePath::new("/lib").unwrap();

    for size in [10, 100, 1000] {
        let tree = create_tree_with_files(size);

        group.bench_with_input(BenchmarkId::new("subtree", size), &size, |b, _| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    tree.rename_node(black_box(&from), black_box(&to)).unwrap();
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark snapshot capture
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [10, 100, 1000] {
        let tree = create_tree_with_files(size);

        group.bench_with_input(BenchmarkId::new("capture", size), &size, |b, _| {
            b.iter(|| black_box(tree.to_snapshot()));
        });
    }

    group.finish();
}

fn create_tree_with_files(count: usize) -> FileTree {
    FilesBuilder::new()
        .add_files((0..count).map(|i| {
            (
                format!("/src/components/file_{i}.jsx"),
                format!("export const Component{i} = () => null;"),
            )
        }))
        .build()
        .unwrap()
}

criterion_group!(
    benches,
    bench_read_file,
    bench_list_directory,
    bench_rename_directory,
    bench_snapshot
);
criterion_main!(benches);

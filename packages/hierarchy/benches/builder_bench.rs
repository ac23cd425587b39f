use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orgtree_hierarchy::{annotate_forest, build_forest, mutator, NodeId, NodeUpdate, Record};

/// `width` roots, each a chain of `depth` nodes with two leaves per level
fn org_records(width: usize, depth: usize) -> Vec<Record> {
    let mut records = Vec::new();

    for w in 0..width {
        let root = format!("team-{w}");
        records.push(Record::new(root.clone(), root.clone()));

        let mut parent = root;
        for d in 0..depth {
            let name = format!("team-{w}-level-{d}");
            records.push(Record::new(name.clone(), name.clone()).with_parent_name(parent.clone()));
            for leaf in 0..2 {
                let leaf_name = format!("{name}-leaf-{leaf}");
                records.push(Record::new(leaf_name.clone(), leaf_name).with_parent_name(name.clone()));
            }
            parent = name;
        }
    }

    records
}

fn build_small_org(c: &mut Criterion) {
    let records = org_records(5, 4);

    c.bench_function("build_small_org", |b| {
        b.iter(|| build_forest(black_box(&records)))
    });
}

fn build_large_org(c: &mut Criterion) {
    let records = org_records(50, 20);

    c.bench_function("build_large_org", |b| {
        b.iter(|| build_forest(black_box(&records)))
    });
}

fn annotate_large_org(c: &mut Criterion) {
    let forest = build_forest(&org_records(50, 20));

    c.bench_function("annotate_large_org", |b| {
        b.iter(|| annotate_forest(black_box(&forest)))
    });
}

fn rename_in_large_org(c: &mut Criterion) {
    let forest = build_forest(&org_records(50, 20));
    let target = NodeId::from("team-25-level-10");
    let fields = NodeUpdate::rename("renamed");

    c.bench_function("rename_in_large_org", |b| {
        b.iter(|| mutator::update(black_box(&forest), &target, &fields))
    });
}

criterion_group!(
    benches,
    build_small_org,
    build_large_org,
    annotate_large_org,
    rename_in_large_org
);
criterion_main!(benches);

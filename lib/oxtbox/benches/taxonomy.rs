use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use oxtbox::{ClassExpression, ClassModel, ExportOptions, ObjectProperty, OwlClass, TripleDecoder};

fn classes(count: usize) -> Vec<OwlClass> {
    (0..count)
        .map(|i| OwlClass::new_from_iri(format!("http://example.org/C{i}")).unwrap())
        .collect()
}

/// A binary tree of classes where every class is disjoint with its sibling.
fn tree_model(classes: &[OwlClass]) -> ClassModel {
    let mut model = ClassModel::new();
    for class in classes {
        model.declare_class(class.clone());
    }
    for (i, class) in classes.iter().enumerate().skip(1) {
        let declared = model.declare_subclass(class, &classes[(i - 1) / 2]).unwrap();
        assert!(declared.is_accepted());
        if i % 2 == 0 {
            let declared = model.declare_disjoint(&classes[i - 1], class).unwrap();
            assert!(declared.is_accepted());
        }
    }
    let knows = ObjectProperty::new_from_iri("http://example.org/knows").unwrap();
    model
        .declare_restriction(
            OwlClass::new_from_iri("http://example.org/KnowsLeaf").unwrap(),
            ClassExpression::object_some_values_from(
                knows,
                classes[classes.len() - 1].clone().into(),
            ),
        )
        .unwrap();
    model
}

fn declare(c: &mut Criterion) {
    let mut group = c.benchmark_group("declare");
    for count in [100, 1_000] {
        let classes = classes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("tree of {count} classes"), |b| {
            b.iter(|| tree_model(&classes))
        });
    }
}

fn closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");
    let classes = classes(1_000);
    let model = tree_model(&classes);
    let leaf = &classes[classes.len() - 1];
    group.bench_function("super classes of a leaf", |b| {
        b.iter(|| model.super_classes_of(leaf))
    });
    group.bench_function("disjoint classes of a leaf", |b| {
        b.iter(|| model.disjoint_classes_with(leaf))
    });
    group.bench_function("sub classes of the root", |b| {
        b.iter(|| model.sub_classes_of(&classes[0]))
    });
}

fn export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let model = tree_model(&classes(1_000));
    group.bench_function("declared triples", |b| {
        b.iter(|| model.to_graph(&ExportOptions::default()))
    });
    let graph = model.to_graph(&ExportOptions::default());
    group.throughput(Throughput::Elements(graph.len() as u64));
    group.bench_function("decode model", |b| {
        b.iter(|| TripleDecoder::new(&graph).decode_model().unwrap())
    });
}

criterion_group!(taxonomy, declare, closure, export);
criterion_main!(taxonomy);

//! Closure and consistency gate tests of the class model.

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::TripleRef;
use oxtbox::vocab::owl;
use oxtbox::{
    ClassModel, ConflictKind, ExportOptions, OwlClass, Relation, TaxonomyConflict, TripleDecoder,
};

fn class(name: &str) -> OwlClass {
    OwlClass::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

fn model_with(names: &[&str]) -> ClassModel {
    let mut model = ClassModel::new();
    for name in names {
        model.declare_class(class(name));
    }
    model
}

#[test]
fn test_subclass_closure_is_transitive() {
    let mut model = model_with(&["A", "B", "C", "D"]);
    assert!(model.declare_subclass(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("B"), &class("C")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("C"), &class("D")).unwrap().is_accepted());

    assert!(model.is_sub_class_of(&class("A"), &class("C")));
    assert!(model.is_sub_class_of(&class("A"), &class("D")));
    assert!(!model.is_sub_class_of(&class("D"), &class("A")));
    assert_eq!(
        model.super_classes_of(&class("A")),
        [class("B"), class("C"), class("D")]
    );
    assert_eq!(
        model.sub_classes_of(&class("D")),
        [class("C"), class("B"), class("A")]
    );
}

#[test]
fn test_equivalence_is_symmetric_and_transitive() {
    let mut model = model_with(&["A", "B", "C"]);
    assert!(model.declare_equivalent(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_equivalent(&class("B"), &class("C")).unwrap().is_accepted());

    assert!(model.is_equivalent_to(&class("A"), &class("C")));
    assert!(model.is_equivalent_to(&class("C"), &class("A")));
    assert!(model.is_equivalent_to(&class("B"), &class("A")));
    assert_eq!(model.equivalent_classes_of(&class("C")), [class("B"), class("A")]);
}

#[test]
fn test_subsumption_propagates_through_equivalence() {
    let mut model = model_with(&["A", "B", "C", "D"]);
    assert!(model.declare_equivalent(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("B"), &class("C")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("D"), &class("A")).unwrap().is_accepted());

    assert!(model.is_sub_class_of(&class("A"), &class("C")));
    assert!(model.is_sub_class_of(&class("D"), &class("B")));
    assert!(model.is_sub_class_of(&class("D"), &class("C")));
}

#[test]
fn test_disjoint_propagation() {
    let mut model = model_with(&["A", "B", "C", "D"]);
    assert!(model.declare_equivalent(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_disjoint(&class("B"), &class("C")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("D"), &class("C")).unwrap().is_accepted());

    assert!(model.is_disjoint_with(&class("A"), &class("C")));
    assert!(model.is_disjoint_with(&class("A"), &class("D")));
    assert!(model.is_disjoint_with(&class("D"), &class("A")));
    assert!(!model.is_disjoint_with(&class("C"), &class("D")));
}

#[test]
fn test_subclass_conflict() {
    let mut model = model_with(&["A", "B"]);
    assert!(model.declare_subclass(&class("B"), &class("A")).unwrap().is_accepted());
    let declared = model.declare_subclass(&class("A"), &class("B")).unwrap();

    assert!(declared.is_rejected());
    let conflict = declared.conflict().cloned().unwrap();
    assert_eq!(conflict.relation(), Relation::SubClassOf);
    assert_eq!(conflict.first(), &class("A"));
    assert_eq!(conflict.second(), &class("B"));
    assert_eq!(conflict.kind(), ConflictKind::SuperClass);
    assert_eq!(model.warnings(), [conflict]);

    let graph = model.to_graph(&ExportOptions::default());
    assert_eq!(graph.len(), 3);
    let (a, b) = (class("A"), class("B"));
    assert!(graph.contains(TripleRef::new(b.iri(), rdfs::SUB_CLASS_OF, a.iri())));
    assert!(!graph.contains(TripleRef::new(a.iri(), rdfs::SUB_CLASS_OF, b.iri())));
    assert!(graph.contains(TripleRef::new(a.iri(), rdf::TYPE, owl::CLASS)));
    assert!(graph.contains(TripleRef::new(b.iri(), rdf::TYPE, owl::CLASS)));
}

#[test]
fn test_mutual_exclusivity() {
    let attempts: [(Relation, ConflictKind); 3] = [
        (Relation::SubClassOf, ConflictKind::SuperClass),
        (Relation::EquivalentClasses, ConflictKind::SuperClass),
        (Relation::DisjointClasses, ConflictKind::SuperClass),
    ];
    for (relation, kind) in attempts {
        let mut model = model_with(&["A", "B", "C"]);
        assert!(model.declare_subclass(&class("A"), &class("B")).unwrap().is_accepted());
        assert!(model.declare_subclass(&class("B"), &class("C")).unwrap().is_accepted());
        let before = model.to_triples(&ExportOptions::default());

        // A ⊑ C only holds through the closure
        let (c, a) = (class("C"), class("A"));
        let declared = match relation {
            Relation::SubClassOf => model.declare_subclass(&c, &a),
            Relation::EquivalentClasses => model.declare_equivalent(&c, &a),
            Relation::DisjointClasses => model.declare_disjoint(&c, &a),
        }
        .unwrap();

        assert_eq!(declared.conflict().map(TaxonomyConflict::kind), Some(kind), "{relation}");
        assert_eq!(model.warnings().len(), 1, "{relation}");
        assert_eq!(model.to_triples(&ExportOptions::default()), before, "{relation}");
        assert!(!model.is_equivalent_to(&c, &a));
        assert!(!model.is_disjoint_with(&c, &a));
    }
}

#[test]
fn test_disjoint_classes_cannot_become_related() {
    let mut model = model_with(&["A", "B", "C"]);
    assert!(model.declare_disjoint(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("C"), &class("B")).unwrap().is_accepted());

    // C inherits the disjointness of B
    let declared = model.declare_subclass(&class("C"), &class("A")).unwrap();
    assert_eq!(
        declared.conflict().map(TaxonomyConflict::kind),
        Some(ConflictKind::Disjoint)
    );
    let declared = model.declare_equivalent(&class("C"), &class("B")).unwrap();
    assert_eq!(
        declared.conflict().map(TaxonomyConflict::kind),
        Some(ConflictKind::SubClass)
    );
    let declared = model.declare_subclass(&class("A"), &class("B")).unwrap();
    assert_eq!(
        declared.conflict().map(TaxonomyConflict::kind),
        Some(ConflictKind::Disjoint)
    );
    assert_eq!(model.take_warnings().len(), 3);
    assert!(model.warnings().is_empty());
}

#[test]
fn test_equivalence_cannot_relate_a_disjoint_pair_through_a_superclass() {
    let mut model = model_with(&["X", "Y", "Z"]);
    assert!(model.declare_disjoint(&class("X"), &class("Y")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("X"), &class("Z")).unwrap().is_accepted());

    // Z ≡ Y would put Y above X
    let declared = model.declare_equivalent(&class("Z"), &class("Y")).unwrap();
    let conflict = declared.conflict().cloned().unwrap();
    assert_eq!(conflict.kind(), ConflictKind::Derived);
    assert_eq!(conflict.relation(), Relation::EquivalentClasses);
    assert_eq!(conflict.witness().map(|(x, _)| x), Some(&class("X")));
    assert_eq!(model.warnings(), [conflict]);
    assert!(model.is_disjoint_with(&class("X"), &class("Y")));
    assert!(!model.is_sub_class_of(&class("X"), &class("Y")));
    assert!(!model.is_equivalent_to(&class("Z"), &class("Y")));
}

#[test]
fn test_disjointness_cannot_split_a_common_subclass() {
    let mut model = model_with(&["A", "B", "C"]);
    assert!(model.declare_subclass(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("A"), &class("C")).unwrap().is_accepted());
    let before = model.to_triples(&ExportOptions::default().with_inferred(true));

    let declared = model.declare_disjoint(&class("B"), &class("C")).unwrap();
    assert_eq!(
        declared.conflict().map(TaxonomyConflict::kind),
        Some(ConflictKind::Derived)
    );
    let declared = model
        .declare_all_disjoint(class("Group"), vec![class("C").into(), class("B").into()])
        .unwrap();
    assert!(declared.is_rejected());
    assert!(!model.contains_class(&class("Group")));

    assert!(!model.is_disjoint_with(&class("B"), &class("C")));
    assert!(!model.is_disjoint_with(&class("A"), &class("C")));
    assert!(model.is_sub_class_of(&class("A"), &class("C")));
    assert_eq!(model.warnings().len(), 2);
    assert_eq!(
        model.to_triples(&ExportOptions::default().with_inferred(true)),
        before
    );
}

#[test]
fn test_entailed_relations_are_pairwise_exclusive() {
    let mut model = model_with(&["A", "B", "C", "D", "E", "F", "G"]);
    let attempts = [
        (Relation::SubClassOf, "B", "A"),
        (Relation::SubClassOf, "C", "B"),
        (Relation::EquivalentClasses, "C", "D"),
        (Relation::DisjointClasses, "A", "E"),
        (Relation::SubClassOf, "F", "D"),
        (Relation::SubClassOf, "F", "G"),
        // F is below both G and A
        (Relation::DisjointClasses, "G", "A"),
        (Relation::SubClassOf, "F", "E"),
        (Relation::EquivalentClasses, "E", "C"),
        (Relation::DisjointClasses, "F", "B"),
        (Relation::SubClassOf, "E", "F"),
    ];
    for (relation, a, b) in attempts {
        let (a, b) = (class(a), class(b));
        let _declared = match relation {
            Relation::SubClassOf => model.declare_subclass(&a, &b),
            Relation::EquivalentClasses => model.declare_equivalent(&a, &b),
            Relation::DisjointClasses => model.declare_disjoint(&a, &b),
        }
        .unwrap();
    }
    assert_eq!(model.warnings().len(), 5);
    assert_eq!(
        model
            .warnings()
            .iter()
            .filter(|w| w.kind() == ConflictKind::Derived)
            .count(),
        1
    );

    let classes = model.classes().cloned().collect::<Vec<_>>();
    for a in &classes {
        for b in &classes {
            let holding = [
                model.is_sub_class_of(a, b),
                model.is_sub_class_of(b, a),
                model.is_equivalent_to(a, b),
                model.is_disjoint_with(a, b),
            ];
            assert!(holding.iter().filter(|h| **h).count() <= 1, "{a} {b}");
        }
    }
}

#[test]
fn test_round_trip_keeps_inferred_relations() {
    let mut model = model_with(&["Animal", "Mammal", "Dog", "Canine", "Plant", "Tree"]);
    let (animal, mammal, dog) = (class("Animal"), class("Mammal"), class("Dog"));
    let (canine, plant, tree) = (class("Canine"), class("Plant"), class("Tree"));
    assert!(model.declare_disjoint(&dog, &tree).unwrap().is_accepted());
    assert!(model.declare_disjoint(&animal, &plant).unwrap().is_accepted());
    assert!(model.declare_subclass(&dog, &canine).unwrap().is_accepted());
    assert!(model.declare_equivalent(&canine, &mammal).unwrap().is_accepted());
    assert!(model.declare_subclass(&mammal, &animal).unwrap().is_accepted());
    assert!(model.declare_subclass(&tree, &plant).unwrap().is_accepted());
    assert!(model.warnings().is_empty());

    let graph = model.to_graph(&ExportOptions::default());
    let decoded = TripleDecoder::new(&graph).decode_model().unwrap();
    assert!(decoded.warnings().is_empty());
    assert!(decoded.is_disjoint_with(&dog, &tree));
    assert!(decoded.is_sub_class_of(&dog, &animal));
    assert!(decoded.is_disjoint_with(&canine, &tree));
    for options in [
        ExportOptions::default(),
        ExportOptions::default().with_inferred(true),
    ] {
        assert_eq!(decoded.to_triples(&options), model.to_triples(&options));
    }
}

#[test]
fn test_all_disjoint_groups() {
    let mut model = model_with(&["A", "B", "C"]);
    let declared = model
        .declare_all_disjoint(
            class("Group"),
            vec![class("A").into(), class("B").into(), class("C").into()],
        )
        .unwrap();
    assert!(declared.is_accepted());
    assert!(model.is_all_disjoint(&class("Group")));
    assert!(model.is_disjoint_with(&class("A"), &class("C")));
    assert!(model.is_disjoint_with(&class("C"), &class("B")));

    let declared = model.declare_equivalent(&class("A"), &class("B")).unwrap();
    assert_eq!(
        declared.conflict().map(TaxonomyConflict::kind),
        Some(ConflictKind::SharedAllDisjoint)
    );
}

#[test]
fn test_redeclaration_is_a_no_op() {
    let mut model = model_with(&["A", "B"]);
    assert!(model.declare_disjoint(&class("A"), &class("B")).unwrap().is_accepted());
    let before = model.to_triples(&ExportOptions::default());
    assert!(model.declare_disjoint(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_disjoint(&class("B"), &class("A")).unwrap().is_accepted());
    assert_eq!(model.to_triples(&ExportOptions::default()), before);
    assert!(model.warnings().is_empty());
}

#[test]
fn test_unknown_classes() {
    let model = model_with(&["A"]);
    assert!(model.sub_classes_of(&class("Unknown")).is_empty());
    assert!(model.disjoint_classes_with(&class("Unknown")).is_empty());
    assert!(model.key_properties_of(&class("Unknown")).is_empty());
    assert!(!model.is_sub_class_of(&class("A"), &class("Unknown")));
    assert!(!model.is_equivalent_to(&class("A"), &class("A")));
}

#[test]
fn test_inferred_export() {
    let mut model = model_with(&["A", "B", "C"]);
    assert!(model.declare_subclass(&class("A"), &class("B")).unwrap().is_accepted());
    assert!(model.declare_subclass(&class("B"), &class("C")).unwrap().is_accepted());
    // Not declared: only shows up in the closure
    assert!(model.declare_disjoint(&class("C"), &class("External")).unwrap().is_accepted());

    let declared = model.to_graph(&ExportOptions::default());
    let inferred = model.to_graph(&ExportOptions::default().with_inferred(true));
    let (a, c, external) = (class("A"), class("C"), class("External"));
    assert!(!declared.contains(TripleRef::new(a.iri(), rdfs::SUB_CLASS_OF, c.iri())));
    assert!(inferred.contains(TripleRef::new(a.iri(), rdfs::SUB_CLASS_OF, c.iri())));
    assert!(inferred.contains(TripleRef::new(c.iri(), owl::DISJOINT_WITH, external.iri())));
    assert!(!inferred.contains(TripleRef::new(a.iri(), owl::DISJOINT_WITH, external.iri())));
    for triple in declared.iter() {
        assert!(inferred.contains(triple));
    }
}

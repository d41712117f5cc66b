//! Class model tests going through whole exports and imports.

use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Literal, TripleRef};
use oxtbox::vocab::owl;
use oxtbox::{
    AnnotationProperty, ClassExpression, ClassKind, ClassModel, DataProperty, ExportOptions,
    Individual, KeyProperty, ObjectProperty, OwlClass, OwlXmlParser, OwlXmlSerializer,
    TripleDecoder,
};

fn class(name: &str) -> OwlClass {
    OwlClass::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

fn object_property(name: &str) -> ObjectProperty {
    ObjectProperty::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

fn individual(name: &str) -> Individual {
    Individual::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

/// A small pet shop ontology using every kind of class.
fn pet_shop() -> ClassModel {
    let mut model = ClassModel::new();
    for name in ["Animal", "Dog", "Cat", "Fish", "Person", "Legacy"] {
        model.declare_class(class(name));
    }
    model
        .declare_restriction(
            class("DogOwner"),
            ClassExpression::object_some_values_from(owns(), class("Dog").into()),
        )
        .unwrap();
    model
        .declare_composite(
            class("Furry"),
            ClassExpression::object_union_of([class("Dog").into(), class("Cat").into()]).unwrap(),
        )
        .unwrap();
    model
        .declare_composite(
            class("Color"),
            ClassExpression::object_one_of([individual("red"), individual("green")]).unwrap(),
        )
        .unwrap();
    model
        .declare_disjoint_union(
            class("Pet"),
            vec![class("Dog").into(), class("Cat").into(), class("Fish").into()],
        )
        .unwrap();
    assert!(
        model
            .declare_all_disjoint(
                class("Species"),
                vec![class("Dog").into(), class("Cat").into(), class("Fish").into()],
            )
            .unwrap()
            .is_accepted()
    );
    model
        .declare_has_key(
            class("Person"),
            vec![
                KeyProperty::Data(
                    DataProperty::new_from_iri("http://example.org/ssn").unwrap(),
                ),
                KeyProperty::Object(object_property("bornIn")),
            ],
        )
        .unwrap();
    for name in ["Dog", "Cat", "Fish"] {
        assert!(
            model
                .declare_subclass(&class(name), &class("Animal"))
                .unwrap()
                .is_accepted()
        );
    }
    assert!(
        model
            .declare_disjoint(&class("Person"), &class("Animal"))
            .unwrap()
            .is_accepted()
    );
    model.annotate_class(
        class("Dog"),
        AnnotationProperty::from(rdfs::LABEL),
        Literal::new_language_tagged_literal("dog", "en").unwrap(),
    );
    model.deprecate_class(class("Legacy"));
    model
}

fn owns() -> ObjectProperty {
    object_property("owns")
}

#[test]
fn test_kinds() {
    let model = pet_shop();
    assert_eq!(model.kind_of(&class("Dog")), Some(ClassKind::Simple));
    assert_eq!(model.kind_of(&class("DogOwner")), Some(ClassKind::Restriction));
    assert_eq!(model.kind_of(&class("Furry")), Some(ClassKind::Composite));
    assert_eq!(model.kind_of(&class("Color")), Some(ClassKind::Enumerate));
    assert_eq!(model.kind_of(&class("Pet")), Some(ClassKind::DisjointUnion));
    assert_eq!(model.kind_of(&class("Species")), Some(ClassKind::AllDisjoint));
    assert_eq!(model.kind_of(&class("Unknown")), None);
    assert!(model.is_deprecated(&class("Legacy")));
    assert_eq!(model.members_of(&class("Pet")).len(), 3);
    assert_eq!(model.key_properties_of(&class("Person")).len(), 2);
    assert_eq!(model.annotations_of(&class("Dog")).count(), 1);
    assert!(model.warnings().is_empty());
}

#[test]
fn test_dl_strings() {
    let model = pet_shop();
    let dl = |name: &str| {
        model
            .expression_of(&class(name))
            .map(ClassExpression::to_dl_string)
    };
    assert_eq!(dl("DogOwner").as_deref(), Some("(owns some Dog)"));
    assert_eq!(dl("Furry").as_deref(), Some("(Dog or Cat)"));
    assert_eq!(dl("Color").as_deref(), Some("({red,green})"));
    assert_eq!(dl("Dog"), None);
}

#[test]
fn test_closure_through_the_model() {
    let model = pet_shop();
    assert!(model.is_disjoint_with(&class("Dog"), &class("Person")));
    assert!(model.is_disjoint_with(&class("Cat"), &class("Fish")));
    assert!(model.is_sub_class_of(&class("Fish"), &class("Animal")));
    assert_eq!(
        model.sub_classes_of(&class("Animal")),
        [class("Dog"), class("Cat"), class("Fish")]
    );
}

#[test]
fn test_export_content() {
    let model = pet_shop();
    let graph = model.to_graph(&ExportOptions::default());
    let (dog, animal) = (class("Dog"), class("Animal"));
    let (owner, legacy) = (class("DogOwner"), class("Legacy"));
    assert!(graph.contains(TripleRef::new(dog.iri(), rdfs::SUB_CLASS_OF, animal.iri())));
    assert!(graph.contains(TripleRef::new(owner.iri(), rdf::TYPE, owl::RESTRICTION)));
    assert!(!graph.contains(TripleRef::new(owner.iri(), rdf::TYPE, owl::CLASS)));
    assert!(graph.contains(TripleRef::new(legacy.iri(), rdf::TYPE, owl::DEPRECATED_CLASS)));
    assert!(graph.contains(TripleRef::new(
        dog.iri(),
        rdfs::LABEL,
        &Literal::new_language_tagged_literal("dog", "en").unwrap(),
    )));

    let without = model.to_graph(&ExportOptions::default().with_annotations(false));
    assert_eq!(without.len() + 1, graph.len());
}

#[test]
fn test_idempotent_annotation() {
    let mut model = pet_shop();
    let before = model.to_triples(&ExportOptions::default());
    assert!(!model.annotate_class(
        class("Dog"),
        AnnotationProperty::from(rdfs::LABEL),
        Literal::new_language_tagged_literal("dog", "en").unwrap(),
    ));
    assert_eq!(model.to_triples(&ExportOptions::default()), before);

    assert!(model.annotate_class(
        class("Dog"),
        AnnotationProperty::from(rdfs::COMMENT),
        Literal::new_simple_literal("Barks"),
    ));
    assert_eq!(model.to_triples(&ExportOptions::default()).len(), before.len() + 1);
}

#[test]
fn test_triple_round_trip() {
    let model = pet_shop();
    let graph = model.to_graph(&ExportOptions::default());
    let decoded = TripleDecoder::new(&graph).decode_model().unwrap();

    assert_eq!(decoded.len(), model.len());
    for class in model.classes() {
        assert_eq!(decoded.kind_of(class), model.kind_of(class), "{class}");
        assert_eq!(decoded.expression_of(class), model.expression_of(class), "{class}");
    }
    assert!(decoded.is_deprecated(&class("Legacy")));
    assert!(decoded.warnings().is_empty());
    assert_eq!(
        decoded.to_triples(&ExportOptions::default()),
        model.to_triples(&ExportOptions::default())
    );
}

#[test]
fn test_triple_round_trip_replays_the_gate() {
    let mut graph = oxrdf::Graph::new();
    let (a, b) = (class("A"), class("B"));
    graph.insert(TripleRef::new(a.iri(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(b.iri(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(a.iri(), rdfs::SUB_CLASS_OF, b.iri()));
    graph.insert(TripleRef::new(a.iri(), owl::DISJOINT_WITH, b.iri()));

    let model = TripleDecoder::new(&graph).decode_model().unwrap();
    assert!(model.is_sub_class_of(&a, &b));
    assert!(!model.is_disjoint_with(&a, &b));
    assert_eq!(model.warnings().len(), 1);
    assert_eq!(model.to_graph(&ExportOptions::default()).len(), 3);
}

#[test]
fn test_round_trip_keeps_undeclared_classes_out() {
    let mut model = ClassModel::new();
    model
        .declare_restriction(
            class("KnowsPerson"),
            ClassExpression::object_some_values_from(
                object_property("knows"),
                class("Person").into(),
            ),
        )
        .unwrap();
    model
        .declare_has_key(
            class("Citizen"),
            vec![KeyProperty::Object(object_property("bornIn"))],
        )
        .unwrap();
    let graph = model.to_graph(&ExportOptions::default());
    let person = class("Person");
    assert!(!graph.contains(TripleRef::new(person.iri(), rdf::TYPE, owl::CLASS)));

    let decoded = TripleDecoder::new(&graph).decode_model().unwrap();
    assert_eq!(decoded.len(), 1);
    assert!(!decoded.contains_class(&person));
    assert!(!decoded.contains_class(&class("Citizen")));
    assert_eq!(decoded.key_properties_of(&class("Citizen")).len(), 1);
    assert_eq!(
        decoded.to_triples(&ExportOptions::default()),
        model.to_triples(&ExportOptions::default())
    );
}

#[test]
fn test_round_trip_after_a_rejected_equivalence() {
    let mut model = ClassModel::new();
    for name in ["X", "Y", "Z"] {
        model.declare_class(class(name));
    }
    let (x, y, z) = (class("X"), class("Y"), class("Z"));
    assert!(model.declare_disjoint(&x, &y).unwrap().is_accepted());
    assert!(model.declare_subclass(&x, &z).unwrap().is_accepted());
    assert!(model.declare_equivalent(&z, &y).unwrap().is_rejected());

    let decoded = TripleDecoder::new(&model.to_graph(&ExportOptions::default()))
        .decode_model()
        .unwrap();
    assert!(decoded.warnings().is_empty());
    assert!(decoded.is_disjoint_with(&x, &y));
    assert!(decoded.is_sub_class_of(&x, &z));
    assert_eq!(
        decoded.to_triples(&ExportOptions::default()),
        model.to_triples(&ExportOptions::default())
    );
}

#[test]
fn test_owl_xml_round_trip() {
    let model = pet_shop();
    let xml = OwlXmlSerializer::new()
        .with_indent()
        .serialize_model(&model, Vec::new())
        .unwrap();
    let parsed = OwlXmlParser::new().parse_model(xml.as_slice()).unwrap();

    assert_eq!(parsed.len(), model.len());
    assert!(parsed.is_deprecated(&class("Legacy")));
    assert!(parsed.is_all_disjoint(&class("Species")));
    assert_eq!(
        parsed.to_triples(&ExportOptions::default()),
        model.to_triples(&ExportOptions::default()),
        "{}",
        String::from_utf8_lossy(&xml)
    );
}

#[test]
fn test_owl_xml_document() {
    let xml = br#"<?xml version="1.0"?>
<Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.org/">
  <Declaration><Class IRI="http://example.org/Person"/></Declaration>
  <Declaration><ObjectProperty IRI="http://example.org/knows"/></Declaration>
  <EquivalentClasses>
    <Class IRI="http://example.org/Parent"/>
    <ObjectMinCardinality cardinality="1">
      <ObjectProperty IRI="http://example.org/hasChild"/>
      <Class IRI="http://example.org/Person"/>
    </ObjectMinCardinality>
  </EquivalentClasses>
  <SubClassOf>
    <Class IRI="http://example.org/Parent"/>
    <Class IRI="http://example.org/Person"/>
  </SubClassOf>
  <AnnotationAssertion>
    <AnnotationProperty IRI="http://www.w3.org/2000/01/rdf-schema#label"/>
    <IRI>http://example.org/Person</IRI>
    <Literal xml:lang="en">person</Literal>
  </AnnotationAssertion>
</Ontology>"#;
    let model = OwlXmlParser::new().parse_model(xml.as_slice()).unwrap();

    assert!(model.is_restriction(&class("Parent")));
    assert!(model.is_sub_class_of(&class("Parent"), &class("Person")));
    assert_eq!(
        model
            .expression_of(&class("Parent"))
            .map(ClassExpression::to_dl_string)
            .as_deref(),
        Some("(hasChild min 1 Person)")
    );
    let person = class("Person");
    let annotations = model.annotations_of(&person).collect::<Vec<_>>();
    assert_eq!(annotations.len(), 1);
}

#[test]
fn test_axioms_are_listed_in_declaration_order() {
    let mut model = ClassModel::new();
    model.declare_class(class("A"));
    model.declare_class(class("B"));
    assert!(model.declare_subclass(&class("A"), &class("B")).unwrap().is_accepted());
    let names = model
        .axioms()
        .iter()
        .map(|axiom| axiom.construct_name())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Declaration", "Declaration", "SubClassOf"]);
}

#[test]
fn test_data_has_value_literal() {
    let mut model = ClassModel::new();
    let age = DataProperty::new_from_iri("http://example.org/age").unwrap();
    model
        .declare_restriction(
            class("Adult"),
            ClassExpression::data_has_value(age, Literal::new_typed_literal("18", xsd::INTEGER)),
        )
        .unwrap();
    let graph = model.to_graph(&ExportOptions::default());
    let decoded = TripleDecoder::new(&graph).decode_model().unwrap();
    assert_eq!(
        decoded.expression_of(&class("Adult")),
        model.expression_of(&class("Adult"))
    );
}

#[cfg(feature = "async-tokio")]
#[tokio::test]
async fn test_async_export() {
    let model = pet_shop();
    let options = ExportOptions::default().with_inferred(true);
    assert_eq!(model.to_graph_async(&options).await, model.to_graph(&options));
}

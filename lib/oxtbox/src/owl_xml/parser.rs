use super::Element;
use crate::axiom::{Axiom, KeyProperty};
use crate::entity::{AnnotationProperty, DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use crate::error::{InvalidExpression, MalformedKind, MalformedStructure, OwlXmlError};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::model::{ClassKind, ClassModel};
use crate::parser::{DecoderConfig, parse_cardinality};
use crate::reasoner::Declared;
use crate::vocab::owl;
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term};
use std::io::{BufReader, Read};
use tracing::debug;

/// An [OWL/XML](https://www.w3.org/TR/owl2-xml-serialization/) parser.
///
/// Element names are matched without their namespace prefix.
///
/// ```
/// use oxtbox::{ClassExpression, OwlClass, OwlXmlParser};
///
/// let expression = OwlXmlParser::new().parse_expression(
///     b"<ObjectComplementOf><Class IRI=\"http://example.org/A\"/></ObjectComplementOf>".as_slice(),
/// )?;
/// assert_eq!(
///     expression,
///     ClassExpression::object_complement_of(OwlClass::new_from_iri("http://example.org/A")?.into())
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct OwlXmlParser {
    config: DecoderConfig,
}

impl OwlXmlParser {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only [`DecoderConfig::max_depth`] applies to OWL/XML.
    #[inline]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads a document whose root element is a class expression.
    pub fn parse_expression(&self, read: impl Read) -> Result<ClassExpression, OwlXmlError> {
        let root = Element::read(BufReader::new(read))?;
        Ok(self.expression(&root, 0)?)
    }

    /// Reads a document whose root element is an axiom.
    pub fn parse_axiom(&self, read: impl Read) -> Result<Axiom, OwlXmlError> {
        let root = Element::read(BufReader::new(read))?;
        Ok(self.axiom(&root)?)
    }

    /// Reads the axioms of an `<Ontology>` document, in document order.
    ///
    /// Elements that are not class axioms (property axioms, imports...) are skipped.
    pub fn parse_axioms(&self, read: impl Read) -> Result<Vec<Axiom>, OwlXmlError> {
        let root = Element::read(BufReader::new(read))?;
        Ok(self.ontology(&root)?)
    }

    /// Reads an `<Ontology>` document into a class model.
    ///
    /// Relations go through the consistency gate of the model in document order.
    /// Axioms the model cannot represent, such as subsumption between anonymous
    /// expressions, are skipped.
    pub fn parse_model(&self, read: impl Read) -> Result<ClassModel, OwlXmlError> {
        let root = Element::read(BufReader::new(read))?;
        let mut model = ClassModel::new();
        for axiom in self.ontology(&root)? {
            let name = axiom.construct_name();
            let declared = load(&mut model, axiom)
                .map_err(|e| MalformedStructure::invalid_expression(name, &e))?;
            if let Declared::Rejected(conflict) = declared {
                debug!("{conflict}");
            }
        }
        debug!(
            classes = model.len(),
            warnings = model.warnings().len(),
            "parsed OWL/XML class model"
        );
        Ok(model)
    }

    fn ontology(&self, root: &Element) -> Result<Vec<Axiom>, MalformedStructure> {
        if root.name != "Ontology" {
            return Err(MalformedStructure::new(
                root.tag(),
                MalformedKind::UnknownConstruct,
                "the document root must be <Ontology>",
            ));
        }
        let mut axioms = Vec::new();
        for child in &root.children {
            let is_class_declaration = child.name != "Declaration"
                || child.children.first().is_some_and(|e| e.name == "Class");
            if is_class_axiom(&child.name) && is_class_declaration {
                axioms.push(self.axiom(child)?);
            } else {
                debug!(element = %child.name, "skipping a non class axiom");
            }
        }
        Ok(axioms)
    }

    fn axiom(&self, element: &Element) -> Result<Axiom, MalformedStructure> {
        let invalid = |e: InvalidExpression| MalformedStructure::invalid_expression(element.tag(), &e);
        match (element.name.as_str(), element.children.as_slice()) {
            ("Declaration", [declared]) => Ok(Axiom::DeclareClass(class(declared)?)),
            ("SubClassOf", [sub, sup]) => {
                Axiom::sub_class_of(self.expression(sub, 0)?, self.expression(sup, 0)?)
                    .map_err(invalid)
            }
            ("EquivalentClasses", [a, b]) => {
                Axiom::equivalent_classes(self.expression(a, 0)?, self.expression(b, 0)?)
                    .map_err(invalid)
            }
            ("DisjointClasses", [a, b]) if element.attribute("IRI").is_none() => {
                Axiom::disjoint_classes(self.expression(a, 0)?, self.expression(b, 0)?)
                    .map_err(invalid)
            }
            ("DisjointClasses", members) => {
                let id = element
                    .attribute("IRI")
                    .map(|iri| OwlClass::new_from_iri(iri).map_err(invalid))
                    .transpose()?;
                Axiom::all_disjoint_classes(id, self.expressions(members, 0)?).map_err(invalid)
            }
            ("DisjointUnion", [class_element, members @ ..]) => {
                Axiom::disjoint_union(class(class_element)?, self.expressions(members, 0)?)
                    .map_err(invalid)
            }
            ("HasKey", [class_element, properties @ ..]) => Axiom::has_key(
                self.expression(class_element, 0)?,
                properties
                    .iter()
                    .map(key_property)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .map_err(invalid),
            ("AnnotationAssertion", [property, subject, value]) => {
                if property.name != "AnnotationProperty" {
                    return Err(unexpected(property, "<AnnotationProperty>"));
                }
                let subject = match subject.name.as_str() {
                    "IRI" => NamedOrBlankNode::from(iri_text(subject)?),
                    "AnonymousIndividual" => blank(subject)?.into(),
                    _ => return Err(unexpected(subject, "<IRI> or <AnonymousIndividual>")),
                };
                let value = match value.name.as_str() {
                    "IRI" => Term::from(iri_text(value)?),
                    "AnonymousIndividual" => blank(value)?.into(),
                    "Literal" => literal(value)?.into(),
                    _ => {
                        return Err(unexpected(
                            value,
                            "<IRI>, <AnonymousIndividual> or <Literal>",
                        ));
                    }
                };
                Ok(Axiom::AnnotationAssertion {
                    subject,
                    property: AnnotationProperty::new(iri(property)?).map_err(invalid)?,
                    value,
                })
            }
            (name, children) if is_class_axiom(name) => Err(MalformedStructure::new(
                element.tag(),
                MalformedKind::MissingProperty,
                format!("unexpected number of child elements: {}", children.len()),
            )),
            _ => Err(MalformedStructure::new(
                element.tag(),
                MalformedKind::UnknownConstruct,
                "unknown axiom",
            )),
        }
    }

    fn expressions(
        &self,
        elements: &[Element],
        depth: usize,
    ) -> Result<Vec<ClassExpression>, MalformedStructure> {
        elements
            .iter()
            .map(|e| self.expression(e, depth))
            .collect()
    }

    fn expression(
        &self,
        element: &Element,
        depth: usize,
    ) -> Result<ClassExpression, MalformedStructure> {
        if depth > self.config.max_depth {
            return Err(MalformedStructure::new(
                element.tag(),
                MalformedKind::TooDeep,
                format!("nesting deeper than {}", self.config.max_depth),
            ));
        }
        let invalid = |e: InvalidExpression| MalformedStructure::invalid_expression(element.tag(), &e);
        let depth = depth + 1;
        match (element.name.as_str(), element.children.as_slice()) {
            ("Class", []) => Ok(class(element)?.into()),
            ("ObjectIntersectionOf", operands) => {
                ClassExpression::object_intersection_of(self.expressions(operands, depth)?)
                    .map_err(invalid)
            }
            ("ObjectUnionOf", operands) => {
                ClassExpression::object_union_of(self.expressions(operands, depth)?)
                    .map_err(invalid)
            }
            ("ObjectComplementOf", [operand]) => Ok(ClassExpression::object_complement_of(
                self.expression(operand, depth)?,
            )),
            ("ObjectOneOf", individuals) => ClassExpression::object_one_of(
                individuals
                    .iter()
                    .map(individual)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .map_err(invalid),
            ("ObjectSomeValuesFrom", [property, filler]) => {
                Ok(ClassExpression::object_some_values_from(
                    object_property(property)?,
                    self.expression(filler, depth)?,
                ))
            }
            ("ObjectAllValuesFrom", [property, filler]) => {
                Ok(ClassExpression::object_all_values_from(
                    object_property(property)?,
                    self.expression(filler, depth)?,
                ))
            }
            ("ObjectHasValue", [property, value]) => Ok(ClassExpression::object_has_value(
                object_property(property)?,
                individual(value)?,
            )),
            ("ObjectHasSelf", [property]) => {
                Ok(ClassExpression::object_has_self(object_property(property)?))
            }
            (
                name @ ("ObjectMinCardinality" | "ObjectMaxCardinality" | "ObjectExactCardinality"),
                [property, filler @ ..],
            ) if filler.len() <= 1 => {
                let cardinality = cardinality(element)?;
                let property = object_property(property)?;
                let filler = filler
                    .first()
                    .map(|f| self.expression(f, depth))
                    .transpose()?;
                Ok(match name {
                    "ObjectMinCardinality" => {
                        ClassExpression::object_min_cardinality(property, cardinality, filler)
                    }
                    "ObjectMaxCardinality" => {
                        ClassExpression::object_max_cardinality(property, cardinality, filler)
                    }
                    _ => ClassExpression::object_exact_cardinality(property, cardinality, filler),
                })
            }
            ("DataSomeValuesFrom", [property, range]) => Ok(ClassExpression::data_some_values_from(
                data_property(property)?,
                data_range(range)?,
            )),
            ("DataAllValuesFrom", [property, range]) => Ok(ClassExpression::data_all_values_from(
                data_property(property)?,
                data_range(range)?,
            )),
            ("DataHasValue", [property, value]) => Ok(ClassExpression::data_has_value(
                data_property(property)?,
                literal(value)?,
            )),
            (
                name @ ("DataMinCardinality" | "DataMaxCardinality" | "DataExactCardinality"),
                [property, range @ ..],
            ) if range.len() <= 1 => {
                let cardinality = cardinality(element)?;
                let property = data_property(property)?;
                let range = range.first().map(data_range).transpose()?;
                Ok(match name {
                    "DataMinCardinality" => {
                        ClassExpression::data_min_cardinality(property, cardinality, range)
                    }
                    "DataMaxCardinality" => {
                        ClassExpression::data_max_cardinality(property, cardinality, range)
                    }
                    _ => ClassExpression::data_exact_cardinality(property, cardinality, range),
                })
            }
            (name, children) if is_class_expression(name) => Err(MalformedStructure::new(
                element.tag(),
                MalformedKind::MissingProperty,
                format!("unexpected number of child elements: {}", children.len()),
            )),
            _ => Err(MalformedStructure::new(
                element.tag(),
                MalformedKind::UnknownConstruct,
                "unknown class expression",
            )),
        }
    }
}

/// Applies a decoded axiom to the model.
fn load(model: &mut ClassModel, axiom: Axiom) -> Result<Declared, InvalidExpression> {
    match axiom {
        Axiom::DeclareClass(class) => {
            model.declare_class(class);
        }
        Axiom::SubClassOf {
            sub_class: ClassExpression::Class(sub),
            super_class: ClassExpression::Class(sup),
        } => return model.declare_subclass(&sub, &sup),
        Axiom::EquivalentClasses(ClassExpression::Class(a), ClassExpression::Class(b)) => {
            return model.declare_equivalent(&a, &b);
        }
        Axiom::EquivalentClasses(ClassExpression::Class(class), expression)
        | Axiom::EquivalentClasses(expression, ClassExpression::Class(class))
            if model
                .kind_of(&class)
                .is_none_or(|kind| kind == ClassKind::Simple) =>
        {
            if expression.is_restriction() {
                model.declare_restriction(class, expression)?;
            } else {
                model.declare_composite(class, expression)?;
            }
        }
        Axiom::DisjointClasses(ClassExpression::Class(a), ClassExpression::Class(b)) => {
            return model.declare_disjoint(&a, &b);
        }
        Axiom::AllDisjointClasses {
            id: Some(id),
            members,
        } => return model.declare_all_disjoint(id, members),
        Axiom::AllDisjointClasses { id: None, members } => {
            // No group to store: falls back to pairwise disjointness of the named members
            let named = members
                .iter()
                .filter_map(ClassExpression::as_class)
                .collect::<Vec<_>>();
            for (i, a) in named.iter().enumerate() {
                for b in &named[i + 1..] {
                    let declared = model.declare_disjoint(a, b)?;
                    if declared.is_rejected() {
                        return Ok(declared);
                    }
                }
            }
        }
        Axiom::DisjointUnion { class, members } => model.declare_disjoint_union(class, members)?,
        Axiom::HasKey {
            class: ClassExpression::Class(class),
            properties,
        } => model.declare_has_key(class, properties)?,
        Axiom::AnnotationAssertion {
            subject: NamedOrBlankNode::NamedNode(subject),
            property,
            value,
        } => {
            let class = OwlClass::new(subject)?;
            if property.as_named_node() == owl::DEPRECATED && is_true(&value) {
                model.deprecate_class(class);
            } else {
                model.annotate_class(class, property, value);
            }
        }
        axiom => debug!(
            axiom = axiom.construct_name(),
            "skipping an axiom the class model cannot represent"
        ),
    }
    Ok(Declared::Accepted)
}

fn is_true(value: &Term) -> bool {
    matches!(value, Term::Literal(l) if matches!(l.value(), "true" | "1"))
}

fn is_class_axiom(name: &str) -> bool {
    matches!(
        name,
        "Declaration"
            | "SubClassOf"
            | "EquivalentClasses"
            | "DisjointClasses"
            | "DisjointUnion"
            | "HasKey"
            | "AnnotationAssertion"
    )
}

fn is_class_expression(name: &str) -> bool {
    matches!(
        name,
        "Class"
            | "ObjectIntersectionOf"
            | "ObjectUnionOf"
            | "ObjectComplementOf"
            | "ObjectOneOf"
            | "ObjectSomeValuesFrom"
            | "ObjectAllValuesFrom"
            | "ObjectHasValue"
            | "ObjectHasSelf"
            | "ObjectMinCardinality"
            | "ObjectMaxCardinality"
            | "ObjectExactCardinality"
            | "DataSomeValuesFrom"
            | "DataAllValuesFrom"
            | "DataHasValue"
            | "DataMinCardinality"
            | "DataMaxCardinality"
            | "DataExactCardinality"
    )
}

fn unexpected(element: &Element, expected: &str) -> MalformedStructure {
    MalformedStructure::new(
        element.tag(),
        MalformedKind::UnknownConstruct,
        format!("expecting {expected}"),
    )
}

fn iri(element: &Element) -> Result<NamedNode, MalformedStructure> {
    let value = element
        .attribute("IRI")
        .ok_or_else(|| MalformedStructure::missing(element.tag(), "IRI attribute"))?;
    NamedNode::new(value).map_err(|e| {
        MalformedStructure::new(element.tag(), MalformedKind::InvalidValue, e.to_string())
    })
}

/// The IRI content of an `<IRI>` element.
fn iri_text(element: &Element) -> Result<NamedNode, MalformedStructure> {
    NamedNode::new(element.text.trim()).map_err(|e| {
        MalformedStructure::new(element.tag(), MalformedKind::InvalidValue, e.to_string())
    })
}

fn blank(element: &Element) -> Result<BlankNode, MalformedStructure> {
    let id = element
        .attribute("nodeID")
        .ok_or_else(|| MalformedStructure::missing(element.tag(), "nodeID attribute"))?;
    BlankNode::new(id).map_err(|e| {
        MalformedStructure::new(element.tag(), MalformedKind::InvalidValue, e.to_string())
    })
}

fn entity<T>(
    element: &Element,
    name: &str,
    build: impl FnOnce(NamedNode) -> Result<T, InvalidExpression>,
) -> Result<T, MalformedStructure> {
    if element.name != name {
        return Err(unexpected(element, &format!("<{name}>")));
    }
    build(iri(element)?).map_err(|e| MalformedStructure::invalid_expression(element.tag(), &e))
}

fn class(element: &Element) -> Result<OwlClass, MalformedStructure> {
    entity(element, "Class", OwlClass::new)
}

fn data_property(element: &Element) -> Result<DataProperty, MalformedStructure> {
    entity(element, "DataProperty", DataProperty::new)
}

fn object_property(element: &Element) -> Result<ObjectPropertyExpression, MalformedStructure> {
    match (element.name.as_str(), element.children.as_slice()) {
        ("ObjectInverseOf", [property]) => Ok(ObjectPropertyExpression::inverse_of(entity(
            property,
            "ObjectProperty",
            ObjectProperty::new,
        )?)),
        _ => Ok(entity(element, "ObjectProperty", ObjectProperty::new)?.into()),
    }
}

fn key_property(element: &Element) -> Result<KeyProperty, MalformedStructure> {
    match element.name.as_str() {
        "DataProperty" => Ok(data_property(element)?.into()),
        _ => Ok(entity(element, "ObjectProperty", ObjectProperty::new)?.into()),
    }
}

fn individual(element: &Element) -> Result<Individual, MalformedStructure> {
    match element.name.as_str() {
        "AnonymousIndividual" => Ok(Individual::anonymous(blank(element)?)),
        _ => entity(element, "NamedIndividual", Individual::named),
    }
}

fn data_range(element: &Element) -> Result<DataRange, MalformedStructure> {
    match element.name.as_str() {
        "DataOneOf" => DataRange::data_one_of(
            element
                .children
                .iter()
                .map(literal)
                .collect::<Result<Vec<_>, _>>()?,
        )
        .map_err(|e| MalformedStructure::invalid_expression(element.tag(), &e)),
        _ => Ok(entity(element, "Datatype", Datatype::new)?.into()),
    }
}

fn literal(element: &Element) -> Result<Literal, MalformedStructure> {
    if element.name != "Literal" {
        return Err(unexpected(element, "<Literal>"));
    }
    let value = element.text.as_str();
    if let Some(language) = element.attribute("xml:lang") {
        return Literal::new_language_tagged_literal(value, language).map_err(|e| {
            MalformedStructure::new(element.tag(), MalformedKind::InvalidValue, e.to_string())
        });
    }
    match element.attribute("datatypeIRI") {
        Some(datatype) => {
            let datatype = NamedNode::new(datatype).map_err(|e| {
                MalformedStructure::new(element.tag(), MalformedKind::InvalidValue, e.to_string())
            })?;
            Ok(Literal::new_typed_literal(value, datatype))
        }
        None => Ok(Literal::new_simple_literal(value)),
    }
}

fn cardinality(element: &Element) -> Result<u32, MalformedStructure> {
    let value = element
        .attribute("cardinality")
        .ok_or_else(|| MalformedStructure::missing(element.tag(), "cardinality attribute"))?;
    parse_cardinality(value.trim()).ok_or_else(|| {
        MalformedStructure::new(
            element.tag(),
            MalformedKind::InvalidCardinality,
            format!("'{value}' is not a non-negative integer"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl_xml::OwlXmlSerializer;
    use oxrdf::vocab::xsd;

    fn round_trip(expression: &ClassExpression) -> ClassExpression {
        let xml = OwlXmlSerializer::new()
            .with_indent()
            .serialize_expression(expression, Vec::new())
            .unwrap();
        OwlXmlParser::new().parse_expression(xml.as_slice()).unwrap()
    }

    fn class(name: &str) -> OwlClass {
        OwlClass::new_from_iri(format!("http://example.org/{name}")).unwrap()
    }

    #[test]
    fn object_expressions_round_trip() {
        let p = ObjectProperty::new_from_iri("http://example.org/p").unwrap();
        let expression = ClassExpression::object_intersection_of([
            ClassExpression::object_all_values_from(
                ObjectPropertyExpression::inverse_of(p.clone()),
                class("A").into(),
            ),
            ClassExpression::object_exact_cardinality(p.clone(), 3, Some(class("B").into())),
            ClassExpression::object_max_cardinality(p.clone(), 1, None),
            ClassExpression::object_has_self(p.clone()),
            ClassExpression::object_one_of([
                Individual::new_from_iri("http://example.org/i").unwrap(),
                Individual::anonymous(BlankNode::new("x").unwrap()),
            ])
            .unwrap(),
        ])
        .unwrap();
        assert_eq!(round_trip(&expression), expression);
    }

    #[test]
    fn data_expressions_round_trip() {
        let name = DataProperty::new_from_iri("http://example.org/name").unwrap();
        let expression = ClassExpression::object_union_of([
            ClassExpression::data_has_value(
                name.clone(),
                Literal::new_language_tagged_literal("  chat ", "fr").unwrap(),
            ),
            ClassExpression::data_some_values_from(
                name.clone(),
                DataRange::data_one_of([Literal::from("a < b"), Literal::from("")]).unwrap(),
            ),
            ClassExpression::data_min_cardinality(
                name,
                2,
                Some(Datatype::from(xsd::STRING).into()),
            ),
        ])
        .unwrap();
        assert_eq!(round_trip(&expression), expression);
    }

    #[test]
    fn rejects_malformed_elements() {
        let parser = OwlXmlParser::new();
        let error = parser
            .parse_expression(b"<ObjectSomeValuesFrom><ObjectProperty IRI=\"http://example.org/p\"/></ObjectSomeValuesFrom>".as_slice())
            .unwrap_err();
        assert!(matches!(
            error,
            OwlXmlError::Malformed(e) if e.kind() == MalformedKind::MissingProperty
        ));
        assert!(matches!(
            parser.parse_expression(b"<ObjectMinCardinality cardinality=\"-1\"><ObjectProperty IRI=\"http://example.org/p\"/></ObjectMinCardinality>".as_slice()),
            Err(OwlXmlError::Malformed(e)) if e.kind() == MalformedKind::InvalidCardinality
        ));
        assert!(matches!(
            parser.parse_expression(b"<ObjectMaxCardinality cardinality=\"+2\"><ObjectProperty IRI=\"http://example.org/p\"/></ObjectMaxCardinality>".as_slice()),
            Err(OwlXmlError::Malformed(e)) if e.kind() == MalformedKind::InvalidCardinality
        ));
        assert!(matches!(
            parser.parse_expression(b"<Foo/>".as_slice()),
            Err(OwlXmlError::Malformed(e)) if e.kind() == MalformedKind::UnknownConstruct
        ));
        assert!(matches!(
            parser.parse_expression(b"<ObjectUnionOf><Class IRI=\"http://example.org/A\"/></ObjectUnionOf>".as_slice()),
            Err(OwlXmlError::Malformed(e)) if e.kind() == MalformedKind::InvalidExpression
        ));
        assert!(matches!(
            parser.parse_expression(b"<Class IRI=\"http://example.org/A\">".as_slice()),
            Err(_)
        ));
    }

    #[test]
    fn depth_is_bounded() {
        let mut expression = ClassExpression::from(class("A"));
        for _ in 0..5 {
            expression = ClassExpression::object_complement_of(expression);
        }
        let xml = OwlXmlSerializer::new()
            .serialize_expression(&expression, Vec::new())
            .unwrap();
        let parser = OwlXmlParser::new().with_config(DecoderConfig::new().with_max_depth(3));
        assert!(matches!(
            parser.parse_expression(xml.as_slice()),
            Err(OwlXmlError::Malformed(e)) if e.kind() == MalformedKind::TooDeep
        ));
    }

    #[test]
    fn disjoint_classes_with_an_iri_form_a_group() {
        let axiom = OwlXmlParser::new()
            .parse_axiom(
                b"<DisjointClasses IRI=\"http://example.org/G\"><Class IRI=\"http://example.org/A\"/><Class IRI=\"http://example.org/B\"/></DisjointClasses>"
                    .as_slice(),
            )
            .unwrap();
        assert_eq!(
            axiom,
            Axiom::AllDisjointClasses {
                id: Some(class("G")),
                members: vec![class("A").into(), class("B").into()],
            }
        );
    }

    #[test]
    fn ontology_skips_property_axioms() {
        let axioms = OwlXmlParser::new()
            .parse_axioms(
                b"<Ontology xmlns=\"http://www.w3.org/2002/07/owl#\">\n  <Declaration><ObjectProperty IRI=\"http://example.org/p\"/></Declaration>\n  <TransitiveObjectProperty><ObjectProperty IRI=\"http://example.org/p\"/></TransitiveObjectProperty>\n  <Declaration><Class IRI=\"http://example.org/A\"/></Declaration>\n</Ontology>"
                    .as_slice(),
            )
            .unwrap();
        assert_eq!(axioms, [Axiom::DeclareClass(class("A"))]);
        assert!(OwlXmlParser::new().parse_axioms(b"<A/>".as_slice()).is_err());
    }
}

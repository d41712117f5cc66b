use super::Element;
use crate::axiom::{Axiom, KeyProperty};
use crate::entity::Individual;
use crate::error::{MalformedKind, MalformedStructure, OwlXmlError};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::model::ClassModel;
use crate::vocab::owl;
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, NamedOrBlankNode, Term};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};
use std::io::Write;

/// An [OWL/XML](https://www.w3.org/TR/owl2-xml-serialization/) serializer.
///
/// ```
/// use oxtbox::{ClassExpression, ObjectProperty, OwlClass, OwlXmlSerializer};
///
/// let knows = ObjectProperty::new_from_iri("http://example.org/knows")?;
/// let person = OwlClass::new_from_iri("http://example.org/Person")?;
/// let expression = ClassExpression::object_some_values_from(knows, person.into());
/// let xml = OwlXmlSerializer::new().serialize_expression(&expression, Vec::new())?;
/// assert_eq!(
///     String::from_utf8(xml)?,
///     "<ObjectSomeValuesFrom><ObjectProperty IRI=\"http://example.org/knows\"/><Class IRI=\"http://example.org/Person\"/></ObjectSomeValuesFrom>"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct OwlXmlSerializer {
    indent: bool,
}

impl OwlXmlSerializer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one element per line, indented by two spaces.
    #[inline]
    pub fn with_indent(mut self) -> Self {
        self.indent = true;
        self
    }

    fn writer<W: Write>(self, write: W) -> Writer<W> {
        if self.indent {
            Writer::new_with_indent(write, b' ', 2)
        } else {
            Writer::new(write)
        }
    }

    /// Writes a class expression element.
    pub fn serialize_expression<W: Write>(
        self,
        expression: &ClassExpression,
        write: W,
    ) -> Result<W, OwlXmlError> {
        let mut writer = self.writer(write);
        expression_element(expression).write(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Writes an axiom element.
    pub fn serialize_axiom<W: Write>(self, axiom: &Axiom, write: W) -> Result<W, OwlXmlError> {
        let mut writer = self.writer(write);
        axiom_element(axiom)?.write(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Writes a whole `<Ontology>` document with the axioms of the model.
    ///
    /// Deprecated classes get an `owl:deprecated` annotation.
    pub fn serialize_model<W: Write>(
        self,
        model: &ClassModel,
        write: W,
    ) -> Result<W, OwlXmlError> {
        let mut ontology = Element::new("Ontology").with_attribute("xmlns", owl::NAMESPACE);
        for axiom in model.axioms() {
            ontology.children.push(axiom_element(&axiom)?);
        }
        for class in model.classes().filter(|c| model.is_deprecated(c)) {
            ontology.children.push(axiom_element(&Axiom::AnnotationAssertion {
                subject: class.clone().into(),
                property: owl::DEPRECATED.into(),
                value: Literal::new_typed_literal("true", xsd::BOOLEAN).into(),
            })?);
        }
        let mut writer = self.writer(write);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        ontology.write(&mut writer)?;
        Ok(writer.into_inner())
    }
}

fn entity(name: &str, iri: &NamedNode) -> Element {
    Element::new(name).with_attribute("IRI", iri.as_str())
}

fn expression_element(expression: &ClassExpression) -> Element {
    let element = Element::new(expression.construct_name());
    match expression {
        ClassExpression::Class(class) => entity("Class", class.iri()),
        ClassExpression::ObjectIntersectionOf(operands)
        | ClassExpression::ObjectUnionOf(operands) => {
            element.with_children(operands.iter().map(expression_element))
        }
        ClassExpression::ObjectComplementOf(operand) => {
            element.with_child(expression_element(operand))
        }
        ClassExpression::ObjectOneOf(individuals) => {
            element.with_children(individuals.iter().map(individual_element))
        }
        ClassExpression::ObjectSomeValuesFrom { property, filler }
        | ClassExpression::ObjectAllValuesFrom { property, filler } => element
            .with_child(property_element(property))
            .with_child(expression_element(filler)),
        ClassExpression::ObjectHasValue {
            property,
            individual,
        } => element
            .with_child(property_element(property))
            .with_child(individual_element(individual)),
        ClassExpression::ObjectHasSelf(property) => element.with_child(property_element(property)),
        ClassExpression::ObjectMinCardinality {
            cardinality,
            property,
            filler,
        }
        | ClassExpression::ObjectMaxCardinality {
            cardinality,
            property,
            filler,
        }
        | ClassExpression::ObjectExactCardinality {
            cardinality,
            property,
            filler,
        } => element
            .with_attribute("cardinality", cardinality.to_string())
            .with_child(property_element(property))
            .with_children(filler.as_deref().map(expression_element)),
        ClassExpression::DataSomeValuesFrom { property, filler }
        | ClassExpression::DataAllValuesFrom { property, filler } => element
            .with_child(entity("DataProperty", property.iri()))
            .with_child(data_range_element(filler)),
        ClassExpression::DataHasValue { property, value } => element
            .with_child(entity("DataProperty", property.iri()))
            .with_child(literal_element(value)),
        ClassExpression::DataMinCardinality {
            cardinality,
            property,
            filler,
        }
        | ClassExpression::DataMaxCardinality {
            cardinality,
            property,
            filler,
        }
        | ClassExpression::DataExactCardinality {
            cardinality,
            property,
            filler,
        } => element
            .with_attribute("cardinality", cardinality.to_string())
            .with_child(entity("DataProperty", property.iri()))
            .with_children(filler.as_ref().map(data_range_element)),
    }
}

fn property_element(property: &ObjectPropertyExpression) -> Element {
    match property {
        ObjectPropertyExpression::ObjectProperty(p) => entity("ObjectProperty", p.iri()),
        ObjectPropertyExpression::ObjectInverseOf(p) => {
            Element::new("ObjectInverseOf").with_child(entity("ObjectProperty", p.iri()))
        }
    }
}

fn individual_element(individual: &Individual) -> Element {
    match individual {
        Individual::Named(iri) => entity("NamedIndividual", iri),
        Individual::Anonymous(node) => blank_element(node.as_str()),
    }
}

fn blank_element(id: &str) -> Element {
    Element::new("AnonymousIndividual").with_attribute("nodeID", id)
}

fn data_range_element(range: &DataRange) -> Element {
    match range {
        DataRange::Datatype(datatype) => entity("Datatype", datatype.iri()),
        DataRange::DataOneOf(literals) => {
            Element::new("DataOneOf").with_children(literals.iter().map(literal_element))
        }
    }
}

fn literal_element(literal: &Literal) -> Element {
    let element = Element::new("Literal");
    let element = match literal.language() {
        Some(language) => element.with_attribute("xml:lang", language),
        None => element.with_attribute("datatypeIRI", literal.datatype().as_str()),
    };
    element.with_text(literal.value())
}

fn key_element(property: &KeyProperty) -> Element {
    match property {
        KeyProperty::Object(p) => entity("ObjectProperty", p.iri()),
        KeyProperty::Data(p) => entity("DataProperty", p.iri()),
    }
}

fn axiom_element(axiom: &Axiom) -> Result<Element, OwlXmlError> {
    let element = Element::new(axiom.construct_name());
    Ok(match axiom {
        Axiom::DeclareClass(class) => element.with_child(entity("Class", class.iri())),
        Axiom::SubClassOf {
            sub_class,
            super_class,
        } => element
            .with_child(expression_element(sub_class))
            .with_child(expression_element(super_class)),
        Axiom::EquivalentClasses(a, b) | Axiom::DisjointClasses(a, b) => element
            .with_child(expression_element(a))
            .with_child(expression_element(b)),
        Axiom::AllDisjointClasses { id, members } => {
            let element = match id {
                Some(id) => element.with_attribute("IRI", id.iri().as_str()),
                None => element,
            };
            element.with_children(members.iter().map(expression_element))
        }
        Axiom::DisjointUnion { class, members } => element
            .with_child(entity("Class", class.iri()))
            .with_children(members.iter().map(expression_element)),
        Axiom::HasKey { class, properties } => element
            .with_child(expression_element(class))
            .with_children(properties.iter().map(key_element)),
        Axiom::AnnotationAssertion {
            subject,
            property,
            value,
        } => {
            let subject = match subject {
                NamedOrBlankNode::NamedNode(iri) => Element::new("IRI").with_text(iri.as_str()),
                NamedOrBlankNode::BlankNode(node) => blank_element(node.as_str()),
            };
            let value = if let Term::Literal(literal) = value {
                literal_element(literal)
            } else if let Term::NamedNode(iri) = value {
                Element::new("IRI").with_text(iri.as_str())
            } else if let Term::BlankNode(node) = value {
                blank_element(node.as_str())
            } else {
                return Err(MalformedStructure::new(
                    value.to_string(),
                    MalformedKind::InvalidValue,
                    "annotation values must be IRIs, blank nodes or literals",
                )
                .into());
            };
            element
                .with_child(entity("AnnotationProperty", property.iri()))
                .with_child(subject)
                .with_child(value)
        }
    })
}

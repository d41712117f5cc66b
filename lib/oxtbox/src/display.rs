//! Description logic rendering of class expressions, used in diagnostics.

use crate::entity::Individual;
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use std::fmt::{self, Write};

/// The part of an IRI after its last `#` or `/`.
pub(crate) fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(position) if position + 1 < iri.len() => &iri[position + 1..],
        _ => iri,
    }
}

/// Displays a [`ClassExpression`] in a Manchester-like description logic notation.
///
/// Every anonymous expression is wrapped in parentheses, so nesting is always explicit:
/// `(not(Agent and (not(Agent or Person))))`.
#[derive(Debug, Clone, Copy)]
pub struct DlDisplay<'a>(&'a ClassExpression);

impl ClassExpression {
    #[inline]
    pub fn dl(&self) -> DlDisplay<'_> {
        DlDisplay(self)
    }

    #[inline]
    pub fn to_dl_string(&self) -> String {
        self.dl().to_string()
    }
}

impl fmt::Display for DlDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(self.0, f)
    }
}

fn write_expression(expression: &ClassExpression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expression {
        ClassExpression::Class(c) => f.write_str(local_name(c.iri().as_str())),
        ClassExpression::ObjectIntersectionOf(operands) => write_nary(operands, " and ", f),
        ClassExpression::ObjectUnionOf(operands) => write_nary(operands, " or ", f),
        ClassExpression::ObjectComplementOf(operand) => {
            if operand.is_named() {
                f.write_str("(not ")?;
            } else {
                f.write_str("(not")?;
            }
            write_expression(operand, f)?;
            f.write_char(')')
        }
        ClassExpression::ObjectOneOf(individuals) => {
            f.write_str("({")?;
            for (i, individual) in individuals.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write_individual(individual, f)?;
            }
            f.write_str("})")
        }
        ClassExpression::ObjectSomeValuesFrom { property, filler } => {
            f.write_char('(')?;
            write_property(property, f)?;
            f.write_str(" some ")?;
            write_expression(filler, f)?;
            f.write_char(')')
        }
        ClassExpression::ObjectAllValuesFrom { property, filler } => {
            f.write_char('(')?;
            write_property(property, f)?;
            f.write_str(" only ")?;
            write_expression(filler, f)?;
            f.write_char(')')
        }
        ClassExpression::ObjectHasValue {
            property,
            individual,
        } => {
            f.write_char('(')?;
            write_property(property, f)?;
            f.write_str(" value ")?;
            write_individual(individual, f)?;
            f.write_char(')')
        }
        ClassExpression::ObjectHasSelf(property) => {
            f.write_char('(')?;
            write_property(property, f)?;
            f.write_str(" Self)")
        }
        ClassExpression::ObjectMinCardinality {
            cardinality,
            property,
            filler,
        } => write_object_cardinality("min", *cardinality, property, filler.as_deref(), f),
        ClassExpression::ObjectMaxCardinality {
            cardinality,
            property,
            filler,
        } => write_object_cardinality("max", *cardinality, property, filler.as_deref(), f),
        ClassExpression::ObjectExactCardinality {
            cardinality,
            property,
            filler,
        } => write_object_cardinality("exactly", *cardinality, property, filler.as_deref(), f),
        ClassExpression::DataSomeValuesFrom { property, filler } => {
            write!(f, "({} some ", local_name(property.iri().as_str()))?;
            write_data_range(filler, f)?;
            f.write_char(')')
        }
        ClassExpression::DataAllValuesFrom { property, filler } => {
            write!(f, "({} only ", local_name(property.iri().as_str()))?;
            write_data_range(filler, f)?;
            f.write_char(')')
        }
        ClassExpression::DataHasValue { property, value } => {
            write!(f, "({} value {value})", local_name(property.iri().as_str()))
        }
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
        } => {
            let keyword = match expression {
                ClassExpression::DataMinCardinality { .. } => "min",
                ClassExpression::DataMaxCardinality { .. } => "max",
                _ => "exactly",
            };
            write!(
                f,
                "({} {keyword} {cardinality}",
                local_name(property.iri().as_str())
            )?;
            if let Some(filler) = filler {
                f.write_char(' ')?;
                write_data_range(filler, f)?;
            }
            f.write_char(')')
        }
    }
}

fn write_nary(
    operands: &[ClassExpression],
    separator: &str,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.write_char('(')?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_expression(operand, f)?;
    }
    f.write_char(')')
}

fn write_object_cardinality(
    keyword: &str,
    cardinality: u32,
    property: &ObjectPropertyExpression,
    filler: Option<&ClassExpression>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.write_char('(')?;
    write_property(property, f)?;
    write!(f, " {keyword} {cardinality}")?;
    if let Some(filler) = filler {
        f.write_char(' ')?;
        write_expression(filler, f)?;
    }
    f.write_char(')')
}

fn write_property(property: &ObjectPropertyExpression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match property {
        ObjectPropertyExpression::ObjectProperty(p) => f.write_str(local_name(p.iri().as_str())),
        ObjectPropertyExpression::ObjectInverseOf(p) => {
            write!(f, "inverse({})", local_name(p.iri().as_str()))
        }
    }
}

fn write_individual(individual: &Individual, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match individual {
        Individual::Named(n) => f.write_str(local_name(n.as_str())),
        Individual::Anonymous(b) => write!(f, "{b}"),
    }
}

fn write_data_range(range: &DataRange, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match range {
        DataRange::Datatype(d) => f.write_str(local_name(d.iri().as_str())),
        DataRange::DataOneOf(literals) => {
            f.write_char('{')?;
            for (i, literal) in literals.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write!(f, "{literal}")?;
            }
            f.write_char('}')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{DataProperty, Datatype, ObjectProperty, OwlClass};
    use oxrdf::BlankNode;
    use oxrdf::vocab::xsd;

    fn class(name: &str) -> ClassExpression {
        OwlClass::new_from_iri(format!("http://xmlns.com/foaf/0.1/{name}"))
            .unwrap()
            .into()
    }

    fn property(name: &str) -> ObjectProperty {
        ObjectProperty::new_from_iri(format!("http://xmlns.com/foaf/0.1/{name}")).unwrap()
    }

    #[test]
    fn local_names() {
        assert_eq!(local_name("http://www.w3.org/2001/XMLSchema#string"), "string");
        assert_eq!(local_name("http://xmlns.com/foaf/0.1/Person"), "Person");
        assert_eq!(local_name("urn:isbn"), "urn:isbn");
        assert_eq!(local_name("http://example.org/"), "http://example.org/");
    }

    #[test]
    fn restrictions() {
        let creator = DataProperty::new_from_iri("http://purl.org/dc/terms/creator").unwrap();
        assert_eq!(
            ClassExpression::data_all_values_from(creator, Datatype::from(xsd::STRING))
                .to_dl_string(),
            "(creator only string)"
        );
        assert_eq!(
            ClassExpression::object_exact_cardinality(property("knows"), 1, Some(class("Person")))
                .to_dl_string(),
            "(knows exactly 1 Person)"
        );
        assert_eq!(
            ClassExpression::object_min_cardinality(property("knows"), 2, None).to_dl_string(),
            "(knows min 2)"
        );
        assert_eq!(
            ClassExpression::object_has_self(ObjectPropertyExpression::inverse_of(property("P")))
                .to_dl_string(),
            "(inverse(P) Self)"
        );
    }

    #[test]
    fn nested_booleans_are_parenthesized() {
        let expression = ClassExpression::object_complement_of(
            ClassExpression::object_intersection_of([
                class("Agent"),
                ClassExpression::object_complement_of(
                    ClassExpression::object_union_of([class("Agent"), class("Person")]).unwrap(),
                ),
            ])
            .unwrap(),
        );
        assert_eq!(
            expression.to_dl_string(),
            "(not(Agent and (not(Agent or Person))))"
        );
        assert_eq!(
            ClassExpression::object_complement_of(class("Agent")).to_dl_string(),
            "(not Agent)"
        );
    }

    #[test]
    fn enumerations() {
        let expression = ClassExpression::object_one_of([
            Individual::new_from_iri("http://example.org/i1").unwrap(),
            Individual::new_from_iri("http://example.org/i2").unwrap(),
        ])
        .unwrap();
        assert_eq!(expression.to_dl_string(), "({i1,i2})");
        let anonymous =
            ClassExpression::object_one_of([Individual::anonymous(BlankNode::new_unchecked("x"))])
                .unwrap();
        assert_eq!(anonymous.to_dl_string(), "({_:x})");
    }
}

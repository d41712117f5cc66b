//! OWL 2 entities: classes, properties, datatypes and individuals.

use crate::error::InvalidExpression;
use oxrdf::{BlankNode, NamedNode, NamedNodeRef, NamedOrBlankNode, Term};
use std::fmt;

/// Checks that a named node is a real IRI and not a smuggled blank node label.
pub(crate) fn check_iri(iri: NamedNode) -> Result<NamedNode, InvalidExpression> {
    if iri.as_str().starts_with("_:") {
        return Err(InvalidExpression::BlankIri(iri.into_string()));
    }
    Ok(iri)
}

pub(crate) fn parse_iri(iri: impl Into<String>) -> Result<NamedNode, InvalidExpression> {
    let iri = iri.into();
    if iri.starts_with("_:") {
        return Err(InvalidExpression::BlankIri(iri));
    }
    match NamedNode::new(iri.clone()) {
        Ok(node) => Ok(node),
        Err(error) => Err(InvalidExpression::InvalidIri { iri, error }),
    }
}

macro_rules! iri_entity {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            /// Wraps an IRI, rejecting blank node labels.
            #[inline]
            pub fn new(iri: NamedNode) -> Result<Self, InvalidExpression> {
                Ok(Self(check_iri(iri)?))
            }

            /// Parses an IRI string.
            #[inline]
            pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, InvalidExpression> {
                Ok(Self(parse_iri(iri)?))
            }

            /// The IRI of the entity.
            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            /// A borrowed view of the IRI, for building [`oxrdf`] triples.
            #[inline]
            pub fn as_named_node(&self) -> NamedNodeRef<'_> {
                self.0.as_ref()
            }

            /// Unwraps the IRI.
            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<NamedNode> for $name {
            type Error = InvalidExpression;

            #[inline]
            fn try_from(iri: NamedNode) -> Result<Self, InvalidExpression> {
                Self::new(iri)
            }
        }

        impl From<$name> for NamedNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for NamedOrBlankNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0.into()
            }
        }

        impl From<$name> for Term {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0.into()
            }
        }
    };
}

iri_entity!(
    /// An OWL class (`owl:Class`).
    ///
    /// ```
    /// use oxtbox::OwlClass;
    ///
    /// let person = OwlClass::new_from_iri("http://xmlns.com/foaf/0.1/Person")?;
    /// assert_eq!(person.iri().as_str(), "http://xmlns.com/foaf/0.1/Person");
    /// assert!(OwlClass::new_from_iri("_:b0").is_err());
    /// # Result::<_, oxtbox::InvalidExpression>::Ok(())
    /// ```
    OwlClass
);
iri_entity!(
    /// An object property (`owl:ObjectProperty`), relating individuals to individuals.
    ObjectProperty
);
iri_entity!(
    /// A data property (`owl:DatatypeProperty`), relating individuals to literals.
    DataProperty
);
iri_entity!(
    /// An annotation property (`owl:AnnotationProperty`).
    AnnotationProperty
);
iri_entity!(
    /// A datatype (`rdfs:Datatype`) such as `xsd:string`.
    Datatype
);

impl From<NamedNodeRef<'static>> for Datatype {
    /// Vocabulary constants are trusted IRIs.
    #[inline]
    fn from(iri: NamedNodeRef<'static>) -> Self {
        Self(iri.into_owned())
    }
}

impl From<NamedNodeRef<'static>> for AnnotationProperty {
    #[inline]
    fn from(iri: NamedNodeRef<'static>) -> Self {
        Self(iri.into_owned())
    }
}

/// An OWL individual, either named by an IRI or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedNode),
    /// An anonymous individual, identified by a blank node scoped to the document.
    Anonymous(BlankNode),
}

impl Individual {
    /// A named individual, rejecting blank node labels.
    #[inline]
    pub fn named(iri: NamedNode) -> Result<Self, InvalidExpression> {
        Ok(Self::Named(check_iri(iri)?))
    }

    /// Parses the IRI of a named individual.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, InvalidExpression> {
        Ok(Self::Named(parse_iri(iri)?))
    }

    /// An anonymous individual identified by a blank node.
    #[inline]
    pub fn anonymous(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => n.fmt(f),
            Self::Anonymous(b) => b.fmt(f),
        }
    }
}

impl From<Individual> for NamedOrBlankNode {
    #[inline]
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

impl From<Individual> for Term {
    #[inline]
    fn from(individual: Individual) -> Self {
        NamedOrBlankNode::from(individual).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_labels_as_iri() {
        assert!(matches!(
            OwlClass::new(NamedNode::new_unchecked("_:b1")),
            Err(InvalidExpression::BlankIri(_))
        ));
        assert!(matches!(
            ObjectProperty::new_from_iri("_:p"),
            Err(InvalidExpression::BlankIri(_))
        ));
        assert!(matches!(
            Individual::named(NamedNode::new_unchecked("_:i")),
            Err(InvalidExpression::BlankIri(_))
        ));
    }

    #[test]
    fn rejects_relative_iri() {
        assert!(matches!(
            DataProperty::new_from_iri("not an iri"),
            Err(InvalidExpression::InvalidIri { .. })
        ));
    }

    #[test]
    fn entity_keeps_its_iri() -> Result<(), InvalidExpression> {
        let class = OwlClass::new_from_iri("http://example.org/Dog")?;
        assert_eq!(class.to_string(), "<http://example.org/Dog>");
        assert_eq!(NamedNode::from(class).as_str(), "http://example.org/Dog");
        Ok(())
    }
}

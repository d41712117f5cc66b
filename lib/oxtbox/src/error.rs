use crate::model::ClassKind;
use oxiri::IriParseError;
use std::io;
use thiserror::Error;

/// A class, property or individual expression violates one of its construction rules.
///
/// This is a programming error on the caller side: the offending call has no effect.
#[derive(Debug, Error)]
pub enum InvalidExpression {
    /// The string is not a valid absolute IRI.
    #[error("invalid IRI <{iri}>: {error}")]
    InvalidIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// A blank node identifier was given where an IRI is required.
    #[error("'{0}' is a blank node identifier where an IRI is required")]
    BlankIri(String),
    /// A list-valued constructor got fewer operands than it requires.
    #[error("{construct} requires at least {minimum} operands, found {found}")]
    Arity {
        construct: &'static str,
        minimum: usize,
        found: usize,
    },
    /// A named class is defined in terms of itself.
    #[error("{construct} {class} lists itself as an operand")]
    SelfReference {
        construct: &'static str,
        class: String,
    },
    /// A binary class relation between a class and itself.
    #[error("{relation}({class}, {class}) is ill-formed")]
    SelfRelation {
        relation: &'static str,
        class: String,
    },
    /// The expression does not have the shape the declaration expects.
    #[error("{found} cannot be declared as a {expected}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    /// The class already has another definition.
    #[error("{class} is already defined as {kind:?}")]
    Redefinition { class: String, kind: ClassKind },
}

/// A triple pattern or an OWL/XML element does not describe a valid class model construct.
#[derive(Debug, Clone, Error)]
#[error("malformed structure at {node}: {message}")]
pub struct MalformedStructure {
    node: String,
    kind: MalformedKind,
    message: String,
}

/// The kind of a [`MalformedStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedKind {
    /// A required triple or element is missing.
    MissingProperty,
    /// The node matches no known construct.
    UnknownConstruct,
    /// A term has the wrong kind (literal for a resource...).
    InvalidValue,
    /// A broken, cyclic or too long RDF list.
    MalformedList,
    /// A cardinality that is not a non-negative integer.
    InvalidCardinality,
    /// Nesting deeper than the decoder allows.
    TooDeep,
    /// The decoded components fail the expression construction rules.
    InvalidExpression,
}

impl MalformedStructure {
    pub(crate) fn new(
        node: impl Into<String>,
        kind: MalformedKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn missing(node: impl Into<String>, property: &str) -> Self {
        Self::new(
            node,
            MalformedKind::MissingProperty,
            format!("missing {property}"),
        )
    }

    pub(crate) fn invalid_expression(node: impl Into<String>, error: &InvalidExpression) -> Self {
        Self::new(node, MalformedKind::InvalidExpression, error.to_string())
    }

    /// The node (IRI, blank node or element name) where decoding failed.
    #[inline]
    pub fn node(&self) -> &str {
        &self.node
    }

    #[inline]
    pub fn kind(&self) -> MalformedKind {
        self.kind
    }

    /// What is wrong with the node.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned while reading or writing OWL/XML.
#[derive(Debug, Error)]
pub enum OwlXmlError {
    /// I/O error while writing.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The document is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    /// The elements do not describe a valid construct.
    #[error(transparent)]
    Malformed(#[from] MalformedStructure),
}

impl From<quick_xml::events::attributes::AttrError> for OwlXmlError {
    #[inline]
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(quick_xml::Error::InvalidAttr(error))
    }
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum OxTboxError {
    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpression),
    #[error(transparent)]
    Malformed(#[from] MalformedStructure),
    #[error(transparent)]
    OwlXml(#[from] OwlXmlError),
}

#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod axiom;
mod display;
mod entity;
mod error;
mod expression;
mod model;
mod owl_xml;
mod parser;
mod reasoner;
mod serializer;
pub mod vocab;

pub use axiom::{Axiom, KeyProperty};
pub use display::DlDisplay;
pub use entity::{
    AnnotationProperty, DataProperty, Datatype, Individual, ObjectProperty, OwlClass,
};
pub use error::{InvalidExpression, MalformedKind, MalformedStructure, OwlXmlError, OxTboxError};
pub use expression::{
    ClassExpression, DataRange, IdentifiedExpression, NodeIdentity, ObjectPropertyExpression,
};
pub use model::{ClassKind, ClassModel, ExportOptions};
pub use owl_xml::{OwlXmlParser, OwlXmlSerializer};
pub use parser::{DecoderConfig, TripleDecoder};
pub use reasoner::{ConflictKind, Declared, Relation, Taxonomy, TaxonomyConflict};
pub use serializer::TripleEncoder;

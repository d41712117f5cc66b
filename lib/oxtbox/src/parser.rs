//! Decoding of class expressions and class models from RDF triples.

use crate::axiom::KeyProperty;
use crate::entity::{AnnotationProperty, DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use crate::error::{InvalidExpression, MalformedKind, MalformedStructure};
use crate::expression::{ClassExpression, DataRange, IdentifiedExpression, ObjectPropertyExpression};
use crate::model::{ClassKind, ClassModel};
use crate::reasoner::Declared;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, Literal, NamedNodeRef, NamedOrBlankNodeRef, TermRef, TripleRef};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of cells of an RDF list.
    pub max_list_length: usize,
    /// Maximum nesting depth of class expressions.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_list_length: 10_000,
            max_depth: 100,
        }
    }
}

impl DecoderConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_max_list_length(mut self, max_list_length: usize) -> Self {
        self.max_list_length = max_list_length;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
    Exact,
}

const CARDINALITIES: [(NamedNodeRef<'static>, NamedNodeRef<'static>, Bound); 3] = [
    (
        owl::MIN_CARDINALITY,
        owl::MIN_QUALIFIED_CARDINALITY,
        Bound::Min,
    ),
    (
        owl::MAX_CARDINALITY,
        owl::MAX_QUALIFIED_CARDINALITY,
        Bound::Max,
    ),
    (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY, Bound::Exact),
];

/// Reads class expressions back from the triples written by [`TripleEncoder`](crate::TripleEncoder).
///
/// Triples may come in any order.
///
/// ```
/// use oxrdf::Graph;
/// use oxtbox::{ClassExpression, IdentifiedExpression, ObjectProperty, OwlClass, TripleDecoder, TripleEncoder};
///
/// let knows = ObjectProperty::new_from_iri("http://xmlns.com/foaf/0.1/knows")?;
/// let person = OwlClass::new_from_iri("http://xmlns.com/foaf/0.1/Person")?;
/// let expression = ClassExpression::object_some_values_from(knows, person.into());
///
/// let mut graph = Graph::new();
/// let node = TripleEncoder::new(&mut graph)
///     .encode_identified(&mut IdentifiedExpression::new(expression.clone()));
/// let decoded = TripleDecoder::new(&graph).decode_class(&node)?;
/// assert_eq!(decoded.expression(), &expression);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct TripleDecoder<'a> {
    graph: &'a Graph,
    config: DecoderConfig,
}

impl<'a> TripleDecoder<'a> {
    #[inline]
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_config(graph, DecoderConfig::default())
    }

    #[inline]
    pub fn with_config(graph: &'a Graph, config: DecoderConfig) -> Self {
        Self { graph, config }
    }

    /// Decodes the class expression rooted at `node`.
    ///
    /// An IRI without restriction or boolean triples decodes to the named class itself.
    pub fn decode_class<'b>(
        &self,
        node: impl Into<NamedOrBlankNodeRef<'b>>,
    ) -> Result<IdentifiedExpression, MalformedStructure> {
        let node = node.into();
        let expression = match self.definition(node, 0)? {
            Some(expression) => expression,
            None => match node {
                NamedOrBlankNodeRef::NamedNode(n) => self.class(n)?.into(),
                NamedOrBlankNodeRef::BlankNode(_) => {
                    return Err(MalformedStructure::new(
                        node.to_string(),
                        MalformedKind::UnknownConstruct,
                        "the blank node has no class expression triples",
                    ));
                }
            },
        };
        Ok(IdentifiedExpression::with_node(expression, node.into_owned()))
    }

    /// Rebuilds a whole [`ClassModel`] from the graph.
    ///
    /// Relations are replayed through the consistency gate: the rejected ones
    /// are logged and end up in the model warnings. The graph of an exported
    /// model replays without warnings whatever the triple order.
    pub fn decode_model(&self) -> Result<ClassModel, MalformedStructure> {
        let mut model = ClassModel::new();

        let mut groups = Vec::new();
        let mut defined = Vec::new();
        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            match triple.object {
                TermRef::NamedNode(t) if t == owl::ALL_DISJOINT_CLASSES => groups.push(subject),
                TermRef::NamedNode(t) if t == owl::CLASS || t == owl::RESTRICTION => {
                    if !defined.contains(&subject) {
                        defined.push(subject);
                    }
                }
                _ => (),
            }
        }

        for &subject in &defined {
            let class = self.class(subject)?;
            if let Some(list) = self.object(subject.into(), owl::DISJOINT_UNION_OF) {
                let members = self.expression_list(list, 0)?;
                model
                    .declare_disjoint_union(class, members)
                    .map_err(|e| MalformedStructure::invalid_expression(subject.as_str(), &e))?;
                continue;
            }
            match self.definition(subject.into(), 0)? {
                Some(expression) => Self::define(&mut model, class, expression, subject)?,
                None => {
                    model.declare_class(class);
                }
            }
        }

        for subject in self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, owl::DEPRECATED_CLASS)
        {
            if let NamedOrBlankNodeRef::NamedNode(subject) = subject {
                model.deprecate_class(self.class(subject)?);
            }
        }

        for group in groups {
            let list = self
                .object(group.into(), owl::MEMBERS)
                .ok_or_else(|| MalformedStructure::missing(group.as_str(), "owl:members"))?;
            let members = self.expression_list(list, 0)?;
            let declared = model
                .declare_all_disjoint(self.class(group)?, members)
                .map_err(|e| MalformedStructure::invalid_expression(group.as_str(), &e))?;
            if let Declared::Rejected(conflict) = declared {
                debug!("{conflict}");
            }
        }

        for triple in self.graph.triples_for_predicate(owl::HAS_KEY) {
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                debug!("skipping a key on an anonymous class expression");
                continue;
            };
            let properties = self
                .list(triple.object)?
                .into_iter()
                .map(|term| self.key_property(term))
                .collect::<Result<Vec<_>, _>>()?;
            model
                .declare_has_key(self.class(subject)?, properties)
                .map_err(|e| MalformedStructure::invalid_expression(subject.as_str(), &e))?;
        }

        let relations: [(NamedNodeRef<'static>, Relate); 3] = [
            (rdfs::SUB_CLASS_OF, ClassModel::declare_subclass),
            (owl::EQUIVALENT_CLASS, ClassModel::declare_equivalent),
            (owl::DISJOINT_WITH, ClassModel::declare_disjoint),
        ];
        for (predicate, relation) in relations {
            for triple in self.graph.triples_for_predicate(predicate) {
                self.relation(&mut model, triple, predicate, relation)?;
            }
        }

        let annotated = model.classes().cloned().collect::<Vec<_>>();
        for class in annotated {
            for triple in self.graph.triples_for_subject(class.as_named_node()) {
                if !is_annotation_predicate(triple.predicate) {
                    continue;
                }
                let property = AnnotationProperty::new(triple.predicate.into_owned())
                    .map_err(|e| MalformedStructure::invalid_expression(class.iri().as_str(), &e))?;
                model.annotate_class(class.clone(), property, triple.object.into_owned());
            }
        }

        debug!(
            classes = model.len(),
            warnings = model.warnings().len(),
            "decoded class model"
        );
        Ok(model)
    }

    fn define(
        model: &mut ClassModel,
        class: OwlClass,
        expression: ClassExpression,
        node: NamedNodeRef<'_>,
    ) -> Result<(), MalformedStructure> {
        let result = if expression.is_restriction() {
            model.declare_restriction(class, expression)
        } else {
            model.declare_composite(class, expression)
        };
        result.map_err(|e| MalformedStructure::invalid_expression(node.as_str(), &e))
    }

    fn relation(
        &self,
        model: &mut ClassModel,
        triple: TripleRef<'a>,
        predicate: NamedNodeRef<'_>,
        relate: Relate,
    ) -> Result<(), MalformedStructure> {
        let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
            debug!(
                subject = %triple.subject,
                "skipping {predicate} on an anonymous class expression"
            );
            return Ok(());
        };
        let a = self.class(subject)?;
        match triple.object {
            TermRef::NamedNode(object) => {
                let b = self.class(object)?;
                let declared = relate(model, &a, &b)
                    .map_err(|e| MalformedStructure::invalid_expression(subject.as_str(), &e))?;
                if let Declared::Rejected(conflict) = declared {
                    debug!(triple = %triple, "triple not replayed: {conflict}");
                }
                Ok(())
            }
            TermRef::BlankNode(object)
                if predicate == owl::EQUIVALENT_CLASS
                    && model
                        .kind_of(&a)
                        .is_none_or(|kind| kind == ClassKind::Simple) =>
            {
                // A ≡ anonymous expression: the expression defines A
                match self.definition(object.into(), 0)? {
                    Some(expression) => Self::define(model, a, expression, subject),
                    None => Err(MalformedStructure::new(
                        object.to_string(),
                        MalformedKind::UnknownConstruct,
                        "the blank node has no class expression triples",
                    )),
                }
            }
            TermRef::Literal(_) => Err(MalformedStructure::new(
                subject.as_str(),
                MalformedKind::InvalidValue,
                format!("{predicate} has a literal value"),
            )),
            _ => {
                debug!(subject = %subject, "skipping {predicate} towards an anonymous class expression");
                Ok(())
            }
        }
    }

    /// The expression defined at `node`, `None` if it has no defining triples.
    fn definition(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        depth: usize,
    ) -> Result<Option<ClassExpression>, MalformedStructure> {
        if depth > self.config.max_depth {
            return Err(MalformedStructure::new(
                node.to_string(),
                MalformedKind::TooDeep,
                format!("nesting deeper than {}", self.config.max_depth),
            ));
        }
        if self.has_type(node, owl::RESTRICTION) || self.object(node, owl::ON_PROPERTY).is_some() {
            return self.restriction(node, depth).map(Some);
        }
        let invalid = |e: InvalidExpression| MalformedStructure::invalid_expression(node.to_string(), &e);
        if let Some(list) = self.object(node, owl::INTERSECTION_OF) {
            let operands = self.expression_list(list, depth)?;
            return ClassExpression::object_intersection_of(operands)
                .map(Some)
                .map_err(invalid);
        }
        if let Some(list) = self.object(node, owl::UNION_OF) {
            let operands = self.expression_list(list, depth)?;
            return ClassExpression::object_union_of(operands)
                .map(Some)
                .map_err(invalid);
        }
        if let Some(operand) = self.object(node, owl::COMPLEMENT_OF) {
            return Ok(Some(ClassExpression::object_complement_of(
                self.nested(operand, depth + 1)?,
            )));
        }
        if let Some(list) = self.object(node, owl::ONE_OF) {
            if self.has_type(node, rdfs::DATATYPE) {
                return Err(MalformedStructure::new(
                    node.to_string(),
                    MalformedKind::UnknownConstruct,
                    "a data enumeration is not a class expression",
                ));
            }
            let individuals = self
                .list(list)?
                .into_iter()
                .map(|term| self.individual(term))
                .collect::<Result<Vec<_>, _>>()?;
            return ClassExpression::object_one_of(individuals)
                .map(Some)
                .map_err(invalid);
        }
        Ok(None)
    }

    /// A class expression used inside another one.
    fn nested(&self, term: TermRef<'a>, depth: usize) -> Result<ClassExpression, MalformedStructure> {
        match term {
            TermRef::NamedNode(n) => Ok(self.class(n)?.into()),
            TermRef::BlankNode(b) => self.definition(b.into(), depth)?.ok_or_else(|| {
                MalformedStructure::new(
                    b.to_string(),
                    MalformedKind::UnknownConstruct,
                    "the blank node has no class expression triples",
                )
            }),
            _ => Err(MalformedStructure::new(
                term.to_string(),
                MalformedKind::InvalidValue,
                "a class expression is expected",
            )),
        }
    }

    fn restriction(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        depth: usize,
    ) -> Result<ClassExpression, MalformedStructure> {
        let property = self
            .object(node, owl::ON_PROPERTY)
            .ok_or_else(|| MalformedStructure::missing(node.to_string(), "owl:onProperty"))?;
        if self.is_data_restriction(node, property) {
            self.data_restriction(node, property)
        } else {
            self.object_restriction(node, property, depth)
        }
    }

    fn is_data_restriction(&self, node: NamedOrBlankNodeRef<'_>, property: TermRef<'a>) -> bool {
        if let TermRef::NamedNode(p) = property {
            if self.has_type(p.into(), owl::DATATYPE_PROPERTY) {
                return true;
            }
        }
        if self.object(node, owl::ON_DATA_RANGE).is_some() {
            return true;
        }
        if matches!(self.object(node, owl::HAS_VALUE), Some(TermRef::Literal(_))) {
            return true;
        }
        self.object(node, owl::SOME_VALUES_FROM)
            .or_else(|| self.object(node, owl::ALL_VALUES_FROM))
            .is_some_and(|filler| self.is_datatype(filler))
    }

    fn is_datatype(&self, term: TermRef<'_>) -> bool {
        match term {
            TermRef::NamedNode(n) => {
                n == rdfs::LITERAL
                    || n.as_str().starts_with(XSD_NAMESPACE)
                    || self.has_type(n.into(), rdfs::DATATYPE)
            }
            TermRef::BlankNode(b) => self.has_type(b.into(), rdfs::DATATYPE),
            _ => false,
        }
    }

    fn object_restriction(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        property: TermRef<'a>,
        depth: usize,
    ) -> Result<ClassExpression, MalformedStructure> {
        let property = self.object_property(property)?;
        if let Some(filler) = self.object(node, owl::SOME_VALUES_FROM) {
            return Ok(ClassExpression::object_some_values_from(
                property,
                self.nested(filler, depth + 1)?,
            ));
        }
        if let Some(filler) = self.object(node, owl::ALL_VALUES_FROM) {
            return Ok(ClassExpression::object_all_values_from(
                property,
                self.nested(filler, depth + 1)?,
            ));
        }
        if let Some(value) = self.object(node, owl::HAS_VALUE) {
            return Ok(ClassExpression::object_has_value(
                property,
                self.individual(value)?,
            ));
        }
        if let Some(value) = self.object(node, owl::HAS_SELF) {
            return match value {
                TermRef::Literal(l) if matches!(l.value(), "true" | "1") => {
                    Ok(ClassExpression::object_has_self(property))
                }
                _ => Err(MalformedStructure::new(
                    node.to_string(),
                    MalformedKind::InvalidValue,
                    format!("owl:hasSelf must be \"true\"^^xsd:boolean, found {value}"),
                )),
            };
        }
        for (unqualified, qualified, bound) in CARDINALITIES {
            if let Some(count) = self.object(node, unqualified) {
                let cardinality = cardinality(node, count)?;
                return Ok(object_cardinality(bound, property, cardinality, None));
            }
            if let Some(count) = self.object(node, qualified) {
                let cardinality = cardinality(node, count)?;
                let filler = self
                    .object(node, owl::ON_CLASS)
                    .ok_or_else(|| MalformedStructure::missing(node.to_string(), "owl:onClass"))?;
                let filler = self.nested(filler, depth + 1)?;
                return Ok(object_cardinality(bound, property, cardinality, Some(filler)));
            }
        }
        Err(unknown_restriction(node))
    }

    fn data_restriction(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        property: TermRef<'a>,
    ) -> Result<ClassExpression, MalformedStructure> {
        let TermRef::NamedNode(property) = property else {
            return Err(MalformedStructure::new(
                node.to_string(),
                MalformedKind::InvalidValue,
                "a data property must be an IRI",
            ));
        };
        let property = DataProperty::new(property.into_owned())
            .map_err(|e| MalformedStructure::invalid_expression(node.to_string(), &e))?;
        if let Some(filler) = self.object(node, owl::SOME_VALUES_FROM) {
            return Ok(ClassExpression::data_some_values_from(
                property,
                self.data_range(filler)?,
            ));
        }
        if let Some(filler) = self.object(node, owl::ALL_VALUES_FROM) {
            return Ok(ClassExpression::data_all_values_from(
                property,
                self.data_range(filler)?,
            ));
        }
        if let Some(value) = self.object(node, owl::HAS_VALUE) {
            let TermRef::Literal(value) = value else {
                return Err(MalformedStructure::new(
                    node.to_string(),
                    MalformedKind::InvalidValue,
                    "a data value must be a literal",
                ));
            };
            return Ok(ClassExpression::data_has_value(property, value.into_owned()));
        }
        for (unqualified, qualified, bound) in CARDINALITIES {
            if let Some(count) = self.object(node, unqualified) {
                let cardinality = cardinality(node, count)?;
                return Ok(data_cardinality(bound, property, cardinality, None));
            }
            if let Some(count) = self.object(node, qualified) {
                let cardinality = cardinality(node, count)?;
                let filler = self.object(node, owl::ON_DATA_RANGE).ok_or_else(|| {
                    MalformedStructure::missing(node.to_string(), "owl:onDataRange")
                })?;
                let filler = self.data_range(filler)?;
                return Ok(data_cardinality(bound, property, cardinality, Some(filler)));
            }
        }
        Err(unknown_restriction(node))
    }

    fn object_property(&self, term: TermRef<'a>) -> Result<ObjectPropertyExpression, MalformedStructure> {
        match term {
            TermRef::NamedNode(p) => Ok(ObjectProperty::new(p.into_owned())
                .map_err(|e| MalformedStructure::invalid_expression(p.as_str(), &e))?
                .into()),
            TermRef::BlankNode(b) => {
                let inverse = self.object(b.into(), owl::INVERSE_OF).ok_or_else(|| {
                    MalformedStructure::missing(b.to_string(), "owl:inverseOf")
                })?;
                let TermRef::NamedNode(p) = inverse else {
                    return Err(MalformedStructure::new(
                        b.to_string(),
                        MalformedKind::InvalidValue,
                        "owl:inverseOf must point to a named object property",
                    ));
                };
                Ok(ObjectPropertyExpression::inverse_of(
                    ObjectProperty::new(p.into_owned())
                        .map_err(|e| MalformedStructure::invalid_expression(p.as_str(), &e))?,
                ))
            }
            _ => Err(MalformedStructure::new(
                term.to_string(),
                MalformedKind::InvalidValue,
                "a property is expected",
            )),
        }
    }

    fn data_range(&self, term: TermRef<'a>) -> Result<DataRange, MalformedStructure> {
        match term {
            TermRef::NamedNode(d) => Ok(Datatype::new(d.into_owned())
                .map_err(|e| MalformedStructure::invalid_expression(d.as_str(), &e))?
                .into()),
            TermRef::BlankNode(b) => {
                let list = self.object(b.into(), owl::ONE_OF).ok_or_else(|| {
                    MalformedStructure::new(
                        b.to_string(),
                        MalformedKind::UnknownConstruct,
                        "unsupported data range",
                    )
                })?;
                let literals = self
                    .list(list)?
                    .into_iter()
                    .map(|term| match term {
                        TermRef::Literal(l) => Ok(l.into_owned()),
                        _ => Err(MalformedStructure::new(
                            b.to_string(),
                            MalformedKind::InvalidValue,
                            format!("{term} is not a literal"),
                        )),
                    })
                    .collect::<Result<Vec<Literal>, _>>()?;
                DataRange::data_one_of(literals)
                    .map_err(|e| MalformedStructure::invalid_expression(b.to_string(), &e))
            }
            _ => Err(MalformedStructure::new(
                term.to_string(),
                MalformedKind::InvalidValue,
                "a data range is expected",
            )),
        }
    }

    fn individual(&self, term: TermRef<'a>) -> Result<Individual, MalformedStructure> {
        match term {
            TermRef::NamedNode(n) => Individual::named(n.into_owned())
                .map_err(|e| MalformedStructure::invalid_expression(n.as_str(), &e)),
            TermRef::BlankNode(b) => Ok(Individual::anonymous(b.into_owned())),
            _ => Err(MalformedStructure::new(
                term.to_string(),
                MalformedKind::InvalidValue,
                "an individual is expected",
            )),
        }
    }

    fn key_property(&self, term: TermRef<'a>) -> Result<KeyProperty, MalformedStructure> {
        let TermRef::NamedNode(p) = term else {
            return Err(MalformedStructure::new(
                term.to_string(),
                MalformedKind::InvalidValue,
                "a key property must be an IRI",
            ));
        };
        let invalid = |e: InvalidExpression| MalformedStructure::invalid_expression(p.as_str(), &e);
        if self.has_type(p.into(), owl::DATATYPE_PROPERTY) {
            Ok(DataProperty::new(p.into_owned()).map_err(invalid)?.into())
        } else {
            Ok(ObjectProperty::new(p.into_owned()).map_err(invalid)?.into())
        }
    }

    fn class(&self, iri: NamedNodeRef<'_>) -> Result<OwlClass, MalformedStructure> {
        OwlClass::new(iri.into_owned())
            .map_err(|e| MalformedStructure::invalid_expression(iri.as_str(), &e))
    }

    fn expression_list(
        &self,
        head: TermRef<'a>,
        depth: usize,
    ) -> Result<Vec<ClassExpression>, MalformedStructure> {
        self.list(head)?
            .into_iter()
            .map(|term| self.nested(term, depth + 1))
            .collect()
    }

    /// Follows an `rdf:first`/`rdf:rest` chain up to `rdf:nil`.
    fn list(&self, head: TermRef<'a>) -> Result<Vec<TermRef<'a>>, MalformedStructure> {
        let mut items = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = head;
        loop {
            let cell: NamedOrBlankNodeRef<'a> = match current {
                TermRef::NamedNode(n) if n == rdf::NIL => return Ok(items),
                TermRef::NamedNode(n) => n.into(),
                TermRef::BlankNode(b) => b.into(),
                _ => {
                    return Err(MalformedStructure::new(
                        current.to_string(),
                        MalformedKind::MalformedList,
                        "a list cell must be a resource",
                    ));
                }
            };
            if !visited.insert(cell) {
                return Err(MalformedStructure::new(
                    cell.to_string(),
                    MalformedKind::MalformedList,
                    "cyclic list",
                ));
            }
            if items.len() >= self.config.max_list_length {
                return Err(MalformedStructure::new(
                    head.to_string(),
                    MalformedKind::MalformedList,
                    format!("list longer than {} elements", self.config.max_list_length),
                ));
            }
            items.push(
                self.object(cell, rdf::FIRST)
                    .ok_or_else(|| MalformedStructure::new(
                        cell.to_string(),
                        MalformedKind::MalformedList,
                        "missing rdf:first",
                    ))?,
            );
            current = self.object(cell, rdf::REST).ok_or_else(|| {
                MalformedStructure::new(
                    cell.to_string(),
                    MalformedKind::MalformedList,
                    "missing rdf:rest",
                )
            })?;
        }
    }

    #[inline]
    fn object(&self, subject: NamedOrBlankNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Option<TermRef<'a>> {
        self.graph.object_for_subject_predicate(subject, predicate)
    }

    #[inline]
    fn has_type(&self, subject: NamedOrBlankNodeRef<'_>, class: NamedNodeRef<'_>) -> bool {
        self.graph
            .contains(TripleRef::new(subject, rdf::TYPE, class))
    }
}

type Relate = fn(&mut ClassModel, &OwlClass, &OwlClass) -> Result<Declared, InvalidExpression>;

/// Structural vocabulary is not an annotation.
fn is_annotation_predicate(predicate: NamedNodeRef<'_>) -> bool {
    predicate != rdf::TYPE
        && predicate != rdfs::SUB_CLASS_OF
        && !predicate.as_str().starts_with(owl::NAMESPACE)
}

/// The lexical form of an `xsd:nonNegativeInteger` that fits in a `u32`: ASCII digits only.
pub(crate) fn parse_cardinality(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn cardinality(node: NamedOrBlankNodeRef<'_>, term: TermRef<'_>) -> Result<u32, MalformedStructure> {
    let parsed = match term {
        TermRef::Literal(l) => parse_cardinality(l.value()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        MalformedStructure::new(
            node.to_string(),
            MalformedKind::InvalidCardinality,
            format!("{term} is not a non-negative integer"),
        )
    })
}

fn unknown_restriction(node: NamedOrBlankNodeRef<'_>) -> MalformedStructure {
    MalformedStructure::new(
        node.to_string(),
        MalformedKind::UnknownConstruct,
        "unrecognized restriction shape",
    )
}

fn object_cardinality(
    bound: Bound,
    property: ObjectPropertyExpression,
    cardinality: u32,
    filler: Option<ClassExpression>,
) -> ClassExpression {
    match bound {
        Bound::Min => ClassExpression::object_min_cardinality(property, cardinality, filler),
        Bound::Max => ClassExpression::object_max_cardinality(property, cardinality, filler),
        Bound::Exact => ClassExpression::object_exact_cardinality(property, cardinality, filler),
    }
}

fn data_cardinality(
    bound: Bound,
    property: DataProperty,
    cardinality: u32,
    filler: Option<DataRange>,
) -> ClassExpression {
    match bound {
        Bound::Min => ClassExpression::data_min_cardinality(property, cardinality, filler),
        Bound::Max => ClassExpression::data_max_cardinality(property, cardinality, filler),
        Bound::Exact => ClassExpression::data_exact_cardinality(property, cardinality, filler),
    }
}

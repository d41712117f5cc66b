//! Encoding of class expressions and axioms into RDF triples.
//!
//! The encoding follows the OWL 2 mapping to RDF graphs. Anonymous nodes nested
//! in an expression (list cells, nested restrictions, inverse properties) are
//! labelled from the label of the root node, so encoding the same expression
//! at the same node always produces the same triples.

use crate::axiom::{Axiom, KeyProperty};
use crate::entity::{Individual, OwlClass};
use crate::expression::{ClassExpression, DataRange, IdentifiedExpression, ObjectPropertyExpression};
use crate::reasoner::Relation;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{
    BlankNode, Graph, Literal, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef,
    TripleRef,
};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Mints the nested blank nodes of one encoded root.
struct Labels {
    prefix: String,
    counter: u32,
}

impl Labels {
    fn for_node(node: &NamedOrBlankNode) -> Self {
        let prefix = match node {
            NamedOrBlankNode::BlankNode(b) => b.as_str().to_owned(),
            NamedOrBlankNode::NamedNode(n) => format!("n{:016x}", hash_of(n.as_str())),
        };
        Self { prefix, counter: 0 }
    }

    /// Labels distinct from the ones of the expression rooted at the same node.
    fn for_key(node: &NamedOrBlankNode) -> Self {
        let mut labels = Self::for_node(node);
        labels.prefix.push('k');
        labels
    }

    fn fresh(&mut self) -> BlankNode {
        self.counter += 1;
        BlankNode::new_unchecked(format!("{}_{}", self.prefix, self.counter))
    }
}

fn hash_of(value: &(impl Hash + ?Sized)) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The node anonymous parts of an axiom are encoded at, derived from their structure.
fn structural_node(value: &(impl Hash + ?Sized)) -> NamedOrBlankNode {
    BlankNode::new_unchecked(format!("e{:016x}", hash_of(value))).into()
}

/// Writes class expressions and axioms into a [`Graph`].
///
/// ```
/// use oxrdf::Graph;
/// use oxtbox::{ClassExpression, IdentifiedExpression, ObjectProperty, OwlClass, TripleEncoder};
///
/// let knows = ObjectProperty::new_from_iri("http://xmlns.com/foaf/0.1/knows")?;
/// let person = OwlClass::new_from_iri("http://xmlns.com/foaf/0.1/Person")?;
/// let mut restriction = IdentifiedExpression::new(ClassExpression::object_exact_cardinality(
///     knows,
///     1,
///     Some(person.into()),
/// ));
/// let mut graph = Graph::new();
/// TripleEncoder::new(&mut graph).encode_identified(&mut restriction);
/// assert_eq!(graph.len(), 6);
/// # Result::<_, oxtbox::InvalidExpression>::Ok(())
/// ```
pub struct TripleEncoder<'a> {
    graph: &'a mut Graph,
    type_named_classes: bool,
}

impl<'a> TripleEncoder<'a> {
    #[inline]
    pub fn new(graph: &'a mut Graph) -> Self {
        Self {
            graph,
            type_named_classes: true,
        }
    }

    /// Stops writing `C rdf:type owl:Class` for the named classes an expression mentions.
    ///
    /// [`encode_class`](Self::encode_class) still writes it. This is how a
    /// [`ClassModel`](crate::ClassModel) keeps its declared classes apart from
    /// the ones it only refers to.
    #[inline]
    #[must_use]
    pub fn without_class_typing(mut self) -> Self {
        self.type_named_classes = false;
        self
    }

    /// Encodes the expression at its node, minting the node on first use.
    pub fn encode_identified(&mut self, expression: &mut IdentifiedExpression) -> NamedOrBlankNode {
        let node = expression.resolve();
        self.encode_at(expression.expression(), &node);
        node
    }

    /// Encodes the expression using `node` as its root.
    ///
    /// A named class is always encoded at its own IRI.
    pub fn encode_at(&mut self, expression: &ClassExpression, node: &NamedOrBlankNode) {
        let mut labels = Labels::for_node(node);
        self.expression_at(expression, node, &mut labels);
    }

    pub fn encode_axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::DeclareClass(class) => self.encode_class(class),
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => self.encode_relation(sub_class, rdfs::SUB_CLASS_OF, super_class),
            Axiom::EquivalentClasses(a, b) => self.encode_relation(a, owl::EQUIVALENT_CLASS, b),
            Axiom::DisjointClasses(a, b) => self.encode_relation(a, owl::DISJOINT_WITH, b),
            Axiom::AllDisjointClasses { id, members } => {
                let node = match id {
                    Some(id) => id.iri().clone().into(),
                    None => structural_node(members),
                };
                self.encode_all_disjoint(&node, members)
            }
            Axiom::DisjointUnion { class, members } => {
                self.encode_disjoint_union(class, members)
            }
            Axiom::HasKey { class, properties } => self.encode_has_key(class, properties),
            Axiom::AnnotationAssertion {
                subject,
                property,
                value,
            } => {
                self.insert(subject, property.as_named_node(), value);
            }
        }
    }

    /// `C rdf:type owl:Class`
    #[inline]
    pub fn encode_class(&mut self, class: &OwlClass) {
        self.insert(class.iri(), rdf::TYPE, owl::CLASS);
    }

    /// `C rdf:type owl:DeprecatedClass`
    #[inline]
    pub fn encode_deprecated(&mut self, class: &OwlClass) {
        self.insert(class.iri(), rdf::TYPE, owl::DEPRECATED_CLASS);
    }

    /// A single relation triple between two named classes.
    pub fn encode_class_relation(&mut self, a: &OwlClass, relation: Relation, b: &OwlClass) {
        let predicate = match relation {
            Relation::SubClassOf => rdfs::SUB_CLASS_OF,
            Relation::EquivalentClasses => owl::EQUIVALENT_CLASS,
            Relation::DisjointClasses => owl::DISJOINT_WITH,
        };
        self.insert(a.iri(), predicate, b.iri());
    }

    /// Encodes an `owl:AllDisjointClasses` group at `node`.
    pub fn encode_all_disjoint(&mut self, node: &NamedOrBlankNode, members: &[ClassExpression]) {
        let mut labels = Labels::for_node(node);
        self.insert(node, rdf::TYPE, owl::ALL_DISJOINT_CLASSES);
        let items = members
            .iter()
            .map(|m| Term::from(self.expression_node(m, &mut labels)))
            .collect::<Vec<_>>();
        let list = self.list(items, &mut labels);
        self.insert(node, owl::MEMBERS, &list);
    }

    pub fn encode_disjoint_union(&mut self, class: &OwlClass, members: &[ClassExpression]) {
        let node = NamedOrBlankNode::from(class.iri().clone());
        let mut labels = Labels::for_node(&node);
        self.encode_class(class);
        let items = members
            .iter()
            .map(|m| Term::from(self.expression_node(m, &mut labels)))
            .collect::<Vec<_>>();
        let list = self.list(items, &mut labels);
        self.insert(&node, owl::DISJOINT_UNION_OF, &list);
    }

    pub fn encode_has_key(&mut self, class: &ClassExpression, properties: &[KeyProperty]) {
        let node = match class {
            ClassExpression::Class(c) => c.iri().clone().into(),
            _ => structural_node(class),
        };
        self.encode_at(class, &node);
        let mut labels = Labels::for_key(&node);
        let items = properties
            .iter()
            .map(|property| {
                let kind = match property {
                    KeyProperty::Object(_) => owl::OBJECT_PROPERTY,
                    KeyProperty::Data(_) => owl::DATATYPE_PROPERTY,
                };
                self.insert(property.iri(), rdf::TYPE, kind);
                Term::from(property.iri().clone())
            })
            .collect::<Vec<_>>();
        let list = self.list(items, &mut labels);
        self.insert(&node, owl::HAS_KEY, &list);
    }

    fn encode_relation(
        &mut self,
        a: &ClassExpression,
        predicate: NamedNodeRef<'_>,
        b: &ClassExpression,
    ) {
        let a_node = self.standalone_node(a);
        let b_node = self.standalone_node(b);
        self.insert(&a_node, predicate, &b_node);
    }

    /// Encodes an expression that is not nested in another one.
    fn standalone_node(&mut self, expression: &ClassExpression) -> NamedOrBlankNode {
        let node = match expression {
            ClassExpression::Class(c) => c.iri().clone().into(),
            _ => structural_node(expression),
        };
        self.encode_at(expression, &node);
        node
    }

    /// Encodes a nested expression and returns the node standing for it.
    fn expression_node(
        &mut self,
        expression: &ClassExpression,
        labels: &mut Labels,
    ) -> NamedOrBlankNode {
        let node = match expression {
            ClassExpression::Class(c) => c.iri().clone().into(),
            _ => labels.fresh().into(),
        };
        self.expression_at(expression, &node, labels);
        node
    }

    fn expression_at(
        &mut self,
        expression: &ClassExpression,
        node: &NamedOrBlankNode,
        labels: &mut Labels,
    ) {
        trace!(
            node = %node,
            construct = expression.construct_name(),
            "encoding class expression"
        );
        match expression {
            ClassExpression::Class(c) => {
                if self.type_named_classes {
                    self.encode_class(c)
                }
            }
            ClassExpression::ObjectIntersectionOf(operands) => {
                self.boolean(node, owl::INTERSECTION_OF, operands, labels)
            }
            ClassExpression::ObjectUnionOf(operands) => {
                self.boolean(node, owl::UNION_OF, operands, labels)
            }
            ClassExpression::ObjectComplementOf(operand) => {
                self.insert(node, rdf::TYPE, owl::CLASS);
                let operand = self.expression_node(operand, labels);
                self.insert(node, owl::COMPLEMENT_OF, &operand);
            }
            ClassExpression::ObjectOneOf(individuals) => {
                self.insert(node, rdf::TYPE, owl::CLASS);
                let items = individuals
                    .iter()
                    .map(|i| Term::from(i.clone()))
                    .collect::<Vec<_>>();
                let list = self.list(items, labels);
                self.insert(node, owl::ONE_OF, &list);
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                self.object_restriction(node, property, labels);
                let filler = self.expression_node(filler, labels);
                self.insert(node, owl::SOME_VALUES_FROM, &filler);
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                self.object_restriction(node, property, labels);
                let filler = self.expression_node(filler, labels);
                self.insert(node, owl::ALL_VALUES_FROM, &filler);
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                self.object_restriction(node, property, labels);
                if let Individual::Named(i) = individual {
                    self.insert(i, rdf::TYPE, owl::NAMED_INDIVIDUAL);
                }
                self.insert(node, owl::HAS_VALUE, &Term::from(individual.clone()));
            }
            ClassExpression::ObjectHasSelf(property) => {
                self.object_restriction(node, property, labels);
                self.insert(
                    node,
                    owl::HAS_SELF,
                    &Literal::new_typed_literal("true", xsd::BOOLEAN),
                );
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                node,
                property,
                *cardinality,
                filler.as_deref(),
                (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
                labels,
            ),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                node,
                property,
                *cardinality,
                filler.as_deref(),
                (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
                labels,
            ),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                node,
                property,
                *cardinality,
                filler.as_deref(),
                (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
                labels,
            ),
            ClassExpression::DataSomeValuesFrom { property, filler } => {
                self.data_restriction(node, property.as_named_node());
                let filler = self.data_range(filler, labels);
                self.insert(node, owl::SOME_VALUES_FROM, &filler);
            }
            ClassExpression::DataAllValuesFrom { property, filler } => {
                self.data_restriction(node, property.as_named_node());
                let filler = self.data_range(filler, labels);
                self.insert(node, owl::ALL_VALUES_FROM, &filler);
            }
            ClassExpression::DataHasValue { property, value } => {
                self.data_restriction(node, property.as_named_node());
                self.insert(node, owl::HAS_VALUE, value);
            }
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                node,
                property.as_named_node(),
                *cardinality,
                filler.as_ref(),
                (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
                labels,
            ),
            ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                node,
                property.as_named_node(),
                *cardinality,
                filler.as_ref(),
                (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
                labels,
            ),
            ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                node,
                property.as_named_node(),
                *cardinality,
                filler.as_ref(),
                (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
                labels,
            ),
        }
    }

    fn boolean(
        &mut self,
        node: &NamedOrBlankNode,
        predicate: NamedNodeRef<'_>,
        operands: &[ClassExpression],
        labels: &mut Labels,
    ) {
        self.insert(node, rdf::TYPE, owl::CLASS);
        let items = operands
            .iter()
            .map(|o| Term::from(self.expression_node(o, labels)))
            .collect::<Vec<_>>();
        let list = self.list(items, labels);
        self.insert(node, predicate, &list);
    }

    /// `R rdf:type owl:Restriction` and `R owl:onProperty P` with the property type.
    fn object_restriction(
        &mut self,
        node: &NamedOrBlankNode,
        property: &ObjectPropertyExpression,
        labels: &mut Labels,
    ) {
        self.insert(node, rdf::TYPE, owl::RESTRICTION);
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => {
                self.insert(p.iri(), rdf::TYPE, owl::OBJECT_PROPERTY);
                self.insert(node, owl::ON_PROPERTY, p.iri());
            }
            ObjectPropertyExpression::ObjectInverseOf(p) => {
                let inverse = labels.fresh();
                self.insert(&inverse, owl::INVERSE_OF, p.iri());
                self.insert(p.iri(), rdf::TYPE, owl::OBJECT_PROPERTY);
                self.insert(node, owl::ON_PROPERTY, &inverse);
            }
        }
    }

    fn data_restriction(&mut self, node: &NamedOrBlankNode, property: NamedNodeRef<'_>) {
        self.insert(node, rdf::TYPE, owl::RESTRICTION);
        self.insert(property, rdf::TYPE, owl::DATATYPE_PROPERTY);
        self.insert(node, owl::ON_PROPERTY, property);
    }

    fn object_cardinality(
        &mut self,
        node: &NamedOrBlankNode,
        property: &ObjectPropertyExpression,
        cardinality: u32,
        filler: Option<&ClassExpression>,
        (unqualified, qualified): (NamedNodeRef<'_>, NamedNodeRef<'_>),
        labels: &mut Labels,
    ) {
        self.object_restriction(node, property, labels);
        let count = cardinality_literal(cardinality);
        if let Some(filler) = filler {
            self.insert(node, qualified, &count);
            let filler = self.expression_node(filler, labels);
            self.insert(node, owl::ON_CLASS, &filler);
        } else {
            self.insert(node, unqualified, &count);
        }
    }

    fn data_cardinality(
        &mut self,
        node: &NamedOrBlankNode,
        property: NamedNodeRef<'_>,
        cardinality: u32,
        filler: Option<&DataRange>,
        (unqualified, qualified): (NamedNodeRef<'_>, NamedNodeRef<'_>),
        labels: &mut Labels,
    ) {
        self.data_restriction(node, property);
        let count = cardinality_literal(cardinality);
        if let Some(filler) = filler {
            self.insert(node, qualified, &count);
            let filler = self.data_range(filler, labels);
            self.insert(node, owl::ON_DATA_RANGE, &filler);
        } else {
            self.insert(node, unqualified, &count);
        }
    }

    fn data_range(&mut self, range: &DataRange, labels: &mut Labels) -> Term {
        match range {
            DataRange::Datatype(d) => {
                self.insert(d.iri(), rdf::TYPE, rdfs::DATATYPE);
                d.iri().clone().into()
            }
            DataRange::DataOneOf(literals) => {
                let node = labels.fresh();
                self.insert(&node, rdf::TYPE, rdfs::DATATYPE);
                let items = literals.iter().cloned().map(Term::from).collect();
                let list = self.list(items, labels);
                self.insert(&node, owl::ONE_OF, &list);
                node.into()
            }
        }
    }

    /// Writes an RDF collection, each cell typed `rdf:List`, and returns its head.
    fn list(&mut self, items: Vec<Term>, labels: &mut Labels) -> Term {
        let cells = items.iter().map(|_| labels.fresh()).collect::<Vec<_>>();
        for (i, (cell, item)) in cells.iter().zip(&items).enumerate() {
            self.insert(cell, rdf::TYPE, rdf::LIST);
            self.insert(cell, rdf::FIRST, item);
            match cells.get(i + 1) {
                Some(next) => self.insert(cell, rdf::REST, next),
                None => self.insert(cell, rdf::REST, rdf::NIL),
            }
        }
        match cells.into_iter().next() {
            Some(head) => head.into(),
            None => rdf::NIL.into_owned().into(),
        }
    }

    #[inline]
    fn insert<'b>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'b>>,
        predicate: NamedNodeRef<'b>,
        object: impl Into<TermRef<'b>>,
    ) {
        self.graph
            .insert(TripleRef::new(subject.into(), predicate, object.into()));
    }
}

fn cardinality_literal(cardinality: u32) -> Literal {
    Literal::new_typed_literal(cardinality.to_string(), xsd::NON_NEGATIVE_INTEGER)
}

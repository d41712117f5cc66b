//! The class model: declared classes, their definitions and the relations between them.

use crate::axiom::{Axiom, KeyProperty, check_all_disjoint, check_disjoint_union, check_has_key};
use crate::entity::{AnnotationProperty, OwlClass};
use crate::error::InvalidExpression;
use crate::expression::ClassExpression;
use crate::reasoner::{Declared, Relation, Taxonomy, TaxonomyConflict};
use crate::serializer::TripleEncoder;
use oxrdf::{Graph, NamedOrBlankNode, Term, Triple, TripleRef};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// How a declared class is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A named class without definition.
    Simple,
    /// A class defined by a property restriction.
    Restriction,
    /// A class defined by an enumeration of individuals (`ObjectOneOf`).
    Enumerate,
    /// A class defined by a boolean combination.
    Composite,
    /// A class defined as the disjoint union of other classes.
    DisjointUnion,
    /// The identifier of an `owl:AllDisjointClasses` group.
    AllDisjoint,
}

/// Options of [`ClassModel::to_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Also write the relations entailed between declared classes.
    pub include_inferred: bool,
    /// Write the annotation assertions (on by default).
    pub include_annotations: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_inferred: false,
            include_annotations: true,
        }
    }
}

impl ExportOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`include_inferred`](Self::include_inferred).
    #[inline]
    #[must_use]
    pub fn with_inferred(mut self, include_inferred: bool) -> Self {
        self.include_inferred = include_inferred;
        self
    }

    /// Sets [`include_annotations`](Self::include_annotations).
    #[inline]
    #[must_use]
    pub fn with_annotations(mut self, include_annotations: bool) -> Self {
        self.include_annotations = include_annotations;
        self
    }
}

#[derive(Debug, Clone)]
struct ClassEntry {
    class: OwlClass,
    kind: ClassKind,
    /// Set for restrictions, enumerations and composites.
    expression: Option<ClassExpression>,
    /// Set for disjoint unions and all-disjoint groups.
    members: Vec<ClassExpression>,
    deprecated: bool,
}

type Annotation = (OwlClass, AnnotationProperty, Term);

/// An ordered store of class declarations and class axioms.
///
/// Subclass, equivalence and disjointness declarations go through the
/// [`Taxonomy`] consistency gate. A rejected declaration leaves the model untouched
/// and is reported as a [`TaxonomyConflict`] warning.
///
/// ```
/// use oxtbox::{ClassModel, OwlClass};
///
/// let animal = OwlClass::new_from_iri("http://example.org/Animal")?;
/// let dog = OwlClass::new_from_iri("http://example.org/Dog")?;
/// let mut model = ClassModel::new();
/// model.declare_class(animal.clone());
/// model.declare_class(dog.clone());
/// assert!(model.declare_subclass(&dog, &animal)?.is_accepted());
/// assert!(model.declare_subclass(&animal, &dog)?.is_rejected());
/// assert_eq!(model.warnings().len(), 1);
/// assert!(model.is_sub_class_of(&dog, &animal));
/// # Result::<_, oxtbox::InvalidExpression>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    entries: Vec<ClassEntry>,
    index: FxHashMap<OwlClass, usize>,
    keys: Vec<(OwlClass, Vec<KeyProperty>)>,
    relations: Vec<(Relation, OwlClass, OwlClass)>,
    annotations: Vec<Annotation>,
    annotation_set: FxHashSet<Annotation>,
    taxonomy: Taxonomy,
    warnings: Vec<TaxonomyConflict>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a named class. Returns `false` if it was already declared.
    pub fn declare_class(&mut self, class: OwlClass) -> bool {
        if self.index.contains_key(&class) {
            return false;
        }
        debug!(class = %class, "declared class");
        self.push(class, ClassKind::Simple, None, Vec::new());
        true
    }

    /// Marks a class as deprecated, declaring it if needed.
    pub fn deprecate_class(&mut self, class: OwlClass) {
        let position = match self.index.get(&class) {
            Some(&position) => position,
            None => self.push(class, ClassKind::Simple, None, Vec::new()),
        };
        self.entries[position].deprecated = true;
    }

    /// Declares `id` as the class defined by a property restriction.
    pub fn declare_restriction(
        &mut self,
        id: OwlClass,
        restriction: ClassExpression,
    ) -> Result<(), InvalidExpression> {
        if !restriction.is_restriction() {
            return Err(InvalidExpression::UnexpectedShape {
                expected: "restriction",
                found: restriction.construct_name(),
            });
        }
        self.define(id, ClassKind::Restriction, Some(restriction), Vec::new())
    }

    /// Declares `id` as a union, an intersection, a complement or an enumeration.
    ///
    /// A class cannot be one of its own direct operands.
    pub fn declare_composite(
        &mut self,
        id: OwlClass,
        expression: ClassExpression,
    ) -> Result<(), InvalidExpression> {
        let kind = if expression.is_boolean() {
            ClassKind::Composite
        } else if expression.is_enumeration() {
            ClassKind::Enumerate
        } else {
            return Err(InvalidExpression::UnexpectedShape {
                expected: "composite class",
                found: expression.construct_name(),
            });
        };
        if expression
            .operands()
            .into_iter()
            .any(|operand| operand.as_class() == Some(&id))
        {
            return Err(InvalidExpression::SelfReference {
                construct: expression.construct_name(),
                class: id.to_string(),
            });
        }
        self.define(id, kind, Some(expression), Vec::new())
    }

    /// Declares `class` as the disjoint union of `members`.
    pub fn declare_disjoint_union(
        &mut self,
        class: OwlClass,
        members: Vec<ClassExpression>,
    ) -> Result<(), InvalidExpression> {
        check_disjoint_union(&class, &members)?;
        self.define(class, ClassKind::DisjointUnion, None, members)
    }

    /// Declares an `owl:AllDisjointClasses` group identified by `id`.
    ///
    /// The named members are pairwise disjoint: the group goes through the
    /// consistency gate like a set of disjointness declarations.
    pub fn declare_all_disjoint(
        &mut self,
        id: OwlClass,
        members: Vec<ClassExpression>,
    ) -> Result<Declared, InvalidExpression> {
        check_all_disjoint(&members)?;
        self.check_definable(&id, ClassKind::AllDisjoint, None, &members)?;
        let named = members
            .iter()
            .filter_map(ClassExpression::as_class)
            .cloned()
            .collect::<Vec<_>>();
        let declared = self.taxonomy.declare_all_disjoint(&named);
        match &declared {
            Declared::Accepted => self.define(id, ClassKind::AllDisjoint, None, members)?,
            Declared::Rejected(conflict) => self.report(conflict),
        }
        Ok(declared)
    }

    /// Sets the key of a class, replacing any previous one.
    pub fn declare_has_key(
        &mut self,
        class: OwlClass,
        properties: Vec<KeyProperty>,
    ) -> Result<(), InvalidExpression> {
        check_has_key(&properties)?;
        if let Some((_, key)) = self.keys.iter_mut().find(|(c, _)| *c == class) {
            *key = properties;
        } else {
            self.keys.push((class, properties));
        }
        Ok(())
    }

    /// Adds an annotation. Returns `false` if the very same annotation is already there.
    pub fn annotate_class(
        &mut self,
        class: OwlClass,
        property: AnnotationProperty,
        value: impl Into<Term>,
    ) -> bool {
        let annotation = (class, property, value.into());
        if !self.annotation_set.insert(annotation.clone()) {
            return false;
        }
        self.annotations.push(annotation);
        true
    }

    /// Declares `sub rdfs:subClassOf sup`.
    pub fn declare_subclass(
        &mut self,
        sub: &OwlClass,
        sup: &OwlClass,
    ) -> Result<Declared, InvalidExpression> {
        self.relate(Relation::SubClassOf, sub, sup)
    }

    /// Declares `a owl:equivalentClass b`.
    pub fn declare_equivalent(
        &mut self,
        a: &OwlClass,
        b: &OwlClass,
    ) -> Result<Declared, InvalidExpression> {
        self.relate(Relation::EquivalentClasses, a, b)
    }

    /// Declares `a owl:disjointWith b`.
    pub fn declare_disjoint(
        &mut self,
        a: &OwlClass,
        b: &OwlClass,
    ) -> Result<Declared, InvalidExpression> {
        self.relate(Relation::DisjointClasses, a, b)
    }

    fn relate(
        &mut self,
        relation: Relation,
        a: &OwlClass,
        b: &OwlClass,
    ) -> Result<Declared, InvalidExpression> {
        if a == b {
            return Err(InvalidExpression::SelfRelation {
                relation: relation.as_str(),
                class: a.to_string(),
            });
        }
        let declared = match relation {
            Relation::SubClassOf => self.taxonomy.declare_sub_class_of(a, b),
            Relation::EquivalentClasses => self.taxonomy.declare_equivalent(a, b),
            Relation::DisjointClasses => self.taxonomy.declare_disjoint(a, b),
        };
        match &declared {
            Declared::Accepted => {
                if !self.has_relation(relation, a, b) {
                    debug!(first = %a, second = %b, "declared {relation}");
                    self.relations.push((relation, a.clone(), b.clone()));
                }
            }
            Declared::Rejected(conflict) => self.report(conflict),
        }
        Ok(declared)
    }

    fn has_relation(&self, relation: Relation, a: &OwlClass, b: &OwlClass) -> bool {
        let symmetric = relation != Relation::SubClassOf;
        self.relations.iter().any(|(r, x, y)| {
            *r == relation && ((x == a && y == b) || (symmetric && x == b && y == a))
        })
    }

    fn report(&mut self, conflict: &TaxonomyConflict) {
        warn!(
            first = %conflict.first(),
            second = %conflict.second(),
            kind = ?conflict.kind(),
            "{conflict}"
        );
        self.warnings.push(conflict.clone());
    }

    fn push(
        &mut self,
        class: OwlClass,
        kind: ClassKind,
        expression: Option<ClassExpression>,
        members: Vec<ClassExpression>,
    ) -> usize {
        let position = self.entries.len();
        self.index.insert(class.clone(), position);
        self.entries.push(ClassEntry {
            class,
            kind,
            expression,
            members,
            deprecated: false,
        });
        position
    }

    /// A class without definition may get one. One that has a definition
    /// only accepts the very same one again.
    fn check_definable(
        &self,
        class: &OwlClass,
        kind: ClassKind,
        expression: Option<&ClassExpression>,
        members: &[ClassExpression],
    ) -> Result<(), InvalidExpression> {
        let Some(entry) = self.entry(class) else {
            return Ok(());
        };
        if entry.kind == ClassKind::Simple
            || (entry.kind == kind
                && entry.expression.as_ref() == expression
                && entry.members == members)
        {
            return Ok(());
        }
        Err(InvalidExpression::Redefinition {
            class: class.to_string(),
            kind: entry.kind,
        })
    }

    /// Sets the definition of a class, keeping its position if it is already declared.
    fn define(
        &mut self,
        class: OwlClass,
        kind: ClassKind,
        expression: Option<ClassExpression>,
        members: Vec<ClassExpression>,
    ) -> Result<(), InvalidExpression> {
        self.check_definable(&class, kind, expression.as_ref(), &members)?;
        debug!(class = %class, ?kind, "declared class definition");
        if let Some(&position) = self.index.get(&class) {
            let entry = &mut self.entries[position];
            entry.kind = kind;
            entry.expression = expression;
            entry.members = members;
        } else {
            self.push(class, kind, expression, members);
        }
        Ok(())
    }

    fn entry(&self, class: &OwlClass) -> Option<&ClassEntry> {
        self.index.get(class).map(|&position| &self.entries[position])
    }

    /// Is the class declared in the model?
    #[inline]
    pub fn contains_class(&self, class: &OwlClass) -> bool {
        self.index.contains_key(class)
    }

    /// How the class is defined, `None` if it is not declared.
    #[inline]
    pub fn kind_of(&self, class: &OwlClass) -> Option<ClassKind> {
        self.entry(class).map(|e| e.kind)
    }

    /// A declared class without definition.
    #[inline]
    pub fn is_simple_class(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::Simple)
    }

    /// A class defined by a property restriction.
    #[inline]
    pub fn is_restriction(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::Restriction)
    }

    /// A class defined by an `ObjectOneOf` enumeration.
    #[inline]
    pub fn is_enumerate(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::Enumerate)
    }

    /// A class defined by a boolean combination.
    #[inline]
    pub fn is_composite(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::Composite)
    }

    /// A class declared with `owl:disjointUnionOf`.
    #[inline]
    pub fn is_disjoint_union(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::DisjointUnion)
    }

    /// The identifier of an `owl:AllDisjointClasses` group.
    #[inline]
    pub fn is_all_disjoint(&self, class: &OwlClass) -> bool {
        self.kind_of(class) == Some(ClassKind::AllDisjoint)
    }

    /// Is the class typed `owl:DeprecatedClass`?
    #[inline]
    pub fn is_deprecated(&self, class: &OwlClass) -> bool {
        self.entry(class).is_some_and(|e| e.deprecated)
    }

    /// The declared classes, in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &OwlClass> {
        self.entries.iter().map(|e| &e.class)
    }

    /// The number of declared classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The defining expression of a restriction, enumeration or composite class.
    pub fn expression_of(&self, class: &OwlClass) -> Option<&ClassExpression> {
        self.entry(class)?.expression.as_ref()
    }

    /// The members of a disjoint union or of an all-disjoint group.
    pub fn members_of(&self, class: &OwlClass) -> &[ClassExpression] {
        self.entry(class).map_or(&[], |e| &e.members)
    }

    /// The annotations of a class, in insertion order.
    pub fn annotations_of<'a>(
        &'a self,
        class: &'a OwlClass,
    ) -> impl Iterator<Item = (&'a AnnotationProperty, &'a Term)> + 'a {
        self.annotations
            .iter()
            .filter(move |(c, _, _)| c == class)
            .map(|(_, property, value)| (property, value))
    }

    /// The declared key of a class, empty if it has none.
    pub fn key_properties_of(&self, class: &OwlClass) -> &[KeyProperty] {
        self.keys
            .iter()
            .find(|(c, _)| c == class)
            .map_or(&[], |(_, properties)| properties)
    }

    /// All the entailed strict subclasses of a class.
    pub fn sub_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.taxonomy.sub_classes_of(class)
    }

    /// All the entailed strict superclasses of a class.
    pub fn super_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.taxonomy.super_classes_of(class)
    }

    /// The classes entailed equivalent to a class, the class excluded.
    pub fn equivalent_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.taxonomy.equivalent_classes_of(class)
    }

    /// The classes entailed disjoint with a class.
    pub fn disjoint_classes_with(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.taxonomy.disjoint_classes_with(class)
    }

    /// Is `sub ⊑ sup` entailed, with `sub` and `sup` distinct?
    #[inline]
    pub fn is_sub_class_of(&self, sub: &OwlClass, sup: &OwlClass) -> bool {
        self.taxonomy.is_sub_class_of(sub, sup)
    }

    /// Is `a ≡ b` entailed, with `a` and `b` distinct?
    #[inline]
    pub fn is_equivalent_to(&self, a: &OwlClass, b: &OwlClass) -> bool {
        self.taxonomy.is_equivalent_to(a, b)
    }

    /// Is `a ⊥ b` entailed?
    #[inline]
    pub fn is_disjoint_with(&self, a: &OwlClass, b: &OwlClass) -> bool {
        self.taxonomy.is_disjoint_with(a, b)
    }

    /// The declared relations and their closure.
    #[inline]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The conflicts reported by rejected declarations, oldest first.
    #[inline]
    pub fn warnings(&self) -> &[TaxonomyConflict] {
        &self.warnings
    }

    /// Returns and clears the reported conflicts.
    pub fn take_warnings(&mut self) -> Vec<TaxonomyConflict> {
        std::mem::take(&mut self.warnings)
    }

    /// The content of the model as axioms.
    ///
    /// Defined classes are stated as equivalent to their definition.
    pub fn axioms(&self) -> Vec<Axiom> {
        let mut axioms = Vec::new();
        for entry in &self.entries {
            let class = entry.class.clone();
            match entry.kind {
                ClassKind::Simple => axioms.push(Axiom::DeclareClass(class)),
                ClassKind::Restriction | ClassKind::Enumerate | ClassKind::Composite => {
                    axioms.push(Axiom::DeclareClass(class.clone()));
                    if let Some(expression) = &entry.expression {
                        axioms.push(Axiom::EquivalentClasses(
                            class.into(),
                            expression.clone(),
                        ));
                    }
                }
                ClassKind::DisjointUnion => {
                    axioms.push(Axiom::DeclareClass(class.clone()));
                    axioms.push(Axiom::DisjointUnion {
                        class,
                        members: entry.members.clone(),
                    });
                }
                ClassKind::AllDisjoint => axioms.push(Axiom::AllDisjointClasses {
                    id: Some(class),
                    members: entry.members.clone(),
                }),
            }
        }
        for (class, properties) in &self.keys {
            axioms.push(Axiom::HasKey {
                class: class.clone().into(),
                properties: properties.clone(),
            });
        }
        for (relation, a, b) in &self.relations {
            let (a, b) = (ClassExpression::from(a.clone()), ClassExpression::from(b.clone()));
            axioms.push(match relation {
                Relation::SubClassOf => Axiom::SubClassOf {
                    sub_class: a,
                    super_class: b,
                },
                Relation::EquivalentClasses => Axiom::EquivalentClasses(a, b),
                Relation::DisjointClasses => Axiom::DisjointClasses(a, b),
            });
        }
        for (class, property, value) in &self.annotations {
            axioms.push(Axiom::AnnotationAssertion {
                subject: class.clone().into(),
                property: property.clone(),
                value: value.clone(),
            });
        }
        axioms
    }

    /// Writes the model to an RDF graph.
    pub fn to_graph(&self, options: &ExportOptions) -> Graph {
        let mut graph = Graph::new();
        self.write_declarations(&mut graph);
        self.write_relations(&mut graph);
        if options.include_inferred {
            self.write_inferred(&mut graph);
        }
        if options.include_annotations {
            self.write_annotations(&mut graph);
        }
        graph
    }

    /// Same as [`to_graph`](Self::to_graph), yielding to the Tokio runtime between sections.
    #[cfg(feature = "async-tokio")]
    pub async fn to_graph_async(&self, options: &ExportOptions) -> Graph {
        let mut graph = Graph::new();
        self.write_declarations(&mut graph);
        tokio::task::yield_now().await;
        self.write_relations(&mut graph);
        tokio::task::yield_now().await;
        if options.include_inferred {
            self.write_inferred(&mut graph);
            tokio::task::yield_now().await;
        }
        if options.include_annotations {
            self.write_annotations(&mut graph);
        }
        graph
    }

    /// The exported triples, sorted by their N-Triples form.
    pub fn to_triples(&self, options: &ExportOptions) -> Vec<Triple> {
        let mut triples = self
            .to_graph(options)
            .iter()
            .map(TripleRef::into_owned)
            .collect::<Vec<_>>();
        triples.sort_by_cached_key(ToString::to_string);
        triples
    }

    fn write_declarations(&self, graph: &mut Graph) {
        let mut encoder = TripleEncoder::new(graph).without_class_typing();
        for entry in &self.entries {
            let node = NamedOrBlankNode::from(entry.class.iri().clone());
            match (entry.kind, &entry.expression) {
                (ClassKind::DisjointUnion, _) => {
                    encoder.encode_disjoint_union(&entry.class, &entry.members)
                }
                (ClassKind::AllDisjoint, _) => encoder.encode_all_disjoint(&node, &entry.members),
                (_, Some(expression)) => encoder.encode_at(expression, &node),
                (_, None) => encoder.encode_class(&entry.class),
            }
            if entry.deprecated {
                encoder.encode_class(&entry.class);
                encoder.encode_deprecated(&entry.class);
            }
        }
    }

    fn write_relations(&self, graph: &mut Graph) {
        let mut encoder = TripleEncoder::new(graph).without_class_typing();
        for (class, properties) in &self.keys {
            encoder.encode_has_key(&class.clone().into(), properties);
        }
        for (relation, a, b) in &self.relations {
            encoder.encode_class_relation(a, *relation, b);
        }
    }

    /// The entailed relations between declared classes.
    fn write_inferred(&self, graph: &mut Graph) {
        let mut encoder = TripleEncoder::new(graph);
        for entry in &self.entries {
            if entry.kind == ClassKind::AllDisjoint {
                continue;
            }
            let a = &entry.class;
            for (relation, targets) in [
                (Relation::SubClassOf, self.taxonomy.super_classes_of(a)),
                (
                    Relation::EquivalentClasses,
                    self.taxonomy.equivalent_classes_of(a),
                ),
                (
                    Relation::DisjointClasses,
                    self.taxonomy.disjoint_classes_with(a),
                ),
            ] {
                for b in targets.iter().filter(|b| self.contains_class(b)) {
                    encoder.encode_class_relation(a, relation, b);
                }
            }
        }
    }

    fn write_annotations(&self, graph: &mut Graph) {
        let mut encoder = TripleEncoder::new(graph);
        for (class, property, value) in &self.annotations {
            encoder.encode_axiom(&Axiom::AnnotationAssertion {
                subject: class.clone().into(),
                property: property.clone(),
                value: value.clone(),
            });
        }
    }

    /// Removes everything from the model.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.keys.clear();
        self.relations.clear();
        self.annotations.clear();
        self.annotation_set.clear();
        self.taxonomy.clear();
        self.warnings.clear();
    }
}

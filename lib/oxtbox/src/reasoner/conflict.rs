use crate::entity::OwlClass;
use std::fmt;

/// A binary relation between two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
}

impl Relation {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubClassOf => "SubClassOf",
            Self::EquivalentClasses => "EquivalentClasses",
            Self::DisjointClasses => "DisjointClasses",
        }
    }
}

impl fmt::Display for Relation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The already entailed fact that forbids a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// The first class is already a subclass of the second one.
    SubClass,
    /// The second class is already a subclass of the first one.
    SuperClass,
    /// The classes are already equivalent.
    Equivalent,
    /// The classes are already disjoint.
    Disjoint,
    /// The classes are members of the same `owl:AllDisjointClasses` group.
    SharedAllDisjoint,
    /// The declaration would entail both disjointness and subsumption or
    /// equivalence between two other classes, see [`TaxonomyConflict::witness`].
    Derived,
}

/// A declaration skipped because it would break the exclusivity of
/// subsumption, equivalence and disjointness between two classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxonomyConflict {
    relation: Relation,
    first: OwlClass,
    second: OwlClass,
    kind: ConflictKind,
    witness: Option<(OwlClass, OwlClass)>,
}

impl TaxonomyConflict {
    pub(crate) fn new(
        relation: Relation,
        first: OwlClass,
        second: OwlClass,
        kind: ConflictKind,
    ) -> Self {
        Self {
            relation,
            first,
            second,
            kind,
            witness: None,
        }
    }

    pub(crate) fn derived(
        relation: Relation,
        first: OwlClass,
        second: OwlClass,
        witness: (OwlClass, OwlClass),
    ) -> Self {
        Self {
            relation,
            first,
            second,
            kind: ConflictKind::Derived,
            witness: Some(witness),
        }
    }

    /// The rejected relation.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The first class of the rejected relation.
    #[inline]
    pub fn first(&self) -> &OwlClass {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &OwlClass {
        &self.second
    }

    #[inline]
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    /// For a [`ConflictKind::Derived`] conflict, the pair of classes that would
    /// have become both disjoint and related.
    #[inline]
    pub fn witness(&self) -> Option<(&OwlClass, &OwlClass)> {
        self.witness.as_ref().map(|(a, b)| (a, b))
    }
}

impl fmt::Display for TaxonomyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = (&self.first, &self.second);
        write!(f, "{}({first}, {second}) skipped: ", self.relation)?;
        match self.kind {
            ConflictKind::SubClass => write!(f, "{first} is already a subclass of {second}"),
            ConflictKind::SuperClass => write!(f, "{second} is already a subclass of {first}"),
            ConflictKind::Equivalent => write!(f, "{first} and {second} are already equivalent"),
            ConflictKind::Disjoint => write!(f, "{first} and {second} are already disjoint"),
            ConflictKind::SharedAllDisjoint => write!(
                f,
                "{first} and {second} belong to the same AllDisjointClasses group"
            ),
            ConflictKind::Derived => match &self.witness {
                Some((a, b)) => write!(f, "{a} would be disjoint with the related class {b}"),
                None => f.write_str("it would make two related classes disjoint"),
            },
        }
    }
}

/// The outcome of a relation declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub enum Declared {
    /// The relation is part of the model (it may have been there already).
    Accepted,
    /// The relation was not inserted.
    Rejected(TaxonomyConflict),
}

impl Declared {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    #[inline]
    pub fn conflict(&self) -> Option<&TaxonomyConflict> {
        match self {
            Self::Accepted => None,
            Self::Rejected(conflict) => Some(conflict),
        }
    }
}

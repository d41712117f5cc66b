//! OWL 2 class axioms.
//!
//! Axioms are the basic statements of the class model.

use crate::entity::{AnnotationProperty, DataProperty, ObjectProperty, OwlClass};
use crate::error::InvalidExpression;
use crate::expression::ClassExpression;
use oxrdf::{NamedNode, NamedOrBlankNode, Term};

/// A property used in a `HasKey` axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyProperty {
    Object(ObjectProperty),
    Data(DataProperty),
}

impl KeyProperty {
    #[inline]
    pub fn iri(&self) -> &NamedNode {
        match self {
            Self::Object(p) => p.iri(),
            Self::Data(p) => p.iri(),
        }
    }
}

impl From<ObjectProperty> for KeyProperty {
    #[inline]
    fn from(property: ObjectProperty) -> Self {
        Self::Object(property)
    }
}

impl From<DataProperty> for KeyProperty {
    #[inline]
    fn from(property: DataProperty) -> Self {
        Self::Data(property)
    }
}

/// An OWL 2 class axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// `Declaration(Class(C))`
    DeclareClass(OwlClass),
    /// `SubClassOf(sub, super)`
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },
    /// `EquivalentClasses(C1, C2)`
    EquivalentClasses(ClassExpression, ClassExpression),
    /// `DisjointClasses(C1, C2)`
    DisjointClasses(ClassExpression, ClassExpression),
    /// `DisjointClasses(C1, ..., Cn)` with n ≥ 2, the `owl:AllDisjointClasses` form.
    ///
    /// The group node is the `id` IRI if any.
    AllDisjointClasses {
        id: Option<OwlClass>,
        members: Vec<ClassExpression>,
    },
    /// `DisjointUnion(C, C1, ..., Cn)`: C is the disjoint union of C1...Cn
    DisjointUnion {
        class: OwlClass,
        members: Vec<ClassExpression>,
    },
    /// `HasKey(C, (P1...Pn))`
    HasKey {
        class: ClassExpression,
        properties: Vec<KeyProperty>,
    },
    /// `AnnotationAssertion(P, subject, value)`
    AnnotationAssertion {
        subject: NamedOrBlankNode,
        property: AnnotationProperty,
        value: Term,
    },
}

fn check_distinct(
    relation: &'static str,
    a: &ClassExpression,
    b: &ClassExpression,
) -> Result<(), InvalidExpression> {
    if a == b {
        return Err(InvalidExpression::SelfRelation {
            relation,
            class: a.to_dl_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_all_disjoint(members: &[ClassExpression]) -> Result<(), InvalidExpression> {
    if members.len() < 2 {
        return Err(InvalidExpression::Arity {
            construct: "AllDisjointClasses",
            minimum: 2,
            found: members.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_disjoint_union(
    class: &OwlClass,
    members: &[ClassExpression],
) -> Result<(), InvalidExpression> {
    if members.len() < 2 {
        return Err(InvalidExpression::Arity {
            construct: "DisjointUnion",
            minimum: 2,
            found: members.len(),
        });
    }
    if members.iter().any(|m| m.as_class() == Some(class)) {
        return Err(InvalidExpression::SelfReference {
            construct: "DisjointUnion",
            class: class.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_has_key(properties: &[KeyProperty]) -> Result<(), InvalidExpression> {
    if properties.is_empty() {
        return Err(InvalidExpression::Arity {
            construct: "HasKey",
            minimum: 1,
            found: 0,
        });
    }
    Ok(())
}

impl Axiom {
    /// Creates a `SubClassOf` axiom, a class can't be declared a subclass of itself.
    pub fn sub_class_of(
        sub_class: impl Into<ClassExpression>,
        super_class: impl Into<ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let (sub_class, super_class) = (sub_class.into(), super_class.into());
        check_distinct("SubClassOf", &sub_class, &super_class)?;
        Ok(Self::SubClassOf {
            sub_class,
            super_class,
        })
    }

    pub fn equivalent_classes(
        a: impl Into<ClassExpression>,
        b: impl Into<ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let (a, b) = (a.into(), b.into());
        check_distinct("EquivalentClasses", &a, &b)?;
        Ok(Self::EquivalentClasses(a, b))
    }

    pub fn disjoint_classes(
        a: impl Into<ClassExpression>,
        b: impl Into<ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let (a, b) = (a.into(), b.into());
        check_distinct("DisjointClasses", &a, &b)?;
        Ok(Self::DisjointClasses(a, b))
    }

    pub fn all_disjoint_classes(
        id: Option<OwlClass>,
        members: impl IntoIterator<Item = ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let members = members.into_iter().collect::<Vec<_>>();
        check_all_disjoint(&members)?;
        Ok(Self::AllDisjointClasses { id, members })
    }

    pub fn disjoint_union(
        class: OwlClass,
        members: impl IntoIterator<Item = ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let members = members.into_iter().collect::<Vec<_>>();
        check_disjoint_union(&class, &members)?;
        Ok(Self::DisjointUnion { class, members })
    }

    pub fn has_key(
        class: impl Into<ClassExpression>,
        properties: impl IntoIterator<Item = KeyProperty>,
    ) -> Result<Self, InvalidExpression> {
        let properties = properties.into_iter().collect::<Vec<_>>();
        check_has_key(&properties)?;
        Ok(Self::HasKey {
            class: class.into(),
            properties,
        })
    }

    /// The OWL/XML element name of the axiom.
    pub fn construct_name(&self) -> &'static str {
        match self {
            Self::DeclareClass(_) => "Declaration",
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(..) => "EquivalentClasses",
            Self::DisjointClasses(..) | Self::AllDisjointClasses { .. } => "DisjointClasses",
            Self::DisjointUnion { .. } => "DisjointUnion",
            Self::HasKey { .. } => "HasKey",
            Self::AnnotationAssertion { .. } => "AnnotationAssertion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> OwlClass {
        OwlClass::new_from_iri(format!("http://example.org/{name}")).unwrap()
    }

    #[test]
    fn self_relations_are_ill_formed() {
        assert!(matches!(
            Axiom::sub_class_of(class("A"), class("A")),
            Err(InvalidExpression::SelfRelation {
                relation: "SubClassOf",
                ..
            })
        ));
        assert!(Axiom::equivalent_classes(class("A"), class("A")).is_err());
        assert!(Axiom::disjoint_classes(class("A"), class("A")).is_err());
        assert!(Axiom::sub_class_of(class("A"), class("B")).is_ok());
    }

    #[test]
    fn disjoint_union_cannot_contain_its_class() {
        assert!(matches!(
            Axiom::disjoint_union(class("A"), [class("A").into(), class("B").into()]),
            Err(InvalidExpression::SelfReference { .. })
        ));
        assert!(matches!(
            Axiom::disjoint_union(class("A"), [class("B").into()]),
            Err(InvalidExpression::Arity { minimum: 2, .. })
        ));
    }

    #[test]
    fn groups_need_two_members() {
        assert!(Axiom::all_disjoint_classes(None, [class("A").into()]).is_err());
        assert!(
            Axiom::all_disjoint_classes(Some(class("G")), [class("A").into(), class("B").into()])
                .is_ok()
        );
    }

    #[test]
    fn has_key_needs_a_property() {
        assert!(Axiom::has_key(class("A"), Vec::new()).is_err());
    }
}

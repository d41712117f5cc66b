//! OWL 2 class expressions, object property expressions and data ranges.

use crate::entity::{DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use crate::error::InvalidExpression;
use oxrdf::{BlankNode, Literal, NamedOrBlankNode};

/// An OWL 2 class expression.
///
/// Class expressions are immutable trees compared and hashed structurally.
/// The list-valued variants are built through the validating constructors
/// ([`ClassExpression::object_union_of`]...) that enforce their minimal arity.
///
/// ```
/// use oxtbox::{ClassExpression, ObjectProperty, OwlClass};
///
/// let knows = ObjectProperty::new_from_iri("http://xmlns.com/foaf/0.1/knows")?;
/// let person = OwlClass::new_from_iri("http://xmlns.com/foaf/0.1/Person")?;
/// let knows_one_person =
///     ClassExpression::object_exact_cardinality(knows, 1, Some(person.into()));
/// assert_eq!(knows_one_person.to_dl_string(), "(knows exactly 1 Person)");
/// # Result::<_, oxtbox::InvalidExpression>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class.
    Class(OwlClass),
    /// `ObjectIntersectionOf(C1 ... Cn)` with n ≥ 2.
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// `ObjectUnionOf(C1 ... Cn)` with n ≥ 2.
    ObjectUnionOf(Vec<ClassExpression>),
    /// `ObjectComplementOf(C)`.
    ObjectComplementOf(Box<ClassExpression>),
    /// `ObjectOneOf(a1 ... an)` with n ≥ 1.
    ObjectOneOf(Vec<Individual>),
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },
    ObjectHasSelf(ObjectPropertyExpression),
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

fn check_arity<T>(
    construct: &'static str,
    minimum: usize,
    operands: &[T],
) -> Result<(), InvalidExpression> {
    if operands.len() < minimum {
        return Err(InvalidExpression::Arity {
            construct,
            minimum,
            found: operands.len(),
        });
    }
    Ok(())
}

impl ClassExpression {
    /// Wraps a named class.
    #[inline]
    pub fn class(class: impl Into<OwlClass>) -> Self {
        Self::Class(class.into())
    }

    /// `ObjectIntersectionOf`, with at least two operands.
    pub fn object_intersection_of(
        operands: impl IntoIterator<Item = ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let operands = operands.into_iter().collect::<Vec<_>>();
        check_arity("ObjectIntersectionOf", 2, &operands)?;
        Ok(Self::ObjectIntersectionOf(operands))
    }

    /// `ObjectUnionOf`, with at least two operands.
    pub fn object_union_of(
        operands: impl IntoIterator<Item = ClassExpression>,
    ) -> Result<Self, InvalidExpression> {
        let operands = operands.into_iter().collect::<Vec<_>>();
        check_arity("ObjectUnionOf", 2, &operands)?;
        Ok(Self::ObjectUnionOf(operands))
    }

    /// `ObjectComplementOf`
    #[inline]
    pub fn object_complement_of(operand: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(operand))
    }

    /// `ObjectOneOf`, the enumeration of at least one individual.
    pub fn object_one_of(
        individuals: impl IntoIterator<Item = Individual>,
    ) -> Result<Self, InvalidExpression> {
        let individuals = individuals.into_iter().collect::<Vec<_>>();
        check_arity("ObjectOneOf", 1, &individuals)?;
        Ok(Self::ObjectOneOf(individuals))
    }

    /// `ObjectSomeValuesFrom`
    #[inline]
    pub fn object_some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// `ObjectAllValuesFrom`
    #[inline]
    pub fn object_all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// `ObjectHasValue`
    #[inline]
    pub fn object_has_value(
        property: impl Into<ObjectPropertyExpression>,
        individual: Individual,
    ) -> Self {
        Self::ObjectHasValue {
            property: property.into(),
            individual,
        }
    }

    /// `ObjectHasSelf`
    #[inline]
    pub fn object_has_self(property: impl Into<ObjectPropertyExpression>) -> Self {
        Self::ObjectHasSelf(property.into())
    }

    /// `ObjectMinCardinality`, unqualified if `filler` is `None`.
    #[inline]
    pub fn object_min_cardinality(
        property: impl Into<ObjectPropertyExpression>,
        cardinality: u32,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectMinCardinality {
            cardinality,
            property: property.into(),
            filler: filler.map(Box::new),
        }
    }

    /// `ObjectMaxCardinality`, unqualified if `filler` is `None`.
    #[inline]
    pub fn object_max_cardinality(
        property: impl Into<ObjectPropertyExpression>,
        cardinality: u32,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectMaxCardinality {
            cardinality,
            property: property.into(),
            filler: filler.map(Box::new),
        }
    }

    /// `ObjectExactCardinality`, unqualified if `filler` is `None`.
    #[inline]
    pub fn object_exact_cardinality(
        property: impl Into<ObjectPropertyExpression>,
        cardinality: u32,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectExactCardinality {
            cardinality,
            property: property.into(),
            filler: filler.map(Box::new),
        }
    }

    /// `DataSomeValuesFrom` over a single data property.
    #[inline]
    pub fn data_some_values_from(property: DataProperty, filler: impl Into<DataRange>) -> Self {
        Self::DataSomeValuesFrom {
            property,
            filler: filler.into(),
        }
    }

    /// `DataAllValuesFrom` over a single data property.
    #[inline]
    pub fn data_all_values_from(property: DataProperty, filler: impl Into<DataRange>) -> Self {
        Self::DataAllValuesFrom {
            property,
            filler: filler.into(),
        }
    }

    /// `DataHasValue`
    #[inline]
    pub fn data_has_value(property: DataProperty, value: impl Into<Literal>) -> Self {
        Self::DataHasValue {
            property,
            value: value.into(),
        }
    }

    /// `DataMinCardinality`
    #[inline]
    pub fn data_min_cardinality(
        property: DataProperty,
        cardinality: u32,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataMinCardinality {
            cardinality,
            property,
            filler,
        }
    }

    /// `DataMaxCardinality`
    #[inline]
    pub fn data_max_cardinality(
        property: DataProperty,
        cardinality: u32,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataMaxCardinality {
            cardinality,
            property,
            filler,
        }
    }

    /// `DataExactCardinality`
    #[inline]
    pub fn data_exact_cardinality(
        property: DataProperty,
        cardinality: u32,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataExactCardinality {
            cardinality,
            property,
            filler,
        }
    }

    /// The OWL construct name, also used as the OWL/XML element name.
    pub fn construct_name(&self) -> &'static str {
        match self {
            Self::Class(_) => "Class",
            Self::ObjectIntersectionOf(_) => "ObjectIntersectionOf",
            Self::ObjectUnionOf(_) => "ObjectUnionOf",
            Self::ObjectComplementOf(_) => "ObjectComplementOf",
            Self::ObjectOneOf(_) => "ObjectOneOf",
            Self::ObjectSomeValuesFrom { .. } => "ObjectSomeValuesFrom",
            Self::ObjectAllValuesFrom { .. } => "ObjectAllValuesFrom",
            Self::ObjectHasValue { .. } => "ObjectHasValue",
            Self::ObjectHasSelf(_) => "ObjectHasSelf",
            Self::ObjectMinCardinality { .. } => "ObjectMinCardinality",
            Self::ObjectMaxCardinality { .. } => "ObjectMaxCardinality",
            Self::ObjectExactCardinality { .. } => "ObjectExactCardinality",
            Self::DataSomeValuesFrom { .. } => "DataSomeValuesFrom",
            Self::DataAllValuesFrom { .. } => "DataAllValuesFrom",
            Self::DataHasValue { .. } => "DataHasValue",
            Self::DataMinCardinality { .. } => "DataMinCardinality",
            Self::DataMaxCardinality { .. } => "DataMaxCardinality",
            Self::DataExactCardinality { .. } => "DataExactCardinality",
        }
    }

    /// Is it a plain named class?
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// The named class, if the expression is one.
    #[inline]
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Property restrictions (value, cardinality and self restrictions).
    pub fn is_restriction(&self) -> bool {
        !matches!(
            self,
            Self::Class(_)
                | Self::ObjectIntersectionOf(_)
                | Self::ObjectUnionOf(_)
                | Self::ObjectComplementOf(_)
                | Self::ObjectOneOf(_)
        )
    }

    /// Boolean combinations of classes.
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            Self::ObjectIntersectionOf(_) | Self::ObjectUnionOf(_) | Self::ObjectComplementOf(_)
        )
    }

    /// `ObjectOneOf` enumerations.
    #[inline]
    pub fn is_enumeration(&self) -> bool {
        matches!(self, Self::ObjectOneOf(_))
    }

    /// The expressions directly nested in this one, in declaration order.
    pub fn operands(&self) -> Vec<&ClassExpression> {
        match self {
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                operands.iter().collect()
            }
            Self::ObjectComplementOf(operand) => vec![operand.as_ref()],
            Self::ObjectSomeValuesFrom { filler, .. } | Self::ObjectAllValuesFrom { filler, .. } => {
                vec![filler.as_ref()]
            }
            Self::ObjectMinCardinality { filler, .. }
            | Self::ObjectMaxCardinality { filler, .. }
            | Self::ObjectExactCardinality { filler, .. } => filler.as_deref().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// All the named classes mentioned in this expression in depth-first order, without duplicates.
    pub fn named_classes(&self) -> Vec<&OwlClass> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(expression) = stack.pop() {
            if let Self::Class(c) = expression {
                if !result.contains(&c) {
                    result.push(c);
                }
            }
            stack.extend(expression.operands().into_iter().rev());
        }
        result
    }
}

impl From<OwlClass> for ClassExpression {
    #[inline]
    fn from(class: OwlClass) -> Self {
        Self::Class(class)
    }
}

/// An OWL 2 object property expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),
    /// `ObjectInverseOf(P)`.
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// `ObjectInverseOf`
    #[inline]
    pub fn inverse_of(property: ObjectProperty) -> Self {
        Self::ObjectInverseOf(property)
    }

    /// Is it an inverse property?
    #[inline]
    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::ObjectInverseOf(_))
    }

    /// The named property, without the inverse if present.
    #[inline]
    pub fn base_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    #[inline]
    fn from(property: ObjectProperty) -> Self {
        Self::ObjectProperty(property)
    }
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    Datatype(Datatype),
    /// `DataOneOf(v1 ... vn)` with n ≥ 1.
    DataOneOf(Vec<Literal>),
}

impl DataRange {
    /// `DataOneOf`, with at least one literal.
    pub fn data_one_of(
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<Self, InvalidExpression> {
        let literals = literals.into_iter().collect::<Vec<_>>();
        check_arity("DataOneOf", 1, &literals)?;
        Ok(Self::DataOneOf(literals))
    }

    /// The datatype, if the range is a named one.
    #[inline]
    pub fn as_datatype(&self) -> Option<&Datatype> {
        match self {
            Self::Datatype(d) => Some(d),
            Self::DataOneOf(_) => None,
        }
    }
}

impl From<Datatype> for DataRange {
    #[inline]
    fn from(datatype: Datatype) -> Self {
        Self::Datatype(datatype)
    }
}

/// The RDF node standing for an expression.
///
/// An expression built in memory has no node yet: it is `Unresolved` until
/// [`NodeIdentity::resolve`] mints one, after which it stays `Resolved` to that node.
/// Decoded expressions are `Resolved` to the node they were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum NodeIdentity {
    #[default]
    Unresolved,
    Resolved(NamedOrBlankNode),
}

impl NodeIdentity {
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[inline]
    pub fn node(&self) -> Option<&NamedOrBlankNode> {
        match self {
            Self::Resolved(node) => Some(node),
            Self::Unresolved => None,
        }
    }

    /// Returns the node, minting a fresh blank node on the first call.
    pub fn resolve(&mut self) -> NamedOrBlankNode {
        match self {
            Self::Resolved(node) => node.clone(),
            Self::Unresolved => {
                let node = NamedOrBlankNode::from(BlankNode::default());
                *self = Self::Resolved(node.clone());
                node
            }
        }
    }
}

/// A class expression together with the RDF node it is encoded at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifiedExpression {
    expression: ClassExpression,
    identity: NodeIdentity,
}

impl IdentifiedExpression {
    /// Named classes are resolved to their IRI, anything else starts unresolved.
    pub fn new(expression: ClassExpression) -> Self {
        let identity = match &expression {
            ClassExpression::Class(c) => NodeIdentity::Resolved(c.iri().clone().into()),
            _ => NodeIdentity::Unresolved,
        };
        Self {
            expression,
            identity,
        }
    }

    #[inline]
    pub fn with_node(expression: ClassExpression, node: impl Into<NamedOrBlankNode>) -> Self {
        Self {
            expression,
            identity: NodeIdentity::Resolved(node.into()),
        }
    }

    #[inline]
    pub fn expression(&self) -> &ClassExpression {
        &self.expression
    }

    #[inline]
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    #[inline]
    pub fn resolve(&mut self) -> NamedOrBlankNode {
        self.identity.resolve()
    }

    #[inline]
    pub fn into_expression(self) -> ClassExpression {
        self.expression
    }
}

impl From<ClassExpression> for IdentifiedExpression {
    #[inline]
    fn from(expression: ClassExpression) -> Self {
        Self::new(expression)
    }
}

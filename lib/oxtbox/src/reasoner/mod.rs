//! Taxonomic reasoning over subclass, equivalence and disjointness declarations.
//!
//! The [`Taxonomy`] only stores declared edges. Closures are computed on demand,
//! so a query issued right after an accepted declaration always reflects it.
//!
//! Closure rules:
//! * `rdfs:subClassOf` is transitive and propagates through equivalence on both sides.
//! * `owl:equivalentClass` is symmetric and transitive.
//! * `owl:disjointWith` is symmetric, propagates through equivalence on both sides
//!   and downward along `rdfs:subClassOf`.
//! * the members of an `owl:AllDisjointClasses` group are pairwise disjoint.

mod conflict;

pub use crate::reasoner::conflict::{ConflictKind, Declared, Relation, TaxonomyConflict};
use crate::entity::OwlClass;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Declared class relations plus their closure and the consistency gate.
///
/// For any pair of classes at most one of subsumption (in either direction),
/// equivalence and disjointness can be entailed: declarations that would break
/// this are rejected before anything is inserted.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    /// child -> declared parents
    parents: FxHashMap<OwlClass, Vec<OwlClass>>,
    /// parent -> declared children
    children: FxHashMap<OwlClass, Vec<OwlClass>>,
    equivalents: FxHashMap<OwlClass, Vec<OwlClass>>,
    disjoints: FxHashMap<OwlClass, Vec<OwlClass>>,
    groups: Vec<Vec<OwlClass>>,
    /// class -> index of the groups it belongs to
    group_index: FxHashMap<OwlClass, Vec<usize>>,
}

fn push_edge(map: &mut FxHashMap<OwlClass, Vec<OwlClass>>, from: &OwlClass, to: &OwlClass) {
    let targets = map.entry(from.clone()).or_default();
    if !targets.contains(to) {
        targets.push(to.clone());
    }
}

fn remove_edge(map: &mut FxHashMap<OwlClass, Vec<OwlClass>>, from: &OwlClass, to: &OwlClass) {
    if let Some(targets) = map.get_mut(from) {
        targets.retain(|target| target != to);
        if targets.is_empty() {
            map.remove(from);
        }
    }
}

fn has_edge(map: &FxHashMap<OwlClass, Vec<OwlClass>>, from: &OwlClass, to: &OwlClass) -> bool {
    map.get(from).is_some_and(|targets| targets.contains(to))
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `sub ⊑ sup` if it is consistent with the current closure.
    pub fn declare_sub_class_of(&mut self, sub: &OwlClass, sup: &OwlClass) -> Declared {
        if has_edge(&self.parents, sub, sup) {
            return Declared::Accepted;
        }
        if let Some(kind) = self.sub_class_conflict(sub, sup) {
            return Declared::Rejected(TaxonomyConflict::new(
                Relation::SubClassOf,
                sub.clone(),
                sup.clone(),
                kind,
            ));
        }
        push_edge(&mut self.parents, sub, sup);
        push_edge(&mut self.children, sup, sub);
        if let Some(witness) = self.derived_conflict(&[sub]) {
            remove_edge(&mut self.parents, sub, sup);
            remove_edge(&mut self.children, sup, sub);
            return Declared::Rejected(TaxonomyConflict::derived(
                Relation::SubClassOf,
                sub.clone(),
                sup.clone(),
                witness,
            ));
        }
        Declared::Accepted
    }

    /// Declares `a ≡ b` if it is consistent with the current closure.
    pub fn declare_equivalent(&mut self, a: &OwlClass, b: &OwlClass) -> Declared {
        if has_edge(&self.equivalents, a, b) {
            return Declared::Accepted;
        }
        if let Some(kind) = self.equivalence_conflict(a, b) {
            return Declared::Rejected(TaxonomyConflict::new(
                Relation::EquivalentClasses,
                a.clone(),
                b.clone(),
                kind,
            ));
        }
        push_edge(&mut self.equivalents, a, b);
        push_edge(&mut self.equivalents, b, a);
        if let Some(witness) = self.derived_conflict(&[a, b]) {
            remove_edge(&mut self.equivalents, a, b);
            remove_edge(&mut self.equivalents, b, a);
            return Declared::Rejected(TaxonomyConflict::derived(
                Relation::EquivalentClasses,
                a.clone(),
                b.clone(),
                witness,
            ));
        }
        Declared::Accepted
    }

    /// Declares `a ⊥ b` if it is consistent with the current closure.
    pub fn declare_disjoint(&mut self, a: &OwlClass, b: &OwlClass) -> Declared {
        if has_edge(&self.disjoints, a, b) {
            return Declared::Accepted;
        }
        if let Some(kind) = self.disjointness_conflict(a, b) {
            return Declared::Rejected(TaxonomyConflict::new(
                Relation::DisjointClasses,
                a.clone(),
                b.clone(),
                kind,
            ));
        }
        push_edge(&mut self.disjoints, a, b);
        push_edge(&mut self.disjoints, b, a);
        if let Some(witness) = self.derived_conflict(&[a, b]) {
            remove_edge(&mut self.disjoints, a, b);
            remove_edge(&mut self.disjoints, b, a);
            return Declared::Rejected(TaxonomyConflict::derived(
                Relation::DisjointClasses,
                a.clone(),
                b.clone(),
                witness,
            ));
        }
        Declared::Accepted
    }

    /// Declares a group of pairwise disjoint classes.
    ///
    /// The group is gated like a set of disjointness declarations: it is
    /// rejected as a whole on the first conflicting pair, or if two members
    /// share a subclass.
    pub fn declare_all_disjoint(&mut self, members: &[OwlClass]) -> Declared {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if a == b {
                    continue;
                }
                if let Some(kind) = self.disjointness_conflict(a, b) {
                    return Declared::Rejected(TaxonomyConflict::new(
                        Relation::DisjointClasses,
                        a.clone(),
                        b.clone(),
                        kind,
                    ));
                }
            }
        }
        let index = self.groups.len();
        let mut group = Vec::with_capacity(members.len());
        for member in members {
            if !group.contains(member) {
                group.push(member.clone());
                self.group_index
                    .entry(member.clone())
                    .or_default()
                    .push(index);
            }
        }
        self.groups.push(group);
        let roots = members.iter().collect::<Vec<_>>();
        if let Some(witness) = self.derived_conflict(&roots) {
            self.pop_group();
            let (first, second) = match members {
                [first, second, ..] => (first.clone(), second.clone()),
                _ => (witness.0.clone(), witness.1.clone()),
            };
            return Declared::Rejected(TaxonomyConflict::derived(
                Relation::DisjointClasses,
                first,
                second,
                witness,
            ));
        }
        Declared::Accepted
    }

    fn pop_group(&mut self) {
        let Some(group) = self.groups.pop() else {
            return;
        };
        for member in &group {
            if let Some(indexes) = self.group_index.get_mut(member) {
                indexes.pop();
                if indexes.is_empty() {
                    self.group_index.remove(member);
                }
            }
        }
    }

    /// Looks in the downward cones of `roots` for a class that would be
    /// disjoint with one of its superclasses or equivalents.
    ///
    /// A new edge only adds entailments to these cones.
    fn derived_conflict(&self, roots: &[&OwlClass]) -> Option<(OwlClass, OwlClass)> {
        let mut checked = FxHashSet::default();
        for &root in roots {
            let mut cone = vec![root.clone()];
            cone.extend(self.equivalent_classes_of(root));
            cone.extend(self.sub_classes_of(root));
            for class in cone {
                if !checked.insert(class.clone()) {
                    continue;
                }
                let disjoints = self.disjoint_classes_with(&class);
                if disjoints.is_empty() {
                    continue;
                }
                let mut related = self.super_classes_of(&class);
                related.extend(self.equivalent_classes_of(&class));
                if let Some(other) = related.into_iter().find(|c| disjoints.contains(c)) {
                    return Some((class, other));
                }
            }
        }
        None
    }

    fn sub_class_conflict(&self, sub: &OwlClass, sup: &OwlClass) -> Option<ConflictKind> {
        if self.is_sub_class_of(sup, sub) {
            Some(ConflictKind::SuperClass)
        } else if self.is_equivalent_to(sub, sup) {
            Some(ConflictKind::Equivalent)
        } else if self.is_disjoint_with(sub, sup) {
            Some(ConflictKind::Disjoint)
        } else {
            None
        }
    }

    fn equivalence_conflict(&self, a: &OwlClass, b: &OwlClass) -> Option<ConflictKind> {
        if self.is_sub_class_of(a, b) {
            Some(ConflictKind::SubClass)
        } else if self.is_sub_class_of(b, a) {
            Some(ConflictKind::SuperClass)
        } else if self.share_group(a, b) {
            Some(ConflictKind::SharedAllDisjoint)
        } else if self.is_disjoint_with(a, b) {
            Some(ConflictKind::Disjoint)
        } else {
            None
        }
    }

    fn disjointness_conflict(&self, a: &OwlClass, b: &OwlClass) -> Option<ConflictKind> {
        if self.is_sub_class_of(a, b) {
            Some(ConflictKind::SubClass)
        } else if self.is_sub_class_of(b, a) {
            Some(ConflictKind::SuperClass)
        } else if self.is_equivalent_to(a, b) {
            Some(ConflictKind::Equivalent)
        } else {
            None
        }
    }

    fn share_group(&self, a: &OwlClass, b: &OwlClass) -> bool {
        let (Some(a_groups), Some(b_groups)) = (self.group_index.get(a), self.group_index.get(b))
        else {
            return false;
        };
        a_groups.iter().any(|g| b_groups.contains(g))
    }

    /// The classes equivalent to `class`, `class` excluded.
    pub fn equivalent_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        let mut visited = FxHashSet::default();
        visited.insert(class);
        let mut result = Vec::new();
        let mut queue = VecDeque::from([class]);
        while let Some(current) = queue.pop_front() {
            for next in self.equivalents.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    result.push(next.clone());
                    queue.push_back(next);
                }
            }
        }
        result
    }

    /// All the strict superclasses of `class`.
    pub fn super_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.hierarchy_closure(class, &self.parents)
    }

    /// All the strict subclasses of `class`.
    pub fn sub_classes_of(&self, class: &OwlClass) -> Vec<OwlClass> {
        self.hierarchy_closure(class, &self.children)
    }

    /// Walks `edges` from the equivalence class of `start`, stepping into the
    /// equivalence class of every reached node.
    fn hierarchy_closure(
        &self,
        start: &OwlClass,
        edges: &FxHashMap<OwlClass, Vec<OwlClass>>,
    ) -> Vec<OwlClass> {
        let own = self.equivalent_classes_of(start);
        let mut visited = FxHashSet::default();
        visited.insert(start.clone());
        visited.extend(own.iter().cloned());
        let mut queue = VecDeque::from([start.clone()]);
        queue.extend(own);
        let mut result = Vec::new();
        while let Some(current) = queue.pop_front() {
            for next in edges.get(&current).into_iter().flatten() {
                if !visited.insert(next.clone()) {
                    continue;
                }
                result.push(next.clone());
                queue.push_back(next.clone());
                for equivalent in self.equivalent_classes_of(next) {
                    if visited.insert(equivalent.clone()) {
                        result.push(equivalent.clone());
                        queue.push_back(equivalent);
                    }
                }
            }
        }
        result
    }

    /// The classes declared disjoint with `class`, directly or through a group.
    fn declared_disjoints<'a>(&'a self, class: &OwlClass) -> impl Iterator<Item = &'a OwlClass> {
        let direct = self.disjoints.get(class).into_iter().flatten();
        let grouped = self
            .group_index
            .get(class)
            .into_iter()
            .flatten()
            .flat_map(move |&g| self.groups[g].iter());
        direct.chain(grouped)
    }

    /// All the classes entailed disjoint with `class`.
    pub fn disjoint_classes_with(&self, class: &OwlClass) -> Vec<OwlClass> {
        let mut sources = vec![class.clone()];
        sources.extend(self.equivalent_classes_of(class));
        sources.extend(self.super_classes_of(class));

        let mut seen = FxHashSet::default();
        seen.insert(class.clone());
        let mut result = Vec::new();
        for source in &sources {
            for declared in self.declared_disjoints(source) {
                if declared == source {
                    continue;
                }
                let mut targets = vec![declared.clone()];
                targets.extend(self.equivalent_classes_of(declared));
                targets.extend(self.sub_classes_of(declared));
                for target in targets {
                    if seen.insert(target.clone()) {
                        result.push(target);
                    }
                }
            }
        }
        result
    }

    /// Strict entailed subsumption.
    pub fn is_sub_class_of(&self, sub: &OwlClass, sup: &OwlClass) -> bool {
        sub != sup && self.super_classes_of(sub).contains(sup)
    }

    pub fn is_equivalent_to(&self, a: &OwlClass, b: &OwlClass) -> bool {
        a != b && self.equivalent_classes_of(a).contains(b)
    }

    pub fn is_disjoint_with(&self, a: &OwlClass, b: &OwlClass) -> bool {
        a != b && self.disjoint_classes_with(a).contains(b)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
            && self.equivalents.is_empty()
            && self.disjoints.is_empty()
            && self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.parents.clear();
        self.children.clear();
        self.equivalents.clear();
        self.disjoints.clear();
        self.groups.clear();
        self.group_index.clear();
    }
}

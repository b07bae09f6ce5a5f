//! Coverage Analyzer: axiom extraction and per-class definition classification.
//!
//! Motivation
//! ----------
//! Ontology engineering is not just about parsing class hierarchies; it is
//! also about *auditing* them:
//! - Which declared classes actually carry a formal logical definition?
//! - Which are bare names waiting for axioms?
//! - How heavily does each definition lean on restriction expressions?
//!
//! The analyzer answers those questions syntactically. A class is "defined"
//! when it is the subject of at least one subclass or equivalence axiom, or a
//! member of at least one disjointness axiom. No entailment, no reasoning:
//! association is by normalized identifier over the parsed axiom forest.
//!
//! Error policy: irregular markup inside a well-formed document (a `Class`
//! with no identifier attribute, an axiom with no `Class` children, a
//! compound subject) is never an error. Each extraction returns an `Option`
//! and absence degrades to "no match".

use serde::Serialize;
use std::collections::HashSet;

use crate::xml::Element;

const DECLARATION_TAG: &str = "Declaration";
const CLASS_TAG: &str = "Class";

/// Identifier attribute fallback chain: absolute IRI first, abbreviated
/// form only when the absolute one is absent.
pub const CLASS_IRI_ATTRS: [&str; 2] = ["IRI", "abbreviatedIRI"];

/// Object-restriction constructors counted in both subclass and equivalence
/// axiom subtrees.
pub const OBJECT_RESTRICTIONS: [&str; 5] = [
    "ObjectSomeValuesFrom",
    "ObjectAllValuesFrom",
    "ObjectHasValue",
    "ObjectMinCardinality",
    "ObjectMaxCardinality",
];

/// Composite class constructors, additionally counted in equivalence axiom
/// subtrees.
pub const COMPOSITE_CONSTRUCTORS: [&str; 3] =
    ["ObjectIntersectionOf", "ObjectUnionOf", "ObjectOneOf"];

/// The closed set of recognized definitional axiom kinds, dispatched by
/// element tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxiomKind {
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
}

impl AxiomKind {
    pub fn tag(self) -> &'static str {
        match self {
            AxiomKind::SubClassOf => "SubClassOf",
            AxiomKind::EquivalentClasses => "EquivalentClasses",
            AxiomKind::DisjointClasses => "DisjointClasses",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SubClassOf" => Some(AxiomKind::SubClassOf),
            "EquivalentClasses" => Some(AxiomKind::EquivalentClasses),
            "DisjointClasses" => Some(AxiomKind::DisjointClasses),
            _ => None,
        }
    }
}

/// Normalize a raw IRI token into a class key: strip one leading fragment
/// marker, then rewrite namespace-separator colons to underscores.
/// Case-sensitive, idempotent, otherwise verbatim.
pub fn normalize_identifier(raw: &str) -> String {
    raw.strip_prefix('#').unwrap_or(raw).replace(':', "_")
}

/// One entry per unique declared class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    pub is_defined: bool,
    /// Named superclasses from subclass axioms where this class is the
    /// subject, in document order, duplicates retained.
    pub parents: Vec<String>,
    /// Structural restriction expressions across all axioms whose subject is
    /// this class.
    pub restriction_count: usize,
    pub has_equivalence: bool,
    pub has_disjointness: bool,
}

/// Immutable analysis snapshot. `defined_classes` and `undefined_classes`
/// together partition all declared classes, each sorted ascending by `name`
/// under ordinal comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_classes: usize,
    pub defined_classes: Vec<ClassRecord>,
    pub undefined_classes: Vec<ClassRecord>,
    /// `defined / total * 100`, rounded to one decimal; `0.0` when no class
    /// is declared.
    pub coverage_percent: f64,
}

// ============================================================================
// Axiom indexing
// ============================================================================

#[derive(Debug)]
struct SubClassAxiom {
    subject: Option<String>,
    parent: Option<String>,
    restrictions: usize,
}

#[derive(Debug)]
struct EquivalenceAxiom {
    subject: Option<String>,
    restrictions: usize,
}

#[derive(Debug)]
struct DisjointAxiom {
    members: Vec<String>,
}

/// All definitional axioms of the document, collected once in document order,
/// independent of which class they concern.
#[derive(Debug, Default)]
struct AxiomIndex {
    subclass: Vec<SubClassAxiom>,
    equivalence: Vec<EquivalenceAxiom>,
    disjoint: Vec<DisjointAxiom>,
}

impl AxiomIndex {
    fn build(document: &Element) -> Self {
        let mut index = AxiomIndex::default();
        index.visit(document);
        index
    }

    fn visit(&mut self, element: &Element) {
        for child in &element.children {
            match AxiomKind::from_tag(&child.tag) {
                Some(AxiomKind::SubClassOf) => self.subclass.push(SubClassAxiom {
                    subject: axiom_subject(child),
                    parent: subclass_parent(child),
                    restrictions: child.count_descendants(&OBJECT_RESTRICTIONS),
                }),
                Some(AxiomKind::EquivalentClasses) => self.equivalence.push(EquivalenceAxiom {
                    subject: axiom_subject(child),
                    restrictions: child.count_descendants(&OBJECT_RESTRICTIONS)
                        + child.count_descendants(&COMPOSITE_CONSTRUCTORS),
                }),
                Some(AxiomKind::DisjointClasses) => self.disjoint.push(DisjointAxiom {
                    members: direct_class_tokens(child),
                }),
                None => {}
            }
            self.visit(child);
        }
    }
}

/// Normalized identifier of a bare `Class` element, if it carries one.
fn class_token(class_element: &Element) -> Option<String> {
    class_element
        .first_attr(&CLASS_IRI_ATTRS)
        .map(normalize_identifier)
}

/// Subject of a subclass/equivalence axiom: its first *direct* `Class`
/// child. A compound first expression, or a first `Class` without an
/// identifier, leaves the axiom without a resolvable subject.
fn axiom_subject(axiom: &Element) -> Option<String> {
    axiom.children_named(CLASS_TAG).next().and_then(class_token)
}

/// Named superclass of a subclass axiom: its second direct `Class` child.
/// Restriction objects contribute no parent entry.
fn subclass_parent(axiom: &Element) -> Option<String> {
    axiom
        .children_named(CLASS_TAG)
        .nth(1)
        .and_then(class_token)
}

/// Members of a disjointness axiom: every direct `Class` child with an
/// identifier, order irrelevant for matching.
fn direct_class_tokens(axiom: &Element) -> Vec<String> {
    axiom.children_named(CLASS_TAG).filter_map(class_token).collect()
}

/// Declared class identifiers, in declaration order, first occurrence wins.
/// Only declarations that directly contain a `Class` child count; other
/// entity declarations and identifier-less classes are skipped.
fn declared_classes(document: &Element) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for declaration in document.descendants_named(DECLARATION_TAG) {
        let Some(class_element) = declaration.children_named(CLASS_TAG).next() else {
            continue;
        };
        let Some(name) = class_token(class_element) else {
            continue;
        };
        if seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyze a parsed ontology document.
///
/// Single synchronous pass over the tree; the input is never mutated and the
/// analysis cannot fail. Analyzing the same document twice yields identical
/// results.
pub fn analyze(document: &Element) -> AnalysisResult {
    let declared = declared_classes(document);
    let index = AxiomIndex::build(document);
    tracing::debug!(
        classes = declared.len(),
        subclass = index.subclass.len(),
        equivalence = index.equivalence.len(),
        disjoint = index.disjoint.len(),
        "indexed ontology axioms"
    );

    let mut records: Vec<ClassRecord> = declared
        .into_iter()
        .map(|name| classify(name, &index))
        .collect();

    // Ordinal sort keeps the partition deterministic across platforms.
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let total_classes = records.len();
    let (defined_classes, undefined_classes): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|record| record.is_defined);

    let coverage_percent = if total_classes == 0 {
        0.0
    } else {
        round_one_decimal(defined_classes.len() as f64 / total_classes as f64 * 100.0)
    };

    AnalysisResult {
        total_classes,
        defined_classes,
        undefined_classes,
        coverage_percent,
    }
}

fn classify(name: String, index: &AxiomIndex) -> ClassRecord {
    let mut parents = Vec::new();
    let mut restriction_count = 0;
    let mut subject_of_subclass = false;

    for axiom in &index.subclass {
        if axiom.subject.as_deref() == Some(name.as_str()) {
            subject_of_subclass = true;
            if let Some(parent) = &axiom.parent {
                parents.push(parent.clone());
            }
            restriction_count += axiom.restrictions;
        }
    }

    let mut has_equivalence = false;
    for axiom in &index.equivalence {
        if axiom.subject.as_deref() == Some(name.as_str()) {
            has_equivalence = true;
            restriction_count += axiom.restrictions;
        }
    }

    let has_disjointness = index
        .disjoint
        .iter()
        .any(|axiom| axiom.members.iter().any(|member| member == &name));

    // Definitional even when the axiom yielded no extractable parent or
    // restriction.
    let is_defined = subject_of_subclass || has_equivalence || has_disjointness;

    ClassRecord {
        name,
        is_defined,
        parents,
        restriction_count,
        has_equivalence,
        has_disjointness,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Tests
// ============================================================================

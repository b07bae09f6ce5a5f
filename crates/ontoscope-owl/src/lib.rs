//! Definition-coverage analysis for OWL ontologies (boundary adapter).
//!
//! This crate sits at the **interop boundary**:
//!
//! - It parses OWL/XML functional-style serializations (untrusted markup).
//! - It emits an immutable [`AnalysisResult`]: per declared class, whether the
//!   class carries a formal logical definition (subclass, equivalence or
//!   disjointness axiom), its named parents, and a count of structural
//!   restriction expressions.
//! - It is *not* a reasoner: no consistency checking, no subsumption
//!   inference, no IRI resolution. Association of axioms to classes is purely
//!   syntactic, by normalized identifier.
//!
//! The pipeline is two strictly ordered steps:
//!
//! 1. [`xml::parse_document`] — raw text to a navigable element tree, or a
//!    typed malformed-document failure.
//! 2. [`coverage::analyze`] — element tree to [`AnalysisResult`], single
//!    synchronous pass, never mutating the tree and never failing (irregular
//!    axioms degrade to "no match").

pub mod coverage;
pub mod xml;

pub use coverage::{analyze, AnalysisResult, AxiomKind, ClassRecord};
pub use xml::{parse_document, Element, LoadError};

/// Run the full Loader → Analyzer pipeline on raw document text.
///
/// The only failure is a malformed document; analysis itself cannot fail.
pub fn analyze_document(text: &str) -> Result<AnalysisResult, LoadError> {
    let document = xml::parse_document(text)?;
    Ok(coverage::analyze(&document))
}

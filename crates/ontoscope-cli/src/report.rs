//! Terminal rendering for coverage reports (display layer only).

use colored::Colorize;
use ontoscope_owl::{AnalysisResult, ClassRecord};

pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Ontology definition coverage".bold()));
    out.push_str(&format!(
        "  classes declared: {}\n",
        result.total_classes
    ));
    out.push_str(&format!(
        "  defined:          {} ({})\n",
        result.defined_classes.len(),
        format!("{:.1}%", result.coverage_percent).green()
    ));
    out.push_str(&format!(
        "  missing:          {} ({})\n",
        result.undefined_classes.len(),
        format!("{:.1}%", 100.0 - result.coverage_percent).yellow()
    ));

    out.push_str(&format!("\n{}\n", "Defined classes".green().bold()));
    if result.defined_classes.is_empty() {
        out.push_str("  no defined classes found\n");
    }
    for record in &result.defined_classes {
        render_defined(&mut out, record);
    }

    out.push_str(&format!("\n{}\n", "Missing definitions".yellow().bold()));
    if result.undefined_classes.is_empty() {
        out.push_str("  all classes carry a formal definition\n");
    }
    for record in &result.undefined_classes {
        out.push_str(&format!(
            "  {}: no formal definition, subclass relationships, or axioms defined\n",
            record.name
        ));
    }

    out
}

fn render_defined(out: &mut String, record: &ClassRecord) {
    out.push_str(&format!("  {}\n", record.name.bold()));
    if !record.parents.is_empty() {
        out.push_str(&format!("    subclass of: {}\n", record.parents.join(", ")));
    }

    let mut badges: Vec<String> = Vec::new();
    if record.restriction_count > 0 {
        let plural = if record.restriction_count == 1 { "" } else { "s" };
        badges.push(format!("{} restriction{plural}", record.restriction_count));
    }
    if record.has_equivalence {
        badges.push("equivalence axiom".to_string());
    }
    if record.has_disjointness {
        badges.push("disjointness axioms".to_string());
    }
    if !badges.is_empty() {
        out.push_str(&format!("    {}\n", badges.join(" | ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoscope_owl::analyze_document;

    #[test]
    fn report_lists_both_partitions() {
        let result = analyze_document(
            r##"<Ontology>
                 <Declaration><Class IRI="#A"/></Declaration>
                 <Declaration><Class IRI="#B"/></Declaration>
                 <SubClassOf><Class IRI="#A"/><Class IRI="#B"/></SubClassOf>
               </Ontology>"##,
        )
        .expect("well-formed fixture");

        let text = render_text(&result);
        assert!(text.contains("classes declared: 2"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("subclass of: B"));
        assert!(text.contains("B: no formal definition"));
    }

    #[test]
    fn empty_states_are_rendered() {
        let result = analyze_document("<Ontology/>").expect("well-formed fixture");
        let text = render_text(&result);
        assert!(text.contains("no defined classes found"));
        assert!(text.contains("all classes carry a formal definition"));
        assert!(text.contains("0.0%"));
    }
}

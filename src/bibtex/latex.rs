//! LaTeX harness generation.
//!
//! A companion .tex document that cites every generated key once, so a
//! single latex-plus-bibtex run exercises the whole bibliography. Uses the
//! apacite style.

use crate::bibtex::keys::CitationKey;
use crate::bibtex::write::escape_value;

/// Renders the test document for a generated bibliography.
///
/// `bibliography` is the stem passed to `\bibliography{..}`: the .bib file
/// name without its extension.
pub(crate) fn test_document(accepted: &[(CitationKey, String)], bibliography: &str) -> String {
    let mut doc = String::new();
    doc.push_str("\\documentclass{article}\n");
    doc.push_str("\\usepackage{apacite}\n");
    doc.push_str(&format!(
        "\\title{{Test of the \\texttt{{{bibliography}.bib}} file}}\n"
    ));
    doc.push_str("\\begin{document}\n");

    if accepted.is_empty() {
        doc.push_str("No entries.\n");
    } else {
        doc.push_str("\\begin{itemize}\n");
        for (key, title) in accepted {
            doc.push_str(&format!("\\item {} \\cite{{{key}}}\n", escape_value(title)));
        }
        doc.push_str("\\end{itemize}\n");
    }

    doc.push_str("\\bibliographystyle{apacite}\n");
    doc.push_str(&format!("\\bibliography{{{bibliography}}}\n"));
    doc.push_str("\\end{document}\n");
    doc
}

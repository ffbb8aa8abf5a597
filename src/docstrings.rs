//! Docstring coverage
//!
//! A module, function or class is documented when its first body statement
//! is a plain string literal. Nested functions and classes count toward the
//! totals like top-level ones.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::syntax::SourceUnit;

/// Docstring metrics for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocstringReport {
    /// Documented definitions over all definitions, 1.0 when there are none
    pub coverage: f64,
    pub functions_total: usize,
    pub functions_with_docstring: usize,
    pub classes_total: usize,
    pub classes_with_docstring: usize,
    pub module_has_docstring: bool,
}

impl Default for DocstringReport {
    fn default() -> Self {
        Self {
            coverage: 1.0,
            functions_total: 0,
            functions_with_docstring: 0,
            classes_total: 0,
            classes_with_docstring: 0,
            module_has_docstring: false,
        }
    }
}

/// Check docstring presence across a source unit
pub fn check(unit: &SourceUnit) -> DocstringReport {
    let definitions = unit.definitions();

    let functions_total = definitions.functions.len();
    let functions_with_docstring = definitions
        .functions
        .iter()
        .filter(|f| f.docstring.is_some())
        .count();
    let classes_total = definitions.classes.len();
    let classes_with_docstring = definitions
        .classes
        .iter()
        .filter(|c| c.docstring.is_some())
        .count();

    for function in definitions.functions.iter().filter(|f| f.docstring.is_none()) {
        debug!("function {} (line {}) has no docstring", function.name, function.line);
    }
    for class in definitions.classes.iter().filter(|c| c.docstring.is_none()) {
        debug!("class {} (line {}) has no docstring", class.name, class.line);
    }

    let total = functions_total + classes_total;
    let documented = functions_with_docstring + classes_with_docstring;
    let coverage = if total > 0 {
        documented as f64 / total as f64
    } else {
        1.0
    };

    DocstringReport {
        coverage,
        functions_total,
        functions_with_docstring,
        classes_total,
        classes_with_docstring,
        module_has_docstring: unit.module().docstring.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: &str) -> DocstringReport {
        check(&SourceUnit::parse(source).expect("source should parse"))
    }

    #[test]
    fn test_fully_documented() {
        let r = report(
            "\"\"\"Module docstring.\"\"\"\n\ndef documented():\n    \"\"\"This function has a docstring.\"\"\"\n    pass\n\nclass Documented:\n    \"\"\"This class has a docstring.\"\"\"\n    pass\n",
        );
        assert!(r.module_has_docstring);
        assert_eq!(r.functions_total, 1);
        assert_eq!(r.functions_with_docstring, 1);
        assert_eq!(r.classes_total, 1);
        assert_eq!(r.classes_with_docstring, 1);
        assert_eq!(r.coverage, 1.0);
    }

    #[test]
    fn test_partial_coverage() {
        let r = report(
            "def documented():\n    \"\"\"Doc.\"\"\"\n\ndef undocumented():\n    pass\n\nclass Undocumented:\n    pass\n",
        );
        assert!(!r.module_has_docstring);
        assert!((r.coverage - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_vacuous_pass() {
        let r = report("x = 1\n");
        assert_eq!(r.coverage, 1.0);
        assert_eq!(r.functions_total + r.classes_total, 0);
    }

    #[test]
    fn test_adding_documented_function_increases_coverage() {
        let base = "def a():\n    pass\n\nclass B:\n    pass\n";
        let extended = format!("{}\ndef c():\n    \"\"\"Doc.\"\"\"\n", base);
        assert!(report(&extended).coverage > report(base).coverage);
    }

    #[test]
    fn test_nested_definitions_count() {
        let r = report(
            "class Outer:\n    \"\"\"Doc.\"\"\"\n    class Inner:\n        pass\n    def method(self):\n        def helper():\n            \"\"\"Doc.\"\"\"\n        return helper\n",
        );
        assert_eq!(r.classes_total, 2);
        assert_eq!(r.classes_with_docstring, 1);
        assert_eq!(r.functions_total, 2);
        assert_eq!(r.functions_with_docstring, 1);
        assert_eq!(r.coverage, 0.5);
    }
}

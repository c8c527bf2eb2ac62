// src/extract/normalize.rs

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form for free-text labels: trimmed, lowercased, and
/// accent-stripped by NFD decomposition. Idempotent and total over any input.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfd()
        .filter(|&ch| !is_combining_mark(ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_case_and_whitespace() {
        assert_eq!(normalize("  MÉXICO "), "mexico");
        assert_eq!(normalize("Nuevo León"), "nuevo leon");
        assert_eq!(normalize("Yucatán"), "yucatan");
        assert_eq!(normalize("Etiquetas de fila"), "etiquetas de fila");
    }

    #[test]
    fn accent_variants_collapse_to_the_same_form() {
        assert_eq!(normalize("México"), normalize("Mexico"));
        assert_eq!(normalize("Michoacán"), normalize("MICHOACAN"));
        assert_eq!(normalize("Querétaro"), normalize("queretaro "));
    }

    #[test]
    fn idempotent() {
        for s in ["México", "  San Luis Potosí ", "ETIQUETAS DE FILA", "", "1234", "ñandú"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}

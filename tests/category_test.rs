//! Badge resolution for action classifications

use capa::domain::{category_badges, BadgeVariant, CategorySelection};

#[test]
fn test_lopd_type_is_destructive() {
    let badges = category_badges(Some("lopd"), None, None);
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].variant, BadgeVariant::Destructive);
}

#[test]
fn test_unresolved_type_renders_raw_code_once() {
    let badges = category_badges(Some("auditoria-interna"), Some("brecha"), Some("acceso"));
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].text, "auditoria-interna");
    assert_eq!(badges[0].variant, BadgeVariant::Outline);
}

#[test]
fn test_selection_renders_resolved_segments() {
    let selection = CategorySelection::new(
        "calidad",
        Some("producto".to_string()),
        Some("proveedor".to_string()),
    );
    let badges = selection.badges();
    let texts: Vec<_> = badges.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["Calidad", "Producto", "Proveedor"]);
    assert_eq!(badges[0].variant, BadgeVariant::Default);
    assert_eq!(badges[1].variant, BadgeVariant::Secondary);
}

#[test]
fn test_empty_selection_renders_nothing() {
    assert!(CategorySelection::default().badges().is_empty());
}

#[test]
fn test_unresolved_lopd_code_keeps_destructive_variant() {
    for code in ["lopd-2024", "LOPD"] {
        let badges = category_badges(Some(code), None, None);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].text, code);
        assert_eq!(badges[0].variant, BadgeVariant::Destructive);
    }
}

//! Corrective-action classification: type → category → subcategory
//!
//! Only segments that resolve against the taxonomy are rendered. A type code
//! that does not resolve renders as a single fallback badge with the raw code,
//! still coloured by the variant priority.

#[derive(Debug)]
pub struct ActionType {
    pub code: &'static str,
    pub label: &'static str,
    pub categories: &'static [Category],
}

#[derive(Debug)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub subcategories: &'static [Subcategory],
}

#[derive(Debug)]
pub struct Subcategory {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Destructive,
    Warning,
    Default,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub variant: BadgeVariant,
}

impl Badge {
    fn new(text: impl Into<String>, variant: BadgeVariant) -> Self {
        Self {
            text: text.into(),
            variant,
        }
    }
}

/// Selected classification for one action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    pub type_code: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl CategorySelection {
    pub fn new(
        type_code: impl Into<String>,
        category: Option<String>,
        subcategory: Option<String>,
    ) -> Self {
        Self {
            type_code: Some(type_code.into()),
            category,
            subcategory,
        }
    }

    pub fn badges(&self) -> Vec<Badge> {
        category_badges(
            self.type_code.as_deref(),
            self.category.as_deref(),
            self.subcategory.as_deref(),
        )
    }
}

/// Checked in order; first substring hit wins.
const VARIANT_PRIORITY: [(&str, BadgeVariant); 5] = [
    ("lopd", BadgeVariant::Destructive),
    ("prl", BadgeVariant::Warning),
    ("reclamacion", BadgeVariant::Warning),
    ("calidad", BadgeVariant::Default),
    ("medioambiente", BadgeVariant::Secondary),
];

pub const TAXONOMY: &[ActionType] = &[
    ActionType {
        code: "calidad",
        label: "Calidad",
        categories: &[
            Category {
                id: "proceso",
                label: "Proceso",
                subcategories: &[
                    Subcategory { id: "procedimiento", label: "Procedimiento" },
                    Subcategory { id: "registro", label: "Registro" },
                ],
            },
            Category {
                id: "producto",
                label: "Producto",
                subcategories: &[
                    Subcategory { id: "no-conformidad", label: "No conformidad" },
                    Subcategory { id: "proveedor", label: "Proveedor" },
                ],
            },
        ],
    },
    ActionType {
        code: "lopd",
        label: "Protección de datos",
        categories: &[
            Category {
                id: "brecha",
                label: "Brecha de seguridad",
                subcategories: &[
                    Subcategory { id: "acceso", label: "Acceso no autorizado" },
                    Subcategory { id: "perdida", label: "Pérdida de datos" },
                ],
            },
            Category {
                id: "derechos",
                label: "Derechos ARCO",
                subcategories: &[
                    Subcategory { id: "acceso", label: "Derecho de acceso" },
                    Subcategory { id: "supresion", label: "Supresión" },
                ],
            },
        ],
    },
    ActionType {
        code: "prl",
        label: "Prevención de riesgos",
        categories: &[
            Category {
                id: "accidente",
                label: "Accidente",
                subcategories: &[
                    Subcategory { id: "con-baja", label: "Con baja" },
                    Subcategory { id: "sin-baja", label: "Sin baja" },
                ],
            },
            Category {
                id: "incidente",
                label: "Incidente",
                subcategories: &[],
            },
        ],
    },
    ActionType {
        code: "medioambiente",
        label: "Medio ambiente",
        categories: &[Category {
            id: "residuos",
            label: "Residuos",
            subcategories: &[Subcategory { id: "peligrosos", label: "Peligrosos" }],
        }],
    },
    ActionType {
        code: "reclamacion",
        label: "Reclamación",
        categories: &[Category {
            id: "cliente",
            label: "Cliente",
            subcategories: &[],
        }],
    },
];

pub fn find_type(code: &str) -> Option<&'static ActionType> {
    TAXONOMY.iter().find(|t| t.code == code)
}

impl ActionType {
    pub fn category(&self, id: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Category {
    pub fn subcategory(&self, id: &str) -> Option<&'static Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

pub fn variant_for(type_code: &str) -> BadgeVariant {
    let lowered = type_code.to_lowercase();
    VARIANT_PRIORITY
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, variant)| *variant)
        .unwrap_or(BadgeVariant::Outline)
}

/// Badges for a type / category / subcategory selection
pub fn category_badges(
    type_code: Option<&str>,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Vec<Badge> {
    let Some(code) = type_code.filter(|c| !c.is_empty()) else {
        return Vec::new();
    };
    let Some(action_type) = find_type(code) else {
        return vec![Badge::new(code, variant_for(code))];
    };

    let mut badges = vec![Badge::new(action_type.label, variant_for(code))];

    let Some(category) = category.and_then(|id| action_type.category(id)) else {
        return badges;
    };
    badges.push(Badge::new(category.label, BadgeVariant::Secondary));

    if let Some(sub) = subcategory.and_then(|id| category.subcategory(id)) {
        badges.push(Badge::new(sub.label, BadgeVariant::Outline));
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_priority() {
        assert_eq!(variant_for("lopd"), BadgeVariant::Destructive);
        assert_eq!(variant_for("incidencia-LOPD-prl"), BadgeVariant::Destructive);
        assert_eq!(variant_for("prl"), BadgeVariant::Warning);
        assert_eq!(variant_for("otro"), BadgeVariant::Outline);
    }

    #[test]
    fn test_full_resolution() {
        let badges = category_badges(Some("prl"), Some("accidente"), Some("con-baja"));
        let texts: Vec<_> = badges.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Prevención de riesgos", "Accidente", "Con baja"]);
    }

    #[test]
    fn test_subcategory_without_category_is_dropped() {
        let badges = category_badges(Some("calidad"), Some("nope"), Some("registro"));
        assert_eq!(badges.len(), 1);
    }

    #[test]
    fn test_no_type_no_badges() {
        assert!(category_badges(None, Some("brecha"), None).is_empty());
        assert!(category_badges(Some(""), None, None).is_empty());
    }

    #[test]
    fn test_subcategory_scoped_to_category() {
        // "acceso" exists under both lopd categories with different labels
        let badges = category_badges(Some("lopd"), Some("derechos"), Some("acceso"));
        assert_eq!(badges[2].text, "Derecho de acceso");
    }
}

//! Breadcrumb trail derived from a path

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub path: String,
    pub label: String,
    pub is_last: bool,
}

const SEGMENT_LABELS: [(&str, &str); 6] = [
    ("actions", "Acciones"),
    ("centres", "Centros"),
    ("users", "Usuarios"),
    ("reports", "Informes"),
    ("settings", "Configuración"),
    ("new", "Nueva"),
];

fn segment_label(segment: &str) -> &str {
    SEGMENT_LABELS
        .iter()
        .find(|(key, _)| *key == segment)
        .map(|(_, label)| *label)
        .unwrap_or(segment)
}

/// One crumb per path prefix. An empty result means "no breadcrumbs".
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut prefix = String::new();

    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            prefix.push('/');
            prefix.push_str(segment);
            Breadcrumb {
                path: prefix.clone(),
                label: segment_label(segment).to_string(),
                is_last: idx + 1 == segments.len(),
            }
        })
        .collect()
}

#![forbid(unsafe_code)]

use super::model::{CategoryItem, CategorySection, FALLBACK_INDIRECT_GROUP, Taxonomy};
use indexmap::IndexMap;

pub const DIRECT_LABEL: &str = "KOSZTY BEZPOŚREDNIE";
pub const INDIRECT_LABEL: &str = "KOSZTY POŚREDNIE";

const WYNAGRODZENIA: &[(&str, &str)] = &[
    ("1.1", "WYNAGRODZENIA ETATOWE"),
    ("1.2", "WYNAGRODZENIA DODATKOWE"),
    ("1.3", "STYPENDIA"),
];

const APARATURA: &[(&str, &str)] = &[("2", "APARATURA")];

const INNE: &[(&str, &str)] = &[
    ("3.1", "LAPTOPY DLA ZESPOŁU"),
    ("3.2", "Moviesens Software"),
    ("3.3", "PAVLOVIA PLATFORM LICENCE"),
    ("3.4", "FIRMA REKRUTACYJNA (USŁUGI OBCE)"),
    ("3.5", "DYSK ZEWNĘTRZNY"),
    ("3.6", "KONFERENCJE"),
    ("3.7", "PROGRAMING EXP. (USŁUGI OBCE)"),
    ("3.8", "WYKONAWCY ZBIOROWI"),
    ("3.9", "MATERIAŁY BIUROWE"),
];

const PODSTAWOWE: &[(&str, &str)] = &[
    ("P1", "Koszty OA"),
    ("P2", "Koszty 15% kierownika"),
    ("P3", "Koszty pośrednie IP"),
];

fn items(seed: &[(&str, &str)]) -> Vec<CategoryItem> {
    seed.iter()
        .map(|(id, label)| CategoryItem::new(*id, *label))
        .collect()
}

pub fn default_direct_section() -> CategorySection {
    let mut groups = IndexMap::new();
    groups.insert("WYNAGRODZENIA".to_string(), items(WYNAGRODZENIA));
    groups.insert("APARATURA".to_string(), items(APARATURA));
    groups.insert("INNE".to_string(), items(INNE));
    CategorySection {
        label: DIRECT_LABEL.to_string(),
        groups,
    }
}

pub fn default_indirect_section() -> CategorySection {
    let mut groups = IndexMap::new();
    groups.insert(FALLBACK_INDIRECT_GROUP.to_string(), items(PODSTAWOWE));
    CategorySection {
        label: INDIRECT_LABEL.to_string(),
        groups,
    }
}

/// Seed taxonomy used on first launch and for healing malformed input.
pub fn default_taxonomy() -> Taxonomy {
    Taxonomy {
        direct: default_direct_section(),
        indirect: default_indirect_section(),
    }
}

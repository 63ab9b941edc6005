use crate::models::alternative::CuratedSuggestion;

const CREAM: &[CuratedSuggestion] = &[
    CuratedSuggestion {
        name: "Minimalist Marula Oil Moisturizer",
        reason: "Uses an aluminum tube instead of a plastic jar, reducing total plastic waste.",
    },
    CuratedSuggestion {
        name: "Earth Rhythm Phyto Clear Moisturizer",
        reason: "Packaged in a reusable glass jar with lower waste impact than PET.",
    },
    CuratedSuggestion {
        name: "Plum Green Tea Moisturizer",
        reason: "Smaller packaging size means less total material used.",
    },
];

const BODY_WASH: &[CuratedSuggestion] = &[
    CuratedSuggestion {
        name: "Ethique Solid Body Wash Bar",
        reason: "Eliminates plastic bottles entirely by using a solid bar format.",
    },
    CuratedSuggestion {
        name: "Earth Rhythm Body Wash Bar",
        reason: "Zero plastic packaging results in near-zero packaging emissions.",
    },
];

const SUNSCREEN: &[CuratedSuggestion] = &[
    CuratedSuggestion {
        name: "Raw Beauty Wellness Sunscreen Stick",
        reason: "Paper-based packaging avoids high-energy aluminum and plastic bottles.",
    },
    CuratedSuggestion {
        name: "Dot & Key Sunscreen Stick",
        reason: "Compact solid format reduces packaging weight significantly.",
    },
    CuratedSuggestion {
        name: "Minimalist SPF 50 (50g)",
        reason: "Smaller tube uses far less material than large sunscreen bottles.",
    },
];

const SHAMPOO: &[CuratedSuggestion] = &[
    CuratedSuggestion {
        name: "Ethique Shampoo Bar",
        reason: "Solid shampoo bar completely removes the need for plastic bottles.",
    },
    CuratedSuggestion {
        name: "Earth Rhythm Shampoo Bar",
        reason: "Lower water and carbon footprint due to zero liquid packaging.",
    },
    CuratedSuggestion {
        name: "Bare Anatomy Concentrated Shampoo",
        reason: "Concentrated formula requires a smaller bottle.",
    },
];

/// Hand-picked greener products for a category (case-insensitive).
pub fn curated_suggestions(category: &str) -> &'static [CuratedSuggestion] {
    match category.trim().to_lowercase().as_str() {
        "cream" => CREAM,
        "body wash" => BODY_WASH,
        "sunscreen" => SUNSCREEN,
        "shampoo" => SHAMPOO,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_categories_ignoring_case() {
        assert_eq!(curated_suggestions("Body Wash").len(), 2);
        assert_eq!(curated_suggestions("  shampoo ").len(), 3);
        assert_eq!(curated_suggestions("SUNSCREEN")[0].name, "Raw Beauty Wellness Sunscreen Stick");
    }

    #[test]
    fn unknown_category_has_no_suggestions() {
        assert!(curated_suggestions("Toothpaste").is_empty());
    }
}

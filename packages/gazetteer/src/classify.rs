//! Keyword classification of raw candidates.
//!
//! The rule table is data, evaluated in order with the first match winning,
//! so the priority between name keywords and source tags stays visible and
//! testable in one place.

use crate::types::record::Category;

/// How a single rule decides whether it applies.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatcher {
    /// The lowercased name contains any of these keywords
    NameContains(&'static [&'static str]),
    /// Any source tag equals any of these (case-insensitive)
    TagIs(&'static [&'static str]),
}

/// One ordered classification rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: RuleMatcher,
    pub category: Category,
}

/// Source tags that indicate a landmark. Google place types in practice,
/// but any adapter may feed tags from this vocabulary.
pub const LANDMARK_TAGS: &[&str] = &[
    "church",
    "place_of_worship",
    "school",
    "hospital",
    "health",
    "town_hall",
    "local_government_office",
    "city_hall",
    "tourist_attraction",
    "park",
    "natural_feature",
    "museum",
    "cemetery",
    "stadium",
    "point_of_interest",
    "establishment",
    "lodging",
    "restaurant",
    "store",
    "gas_station",
];

/// The classification rules, most specific first. Name evidence always
/// beats tag evidence.
pub const RULES: &[Rule] = &[
    Rule {
        matcher: RuleMatcher::NameContains(&["sitio", "purok", "zone"]),
        category: Category::Sitio,
    },
    Rule {
        matcher: RuleMatcher::NameContains(&["barangay", "brgy"]),
        category: Category::Barangay,
    },
    Rule {
        matcher: RuleMatcher::TagIs(LANDMARK_TAGS),
        category: Category::Landmark,
    },
    Rule {
        matcher: RuleMatcher::TagIs(&["locality", "sublocality", "neighborhood"]),
        category: Category::Barangay,
    },
];

/// Classify a candidate from its name and source tags.
///
/// `default` is the adapter's fallback when no rule matches: `Poi` for
/// place-search results, while source-specific adapters may substitute
/// their own (the Nominatim adapter classifies on its own terms and never
/// reaches this function).
pub fn classify(name: &str, tags: &[String], default: Category) -> Category {
    let lowered = name.to_lowercase();

    for rule in RULES {
        let hit = match rule.matcher {
            RuleMatcher::NameContains(keywords) => {
                keywords.iter().any(|kw| lowered.contains(kw))
            }
            RuleMatcher::TagIs(wanted) => tags
                .iter()
                .any(|tag| wanted.iter().any(|w| tag.eq_ignore_ascii_case(w))),
        };
        if hit {
            return rule.category;
        }
    }

    default
}

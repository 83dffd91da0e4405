//! In-memory directory filtering: free-text search plus exact-match
//! facets, recomputed as a pure function of the request's query string.

use crate::models::CompanyProfile;
use crate::normalize::clean_text;

/// The full filter state, passed in explicitly on every recomputation.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    /// Free-text query; empty means no text constraint.
    pub query: String,
    /// Exact-match country facet, unset means no constraint.
    pub country: Option<String>,
    /// Exact-match sector facet, unset means no constraint.
    pub sector: Option<String>,
}

/// A facet dimension whose option list can be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Country,
    Sector,
}

impl DirectoryFilter {
    /// Builds a filter from raw query parameters. Facet values are
    /// cleaned; an empty selection collapses to unset.
    pub fn new(query: Option<&str>, country: Option<&str>, sector: Option<&str>) -> Self {
        let facet = |v: Option<&str>| {
            let cleaned = clean_text(v);
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        };
        Self {
            query: clean_text(query),
            country: facet(country),
            sector: facet(sector),
        }
    }
}

/// Fixed comparison field set for the text predicate.
fn haystack_matches(profile: &CompanyProfile, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &profile.company_name,
        &profile.sector,
        &profile.company_type,
        &profile.country,
        &profile.city,
    ]
    .iter()
    .any(|field| {
        field
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(needle)
    })
}

/// A set facet passes on exact post-trim equality; unset always passes.
fn facet_matches(field: Option<&str>, selected: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(want) => clean_text(field) == want,
    }
}

/// Applies the filter, preserving input order. Filtering only, no
/// re-sort: the accessor already orders by company name.
pub fn apply<'a>(
    records: &'a [CompanyProfile],
    filter: &DirectoryFilter,
) -> Vec<&'a CompanyProfile> {
    let needle = filter.query.trim().to_lowercase();
    records
        .iter()
        .filter(|p| haystack_matches(p, &needle))
        .filter(|p| facet_matches(p.country.as_deref(), filter.country.as_deref()))
        .filter(|p| facet_matches(p.sector.as_deref(), filter.sector.as_deref()))
        .collect()
}

/// Derives the option list for one facet from the records matching all
/// *other* active constraints. Selecting a facet narrows the other
/// facet's choices while its own rendered range stays intact.
pub fn facet_options(
    records: &[CompanyProfile],
    filter: &DirectoryFilter,
    facet: Facet,
) -> Vec<String> {
    let mut relaxed = filter.clone();
    match facet {
        Facet::Country => relaxed.country = None,
        Facet::Sector => relaxed.sector = None,
    }
    let mut options: Vec<String> = apply(records, &relaxed)
        .into_iter()
        .map(|p| match facet {
            Facet::Country => clean_text(p.country.as_deref()),
            Facet::Sector => clean_text(p.sector.as_deref()),
        })
        .filter(|v| !v.is_empty())
        .collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, country: &str, sector: &str) -> CompanyProfile {
        CompanyProfile {
            id: name.to_lowercase(),
            slug: Some(name.to_lowercase()),
            company_name: Some(name.to_string()),
            country: if country.is_empty() {
                None
            } else {
                Some(country.to_string())
            },
            sector: if sector.is_empty() {
                None
            } else {
                Some(sector.to_string())
            },
            ..Default::default()
        }
    }

    fn sample() -> Vec<CompanyProfile> {
        vec![
            record("Acme", "US", "Steel"),
            record("Globex", "DE", "Energy"),
            record("Initech", "DE", "Software"),
        ]
    }

    #[test]
    fn text_query_matches_substring_case_insensitively() {
        let records = sample();
        let filter = DirectoryFilter::new(Some("acme"), None, None);
        let out = apply(&records, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn empty_query_passes_everything() {
        let records = sample();
        let out = apply(&records, &DirectoryFilter::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn country_facet_is_exact_match() {
        let records = sample();
        let filter = DirectoryFilter::new(None, Some("DE"), None);
        let out = apply(&records, &filter);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.country.as_deref() == Some("DE")));

        let filter = DirectoryFilter::new(None, Some("FR"), None);
        assert!(apply(&records, &filter).is_empty());
    }

    #[test]
    fn facets_and_query_combine() {
        let records = sample();
        let filter = DirectoryFilter::new(Some("soft"), Some("DE"), None);
        let out = apply(&records, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company_name.as_deref(), Some("Initech"));
    }

    #[test]
    fn output_preserves_input_order() {
        let records = sample();
        let filter = DirectoryFilter::new(None, Some("DE"), None);
        let names: Vec<_> = apply(&records, &filter)
            .iter()
            .map(|p| p.company_name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Globex", "Initech"]);
    }

    #[test]
    fn facet_values_compared_post_trim() {
        let mut records = sample();
        records[0].country = Some("  US ".to_string());
        let filter = DirectoryFilter::new(None, Some("US"), None);
        assert_eq!(apply(&records, &filter).len(), 1);
    }

    #[test]
    fn facet_options_narrow_from_other_constraints() {
        let records = sample();
        // Text query excludes every DE record, so DE must not be offered.
        let filter = DirectoryFilter::new(Some("acme"), None, None);
        let countries = facet_options(&records, &filter, Facet::Country);
        assert_eq!(countries, vec!["US"]);
    }

    #[test]
    fn facet_options_ignore_own_selection() {
        let records = sample();
        let filter = DirectoryFilter::new(None, Some("DE"), None);
        // The country list keeps its previously valid range...
        let countries = facet_options(&records, &filter, Facet::Country);
        assert_eq!(countries, vec!["DE", "US"]);
        // ...while the other facet narrows.
        let sectors = facet_options(&records, &filter, Facet::Sector);
        assert_eq!(sectors, vec!["Energy", "Software"]);
    }

    #[test]
    fn facet_options_deduplicate_and_sort() {
        let mut records = sample();
        records.push(record("Umbrella", "DE", "Energy"));
        let options = facet_options(&records, &DirectoryFilter::default(), Facet::Country);
        assert_eq!(options, vec!["DE", "US"]);
    }
}

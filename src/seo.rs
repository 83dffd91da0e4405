//! Discoverability artifacts: sitemap, robots policy and the JSON-LD
//! blocks embedded in rendered pages. Everything here is built from
//! normalized fields only.

use crate::models::CompanyProfile;
use crate::normalize::{self, clean_text};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

const SITE_NAME: &str = "BTrustOn";

/// Escapes the five XML-significant characters for element content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn sitemap_entry(url: &str, lastmod: &str, changefreq: &str, priority: &str) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        escape_xml(url),
        lastmod,
        changefreq,
        priority
    )
}

/// Builds the sitemap document: the root entry, the SPA entry point and
/// one entry per listable profile keyed by slug.
pub fn sitemap_xml(site_url: &str, profiles: &[CompanyProfile], now: DateTime<Utc>) -> String {
    let lastmod = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    xml.push_str(&sitemap_entry(
        &format!("{}/", site_url),
        &lastmod,
        "daily",
        "1.0",
    ));
    xml.push_str(&sitemap_entry(
        &format!("{}/app", site_url),
        &lastmod,
        "daily",
        "0.8",
    ));

    for profile in profiles {
        // The accessor filters on slug server-side; stay defensive here
        // so a degraded row can never emit a broken URL.
        let slug = clean_text(profile.slug.as_deref());
        if slug.is_empty() {
            continue;
        }
        xml.push_str(&sitemap_entry(
            &format!("{}/company/{}", site_url, slug),
            &lastmod,
            "weekly",
            "0.7",
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Allow-all robots policy with a pointer to the sitemap.
pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        site_url
    )
}

/// WebSite block for the home page, advertising the directory search.
pub fn website_jsonld(site_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": SITE_NAME,
        "url": site_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}/?q={{search_term_string}}", site_url),
            "query-input": "required name=search_term_string"
        }
    })
}

/// Organization identity block for a company page.
pub fn organization_jsonld(site_url: &str, profile: &CompanyProfile) -> Value {
    let slug = clean_text(profile.slug.as_deref());
    let mut obj = serde_json::Map::new();
    obj.insert("@context".to_string(), json!("https://schema.org"));
    obj.insert("@type".to_string(), json!("Organization"));
    obj.insert("name".to_string(), json!(profile.display_name()));
    obj.insert(
        "url".to_string(),
        json!(format!("{}/company/{}", site_url, slug)),
    );

    let logo = clean_text(profile.logo_url.as_deref());
    if !logo.is_empty() {
        obj.insert("logo".to_string(), json!(logo));
    }
    let description = clean_text(profile.tagline.as_deref());
    if !description.is_empty() {
        obj.insert("description".to_string(), json!(description));
    }
    if let Some(website) = normalize::normalize_website(profile.website.as_deref()) {
        obj.insert("sameAs".to_string(), json!([website]));
    }
    let city = clean_text(profile.city.as_deref());
    let country = clean_text(profile.country.as_deref());
    if !city.is_empty() || !country.is_empty() {
        let mut address = serde_json::Map::new();
        address.insert("@type".to_string(), json!("PostalAddress"));
        if !city.is_empty() {
            address.insert("addressLocality".to_string(), json!(city));
        }
        if !country.is_empty() {
            address.insert("addressCountry".to_string(), json!(country));
        }
        obj.insert("address".to_string(), Value::Object(address));
    }

    Value::Object(obj)
}

/// Breadcrumb trail block: home directory, then the company page.
pub fn breadcrumb_jsonld(site_url: &str, profile: &CompanyProfile) -> Value {
    let slug = clean_text(profile.slug.as_deref());
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": "Directory",
                "item": format!("{}/", site_url)
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": profile.display_name(),
                "item": format!("{}/company/{}", site_url, slug)
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(slug: &str, name: &str) -> CompanyProfile {
        CompanyProfile {
            id: slug.to_string(),
            slug: Some(slug.to_string()),
            company_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn sitemap_contains_one_entry_per_listable_slug() {
        let profiles = vec![listed("acme", "Acme"), listed("globex", "Globex")];
        let xml = sitemap_xml("https://btruston.com", &profiles, Utc::now());
        assert!(xml.contains("<loc>https://btruston.com/</loc>"));
        assert!(xml.contains("<loc>https://btruston.com/company/acme</loc>"));
        assert!(xml.contains("<loc>https://btruston.com/company/globex</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn sitemap_skips_profiles_without_slug() {
        let mut profile = listed("", "Ghost");
        profile.slug = None;
        let xml = sitemap_xml("https://btruston.com", &[profile], Utc::now());
        assert!(!xml.contains("/company/"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let txt = robots_txt("https://btruston.com");
        assert!(txt.contains("Allow: /"));
        assert!(txt.contains("Sitemap: https://btruston.com/sitemap.xml"));
    }

    #[test]
    fn organization_block_uses_normalized_website() {
        let mut profile = listed("acme", "Acme");
        profile.website = Some("acme.example".to_string());
        let org = organization_jsonld("https://btruston.com", &profile);
        assert_eq!(org["sameAs"][0], "https://acme.example");
        assert_eq!(org["url"], "https://btruston.com/company/acme");
    }

    #[test]
    fn breadcrumb_has_two_positions() {
        let profile = listed("acme", "Acme");
        let crumb = breadcrumb_jsonld("https://btruston.com", &profile);
        assert_eq!(crumb["itemListElement"][0]["position"], 1);
        assert_eq!(crumb["itemListElement"][1]["name"], "Acme");
    }
}

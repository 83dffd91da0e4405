//! HTML document rendering for the server-rendered directory. Raw
//! string assembly in the style of the rest of the crate; layout and
//! styling stay deliberately light, the SPA owns the real experience.

use crate::filter::DirectoryFilter;
use crate::models::CompanyProfile;
use crate::normalize::{self, clean_text, truncate};
use crate::seo;

const SITE_NAME: &str = "BTrustOn";
const APP_URL: &str = "https://www.btruston.com/app";

/// Escapes text for safe interpolation into HTML content or attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Empty display values render as a neutral placeholder, never by
/// collapsing the surrounding layout.
fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "—".to_string()
    } else {
        escape_html(s)
    }
}

const STYLE: &str = "\
:root{color-scheme:dark}\
body{margin:0;background:#070b14;color:#eaf0ff;font-family:ui-sans-serif,system-ui,sans-serif;line-height:1.5}\
a{color:inherit}\
main{max-width:1080px;margin:0 auto;padding:24px;display:grid;gap:14px}\
.card{background:rgba(255,255,255,0.05);border:1px solid rgba(255,255,255,0.12);border-radius:16px;padding:18px}\
.muted{color:rgba(234,240,255,0.65)}\
.pill{display:inline-block;padding:4px 10px;border-radius:999px;border:1px solid rgba(255,255,255,0.12);font-size:13px;margin-right:6px}\
.btn{display:inline-block;padding:9px 14px;border-radius:12px;border:1px solid rgba(255,255,255,0.18);text-decoration:none;font-weight:600}\
.btn.primary{background:#6366f1;border-color:#6366f1}\
.grid3{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:14px}\
.facts{display:grid;grid-template-columns:1fr 1fr;gap:10px}\
.fact .label{font-size:12px;color:rgba(234,240,255,0.6)}\
.verified{display:inline-flex;align-items:center;gap:6px;padding:3px 10px;border-radius:999px;background:rgba(34,197,94,0.18);border:1px solid rgba(34,197,94,0.4);font-size:13px}\
input,select{padding:10px 12px;border-radius:12px;border:1px solid rgba(255,255,255,0.12);background:rgba(0,0,0,0.25);color:#eaf0ff}\
h1,h2{margin:0 0 8px}\
ul.overview{list-style:none;margin:0;padding:0}\
ul.overview li{display:flex;justify-content:space-between;gap:12px;padding:6px 0;border-bottom:1px solid rgba(255,255,255,0.06)}\
.tags{display:flex;flex-wrap:wrap;gap:8px}";

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n{}<style>{}</style>\n</head>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape_html(title),
        head_extra,
        STYLE,
        body
    )
}

fn jsonld_script(value: &serde_json::Value) -> String {
    // JSON-LD goes into a script element; escape the close-tag sequence
    // rather than HTML entities.
    let payload = value.to_string().replace("</", "<\\/");
    format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        payload
    )
}

fn meta_tags(title: &str, description: &str, canonical: &str, image: &str) -> String {
    let title = escape_html(title);
    let description = escape_html(description);
    let canonical = escape_html(canonical);
    let image = escape_html(image);
    format!(
        "<meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{canonical}\">\n\
         <meta property=\"og:site_name\" content=\"{site}\">\n\
         <meta property=\"og:title\" content=\"{title}\">\n\
         <meta property=\"og:description\" content=\"{description}\">\n\
         <meta property=\"og:url\" content=\"{canonical}\">\n\
         <meta property=\"og:image\" content=\"{image}\">\n\
         <meta name=\"twitter:card\" content=\"summary_large_image\">\n\
         <meta name=\"twitter:title\" content=\"{title}\">\n\
         <meta name=\"twitter:description\" content=\"{description}\">\n\
         <meta name=\"twitter:image\" content=\"{image}\">\n",
        site = SITE_NAME,
    )
}

fn verified_badge() -> &'static str {
    "<span class=\"verified\" title=\"Verified\">\
       <svg width=\"12\" height=\"12\" viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M20 6L9 17l-5-5\" stroke=\"currentColor\" stroke-width=\"2.6\" stroke-linecap=\"round\"/></svg>\
       Verified</span>"
}

fn facet_select(name: &str, label: &str, options: &[String], selected: Option<&str>) -> String {
    let mut html = format!(
        "<select name=\"{name}\" aria-label=\"{label}\"><option value=\"\">All {label}</option>",
        name = name,
        label = label
    );
    for option in options {
        let sel = if selected == Some(option.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(option),
            sel
        ));
    }
    html.push_str("</select>");
    html
}

fn directory_card(profile: &CompanyProfile) -> String {
    let name = or_dash(&profile.display_name());
    let tagline = clean_text(profile.tagline.as_deref());
    let subtitle = if tagline.is_empty() {
        let parts: Vec<String> = [
            clean_text(profile.sector.as_deref()),
            clean_text(profile.company_type.as_deref()),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        parts.join(" • ")
    } else {
        tagline
    };

    let mut pills = String::new();
    for (icon, value) in [
        ("🌍", clean_text(profile.country.as_deref())),
        ("📍", clean_text(profile.city.as_deref())),
        ("🏷️", clean_text(profile.sector.as_deref())),
    ] {
        if !value.is_empty() {
            pills.push_str(&format!(
                "<span class=\"pill\">{} {}</span>",
                icon,
                escape_html(&value)
            ));
        }
    }

    let slug = escape_html(&clean_text(profile.slug.as_deref()));
    format!(
        "<div class=\"card\">\
           <div style=\"font-weight:700\">{name}</div>\
           <div class=\"muted\" style=\"min-height:36px;margin-top:6px\">{subtitle}</div>\
           <div style=\"margin-top:8px\">{pills}</div>\
           <div style=\"margin-top:12px;display:flex;gap:10px;flex-wrap:wrap\">\
             <a class=\"btn primary\" href=\"/company/{slug}\">View company page</a>\
             <a class=\"btn\" href=\"{app}/#company={id}\">Open in app</a>\
           </div>\
         </div>",
        name = name,
        subtitle = or_dash(&subtitle),
        pills = pills,
        slug = slug,
        app = APP_URL,
        id = escape_html(&profile.id),
    )
}

/// The home directory: hero, search + facet form, filtered cards.
pub fn home_page(
    site_url: &str,
    total: usize,
    filter: &DirectoryFilter,
    filtered: &[&CompanyProfile],
    countries: &[String],
    sectors: &[String],
) -> String {
    let description =
        "Grow with the right business partners. Verified company profiles and directories.";
    let mut head = meta_tags(
        SITE_NAME,
        description,
        &format!("{}/", site_url),
        &format!("{}/og-default.png", site_url),
    );
    head.push_str(&jsonld_script(&seo::website_jsonld(site_url)));

    let cards: String = filtered.iter().map(|p| directory_card(p)).collect();

    let body = format!(
        "<div class=\"card\">\
           <h1>Grow with the right business partners.</h1>\
           <div class=\"muted\">Server-rendered directory for search engines and investors. The full product experience lives in the app.</div>\
           <div style=\"margin-top:12px\"><a class=\"btn primary\" href=\"/app\">Launch {site}</a></div>\
         </div>\
         <form class=\"card\" method=\"get\" action=\"/\" style=\"display:flex;gap:10px;flex-wrap:wrap;align-items:center\">\
           <input type=\"search\" name=\"q\" value=\"{query}\" placeholder=\"Company, sector, country…\" style=\"flex:1;min-width:220px\">\
           {country_select}\
           {sector_select}\
           <button class=\"btn primary\" type=\"submit\">Search</button>\
           <span class=\"muted\" style=\"font-size:12px\">{shown}/{total}</span>\
         </form>\
         <div class=\"grid3\">{cards}</div>",
        site = SITE_NAME,
        query = escape_html(&filter.query),
        country_select = facet_select("country", "countries", countries, filter.country.as_deref()),
        sector_select = facet_select("sector", "sectors", sectors, filter.sector.as_deref()),
        shown = filtered.len(),
        total = total,
        cards = cards,
    );

    layout(SITE_NAME, &head, &body)
}

fn tag_section(title: &str, labels: &[String]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let pills: String = labels
        .iter()
        .map(|l| format!("<span class=\"pill\">{}</span>", escape_html(l)))
        .collect();
    format!(
        "<section class=\"card\"><h2>{}</h2><div class=\"tags\">{}</div></section>",
        escape_html(title),
        pills
    )
}

fn overview_row(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        "<li><span class=\"muted\">{}</span><strong>{}</strong></li>",
        escape_html(label),
        escape_html(value)
    )
}

/// A single company profile page with metadata and structured data.
pub fn company_page(site_url: &str, profile: &CompanyProfile) -> String {
    let slug = clean_text(profile.slug.as_deref());
    let name = profile.display_name();
    let tagline = clean_text(profile.tagline.as_deref());
    let description_text = clean_text(profile.description.as_deref());

    let meta_description = if !tagline.is_empty() {
        tagline.clone()
    } else if !description_text.is_empty() {
        truncate(Some(&description_text), 160)
    } else {
        format!("{} company profile on {}.", name, SITE_NAME)
    };

    let canonical = format!("{}/company/{}", site_url, slug);
    let og_image = format!("{}/og/company/{}", site_url, slug);

    let mut head = meta_tags(
        &format!("{} | {}", name, SITE_NAME),
        &meta_description,
        &canonical,
        &og_image,
    );
    head.push_str(&jsonld_script(&seo::organization_jsonld(site_url, profile)));
    head.push_str(&jsonld_script(&seo::breadcrumb_jsonld(site_url, profile)));

    let city = clean_text(profile.city.as_deref());
    let country = clean_text(profile.country.as_deref());
    let hq = normalize::location_label(profile.city.as_deref(), profile.country.as_deref());
    let sector = clean_text(profile.sector.as_deref());
    let company_type = clean_text(profile.company_type.as_deref());
    let industry = if sector.is_empty() {
        company_type.clone()
    } else {
        sector.clone()
    };
    let founded = normalize::value_text(profile.founded_year.as_ref());
    let size = clean_text(profile.company_size.as_deref());
    let verified = normalize::is_verified(profile);
    let logo = clean_text(profile.logo_url.as_deref());

    let logo_html = if logo.is_empty() {
        let initial = name.chars().next().unwrap_or('C');
        format!(
            "<div style=\"width:72px;height:72px;border-radius:20px;background:rgba(255,255,255,0.08);display:flex;align-items:center;justify-content:center;font-size:32px;font-weight:800\">{}</div>",
            escape_html(&initial.to_string())
        )
    } else {
        format!(
            "<img src=\"{}\" alt=\"\" style=\"width:72px;height:72px;border-radius:20px;object-fit:cover\">",
            escape_html(&logo)
        )
    };

    let mut pills = String::new();
    for (icon, value) in [
        ("🌐", country.as_str()),
        ("📍", city.as_str()),
        ("🏷️", industry.as_str()),
        ("🏢", company_type.as_str()),
    ] {
        if !value.is_empty() {
            pills.push_str(&format!(
                "<span class=\"pill\">{} {}</span>",
                icon,
                escape_html(value)
            ));
        }
    }
    if !founded.is_empty() {
        pills.push_str(&format!(
            "<span class=\"pill\">⏳ Founded {}</span>",
            escape_html(&founded)
        ));
    }

    let mut actions = format!(
        "<a class=\"btn primary\" href=\"{}#company={}\" rel=\"nofollow\">Open Full Profile</a>",
        APP_URL,
        escape_html(&profile.id)
    );
    if let Some(website) = normalize::normalize_website(profile.website.as_deref()) {
        actions.push_str(&format!(
            "<a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Visit website</a>",
            escape_html(&website)
        ));
    }
    actions.push_str("<a class=\"btn\" href=\"/\">Directory</a>");

    let overview: String = [
        overview_row("Company size", &size),
        overview_row("HQ", &hq),
        overview_row("Address", &clean_text(profile.address.as_deref())),
        overview_row(
            "Registration",
            &clean_text(profile.registration_no.as_deref()),
        ),
    ]
    .concat();

    let facts = format!(
        "<div class=\"facts\">\
           <div class=\"fact\"><div class=\"label\">Industry</div><div>{}</div></div>\
           <div class=\"fact\"><div class=\"label\">HQ</div><div>{}</div></div>\
           <div class=\"fact\"><div class=\"label\">Founded</div><div>{}</div></div>\
           <div class=\"fact\"><div class=\"label\">Size</div><div>{}</div></div>\
         </div>",
        or_dash(&industry),
        or_dash(&hq),
        or_dash(&founded),
        or_dash(&size),
    );

    let about = if description_text.is_empty() {
        String::new()
    } else {
        format!(
            "<section class=\"card\"><h2>About</h2><div class=\"muted\">{}</div></section>",
            escape_html(&description_text)
        )
    };

    // Services fall back to the legacy expertise column when empty.
    let mut services = normalize::normalize_list(profile.services.as_ref());
    if services.is_empty() {
        services = normalize::normalize_list(profile.expertise.as_ref());
    }

    let body = format!(
        "<section class=\"card\">\
           <div style=\"display:flex;gap:16px;align-items:center\">\
             {logo}\
             <div style=\"min-width:0\">\
               <h1>{name}</h1>\
               <div class=\"muted\">{tagline} {badge}</div>\
             </div>\
           </div>\
           <div style=\"margin-top:12px\">{pills}</div>\
           <div style=\"margin-top:12px;display:flex;gap:10px;flex-wrap:wrap\">{actions}</div>\
         </section>\
         <section class=\"card\">\
           <h2>Overview</h2>\
           <ul class=\"overview\">{overview}</ul>\
           <p class=\"muted\">For messaging, quotes, and partner requests, use the full experience in the app.</p>\
         </section>\
         <section class=\"card\"><h2>Key facts</h2>{facts}</section>\
         {about}{services}{projects}{certificates}{assets}",
        logo = logo_html,
        name = escape_html(&name),
        tagline = or_dash(&if tagline.is_empty() {
            format!("Company profile on {}.", SITE_NAME)
        } else {
            tagline.clone()
        }),
        badge = if verified { verified_badge() } else { "" },
        pills = pills,
        actions = actions,
        overview = overview,
        facts = facts,
        about = about,
        services = tag_section("Services", &services),
        projects = tag_section(
            "Projects",
            &normalize::normalize_list(profile.projects.as_ref())
        ),
        certificates = tag_section(
            "Certificates",
            &normalize::normalize_list(profile.certificates.as_ref())
        ),
        assets = tag_section("Assets", &normalize::normalize_list(profile.assets.as_ref())),
    );

    layout(&format!("{} | {}", name, SITE_NAME), &head, &body)
}

/// Generic rendered error page; the caller picked the status code.
pub fn error_page(title: &str) -> String {
    let body = format!(
        "<div class=\"card\"><h1>{}</h1><div class=\"muted\">Head back to the <a href=\"/\">directory</a>.</div></div>",
        escape_html(title)
    );
    layout(&format!("{} | {}", title, SITE_NAME), "", &body)
}

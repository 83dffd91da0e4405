//! Social-preview image generation. One 1200×630 SVG per company,
//! carrying the normalized name, a tagline snippet, the logo and a
//! verification indicator. Pure string assembly, no rasterizer.

use crate::normalize::truncate;

pub const PREVIEW_WIDTH: u32 = 1200;
pub const PREVIEW_HEIGHT: u32 = 630;

const NAME_MAX_CHARS: usize = 42;
const TAGLINE_MAX_CHARS: usize = 110;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Renders the preview card for one company.
///
/// Inputs are raw field values; name and tagline are normalized and
/// snipped here so a runaway description cannot overflow the canvas.
pub fn company_preview_svg(
    name: &str,
    tagline: &str,
    logo_url: Option<&str>,
    verified: bool,
    slug: &str,
) -> String {
    let name = escape_xml(&truncate(Some(name), NAME_MAX_CHARS));
    let tagline = escape_xml(&truncate(Some(tagline), TAGLINE_MAX_CHARS));
    let footer = escape_xml(&format!("btruston.com/company/{}", slug));

    let logo = match logo_url {
        Some(url) if !url.trim().is_empty() => format!(
            "<image href=\"{}\" x=\"90\" y=\"120\" width=\"96\" height=\"96\" clip-path=\"url(#logoClip)\" preserveAspectRatio=\"xMidYMid slice\"/>",
            escape_xml(url.trim())
        ),
        _ => String::new(),
    };

    let badge = if verified {
        "<g transform=\"translate(90, 380)\">\
           <rect width=\"150\" height=\"44\" rx=\"22\" fill=\"rgba(34,197,94,0.22)\" stroke=\"rgba(255,255,255,0.16)\"/>\
           <circle cx=\"26\" cy=\"22\" r=\"6\" fill=\"rgb(34,197,94)\"/>\
           <text x=\"44\" y=\"28\" font-size=\"18\" font-weight=\"600\" fill=\"#ffffff\">Verified</text>\
         </g>"
            .to_string()
    } else {
        String::new()
    };

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\
           <defs>\
             <radialGradient id=\"glow\" cx=\"20%\" cy=\"20%\" r=\"80%\">\
               <stop offset=\"0%\" stop-color=\"rgba(99,102,241,0.40)\"/>\
               <stop offset=\"100%\" stop-color=\"rgba(0,0,0,0)\"/>\
             </radialGradient>\
             <clipPath id=\"logoClip\"><rect x=\"90\" y=\"120\" width=\"96\" height=\"96\" rx=\"24\"/></clipPath>\
           </defs>\
           <rect width=\"{w}\" height=\"{h}\" fill=\"#070b14\"/>\
           <rect width=\"{w}\" height=\"{h}\" fill=\"url(#glow)\"/>\
           <rect x=\"36\" y=\"36\" width=\"{iw}\" height=\"{ih}\" rx=\"36\" fill=\"rgba(255,255,255,0.06)\" stroke=\"rgba(255,255,255,0.12)\"/>\
           <text x=\"90\" y=\"98\" font-size=\"20\" fill=\"rgba(255,255,255,0.85)\" font-family=\"sans-serif\">BTrustOn • Company profile</text>\
           {logo}\
           <text x=\"90\" y=\"290\" font-size=\"54\" font-weight=\"800\" fill=\"#ffffff\" font-family=\"sans-serif\">{name}</text>\
           <text x=\"90\" y=\"340\" font-size=\"26\" fill=\"rgba(255,255,255,0.9)\" font-family=\"sans-serif\">{tagline}</text>\
           {badge}\
           <text x=\"90\" y=\"560\" font-size=\"20\" fill=\"rgba(255,255,255,0.75)\" font-family=\"sans-serif\">{footer}</text>\
         </svg>",
        w = PREVIEW_WIDTH,
        h = PREVIEW_HEIGHT,
        iw = PREVIEW_WIDTH - 72,
        ih = PREVIEW_HEIGHT - 72,
        logo = logo,
        name = name,
        tagline = tagline,
        badge = badge,
        footer = footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_has_fixed_dimensions() {
        let svg = company_preview_svg("Acme", "Steel things", None, false, "acme");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("height=\"630\""));
    }

    #[test]
    fn preview_escapes_markup_in_fields() {
        let svg = company_preview_svg("Acme <&> Co", "a \"quote\"", None, false, "acme");
        assert!(svg.contains("Acme &lt;&amp;&gt; Co"));
        assert!(!svg.contains("<&>"));
    }

    #[test]
    fn verified_badge_only_when_verified() {
        let svg = company_preview_svg("Acme", "", None, true, "acme");
        assert!(svg.contains(">Verified</text>"));
        let svg = company_preview_svg("Acme", "", None, false, "acme");
        assert!(!svg.contains(">Verified</text>"));
    }

    #[test]
    fn logo_included_when_present() {
        let svg =
            company_preview_svg("Acme", "", Some("https://cdn.example/logo.png"), false, "acme");
        assert!(svg.contains("https://cdn.example/logo.png"));
        let svg = company_preview_svg("Acme", "", Some("   "), false, "acme");
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn long_tagline_is_snipped() {
        let tagline = "x".repeat(500);
        let svg = company_preview_svg("Acme", &tagline, None, false, "acme");
        assert!(svg.contains('…'));
        assert!(!svg.contains(&"x".repeat(200)));
    }
}

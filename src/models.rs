use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A company profile row from the remote `profiles` table.
///
/// Every field except `id` is optional: the table schema evolves
/// independently of this read path, and the reduced fallback tiers in
/// [`crate::store`] deserialize into the same struct with most fields
/// absent. List-like fields and the verification flags are kept as raw
/// JSON values because deployments disagree on their physical type
/// (text column vs. json array, bool vs. text flag); the normalizers in
/// [`crate::normalize`] own the coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    /// Opaque stable identifier, unique and immutable.
    pub id: String,
    /// URL-safe unique lookup key. Profiles without one are not listable.
    pub slug: Option<String>,
    /// Display name, may be empty.
    pub company_name: Option<String>,
    /// Industry sector (free text).
    pub sector: Option<String>,
    /// Company type, e.g. "LTD" (free text).
    pub company_type: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    /// Website, not guaranteed to carry a scheme.
    pub website: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    /// External logo image URL.
    pub logo_url: Option<String>,
    /// May arrive as a number or a string depending on schema version.
    pub founded_year: Option<Value>,
    pub company_size: Option<String>,
    pub registration_no: Option<String>,
    /// Label sets: either a json array or a delimiter-joined string.
    pub services: Option<Value>,
    pub expertise: Option<Value>,
    pub projects: Option<Value>,
    pub certificates: Option<Value>,
    pub assets: Option<Value>,
    /// Boolean-ish verification inputs; see `normalize::is_verified`.
    pub verified: Option<Value>,
    pub is_verified: Option<Value>,
    pub blue_tick: Option<Value>,
    /// Free text; "verified" / "approved" count as verified.
    pub verification_status: Option<String>,
    pub updated_at: Option<String>,
}

impl CompanyProfile {
    /// Display name with the slug as a last-resort fallback.
    pub fn display_name(&self) -> String {
        let name = crate::normalize::clean_text(self.company_name.as_deref());
        if !name.is_empty() {
            return name;
        }
        self.slug
            .as_deref()
            .map(|s| s.replace('-', " "))
            .unwrap_or_default()
    }
}

use super::provider::OrganizationThemeProvider;
use super::response::ProviderResponse;
use super::strategy::Latency;
use crate::common::ProviderError;
use crate::palette::ThemeSeeds;
use crate::theme::{Theme, ThemeCategory};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A named seed triple an organization can be mapped to.
///
/// Seeds are kept as strings so a misconfigured table surfaces as a provider
/// failure instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationPalette {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl OrganizationPalette {
    pub fn new(name: &str, primary: &str, secondary: &str, accent: &str) -> Self {
        Self {
            name: name.to_string(),
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
        }
    }

    fn seeds(&self) -> Result<ThemeSeeds, ProviderError> {
        ThemeSeeds::parse(&self.primary, &self.secondary, &self.accent).map_err(|e| {
            ProviderError::Internal(format!("palette '{}' is malformed: {e}", self.name))
        })
    }
}

/// The canned organization palettes. Index 0 is the default organization's.
pub fn default_organization_palettes() -> Vec<OrganizationPalette> {
    vec![
        OrganizationPalette::new("Academy Indigo", "#4F46E5", "#0EA5E9", "#F59E0B"),
        OrganizationPalette::new("Heritage Maroon", "#9F1239", "#B45309", "#FDE68A"),
        OrganizationPalette::new("Evergreen", "#047857", "#0D9488", "#FBBF24"),
        OrganizationPalette::new("Harbor Blue", "#1D4ED8", "#0891B2", "#F97316"),
        OrganizationPalette::new("Sunrise", "#EA580C", "#DB2777", "#8B5CF6"),
    ]
}

/// Ids that always select the first palette.
const DEFAULT_ORGANIZATION_IDS: &[&str] = &["default-org", "default"];

/// 32-bit string hash: `h = (h << 5) - h + code` per char, with wrapping.
pub fn organization_hash(org_id: &str) -> i32 {
    org_id.chars().fold(0i32, |hash, c| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32)
    })
}

/// Bucket an organization id into `buckets` palettes.
pub fn organization_palette_index(org_id: &str, buckets: usize) -> usize {
    if buckets == 0 || DEFAULT_ORGANIZATION_IDS.contains(&org_id) {
        return 0;
    }
    organization_hash(org_id).unsigned_abs() as usize % buckets
}

/// Deterministic organization theme lookup over a fixed palette table.
pub struct SimulatedOrganizationProvider {
    palettes: Vec<OrganizationPalette>,
    latency: Latency,
    calls: AtomicUsize,
}

impl SimulatedOrganizationProvider {
    pub fn new(latency: Latency) -> Self {
        Self::with_palettes(default_organization_palettes(), latency)
    }

    pub fn with_palettes(palettes: Vec<OrganizationPalette>, latency: Latency) -> Self {
        Self {
            palettes,
            latency,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrganizationThemeProvider for SimulatedOrganizationProvider {
    async fn fetch_organization_theme(&self, org_id: &str) -> ProviderResponse<Theme> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.latency.wait().await;

        if org_id.trim().is_empty() {
            return ProviderError::InvalidInput {
                field: "org_id".to_string(),
                reason: "Organization id cannot be empty".to_string(),
            }
            .into();
        }

        let index = organization_palette_index(org_id, self.palettes.len());
        let Some(palette) = self.palettes.get(index) else {
            return ProviderError::Internal("no organization palettes configured".to_string())
                .into();
        };

        let id = format!("org-{org_id}");
        let name = format!("{} ({org_id})", palette.name);

        match palette.seeds() {
            Ok(seeds) => {
                let theme = Theme::from_seeds(id, name, ThemeCategory::Organization, &seeds, false)
                    .with_description(format!("Organization theme for {org_id}"));
                ProviderResponse::success(theme)
            }
            Err(error) => {
                log::warn!("Organization theme for {org_id} failed, attaching fallback: {error}");
                let fallback = Theme::from_seeds(
                    id,
                    name,
                    ThemeCategory::Organization,
                    &ThemeSeeds::fallback(),
                    false,
                );
                ProviderResponse::failure_with_fallback(error, fallback)
            }
        }
    }
}

use super::types::{Theme, ThemeCategory};
use crate::palette::{Rgb, ThemeSeeds};
use once_cell::sync::Lazy;

/// Static description of a built-in theme.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ThemeCategory,
    pub description: &'static str,
    pub seeds: ThemeSeeds,
    pub high_contrast: bool,
}

impl ThemeSpec {
    pub fn build(&self) -> Theme {
        Theme::from_seeds(
            self.id,
            self.name,
            self.category,
            &self.seeds,
            self.high_contrast,
        )
        .with_description(self.description)
    }
}

const fn seeds(primary: u32, secondary: u32, accent: u32) -> ThemeSeeds {
    ThemeSeeds::new(
        Rgb::from_u32(primary),
        Rgb::from_u32(secondary),
        Rgb::from_u32(accent),
    )
}

const fn spec(
    id: &'static str,
    name: &'static str,
    category: ThemeCategory,
    description: &'static str,
    seeds: ThemeSeeds,
) -> ThemeSpec {
    ThemeSpec {
        id,
        name,
        category,
        description,
        seeds,
        high_contrast: false,
    }
}

const fn high_contrast(spec: ThemeSpec) -> ThemeSpec {
    ThemeSpec {
        high_contrast: true,
        ..spec
    }
}

/// Id of the predefined theme flagged as default.
pub const DEFAULT_THEME_ID: &str = "schoolhub-classic";

pub const PREDEFINED_SPECS: &[ThemeSpec] = &[
    spec(
        DEFAULT_THEME_ID,
        "SchoolHub Classic",
        ThemeCategory::System,
        "The standard SchoolHub look",
        seeds(0x7C3AED, 0x0EA5E9, 0xFB7185),
    ),
    spec(
        "schoolhub-ocean",
        "SchoolHub Ocean",
        ThemeCategory::System,
        "Calm blues for long study sessions",
        seeds(0x0369A1, 0x06B6D4, 0x38BDF8),
    ),
    spec(
        "schoolhub-forest",
        "SchoolHub Forest",
        ThemeCategory::System,
        "Natural greens",
        seeds(0x15803D, 0x65A30D, 0xCA8A04),
    ),
    spec(
        "schoolhub-sunset",
        "SchoolHub Sunset",
        ThemeCategory::System,
        "Warm evening tones",
        seeds(0xEA580C, 0xDB2777, 0xFACC15),
    ),
];

pub const CATALOG_SPECS: &[ThemeSpec] = &[
    // Educational
    spec(
        "classroom-blue",
        "Classroom Blue",
        ThemeCategory::Educational,
        "Focused blue for everyday classroom work",
        seeds(0x2563EB, 0x3B82F6, 0xF59E0B),
    ),
    spec(
        "chalkboard-green",
        "Chalkboard Green",
        ThemeCategory::Educational,
        "Inspired by the classic chalkboard",
        seeds(0x166534, 0x4ADE80, 0xFDE68A),
    ),
    spec(
        "library-amber",
        "Library Amber",
        ThemeCategory::Educational,
        "Warm reading-room ambience",
        seeds(0xB45309, 0x92400E, 0x0EA5E9),
    ),
    spec(
        "science-lab",
        "Science Lab",
        ThemeCategory::Educational,
        "Clinical cyan with reactive accents",
        seeds(0x0891B2, 0x14B8A6, 0xE11D48),
    ),
    spec(
        "campus-crimson",
        "Campus Crimson",
        ThemeCategory::Educational,
        "Collegiate crimson and gold",
        seeds(0xB91C1C, 0x7F1D1D, 0xEAB308),
    ),
    // Professional
    spec(
        "corporate-slate",
        "Corporate Slate",
        ThemeCategory::Professional,
        "Neutral slate for administrative staff",
        seeds(0x475569, 0x64748B, 0x0EA5E9),
    ),
    spec(
        "executive-navy",
        "Executive Navy",
        ThemeCategory::Professional,
        "Deep navy with a gold highlight",
        seeds(0x1E3A8A, 0x1E40AF, 0xD97706),
    ),
    spec(
        "graphite",
        "Graphite",
        ThemeCategory::Professional,
        "Low-saturation graphite",
        seeds(0x374151, 0x6B7280, 0x10B981),
    ),
    spec(
        "boardroom-teal",
        "Boardroom Teal",
        ThemeCategory::Professional,
        "Composed teal for reports and dashboards",
        seeds(0x0F766E, 0x115E59, 0xF97316),
    ),
    spec(
        "ledger-indigo",
        "Ledger Indigo",
        ThemeCategory::Professional,
        "Indigo tuned for finance and wallet views",
        seeds(0x4338CA, 0x6366F1, 0x22C55E),
    ),
    // Accessibility
    high_contrast(spec(
        "high-contrast-classic",
        "High Contrast Classic",
        ThemeCategory::Accessibility,
        "Pure black and white surfaces with strong brand colors",
        seeds(0x1D4ED8, 0x047857, 0xB91C1C),
    )),
    high_contrast(spec(
        "high-contrast-ocean",
        "High Contrast Ocean",
        ThemeCategory::Accessibility,
        "High contrast with ocean accents",
        seeds(0x0C4A6E, 0x075985, 0xC2410C),
    )),
    spec(
        "colorblind-safe",
        "Colorblind Safe",
        ThemeCategory::Accessibility,
        "Blue/orange palette distinguishable under common color vision deficiencies",
        seeds(0x0072B2, 0xE69F00, 0x009E73),
    ),
    high_contrast(spec(
        "low-vision-amber",
        "Low Vision Amber",
        ThemeCategory::Accessibility,
        "Maximum contrast with amber focus colors",
        seeds(0x92400E, 0x1E3A8A, 0xB45309),
    )),
    // Seasonal
    spec(
        "spring-bloom",
        "Spring Bloom",
        ThemeCategory::Seasonal,
        "Fresh greens and blossom pinks",
        seeds(0x16A34A, 0xF472B6, 0xFACC15),
    ),
    spec(
        "summer-sun",
        "Summer Sun",
        ThemeCategory::Seasonal,
        "Bright summer break colors",
        seeds(0xF59E0B, 0x0EA5E9, 0xEF4444),
    ),
    spec(
        "autumn-harvest",
        "Autumn Harvest",
        ThemeCategory::Seasonal,
        "Back-to-school autumn tones",
        seeds(0xC2410C, 0xA16207, 0x7C2D12),
    ),
    spec(
        "winter-frost",
        "Winter Frost",
        ThemeCategory::Seasonal,
        "Cool icy blues",
        seeds(0x0284C7, 0x94A3B8, 0x818CF8),
    ),
    spec(
        "holiday-cheer",
        "Holiday Cheer",
        ThemeCategory::Seasonal,
        "Festive red and green",
        seeds(0xDC2626, 0x15803D, 0xEAB308),
    ),
    // Brand
    spec(
        "schoolhub-brand",
        "SchoolHub Brand",
        ThemeCategory::Brand,
        "Official SchoolHub brand colors",
        seeds(0x6D28D9, 0x0284C7, 0xF43F5E),
    ),
    spec(
        "parent-portal",
        "Parent Portal",
        ThemeCategory::Brand,
        "Friendly palette for the parent portal",
        seeds(0x0D9488, 0x7C3AED, 0xF97316),
    ),
    spec(
        "wallet-emerald",
        "Wallet Emerald",
        ThemeCategory::Brand,
        "Trustworthy emerald for payments",
        seeds(0x059669, 0x047857, 0x6366F1),
    ),
    spec(
        "attendance-azure",
        "Attendance Azure",
        ThemeCategory::Brand,
        "Clear azure used by the attendance module",
        seeds(0x0EA5E9, 0x2563EB, 0x22C55E),
    ),
    spec(
        "grades-gold",
        "Grades Gold",
        ThemeCategory::Brand,
        "Achievement gold for report cards",
        seeds(0xCA8A04, 0x854D0E, 0x7C3AED),
    ),
    // Modern
    spec(
        "modern-lavender-mint",
        "Modern Lavender Mint",
        ThemeCategory::Modern,
        "Soft lavender with a mint accent",
        seeds(0x8B5CF6, 0x34D399, 0xF0ABFC),
    ),
    spec(
        "modern-midnight-coral",
        "Modern Midnight Coral",
        ThemeCategory::Modern,
        "Midnight blue paired with coral",
        seeds(0x1E293B, 0x334155, 0xFB7185),
    ),
    spec(
        "modern-sage-sand",
        "Modern Sage Sand",
        ThemeCategory::Modern,
        "Muted sage and sand neutrals",
        seeds(0x65A30D, 0xA8A29E, 0xD6B98C),
    ),
    spec(
        "modern-neon-pulse",
        "Modern Neon Pulse",
        ThemeCategory::Modern,
        "Vivid neon for demo screens",
        seeds(0xD946EF, 0x22D3EE, 0xA3E635),
    ),
    spec(
        "modern-peach-sky",
        "Modern Peach Sky",
        ThemeCategory::Modern,
        "Peach and sky gradients",
        seeds(0xFB923C, 0x60A5FA, 0xF9A8D4),
    ),
    spec(
        "modern-mono",
        "Modern Mono",
        ThemeCategory::Modern,
        "Monochrome with a single blue accent",
        seeds(0x18181B, 0x52525B, 0x3B82F6),
    ),
];

static PREDEFINED: Lazy<Vec<Theme>> = Lazy::new(|| {
    PREDEFINED_SPECS
        .iter()
        .map(|spec| spec.build().with_default(spec.id == DEFAULT_THEME_ID))
        .collect()
});

static CATALOG: Lazy<Vec<Theme>> =
    Lazy::new(|| CATALOG_SPECS.iter().map(ThemeSpec::build).collect());

/// The hardcoded predefined themes. Exactly one is flagged `is_default`.
pub fn predefined_themes() -> Vec<Theme> {
    PREDEFINED.clone()
}

/// The built-in catalog served by the simulated catalog provider.
pub fn catalog_themes() -> Vec<Theme> {
    CATALOG.clone()
}

pub fn is_builtin(id: &str) -> bool {
    PREDEFINED_SPECS
        .iter()
        .chain(CATALOG_SPECS.iter())
        .any(|spec| spec.id == id)
}

use super::provider::DynamicThemeProvider;
use super::response::ProviderResponse;
use super::strategy::{Clock, Latency, SystemClock};
use crate::palette::{Rgb, ThemeSeeds};
use crate::theme::{Theme, ThemeCategory};
use async_trait::async_trait;
use chrono::{Datelike, Timelike};
use std::fmt;
use std::sync::Arc;

/// Part of the day a dynamic theme is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=19 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }

    fn seeds(self) -> ThemeSeeds {
        let (primary, secondary, accent) = match self {
            DayPeriod::Morning => (0xF59E0B, 0x38BDF8, 0x84CC16),
            DayPeriod::Afternoon => (0x0EA5E9, 0x14B8A6, 0xF97316),
            DayPeriod::Evening => (0xC2410C, 0x9333EA, 0xF43F5E),
            DayPeriod::Night => (0x4338CA, 0x1E293B, 0x22D3EE),
        };
        ThemeSeeds::new(
            Rgb::from_u32(primary),
            Rgb::from_u32(secondary),
            Rgb::from_u32(accent),
        )
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates a theme from the current local hour.
pub struct TimeOfDayProvider {
    clock: Arc<dyn Clock>,
    latency: Latency,
}

impl TimeOfDayProvider {
    pub fn new(latency: Latency) -> Self {
        Self::with_clock(Arc::new(SystemClock), latency)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, latency: Latency) -> Self {
        Self { clock, latency }
    }
}

#[async_trait]
impl DynamicThemeProvider for TimeOfDayProvider {
    async fn fetch_dynamic_theme(&self, seed: Option<u64>) -> ProviderResponse<Theme> {
        self.latency.wait().await;

        let now = self.clock.now();
        let hour = now.hour();
        let period = DayPeriod::from_hour(hour);
        // Changes every hour and every day.
        let seed = seed.unwrap_or(u64::from(now.ordinal()) * 24 + u64::from(hour));

        let theme = Theme::from_seeds(
            format!("dynamic-{period}-{seed}"),
            format!("Dynamic {}", period.label()),
            ThemeCategory::Dynamic,
            &period.seeds(),
            false,
        )
        .with_description(format!("Generated for the {period}"));

        ProviderResponse::success(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::strategy::FixedClock;
    use chrono::NaiveDate;

    fn provider_at(hour: u32) -> TimeOfDayProvider {
        let instant = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap();
        TimeOfDayProvider::with_clock(Arc::new(FixedClock(instant)), Latency::none())
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(20), DayPeriod::Night);
    }

    #[tokio::test]
    async fn id_embeds_period_and_default_seed() {
        let theme = provider_at(8)
            .fetch_dynamic_theme(None)
            .await
            .into_result()
            .unwrap();
        // Day 10 of the year, hour 8.
        assert_eq!(theme.id, "dynamic-morning-248");
        assert_eq!(theme.name, "Dynamic Morning");
        assert_eq!(theme.category, ThemeCategory::Dynamic);
    }

    #[tokio::test]
    async fn explicit_seed_is_used() {
        let theme = provider_at(22)
            .fetch_dynamic_theme(Some(42))
            .await
            .into_result()
            .unwrap();
        assert_eq!(theme.id, "dynamic-night-42");
    }
}

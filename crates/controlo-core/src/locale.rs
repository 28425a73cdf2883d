//! Locale pack: keyword tables, calendar names and insight wording
//!
//! Everything language-specific lives here so a different language can be
//! swapped in without touching the parser or the insight rules.
//!
//! ## Configuration Resolution
//!
//! The pack is loaded with a two-layer resolution:
//! 1. An override file (explicit path, or ~/.local/share/controlo/config/locale.toml)
//! 2. Embedded defaults (compiled into the binary) for every key the override omits

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Period;

/// Embedded default pack (compiled into binary)
const DEFAULT_LOCALE: &str = include_str!("../../../config/locale.toml");

/// A category and the compiled keyword pattern that selects it
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    pub category: String,
    pub pattern: Regex,
}

/// Message templates for the four insight rules
///
/// Placeholders are written `{name}` and filled by [`render`].
#[derive(Debug, Clone)]
pub struct InsightTemplates {
    pub busiest_day_text: String,
    pub busiest_day_detail: String,
    pub top_category_text: String,
    pub top_category_detail: String,
    pub weekend_text: String,
    pub weekend_detail: String,
    pub growth_text: String,
    pub growth_detail: String,
}

/// A compiled locale pack
#[derive(Debug, Clone)]
pub struct LocalePack {
    income: Regex,
    yesterday: Regex,
    day_before_yesterday: Regex,
    categories: Vec<CategoryPattern>,
    fallback_category: String,
    weekdays: [String; 7],
    months_short: [String; 12],
    months_long: [String; 12],
    month_title: String,
    templates: InsightTemplates,
}

impl Default for LocalePack {
    fn default() -> Self {
        Self::embedded()
    }
}

impl LocalePack {
    /// The embedded Portuguese pack
    pub fn embedded() -> Self {
        Self::from_toml_str("").expect("embedded locale pack is valid")
    }

    /// Parse an override pack; keys it leaves out come from the embedded pack
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let base: RawLocale = toml::from_str(DEFAULT_LOCALE)?;
        let top: RawLocale = toml::from_str(content)?;
        compile(base.overlay(top))
    }

    /// Load with override resolution (explicit path first, then the data dir)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_locale_path(),
        };

        match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Locale(format!("Failed to read {}: {}", path.display(), e))
                })?;
                info!(path = %path.display(), "Using locale override");
                Self::from_toml_str(&content)
            }
            _ => Ok(Self::embedded()),
        }
    }

    pub fn income_pattern(&self) -> &Regex {
        &self.income
    }

    pub fn yesterday_pattern(&self) -> &Regex {
        &self.yesterday
    }

    pub fn day_before_yesterday_pattern(&self) -> &Regex {
        &self.day_before_yesterday
    }

    /// Category keyword table in declaration order
    pub fn category_patterns(&self) -> &[CategoryPattern] {
        &self.categories
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.num_days_from_sunday() as usize]
    }

    /// Short month label, `month` in 1-12
    pub fn short_month(&self, month: u32) -> &str {
        &self.months_short[(month.clamp(1, 12) - 1) as usize]
    }

    /// Long, capitalized month title such as "Outubro de 2026"
    pub fn month_title(&self, period: Period) -> String {
        let month = self.months_long[(period.month() - 1) as usize].as_str();
        let year = period.year().to_string();
        capitalize(&render(
            &self.month_title,
            &[("month", month), ("year", year.as_str())],
        ))
    }

    pub fn templates(&self) -> &InsightTemplates {
        &self.templates
    }
}

/// Default locale override path
pub fn default_locale_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("controlo").join("config").join("locale.toml"))
}

/// Fill `{name}` placeholders
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Raw pack structure for TOML parsing; every key is optional so overrides
/// can be partial
#[derive(Debug, Default, Deserialize)]
struct RawLocale {
    parser: Option<RawParser>,
    calendar: Option<RawCalendar>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Default, Deserialize)]
struct RawParser {
    income_keywords: Option<Vec<String>>,
    yesterday: Option<Vec<String>>,
    day_before_yesterday: Option<Vec<String>>,
    fallback_category: Option<String>,
    categories: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    keywords: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCalendar {
    weekdays: Option<Vec<String>>,
    months_short: Option<Vec<String>>,
    months_long: Option<Vec<String>>,
    month_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInsights {
    busiest_day_text: Option<String>,
    busiest_day_detail: Option<String>,
    top_category_text: Option<String>,
    top_category_detail: Option<String>,
    weekend_text: Option<String>,
    weekend_detail: Option<String>,
    growth_text: Option<String>,
    growth_detail: Option<String>,
}

fn overlay_section<T>(base: Option<T>, top: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(merge(base, top)),
        (base, top) => top.or(base),
    }
}

impl RawLocale {
    fn overlay(self, top: RawLocale) -> RawLocale {
        RawLocale {
            parser: overlay_section(self.parser, top.parser, RawParser::overlay),
            calendar: overlay_section(self.calendar, top.calendar, RawCalendar::overlay),
            insights: overlay_section(self.insights, top.insights, RawInsights::overlay),
        }
    }
}

impl RawParser {
    fn overlay(self, top: RawParser) -> RawParser {
        RawParser {
            income_keywords: top.income_keywords.or(self.income_keywords),
            yesterday: top.yesterday.or(self.yesterday),
            day_before_yesterday: top.day_before_yesterday.or(self.day_before_yesterday),
            fallback_category: top.fallback_category.or(self.fallback_category),
            categories: top.categories.or(self.categories),
        }
    }
}

impl RawCalendar {
    fn overlay(self, top: RawCalendar) -> RawCalendar {
        RawCalendar {
            weekdays: top.weekdays.or(self.weekdays),
            months_short: top.months_short.or(self.months_short),
            months_long: top.months_long.or(self.months_long),
            month_title: top.month_title.or(self.month_title),
        }
    }
}

impl RawInsights {
    fn overlay(self, top: RawInsights) -> RawInsights {
        RawInsights {
            busiest_day_text: top.busiest_day_text.or(self.busiest_day_text),
            busiest_day_detail: top.busiest_day_detail.or(self.busiest_day_detail),
            top_category_text: top.top_category_text.or(self.top_category_text),
            top_category_detail: top.top_category_detail.or(self.top_category_detail),
            weekend_text: top.weekend_text.or(self.weekend_text),
            weekend_detail: top.weekend_detail.or(self.weekend_detail),
            growth_text: top.growth_text.or(self.growth_text),
            growth_detail: top.growth_detail.or(self.growth_detail),
        }
    }
}

fn required<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| Error::Locale(format!("Missing key: {}", key)))
}

fn fixed<const N: usize>(names: Vec<String>, key: &str) -> Result<[String; N]> {
    <[String; N]>::try_from(names)
        .map_err(|v| Error::Locale(format!("{} needs {} names, got {}", key, N, v.len())))
}

/// Case-insensitive, word-bounded alternation of literal keywords
fn keyword_regex(words: &[String], key: &str) -> Result<Regex> {
    let alternatives: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return Err(Error::Locale(format!("{} needs at least one keyword", key)));
    }
    Ok(Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))?)
}

fn compile(raw: RawLocale) -> Result<LocalePack> {
    let parser = required(raw.parser, "parser")?;
    let calendar = required(raw.calendar, "calendar")?;
    let insights = required(raw.insights, "insights")?;

    let categories = required(parser.categories, "parser.categories")?
        .into_iter()
        .map(|c| {
            let pattern = keyword_regex(&c.keywords, &format!("parser.categories.{}", c.name))?;
            Ok(CategoryPattern {
                category: c.name,
                pattern,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LocalePack {
        income: keyword_regex(
            &required(parser.income_keywords, "parser.income_keywords")?,
            "parser.income_keywords",
        )?,
        yesterday: keyword_regex(&required(parser.yesterday, "parser.yesterday")?, "parser.yesterday")?,
        day_before_yesterday: keyword_regex(
            &required(parser.day_before_yesterday, "parser.day_before_yesterday")?,
            "parser.day_before_yesterday",
        )?,
        categories,
        fallback_category: required(parser.fallback_category, "parser.fallback_category")?,
        weekdays: fixed(required(calendar.weekdays, "calendar.weekdays")?, "calendar.weekdays")?,
        months_short: fixed(
            required(calendar.months_short, "calendar.months_short")?,
            "calendar.months_short",
        )?,
        months_long: fixed(
            required(calendar.months_long, "calendar.months_long")?,
            "calendar.months_long",
        )?,
        month_title: required(calendar.month_title, "calendar.month_title")?,
        templates: InsightTemplates {
            busiest_day_text: required(insights.busiest_day_text, "insights.busiest_day_text")?,
            busiest_day_detail: required(insights.busiest_day_detail, "insights.busiest_day_detail")?,
            top_category_text: required(insights.top_category_text, "insights.top_category_text")?,
            top_category_detail: required(
                insights.top_category_detail,
                "insights.top_category_detail",
            )?,
            weekend_text: required(insights.weekend_text, "insights.weekend_text")?,
            weekend_detail: required(insights.weekend_detail, "insights.weekend_detail")?,
            growth_text: required(insights.growth_text, "insights.growth_text")?,
            growth_detail: required(insights.growth_detail, "insights.growth_detail")?,
        },
    })
}

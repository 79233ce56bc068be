//! Locale data consumed by the formatter.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use minted_shared::{MoneyError, MoneyResult};

use super::{FormatStyle, SymbolPlacement};

/// Source of locale formatting conventions.
///
/// Implement this to plug in a full CLDR data set; [`BuiltinLocales`] covers
/// a handful of common locales.
pub trait LocaleData {
    /// Resolves `locale_id` (e.g. `"de_DE"`) to a format style.
    ///
    /// Fails with `UnknownLocale` if the id is not recognized.
    fn resolve(&self, locale_id: &str) -> MoneyResult<FormatStyle>;
}

/// Small built-in locale table, initialized once on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocales;

impl LocaleData for BuiltinLocales {
    fn resolve(&self, locale_id: &str) -> MoneyResult<FormatStyle> {
        let key = normalize_locale_id(locale_id)
            .ok_or_else(|| MoneyError::UnknownLocale(locale_id.to_string()))?;
        BUILTIN_LOCALES
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| MoneyError::UnknownLocale(locale_id.to_string()))
    }
}

/// Normalizes `de-de`, `DE_de` and `de_DE` to `de_DE`.
fn normalize_locale_id(locale_id: &str) -> Option<String> {
    let normalized = locale_id.trim().replace('-', "_");
    let (language, region) = normalized.split_once('_')?;
    if language.is_empty() || region.is_empty() {
        return None;
    }
    Some(format!(
        "{}_{}",
        language.to_ascii_lowercase(),
        region.to_ascii_uppercase()
    ))
}

fn style(
    symbol_placement: SymbolPlacement,
    symbol_spacing: bool,
    grouping_separator: &str,
    decimal_separator: &str,
) -> FormatStyle {
    FormatStyle {
        symbol_placement,
        symbol_spacing,
        grouping_separator: grouping_separator.to_string(),
        decimal_separator: decimal_separator.to_string(),
        group_size: 3,
    }
}

static BUILTIN_LOCALES: Lazy<HashMap<&'static str, FormatStyle>> = Lazy::new(|| {
    use SymbolPlacement::{Prefix, Suffix};

    let locales = HashMap::from([
        ("en_US", style(Prefix, false, ",", ".")),
        ("en_GB", style(Prefix, false, ",", ".")),
        ("en_IN", style(Prefix, false, ",", ".")),
        ("en_CA", style(Prefix, false, ",", ".")),
        ("en_AU", style(Prefix, false, ",", ".")),
        ("ja_JP", style(Prefix, false, ",", ".")),
        ("zh_CN", style(Prefix, false, ",", ".")),
        ("de_DE", style(Suffix, true, ".", ",")),
        ("es_ES", style(Suffix, true, ".", ",")),
        ("it_IT", style(Suffix, true, ".", ",")),
        ("fr_FR", style(Suffix, true, "\u{202f}", ",")),
        ("sv_SE", style(Suffix, true, "\u{a0}", ",")),
        ("de_CH", style(Prefix, true, "'", ".")),
        ("nl_NL", style(Prefix, true, ".", ",")),
        ("pt_BR", style(Prefix, true, ".", ",")),
    ]);
    tracing::debug!(locales = locales.len(), "built-in locale table initialized");
    locales
});

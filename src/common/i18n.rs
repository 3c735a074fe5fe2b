// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation.failed", "One or more fields are invalid."),
    ("article.not_found", "Article with ID {value} not found."),
    (
        "article.duplicate_number",
        "Article number (GTIN) {value} already exists. Duplicates are not allowed.",
    ),
    ("supplier.not_found", "Supplier with ID {value} not found."),
    ("supplier.duplicate_name", "A supplier named '{value}' already exists."),
    ("payment_term.not_found", "Payment term with ID {value} not found."),
    ("payment_term.duplicate", "Payment term '{value}' already exists."),
    ("auth.invalid_credentials", "Invalid username or password."),
    ("auth.invalid_token", "Authentication token is invalid or missing."),
    ("auth.forbidden", "Your role is not allowed to perform this action."),
    ("internal", "An unexpected error occurred."),
];

const DE: &[(&str, &str)] = &[
    ("validation.failed", "Ein oder mehrere Felder sind ungültig."),
    ("article.not_found", "Artikel mit ID {value} nicht gefunden."),
    (
        "article.duplicate_number",
        "Artikelnummer (GTIN) {value} existiert bereits. Duplikate sind nicht erlaubt.",
    ),
    ("supplier.not_found", "Lieferant mit ID {value} nicht gefunden."),
    ("supplier.duplicate_name", "Ein Lieferant mit dem Namen '{value}' existiert bereits."),
    ("payment_term.not_found", "Zahlungsbedingung mit ID {value} nicht gefunden."),
    ("payment_term.duplicate", "Zahlungsbedingung '{value}' existiert bereits."),
    ("auth.invalid_credentials", "Benutzername oder Passwort ungültig."),
    ("auth.invalid_token", "Authentifizierungs-Token ist ungültig oder fehlt."),
    ("auth.forbidden", "Ihre Rolle darf diese Aktion nicht ausführen."),
    ("internal", "Ein unerwarteter Fehler ist aufgetreten."),
];

/// Message catalogue for error responses, keyed by language then message key.
#[derive(Debug)]
pub struct I18nStore {
    catalogues: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogues = HashMap::new();
        catalogues.insert("en", EN.iter().copied().collect());
        catalogues.insert("de", DE.iter().copied().collect());
        Self { catalogues }
    }

    /// Looks up `key` for `lang`, falling back to English, then to the key itself.
    pub fn translate(&self, lang: &str, key: &str, value: Option<&str>) -> String {
        let template = self
            .catalogues
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| {
                self.catalogues
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|messages| messages.get(key))
            })
            .copied()
            .unwrap_or(key);

        match value {
            Some(value) => template.replace("{value}", value),
            None => template.to_string(),
        }
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

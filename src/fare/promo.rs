use std::collections::HashSet;

use serde::Serialize;

use crate::error::FareError;
use crate::fare::round_half_up;

pub const BUILTIN_CATALOG_VERSION: &str = "2024.1";

const BUILTIN_PROMOS: &[(&str, &str, u8)] = &[
    ("WELCOME10", "10% off your first ride", 10),
    ("RIDE15", "15% off any ride", 15),
    ("SAVE20", "20% off weekend rides", 20),
    ("HALFWAY50", "50% off, limited offer", 50),
    ("FREERIDE", "One free ride", 100),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub code: String,
    pub description: String,
    pub discount_percent: u8,
}

/// Result of applying an optional promo code to a subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoOutcome {
    pub discounted: f64,
    pub discount_percent: u8,
    pub applied_code: Option<String>,
}

/// Read-only set of promo codes, loaded once and shared.
#[derive(Debug, Clone)]
pub struct PromoCatalog {
    version: String,
    promos: Vec<PromoCode>,
}

impl PromoCatalog {
    pub fn new(version: impl Into<String>, promos: Vec<PromoCode>) -> Result<Self, FareError> {
        let mut seen = HashSet::new();

        for promo in &promos {
            if promo.code.is_empty() {
                return Err(FareError::InvalidCatalog("empty promo code".to_string()));
            }
            if promo.code != promo.code.to_uppercase() {
                return Err(FareError::InvalidCatalog(format!(
                    "promo code {} must be uppercase",
                    promo.code
                )));
            }
            if !(1..=100).contains(&promo.discount_percent) {
                return Err(FareError::InvalidCatalog(format!(
                    "promo code {} has discount {}%, expected 1-100",
                    promo.code, promo.discount_percent
                )));
            }
            if !seen.insert(promo.code.as_str()) {
                return Err(FareError::InvalidCatalog(format!(
                    "duplicate promo code {}",
                    promo.code
                )));
            }
        }

        Ok(Self {
            version: version.into(),
            promos,
        })
    }

    pub fn builtin() -> Result<Self, FareError> {
        let promos = BUILTIN_PROMOS
            .iter()
            .map(|(code, description, discount_percent)| PromoCode {
                code: code.to_string(),
                description: description.to_string(),
                discount_percent: *discount_percent,
            })
            .collect();

        Self::new(BUILTIN_CATALOG_VERSION, promos)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn codes(&self) -> &[PromoCode] {
        &self.promos
    }

    pub fn lookup(&self, code: &str) -> Option<&PromoCode> {
        self.promos.iter().find(|p| p.code == code)
    }

    pub fn is_valid(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Applies `code` to `subtotal`. A missing, blank or unknown code leaves
    /// the subtotal untouched.
    pub fn apply(&self, subtotal: f64, code: Option<&str>) -> PromoOutcome {
        let promo = code
            .filter(|c| !c.is_empty())
            .and_then(|c| self.lookup(c));

        match promo {
            Some(promo) => {
                let factor = 1.0 - f64::from(promo.discount_percent) / 100.0;
                PromoOutcome {
                    discounted: round_half_up(subtotal * factor).max(0.0),
                    discount_percent: promo.discount_percent,
                    applied_code: Some(promo.code.clone()),
                }
            }
            None => PromoOutcome {
                discounted: subtotal,
                discount_percent: 0,
                applied_code: None,
            },
        }
    }

    /// Checks a code the user actively submitted, telling "nothing entered"
    /// apart from "entered something we don't know".
    pub fn validate_submission(&self, code: &str) -> Result<&PromoCode, FareError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(FareError::MissingPromoCode);
        }

        self.lookup(code)
            .ok_or_else(|| FareError::InvalidPromoCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(code: &str, discount_percent: u8) -> PromoCode {
        PromoCode {
            code: code.to_string(),
            description: String::new(),
            discount_percent,
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = PromoCatalog::builtin().unwrap();
        assert_eq!(catalog.version(), BUILTIN_CATALOG_VERSION);
        assert!(catalog.is_valid("WELCOME10"));
        assert_eq!(catalog.lookup("WELCOME10").unwrap().discount_percent, 10);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = PromoCatalog::builtin().unwrap();
        assert!(!catalog.is_valid("welcome10"));
        assert!(catalog.lookup("Welcome10").is_none());
    }

    #[test]
    fn test_apply_without_code_is_noop() {
        let catalog = PromoCatalog::builtin().unwrap();
        let outcome = catalog.apply(100.0, None);

        assert_eq!(
            outcome,
            PromoOutcome {
                discounted: 100.0,
                discount_percent: 0,
                applied_code: None,
            }
        );
        assert_eq!(catalog.apply(100.0, Some("")), outcome);
        assert_eq!(catalog.apply(100.0, Some("NOPE")), outcome);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let catalog = PromoCatalog::builtin().unwrap();
        let first = catalog.apply(237.45, Some("SAVE20"));
        let second = catalog.apply(237.45, Some("SAVE20"));

        assert_eq!(first, second);
        assert_eq!(first.discounted, 189.96);
        assert_eq!(first.applied_code.as_deref(), Some("SAVE20"));
    }

    #[test]
    fn test_discount_bounds_hold_for_every_code() {
        let catalog = PromoCatalog::builtin().unwrap();
        for promo in catalog.codes() {
            assert!(promo.discount_percent > 0 && promo.discount_percent <= 100);
            let outcome = catalog.apply(153.37, Some(&promo.code));
            assert!(outcome.discounted <= 153.37);
            assert!(outcome.discounted >= 0.0);
        }
        assert_eq!(catalog.apply(153.37, Some("FREERIDE")).discounted, 0.0);
    }

    #[test]
    fn test_rejects_malformed_catalogs() {
        assert!(PromoCatalog::new("t", vec![promo("", 10)]).is_err());
        assert!(PromoCatalog::new("t", vec![promo("lower", 10)]).is_err());
        assert!(PromoCatalog::new("t", vec![promo("ZERO", 0)]).is_err());
        assert!(PromoCatalog::new("t", vec![promo("BIG", 101)]).is_err());
        assert!(PromoCatalog::new("t", vec![promo("DUP", 5), promo("DUP", 6)]).is_err());
        assert!(PromoCatalog::new("t", vec![promo("OK5", 5)]).is_ok());
    }

    #[test]
    fn test_validate_submission() {
        let catalog = PromoCatalog::builtin().unwrap();

        assert_eq!(catalog.validate_submission("  ").unwrap_err(), FareError::MissingPromoCode);
        assert_eq!(
            catalog.validate_submission("BOGUS").unwrap_err(),
            FareError::InvalidPromoCode("BOGUS".to_string())
        );
        assert_eq!(catalog.validate_submission(" RIDE15 ").unwrap().discount_percent, 15);
    }
}

//! User-facing error messages in the supported locales.

use std::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "tr" | "tr-tr" => Ok(Locale::Tr),
            other => Err(CoreError::Validation(format!(
                "Unsupported locale '{other}'. Must be one of: en, tr"
            ))),
        }
    }
}

impl Locale {
    /// Localized display name for an entity name used in [`CoreError::NotFound`].
    pub fn entity_name(self, entity: &str) -> String {
        match self {
            Locale::En => entity.to_string(),
            Locale::Tr => match entity {
                "Manager" => "Yönetici".to_string(),
                "Tenant" => "Kiracı".to_string(),
                "Property" => "Mülk".to_string(),
                "Application" => "Başvuru".to_string(),
                other => other.to_string(),
            },
        }
    }

    pub fn not_found(self, entity: &str) -> String {
        let name = self.entity_name(entity);
        match self {
            Locale::En => format!("{name} not found"),
            Locale::Tr => format!("{name} bulunamadı"),
        }
    }

    pub fn duplicate(self) -> String {
        match self {
            Locale::En => "A record with the same identifier already exists".to_string(),
            Locale::Tr => "Aynı tanımlayıcıya sahip bir kayıt zaten var".to_string(),
        }
    }

    pub fn invalid_reference(self) -> String {
        match self {
            Locale::En => "The request references a record that does not exist".to_string(),
            Locale::Tr => "İstek, mevcut olmayan bir kayda başvuruyor".to_string(),
        }
    }

    pub fn payload_too_large(self) -> String {
        match self {
            Locale::En => "The request body is too large".to_string(),
            Locale::Tr => "İstek gövdesi çok büyük".to_string(),
        }
    }

    pub fn internal(self) -> String {
        match self {
            Locale::En => "An internal error occurred".to_string(),
            Locale::Tr => "Bir iç hata oluştu".to_string(),
        }
    }
}

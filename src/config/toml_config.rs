use crate::core::policy::{OverpaymentPolicy, PaymentPolicy};
use crate::utils::error::{LedgerError, Result};
use crate::utils::validation::{validate_non_negative, validate_not_empty, validate_range, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub payments: PaymentsConfig,
    pub display: DisplayConfig,
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub minimum_ratio: Decimal,
    pub overpayment: OverpaymentPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

/// A course created before the menu starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub cost: Decimal,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        let policy = PaymentPolicy::default();
        Self {
            minimum_ratio: policy.minimum_ratio,
            overpayment: policy.overpayment,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

impl LedgerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LedgerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LedgerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TUITION_MIN_RATIO})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LedgerError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn payment_policy(&self) -> PaymentPolicy {
        PaymentPolicy::new(self.payments.minimum_ratio, self.payments.overpayment)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.display.currency_symbol
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<()> {
        validate_range(
            "payments.minimum_ratio",
            self.payments.minimum_ratio,
            Decimal::ZERO,
            Decimal::ONE,
        )?;
        validate_not_empty("display.currency_symbol", &self.display.currency_symbol)?;

        for entry in &self.catalog {
            validate_not_empty("catalog.id", &entry.id)?;
            validate_not_empty("catalog.name", &entry.name)?;
            validate_non_negative("catalog.cost", entry.cost)?;
        }

        Ok(())
    }
}

//! Parse-domain types: document types, format detection, image conversion.
//!
//! ## Routing
//!
//! ```text
//! document type ──▶ category ──▶ /document/{category}/extract + /get
//!        │
//!        └─ bank_statement ──▶ format detect ──▶ /parse/bank[/async]
//! ```
//!
//! 1. [`DocumentType`] — the closed set of parseable types; parsing a
//!    string outside the set fails before any network I/O
//! 2. [`mime`]    — extension-only format detection for the bank path
//! 3. [`convert`] — PNG/JPEG → one-page RGB PDF derived artifact

pub mod convert;
pub mod mime;

use crate::error::DocumentAiError;
use crate::gateway::Payload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of document types the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    Payslip,
    Insurance,
    Employment,
    UtilityBills,
    BankStatement,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Invoice,
        DocumentType::Payslip,
        DocumentType::Insurance,
        DocumentType::Employment,
        DocumentType::UtilityBills,
        DocumentType::BankStatement,
    ];

    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Payslip => "payslip",
            DocumentType::Insurance => "insurance",
            DocumentType::Employment => "employment",
            DocumentType::UtilityBills => "utility_bills",
            DocumentType::BankStatement => "bank_statement",
        }
    }

    /// Endpoint category: the wire name with everything from the first
    /// underscore onwards removed (`utility_bills` → `utility`).
    pub fn category(self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Payslip => "payslip",
            DocumentType::Insurance => "insurance",
            DocumentType::Employment => "employment",
            DocumentType::UtilityBills => "utility",
            DocumentType::BankStatement => "bank",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DocumentAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DocumentAiError::UnsupportedDocumentType {
                kind: s.to_string(),
            })
    }
}

/// Final result of a parse request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// Payload of the `get` call that completes the extract-then-get
    /// sequence (all types except bank statements).
    Extracted(Payload),
    /// Bank-statement submission: whether the service accepted it, plus
    /// its raw response.
    Bank { accepted: bool, response: Payload },
}

impl ParseOutcome {
    /// The response payload regardless of routing.
    pub fn payload(&self) -> &Payload {
        match self {
            ParseOutcome::Extracted(payload) => payload,
            ParseOutcome::Bank { response, .. } => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_round_trips_through_from_str() {
        for t in DocumentType::ALL {
            assert_eq!(t.as_str().parse::<DocumentType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            "passport".parse::<DocumentType>(),
            Err(DocumentAiError::UnsupportedDocumentType { kind }) if kind == "passport"
        ));
        assert!("".parse::<DocumentType>().is_err());
        // Wire names are exact; no case folding.
        assert!("Invoice".parse::<DocumentType>().is_err());
    }

    #[test]
    fn category_strips_the_suffix_segment() {
        assert_eq!(DocumentType::UtilityBills.category(), "utility");
        assert_eq!(DocumentType::BankStatement.category(), "bank");
        assert_eq!(DocumentType::Invoice.category(), "invoice");
    }

    #[test]
    fn outcome_payload_reaches_both_variants() {
        let extracted = ParseOutcome::Extracted(Payload::Text("a".into()));
        assert_eq!(extracted.payload().as_text(), Some("a"));

        let bank = ParseOutcome::Bank {
            accepted: false,
            response: Payload::Text("b".into()),
        };
        assert_eq!(bank.payload().as_text(), Some("b"));
    }
}

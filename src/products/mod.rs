pub mod analise;
pub mod facematch;
pub mod flash;
pub mod lite;
pub mod ocr;
pub mod operation;
pub mod score;

pub use operation::{Action, FieldKind, FieldSpec, FieldTarget, OperationKind, OperationSpec};

use std::fmt;
use std::str::FromStr;

/// Product line served by one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ProductLine {
    Analise,
    Facematch,
    Flash,
    Lite,
    Ocr,
    Score,
}

impl ProductLine {
    pub const ALL: [ProductLine; 6] = [
        ProductLine::Analise,
        ProductLine::Facematch,
        ProductLine::Flash,
        ProductLine::Lite,
        ProductLine::Ocr,
        ProductLine::Score,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductLine::Analise => "analise",
            ProductLine::Facematch => "facematch",
            ProductLine::Flash => "flash",
            ProductLine::Lite => "lite",
            ProductLine::Ocr => "ocr",
            ProductLine::Score => "score",
        }
    }

    pub fn server_name(self) -> String {
        format!("acertpix-api-{}", self.as_str())
    }

    pub fn operations(self) -> Vec<OperationKind> {
        OperationKind::ALL
            .into_iter()
            .filter(|kind| kind.product() == self)
            .collect()
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductLine {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|line| line.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|l| l.as_str()).collect();
                format!(
                    "unknown product line '{}' (expected one of: {})",
                    raw.trim(),
                    known.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_belongs_to_exactly_one_line() {
        let total: usize = ProductLine::ALL.iter().map(|l| l.operations().len()).sum();
        assert_eq!(total, OperationKind::ALL.len());
    }

    #[test]
    fn line_tool_sets_match_the_upstream_products() {
        let names = |line: ProductLine| -> Vec<&'static str> {
            line.operations().into_iter().map(|k| k.name()).collect()
        };
        assert_eq!(
            names(ProductLine::Analise),
            vec!["consultar-analise", "obter-laudo-analise", "enviar-analise"]
        );
        assert_eq!(
            names(ProductLine::Score),
            vec!["consultar-score", "enviar-score", "gerar-token"]
        );
        assert_eq!(names(ProductLine::Lite).len(), 2);
        assert_eq!(names(ProductLine::Ocr).len(), 2);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("OCR".parse::<ProductLine>(), Ok(ProductLine::Ocr));
        assert_eq!(" flash ".parse::<ProductLine>(), Ok(ProductLine::Flash));
        let err = "biometria".parse::<ProductLine>().unwrap_err();
        assert!(err.contains("facematch"));
    }

    #[test]
    fn server_name_is_prefixed() {
        assert_eq!(ProductLine::Lite.server_name(), "acertpix-api-lite");
    }
}

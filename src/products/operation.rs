use super::ProductLine;
use super::{analise, facematch, flash, lite, ocr, score};

/// How an operation talks to the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// GET with arguments in the query string.
    Query,
    /// POST with a JSON body; attachments are inlined as base64.
    Submit,
    /// GET returning a binary document that is written to disk.
    DownloadPdf { file_name: &'static str },
    /// Exchanges caller-supplied client credentials for a bearer token.
    IssueToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Local file path; the file content is sent base64 encoded.
    Attachment,
    /// Local directory the operation writes into.
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Query,
    Body,
    /// Substituted into `{name}` in the path. Also sent as a query
    /// parameter when `also_query` is set.
    Template { also_query: bool },
    /// Consumed locally, never sent upstream.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub wire: &'static str,
    pub kind: FieldKind,
    pub target: FieldTarget,
    pub required: bool,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            wire: name,
            kind: FieldKind::Text,
            target: FieldTarget::Body,
            required: false,
            description,
        }
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Integer,
            ..Self::text(name, description)
        }
    }

    pub const fn attachment(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Attachment,
            ..Self::text(name, description)
        }
    }

    pub const fn directory(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Directory,
            target: FieldTarget::Local,
            ..Self::text(name, description)
        }
    }

    pub const fn wire(self, wire: &'static str) -> Self {
        Self { wire, ..self }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn in_query(self) -> Self {
        Self {
            target: FieldTarget::Query,
            ..self
        }
    }

    pub const fn in_path(self) -> Self {
        Self {
            target: FieldTarget::Template { also_query: false },
            ..self
        }
    }

    pub const fn in_path_and_query(self) -> Self {
        Self {
            target: FieldTarget::Template { also_query: true },
            ..self
        }
    }

    pub fn json_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Integer => "integer",
            _ => "string",
        }
    }
}

#[derive(Debug)]
pub struct OperationSpec {
    pub kind: OperationKind,
    pub name: &'static str,
    pub description: &'static str,
    pub action: Action,
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    /// Extended deadline; the effective deadline is never below the default.
    pub timeout_ms: Option<u64>,
}

impl OperationSpec {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn effective_timeout_ms(&self, default_ms: u64) -> u64 {
        self.timeout_ms.map_or(default_ms, |t| t.max(default_ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ConsultarAnalise,
    ObterLaudoAnalise,
    EnviarAnalise,
    ConsultarFacematch,
    EnviarFacematch,
    ObterPdfFacematch,
    ConsultarFlash,
    EnviarDocumentoFlash,
    ExtrairDadosDocumentoFlash,
    ConsultarLite,
    EnviarLite,
    ConsultarOcr,
    EnviarDocumentoOcr,
    ConsultarScore,
    EnviarScore,
    GerarToken,
}

impl OperationKind {
    pub const ALL: [OperationKind; 16] = [
        OperationKind::ConsultarAnalise,
        OperationKind::ObterLaudoAnalise,
        OperationKind::EnviarAnalise,
        OperationKind::ConsultarFacematch,
        OperationKind::EnviarFacematch,
        OperationKind::ObterPdfFacematch,
        OperationKind::ConsultarFlash,
        OperationKind::EnviarDocumentoFlash,
        OperationKind::ExtrairDadosDocumentoFlash,
        OperationKind::ConsultarLite,
        OperationKind::EnviarLite,
        OperationKind::ConsultarOcr,
        OperationKind::EnviarDocumentoOcr,
        OperationKind::ConsultarScore,
        OperationKind::EnviarScore,
        OperationKind::GerarToken,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        match self {
            OperationKind::ConsultarAnalise => &analise::CONSULTAR,
            OperationKind::ObterLaudoAnalise => &analise::OBTER_LAUDO,
            OperationKind::EnviarAnalise => &analise::ENVIAR,
            OperationKind::ConsultarFacematch => &facematch::CONSULTAR,
            OperationKind::EnviarFacematch => &facematch::ENVIAR,
            OperationKind::ObterPdfFacematch => &facematch::OBTER_PDF,
            OperationKind::ConsultarFlash => &flash::CONSULTAR,
            OperationKind::EnviarDocumentoFlash => &flash::ENVIAR_DOCUMENTO,
            OperationKind::ExtrairDadosDocumentoFlash => &flash::EXTRAIR_DADOS,
            OperationKind::ConsultarLite => &lite::CONSULTAR,
            OperationKind::EnviarLite => &lite::ENVIAR,
            OperationKind::ConsultarOcr => &ocr::CONSULTAR,
            OperationKind::EnviarDocumentoOcr => &ocr::ENVIAR_DOCUMENTO,
            OperationKind::ConsultarScore => &score::CONSULTAR,
            OperationKind::EnviarScore => &score::ENVIAR,
            OperationKind::GerarToken => &score::GERAR_TOKEN,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn product(self) -> ProductLine {
        match self {
            OperationKind::ConsultarAnalise
            | OperationKind::ObterLaudoAnalise
            | OperationKind::EnviarAnalise => ProductLine::Analise,
            OperationKind::ConsultarFacematch
            | OperationKind::EnviarFacematch
            | OperationKind::ObterPdfFacematch => ProductLine::Facematch,
            OperationKind::ConsultarFlash
            | OperationKind::EnviarDocumentoFlash
            | OperationKind::ExtrairDadosDocumentoFlash => ProductLine::Flash,
            OperationKind::ConsultarLite | OperationKind::EnviarLite => ProductLine::Lite,
            OperationKind::ConsultarOcr | OperationKind::EnviarDocumentoOcr => ProductLine::Ocr,
            OperationKind::ConsultarScore
            | OperationKind::EnviarScore
            | OperationKind::GerarToken => ProductLine::Score,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_resolves_to_its_own_spec() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.spec().kind, kind, "{} spec points elsewhere", kind);
            assert_eq!(OperationKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<&str> = OperationKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), OperationKind::ALL.len());
    }

    #[test]
    fn template_placeholders_have_matching_fields() {
        for kind in OperationKind::ALL {
            let spec = kind.spec();
            for field in spec.fields {
                if let FieldTarget::Template { .. } = field.target {
                    let placeholder = format!("{{{}}}", field.name);
                    assert!(
                        spec.path.contains(&placeholder),
                        "{} lacks {}",
                        spec.name,
                        placeholder
                    );
                }
            }
            assert_eq!(
                spec.path.matches('{').count(),
                spec.fields
                    .iter()
                    .filter(|f| matches!(f.target, FieldTarget::Template { .. }))
                    .count(),
                "{} has unbound placeholders",
                spec.name
            );
        }
    }

    #[test]
    fn score_submit_gets_the_extended_deadline() {
        let spec = OperationKind::EnviarScore.spec();
        assert_eq!(spec.effective_timeout_ms(30_000), 60_000);
        assert_eq!(spec.effective_timeout_ms(90_000), 90_000);
        assert_eq!(
            OperationKind::ConsultarScore.spec().effective_timeout_ms(30_000),
            30_000
        );
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(OperationKind::from_name("consultar"), None);
        assert_eq!(OperationKind::from_name(""), None);
    }
}

use super::analise::DOCUMENT_SUBMISSION_FIELDS;
use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarLite,
    name: "consultar-lite",
    description: "Consultar a analise do produto lite com uma chave na API da Acertpix",
    action: Action::Query,
    path: "/Lite/Consultar",
    fields: &[FieldSpec::text("chave", "Chave da analise lite").required().in_query()],
    timeout_ms: None,
};

pub static ENVIAR: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarLite,
    name: "enviar-lite",
    description: "Enviar documento lite na API da AcertPix",
    action: Action::Submit,
    path: "/Lite/Enviar",
    fields: DOCUMENT_SUBMISSION_FIELDS,
    timeout_ms: None,
};

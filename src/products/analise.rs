use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};

/// Document fields shared by the full and lite analysis submissions.
pub(crate) const DOCUMENT_SUBMISSION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Chave", "Chave de acesso da conta do cliente").required(),
    FieldSpec::attachment("ImagemFrente", "Caminho da imagem da frente do documento").required(),
    FieldSpec::attachment("ImagemVerso", "Caminho da imagem do verso do documento"),
    FieldSpec::attachment("ImagemSelfie", "Caminho da selfie do cliente"),
    FieldSpec::attachment("ImagemQrCode", "Caminho da imagem do QR Code"),
    FieldSpec::text("CPF", "CPF do cliente"),
];

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarAnalise,
    name: "consultar-analise",
    description: "Consultar a Analise de uma chave na API da Acertpix",
    action: Action::Query,
    path: "/Analises/Consultar",
    fields: &[FieldSpec::text("chave", "Chave da analise").required().in_query()],
    timeout_ms: None,
};

pub static OBTER_LAUDO: OperationSpec = OperationSpec {
    kind: OperationKind::ObterLaudoAnalise,
    name: "obter-laudo-analise",
    description: "Consultar o Laudo da Analise de um Id na API da Acertpix",
    action: Action::Query,
    path: "/Analises/ObterLaudo/{id}",
    fields: &[FieldSpec::integer("id", "Id da analise").required().in_path_and_query()],
    timeout_ms: None,
};

pub static ENVIAR: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarAnalise,
    name: "enviar-analise",
    description: "Enviar documento para analise na API da AcertPix. Os caminhos de imagem sao lidos localmente e enviados em base64",
    action: Action::Submit,
    path: "/Analises/Enviar",
    fields: DOCUMENT_SUBMISSION_FIELDS,
    timeout_ms: None,
};

use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};

const DOCUMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("modelo", "Modelo do documento").required().in_path(),
    FieldSpec::text("chave", "Chave de acesso da conta do cliente")
        .wire("Chave")
        .required(),
    FieldSpec::attachment("caminho_imagem_documento", "Caminho da imagem do documento")
        .wire("ImagemDocumento")
        .required(),
    FieldSpec::text("tipo_documento", "Tipo do documento").wire("TipoDocumento"),
    FieldSpec::text("cpf", "CPF do cliente").wire("CPF"),
];

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarFlash,
    name: "consultar-flash",
    description: "Consulta resultado Flash de uma chave na API da Acertpix",
    action: Action::Query,
    path: "/Flash/V2/Consultar",
    fields: &[FieldSpec::text("chave", "Chave do envio Flash").required().in_query()],
    timeout_ms: None,
};

pub static ENVIAR_DOCUMENTO: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarDocumentoFlash,
    name: "enviar-documento-flash",
    description: "Envia documento para Flash na API da Acertpix",
    action: Action::Submit,
    path: "/Flash/V2/Enviar/{modelo}",
    fields: DOCUMENT_FIELDS,
    timeout_ms: None,
};

pub static EXTRAIR_DADOS: OperationSpec = OperationSpec {
    kind: OperationKind::ExtrairDadosDocumentoFlash,
    name: "extrair-dados-documento-flash",
    description: "Extrair dados de um documento com Flash na API da Acertpix",
    action: Action::Submit,
    path: "/Flash/V2/ExtrairDados/{modelo}",
    fields: DOCUMENT_FIELDS,
    timeout_ms: None,
};

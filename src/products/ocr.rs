use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarOcr,
    name: "consultar-ocr",
    description: "Consultar OCR com uma chave na API da Acertpix",
    action: Action::Query,
    path: "/OCR/Consultar",
    fields: &[FieldSpec::text("chave", "Chave do OCR").required().in_query()],
    timeout_ms: None,
};

pub static ENVIAR_DOCUMENTO: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarDocumentoOcr,
    name: "enviar-documento-ocr",
    description: "Enviar um documento para ser gerado um OCR desse documento; os arquivos sao convertidos localmente para base64 antes do envio",
    action: Action::Submit,
    path: "/OCR/Enviar",
    fields: &[
        FieldSpec::text("chave", "Chave de acesso da conta do cliente").required(),
        FieldSpec::text("cpf", "CPF do cliente"),
        FieldSpec::attachment("caminhoImagemFrente", "Caminho da imagem da frente do documento")
            .wire("imagemFrente")
            .required(),
        FieldSpec::attachment("caminhoImagemVerso", "Caminho da imagem do verso do documento")
            .wire("imagemVerso"),
    ],
    timeout_ms: None,
};

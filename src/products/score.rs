use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};
use crate::constants::network::TIMEOUT_SCORE_SUBMIT_MS;
use crate::constants::oauth::TOKEN_PATH;

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarScore,
    name: "consultar-score",
    description: "Consulta o score de uma chave na API da Acertpix",
    action: Action::Query,
    path: "/Score/Consultar",
    fields: &[FieldSpec::text("chave", "Chave para consulta de score").required().in_query()],
    timeout_ms: None,
};

pub static ENVIAR: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarScore,
    name: "enviar-score",
    description: "Envia Analise para Score na API da Acertpix",
    action: Action::Submit,
    path: "/Score/Enviar",
    fields: &[
        FieldSpec::text("chave", "Chave de acesso da conta do cliente")
            .wire("Chave")
            .required(),
        FieldSpec::text("cpf", "CPF do cliente").wire("CPF"),
        FieldSpec::attachment("ImagemFrentePath", "Caminho da imagem da frente do documento")
            .wire("ImagemFrente")
            .required(),
        FieldSpec::attachment("ImagemVersoPath", "Caminho da imagem do verso do documento")
            .wire("ImagemVerso"),
        FieldSpec::attachment("ImagemSelfiePath", "Caminho da selfie do cliente")
            .wire("ImagemSelfie"),
        FieldSpec::attachment("ImagemQrCodePath", "Caminho da imagem do QR Code")
            .wire("ImagemQrCode"),
    ],
    timeout_ms: Some(TIMEOUT_SCORE_SUBMIT_MS),
};

pub static GERAR_TOKEN: OperationSpec = OperationSpec {
    kind: OperationKind::GerarToken,
    name: "gerar-token",
    description: "Gera um token de acesso na API da Acertpix",
    action: Action::IssueToken,
    path: TOKEN_PATH,
    fields: &[
        FieldSpec::text("client_id", "Client ID da API").required(),
        FieldSpec::text("client_secret", "Client Secret da API").required(),
    ],
    timeout_ms: None,
};

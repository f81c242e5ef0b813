use super::operation::{Action, FieldSpec, OperationKind, OperationSpec};

pub static CONSULTAR: OperationSpec = OperationSpec {
    kind: OperationKind::ConsultarFacematch,
    name: "consultar-facematch",
    description: "Consulta os facematch de uma ID na API da Acertpix",
    action: Action::Query,
    path: "/Biometria/Consultar/{id}",
    fields: &[FieldSpec::integer("id", "Id do facematch").required().in_path()],
    timeout_ms: None,
};

pub static ENVIAR: OperationSpec = OperationSpec {
    kind: OperationKind::EnviarFacematch,
    name: "enviar-facematch",
    description: "Envia documentos para facematch na API da Acertpix",
    action: Action::Submit,
    path: "/Biometria/Enviar",
    fields: &[
        FieldSpec::text("chave", "Chave de acesso da conta do cliente").required(),
        FieldSpec::text("cpf", "CPF do cliente"),
        FieldSpec::attachment("caminhoImagemFrente", "Caminho da imagem da frente do documento")
            .wire("imagemFrente")
            .required(),
        FieldSpec::attachment("caminhoImagemVerso", "Caminho da imagem do verso do documento")
            .wire("imagemVerso"),
        FieldSpec::attachment("caminhoImagemSelfie", "Caminho da selfie do cliente")
            .wire("imagemSelfie")
            .required(),
    ],
    timeout_ms: None,
};

pub static OBTER_PDF: OperationSpec = OperationSpec {
    kind: OperationKind::ObterPdfFacematch,
    name: "obter-pdf-facematch",
    description: "Buscar/Consultar/Obter o pdf do facematch de um ID na API da AcertPix",
    action: Action::DownloadPdf {
        file_name: "facematch_pdf_{id}.pdf",
    },
    path: "/Biometria/ObterPdf/{id}",
    fields: &[
        FieldSpec::integer("id", "Id do facematch").required().in_path(),
        FieldSpec::directory("caminho_salvar", "Diretorio onde o pdf sera salvo").required(),
    ],
    timeout_ms: None,
};

//! User-facing text, in the product's language (pt-BR).

/// Shown in `Failed`, whatever the underlying cause
pub const GENERATION_FAILED: &str =
    "Falha ao gerar imagem. Por favor, tente novamente com uma foto diferente.";

pub const UPLOAD_PROMPT: &str = "Clique para enviar ou arraste e solte";
pub const PREVIEW_READY: &str = "Gerar Foto Profissional";
pub const GENERATING_TITLE: &str = "Transformando sua foto...";
pub const GENERATING_DETAIL: &str =
    "Aplicando iluminação profissional, ajustando o fundo e melhorando a qualidade.";
pub const RESULT_TITLE: &str = "Resultado Profissional";
pub const ORIGINAL_LABEL: &str = "Original";
pub const TRY_ANOTHER: &str = "Tentar Outra Foto";
pub const DOWNLOAD_ACTION: &str = "Baixar Imagem";

/// Confere se os primeiros bytes do arquivo batem com a extensão declarada
///
/// `extension` inclui o ponto (ex.: ".pdf"). Texto puro não tem assinatura
/// e é aceito; extensões desconhecidas são recusadas.
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // Peças e documentos
        ".pdf" => data.starts_with(b"%PDF"),
        ".rtf" => data.starts_with(b"{\\rtf"),
        ".doc" | ".xls" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        // OOXML e OpenDocument são ZIP
        ".docx" | ".xlsx" | ".odt" | ".ods" | ".zip" => {
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // Imagens (documentos digitalizados, fotos)
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        ".txt" | ".csv" => true,

        _ => false,
    }
}

/// Content-Type enviado no download, pela extensão
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".rtf" => "application/rtf",
        ".doc" => "application/msword",
        ".xls" => "application/vnd.ms-excel",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".odt" => "application/vnd.oasis.opendocument.text",
        ".ods" => "application/vnd.oasis.opendocument.spreadsheet",
        ".zip" => "application/zip",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".txt" => "text/plain; charset=utf-8",
        ".csv" => "text/csv; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.7";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(validate_magic_bytes(pdf_header, ".PDF"));
        assert!(!validate_magic_bytes(pdf_header, ".docx"));
    }

    #[test]
    fn test_zip_based_documents() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&zip_header, ".docx"));
        assert!(validate_magic_bytes(&zip_header, ".odt"));
        assert!(!validate_magic_bytes(&zip_header, ".pdf"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".png"));
    }

    #[test]
    fn test_text_files() {
        assert!(validate_magic_bytes(b"Ata da audiencia", ".txt"));
        assert!(validate_magic_bytes(b"a;b;c", ".csv"));
    }

    #[test]
    fn test_empty_data_and_unknown_extension() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for_extension(".PDF"), "application/pdf");
        assert_eq!(content_type_for_extension(".bin"), "application/octet-stream");
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\s-]{8,20}$").expect("Invalid phone regex"));

static CNJ_MASKED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{7}-[0-9]{2}\.[0-9]{4}\.[0-9]\.[0-9]{2}\.[0-9]{4}$").expect("Invalid CNJ regex")
});

static CNJ_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{20}$").expect("Invalid CNJ digits regex"));

static FREE_PROCESS_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9./-]{3,50}$").expect("Invalid process number regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("E-mail em formato inválido");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err("O nome deve ter entre 2 e 100 caracteres");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Telefone em formato inválido");
    }
    Ok(())
}

/// Resultado da validação da política de senhas
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Política de senhas
///
/// - mínimo de 8 caracteres
/// - maiúscula, minúscula e dígito obrigatórios
/// - senhas comuns são recusadas
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("A senha deve ter pelo menos 8 caracteres");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("A senha deve conter ao menos uma letra maiúscula");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("A senha deve conter ao menos uma letra minúscula");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("A senha deve conter ao menos um número");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "senha123",
        "Senha123",
        "Mudar123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Senha muito comum, escolha uma senha mais forte");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Valida e normaliza o número do processo
///
/// Números de 20 dígitos (com ou sem máscara) seguem a numeração única do CNJ
/// (`NNNNNNN-DD.AAAA.J.TR.OOOO`, dígitos verificadores ISO 7064 mod 97) e são
/// devolvidos sempre mascarados. Outros números (processos administrativos,
/// protocolos internos) são aceitos como vieram.
pub fn normalize_process_number(number: &str) -> Result<String, &'static str> {
    let number = number.trim();

    if CNJ_MASKED_RE.is_match(number) || CNJ_DIGITS_RE.is_match(number) {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 20 || !cnj_check_digits_valid(&digits) {
            return Err("Dígitos verificadores do número CNJ inválidos");
        }
        return Ok(format!(
            "{}-{}.{}.{}.{}.{}",
            &digits[0..7],
            &digits[7..9],
            &digits[9..13],
            &digits[13..14],
            &digits[14..16],
            &digits[16..20]
        ));
    }

    if !FREE_PROCESS_NUMBER_RE.is_match(number) {
        return Err(
            "Número do processo deve ter de 3 a 50 caracteres (letras, números, '.', '/' ou '-')",
        );
    }
    Ok(number.to_string())
}

/// `digits` tem exatamente 20 dígitos ASCII
fn cnj_check_digits_valid(digits: &str) -> bool {
    let (sequential, rest) = digits.split_at(7);
    let (check, tail) = rest.split_at(2);
    let rearranged = format!("{sequential}{tail}{check}");
    rearranged
        .parse::<u128>()
        .map(|value| value % 97 == 1)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("Direito2024").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"A senha deve ter pelo menos 8 caracteres")
        );
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        let result = validate_password("AbcdEfgh");
        assert!(
            result
                .errors
                .contains(&"A senha deve conter ao menos um número")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Senha123");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Senha muito comum, escolha uma senha mais forte")
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("aluno@universidade.edu.br").is_ok());
        assert!(validate_email("sem-arroba.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_name_and_phone() {
        assert!(validate_name("Maria").is_ok());
        assert!(validate_name(" M ").is_err());
        assert!(validate_phone("(11) 98765-4321").is_ok());
        assert!(validate_phone("+55 11 3333-4444").is_ok());
        assert!(validate_phone("abc").is_err());
    }

    #[test]
    fn test_cnj_masked_number() {
        assert_eq!(
            normalize_process_number("0001234-08.2023.8.26.0100").unwrap(),
            "0001234-08.2023.8.26.0100"
        );
        assert_eq!(
            normalize_process_number(" 0710802-07.2023.8.26.0100 ").unwrap(),
            "0710802-07.2023.8.26.0100"
        );
    }

    #[test]
    fn test_cnj_unmasked_number_is_masked() {
        assert_eq!(
            normalize_process_number("10000015620238260100").unwrap(),
            "1000001-56.2023.8.26.0100"
        );
    }

    #[test]
    fn test_cnj_wrong_check_digits() {
        assert!(normalize_process_number("0001234-09.2023.8.26.0100").is_err());
        assert!(normalize_process_number("00012340920238260100").is_err());
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(normalize_process_number(&"٠".repeat(20)).is_err());
        assert!(normalize_process_number("٠٠٠١٢٣٤-٠٨.٢٠٢٣.٨.٢٦.٠١٠٠").is_err());
        assert!(normalize_process_number(&"１".repeat(20)).is_err());
    }

    #[test]
    fn test_free_form_number() {
        assert_eq!(normalize_process_number("ADM-2024/15").unwrap(), "ADM-2024/15");
        assert!(normalize_process_number("ab").is_err());
        assert!(normalize_process_number("processo com espaço").is_err());
        assert!(normalize_process_number(&"9".repeat(51)).is_err());
    }
}

//! Display formatting for exported values.

/// Format a CNPJ for display: digits only, left-padded to 14, punctuated
/// as `NN.NNN.NNN/NNNN-NN`. Inputs without digits come back unchanged.
pub fn format_cnpj(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return raw.trim().to_string();
    }
    let padded = format!("{digits:0>14}");
    if padded.len() > 14 {
        return padded;
    }
    format!(
        "{}.{}.{}/{}-{}",
        &padded[0..2],
        &padded[2..5],
        &padded[5..8],
        &padded[8..12],
        &padded[12..14]
    )
}

/// Format integer cents in Brazilian convention: dot thousands separator,
/// comma decimal. `123456` becomes `1.234,56`.
pub fn format_brl(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let whole = abs / 100;
    let frac = abs % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{grouped},{frac:02}", if negative { "-" } else { "" })
}

//! Result formatting
//!
//! Results are shown with four decimals and comma digit grouping, e.g.
//! `1,000.0000 Meters -> 1.0000 Kilometers`.

use crate::Unit;

/// Decimal places used for displayed values
pub const DISPLAY_DECIMALS: usize = 4;

/// Format with a fixed number of decimals and `,` between thousands
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    // NaN and inf have no digits to group
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return formatted;
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// `"{value} {from} -> {result} {to}"` with display formatting applied
pub fn render_line(value: f64, from: Unit, result: f64, to: Unit) -> String {
    format!(
        "{} {} -> {} {}",
        format_grouped(value, DISPLAY_DECIMALS),
        from.name(),
        format_grouped(result, DISPLAY_DECIMALS),
        to.name()
    )
}

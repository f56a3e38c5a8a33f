/// Formats `value` as `d.dde±XX`: fixed mantissa precision and an exponent
/// that always carries a sign and at least two digits.
pub fn scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent)
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        },
        None => formatted
    }
}

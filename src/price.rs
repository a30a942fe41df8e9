//! Price display.
//!
//! In the browser the price goes through `Intl.NumberFormat` for the checkout
//! locale; elsewhere (and for currency codes `Intl` would reject) a small
//! symbol table stands in.

/// Format `amount_minor / 100` as a currency amount with exactly two decimals,
/// e.g. `format_price(1099, "myr", "MS") == "RM10.99"`.
pub fn format_price(amount_minor: u64, currency: &str, locale: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    let intl = intl_format(amount_minor, currency, locale);
    #[cfg(not(target_arch = "wasm32"))]
    let intl: Option<String> = {
        let _ = locale;
        None
    };

    intl.unwrap_or_else(|| fallback_format(amount_minor, currency))
}

/// `Intl.NumberFormat([locale], { style: "currency", currency, currencyDisplay: "symbol" })`.
#[cfg(target_arch = "wasm32")]
fn intl_format(amount_minor: u64, currency: &str, locale: &str) -> Option<String> {
    use wasm_bindgen::JsValue;
    use web_sys::js_sys::{Array, Intl, Object, Reflect};

    // The constructor throws a RangeError on malformed codes; don't hand it one.
    let code = currency.trim();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let options = Object::new();
    for (key, value) in [
        ("style", JsValue::from_str("currency")),
        ("currency", JsValue::from_str(&code.to_ascii_uppercase())),
        ("currencyDisplay", JsValue::from_str("symbol")),
        ("minimumFractionDigits", JsValue::from_f64(2.0)),
        ("maximumFractionDigits", JsValue::from_f64(2.0)),
    ] {
        Reflect::set(&options, &JsValue::from_str(key), &value).ok()?;
    }

    let locales = Array::of1(&JsValue::from_str(locale));
    let format = Intl::NumberFormat::new(&locales, &options).format();
    let amount = JsValue::from_f64(amount_minor as f64 / 100.0);
    format.call1(&JsValue::NULL, &amount).ok()?.as_string()
}

/// Symbol shown in front of the amount for a currency code.
///
/// Unknown codes fall back to the upper-cased ISO code followed by a space.
pub fn currency_symbol(currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let symbol = match code.as_str() {
        "MYR" => "RM",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "SGD" => "S$",
        "AUD" => "A$",
        "CAD" => "CA$",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "IDR" => "Rp",
        "THB" => "฿",
        "PHP" => "₱",
        _ => return format!("{code} "),
    };
    symbol.to_string()
}

/// Locale-independent rendering: symbol, `,` thousands, two decimals.
pub fn fallback_format(amount_minor: u64, currency: &str) -> String {
    let major = amount_minor / 100;
    let minor = amount_minor % 100;
    format!("{}{}.{:02}", currency_symbol(currency), group_thousands(major), minor)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

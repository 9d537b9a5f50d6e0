//! Catalog rules for sized items: ordering, pricing and naming.
//!
//! A size item may override its product line's discount and hide-price
//! flags; `None` on the item means "inherit from the line".

/// Numeric sort key for a size text: digits before and after the first `/`.
///
/// `110/145` sorts as `(110, 145)`, so `20/63` comes before `110/145` even
/// though it does not lexically. Non-digit characters are ignored.
pub fn size_sort_key(size_text: &str) -> (u64, u64) {
    let mut parts = size_text.split('/');
    let first = parts.next().map(digits_value).unwrap_or(0);
    let second = parts.next().map(digits_value).unwrap_or(0);
    (first, second)
}

fn digits_value(part: &str) -> u64 {
    let digits: String = part.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Discount percentage in effect for a size item.
pub fn effective_discount(item_discount: Option<f64>, line_discount: f64) -> f64 {
    item_discount.unwrap_or(line_discount)
}

/// Whether the price is hidden for a size item.
pub fn effective_hide_price(item_hide: Option<bool>, line_hide: bool) -> bool {
    item_hide.unwrap_or(line_hide)
}

/// Price after discount, rounded to two decimals. Zero when there is no price.
pub fn display_price(price: f64, discount_percent: f64) -> f64 {
    if price == 0.0 || !price.is_finite() {
        return 0.0;
    }
    let value = if discount_percent > 0.0 {
        price * (1.0 - discount_percent / 100.0)
    } else {
        price
    };
    round2(value)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// URL segment derived from a size text when none is given.
pub fn default_size_slug(size_text: &str) -> String {
    size_text.trim().replace(['/', ' '], "_")
}

/// Display name of a size item: product line name followed by the size text.
pub fn size_full_name(line_name: &str, size_text: &str) -> String {
    let line_name = line_name.trim();
    if line_name.is_empty() {
        size_text.trim().to_string()
    } else {
        format!("{line_name} {}", size_text.trim())
    }
}

/// Sort any slice of items by the numeric key of their size text.
pub fn sort_by_size<T>(items: &mut [T], size_text: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| size_sort_key(size_text(item)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_is_numeric() {
        assert_eq!(size_sort_key("110/145"), (110, 145));
        assert_eq!(size_sort_key("25"), (25, 0));
        assert_eq!(size_sort_key("32/75 Плюс"), (32, 75));
        assert_eq!(size_sort_key("по запросу"), (0, 0));
    }

    #[test]
    fn sort_by_size_orders_numerically() {
        let mut sizes = vec!["110/145", "20/63", "32/75", "32/63"];
        sort_by_size(&mut sizes, |s| s);
        assert_eq!(sizes, vec!["20/63", "32/63", "32/75", "110/145"]);
    }

    #[test]
    fn item_overrides_line() {
        assert_eq!(effective_discount(Some(5.0), 10.0), 5.0);
        assert_eq!(effective_discount(None, 10.0), 10.0);
        assert_eq!(effective_discount(Some(0.0), 10.0), 0.0);
        assert!(effective_hide_price(None, true));
        assert!(!effective_hide_price(Some(false), true));
    }

    #[test]
    fn display_price_applies_discount() {
        assert_eq!(display_price(1000.0, 0.0), 1000.0);
        assert_eq!(display_price(1000.0, 15.0), 850.0);
        assert_eq!(display_price(99.99, 10.0), 89.99);
        assert_eq!(display_price(0.0, 50.0), 0.0);
    }

    #[test]
    fn size_slug_and_name() {
        assert_eq!(default_size_slug("32/75 Плюс"), "32_75_Плюс");
        assert_eq!(default_size_slug("25"), "25");
        assert_eq!(size_full_name("Изопрофлекс", "32/75"), "Изопрофлекс 32/75");
        assert_eq!(size_full_name("", "32/75"), "32/75");
    }
}

//! Formatting primitives for skill descriptions.
//!
//! Pure string helpers shared by every converter: pluralization,
//! ordinals, list joining, minimal-precision multipliers, thousands
//! separators, and reduced fractions. No state, no I/O.

/// Pluralize a noun based on a count ("turn" -> "turns").
pub fn pluralize(noun: &str, count: i64) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

/// Pluralize a verb based on its subject count ("change" -> "changes").
///
/// English verbs conjugate the opposite way from nouns: a single
/// subject takes the -s form.
pub fn pluralize_verb(verb: &str, count: i64) -> String {
    if count == 1 {
        format!("{}s", verb)
    } else {
        verb.to_string()
    }
}

/// Render a count with its pluralized noun ("3 turns", "1 turn").
pub fn noun_count(noun: &str, count: i64) -> String {
    format!("{} {}", count, pluralize(noun, count))
}

/// Render a count or a count range with its pluralized noun.
///
/// A range collapses to a single count when the bounds agree;
/// otherwise the noun pluralizes on the upper bound ("1~3 turns").
pub fn noun_count_range(noun: &str, count: i64, max: Option<i64>) -> String {
    match max {
        Some(max) if max != count => format!("{}~{} {}", count, max, pluralize(noun, max)),
        _ => noun_count(noun, count),
    }
}

/// Render a fractional amount with its pluralized noun ("1.5 seconds").
pub fn noun_count_fmt(noun: &str, amount: f64) -> String {
    let plural = if amount == 1.0 { noun.to_string() } else { format!("{}s", noun) };
    format!("{} {}", fmt_mult(amount), plural)
}

/// English ordinal: 1 -> "1st", 2 -> "2nd", 11 -> "11th".
pub fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Prefix a noun with its indefinite article ("a cross", "an orb").
pub fn indef_article(noun: &str) -> String {
    let article = match noun.chars().next() {
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => "an",
        _ => "a",
    };
    format!("{} {}", article, noun)
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Format a multiplier with minimal precision: round to two decimal
/// places and drop trailing zeros ("2", "1.5", "0.25").
pub fn fmt_mult(x: f64) -> String {
    let rounded = (x * 100.0).round() / 100.0;
    let mut s = format!("{:.2}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Format an integer with thousands separators ("1,234,567").
pub fn fmt_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Join items into an English list with a conjunction.
///
/// Empty items are dropped. One item stands alone, two are joined
/// with the bare conjunction, three or more get an Oxford comma.
pub fn concat_list<I, S>(items: I, conj: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        2 => format!("{} {} {}", items[0], conj, items[1]),
        _ => {
            let (last, rest) = items.split_last().unwrap();
            format!("{}, {} {}", rest.join(", "), conj, last)
        }
    }
}

/// Join items into an English "and" list ("A, B, and C").
pub fn concat_list_and<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    concat_list(items, "and")
}

/// Format a value range, collapsing to a single value when the
/// bounds agree ("1~5", "3").
pub fn minmax(min: f64, max: f64) -> String {
    if min == max {
        fmt_mult(max)
    } else {
        format!("{}~{}", fmt_mult(min), fmt_mult(max))
    }
}

/// Render `numer/denom` as a fully reduced fraction ("2/6" -> "1/3").
///
/// Integral results drop the denominator entirely.
pub fn reduced_fraction(numer: u64, denom: u64) -> String {
    let g = gcd(numer, denom);
    let (n, d) = (numer / g, denom / g);
    if d == 1 {
        n.to_string()
    } else {
        format!("{}/{}", n, d)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a.max(1)
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("turn", 1), "turn");
        assert_eq!(pluralize("turn", 2), "turns");
        assert_eq!(pluralize("turn", 0), "turns");
        assert_eq!(pluralize_verb("change", 1), "changes");
        assert_eq!(pluralize_verb("change", 3), "change");
    }

    #[test]
    fn test_noun_count() {
        assert_eq!(noun_count("turn", 1), "1 turn");
        assert_eq!(noun_count("turn", 5), "5 turns");
        assert_eq!(noun_count_range("turn", 1, Some(3)), "1~3 turns");
        assert_eq!(noun_count_range("turn", 2, Some(2)), "2 turns");
        assert_eq!(noun_count_range("turn", 2, None), "2 turns");
        assert_eq!(noun_count_fmt("second", 1.0), "1 second");
        assert_eq!(noun_count_fmt("second", 2.5), "2.5 seconds");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(102), "102nd");
    }

    #[test]
    fn test_indef_article() {
        assert_eq!(indef_article("cross"), "a cross");
        assert_eq!(indef_article("orb"), "an orb");
        assert_eq!(indef_article("square"), "a square");
    }

    #[test]
    fn test_fmt_mult() {
        assert_eq!(fmt_mult(2.0), "2");
        assert_eq!(fmt_mult(1.5), "1.5");
        assert_eq!(fmt_mult(0.25), "0.25");
        assert_eq!(fmt_mult(100.0), "100");
        assert_eq!(fmt_mult(12.345), "12.35");
        assert_eq!(fmt_mult(1.10), "1.1");
    }

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(1000), "1,000");
        assert_eq!(fmt_thousands(1234567), "1,234,567");
        assert_eq!(fmt_thousands(-42000), "-42,000");
    }

    #[test]
    fn test_concat_list() {
        let empty: Vec<&str> = vec![];
        assert_eq!(concat_list_and(empty), "");
        assert_eq!(concat_list_and(["Fire"]), "Fire");
        assert_eq!(concat_list_and(["Fire", "Water"]), "Fire and Water");
        assert_eq!(
            concat_list_and(["Fire", "Water", "Wood"]),
            "Fire, Water, and Wood"
        );
        assert_eq!(concat_list(["1) A", "2) B"], "or"), "1) A or 2) B");
        // Empty entries are dropped before joining.
        assert_eq!(concat_list_and(["Fire", "", "Wood"]), "Fire and Wood");
    }

    #[test]
    fn test_minmax() {
        assert_eq!(minmax(1.0, 5.0), "1~5");
        assert_eq!(minmax(3.0, 3.0), "3");
        assert_eq!(minmax(1.5, 2.25), "1.5~2.25");
    }

    #[test]
    fn test_reduced_fraction() {
        assert_eq!(reduced_fraction(2, 6), "1/3");
        assert_eq!(reduced_fraction(1, 2), "1/2");
        assert_eq!(reduced_fraction(4, 4), "1");
        assert_eq!(reduced_fraction(3, 9), "1/3");
    }

    proptest! {
        #[test]
        fn noun_count_singular_only_at_one(count in 0i64..10_000) {
            let text = noun_count("turn", count);
            prop_assert_eq!(text.ends_with("turns"), count != 1);
        }

        #[test]
        fn ordinal_always_suffixed(n in 1i64..100_000) {
            let text = ordinal(n);
            prop_assert!(text.starts_with(&n.to_string()));
            let suffix = &text[n.to_string().len()..];
            prop_assert!(["st", "nd", "rd", "th"].contains(&suffix));
        }

        #[test]
        fn fmt_mult_never_trailing_zero(x in 0.0f64..10_000.0) {
            let text = fmt_mult(x);
            prop_assert!(!text.contains('.') || !text.ends_with('0'));
            prop_assert!(!text.ends_with('.'));
        }

        #[test]
        fn fraction_reduction_is_stable(n in 1u64..500, d in 1u64..500, k in 1u64..20) {
            // Scaling numerator and denominator together cannot change
            // the reduced form.
            prop_assert_eq!(reduced_fraction(n, d), reduced_fraction(n * k, d * k));
        }
    }
}

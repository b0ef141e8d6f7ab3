/// Formats a query for diagnostics, cutting it after a few hundred bytes.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_at_boundary(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate_at_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
